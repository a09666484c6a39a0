use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderName, HeaderValue};

use super::client_config::ClientConfig;
use super::webdav_client::{ClientInner, WebDavClient};
use crate::auth::WebdavAuth;
use crate::error::WebDavError;
use crate::internal::path::path_resolver::format_base_url;
use crate::internal::transport::impl_traits::impl_reqwest_transport::ReqwestTransport;
use crate::transport::Transport;

/// [`WebDavClient`] 构建器
///
/// ```rust,no_run
/// # use std::time::Duration;
/// # use webdav_client::client::WebDavClient;
/// let client = WebDavClient::builder("http://localhost:8080/dav")
///     .credentials("user", "password")
///     .timeout(Duration::from_secs(30))
///     .build()?;
/// # Ok::<(), webdav_client::error::WebDavError>(())
/// ```
pub struct WebDavClientBuilder {
    base_url: String,
    username: String,
    password: String,
    config: ClientConfig,
    transport: Option<Arc<dyn Transport>>,
    invalid_header: Option<String>,
}

impl WebDavClientBuilder {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            username: String::new(),
            password: String::new(),
            config: ClientConfig::default(),
            transport: None,
            invalid_header: None,
        }
    }

    /// 设置账号密码；不调用则匿名访问
    pub fn credentials(mut self, username: &str, password: &str) -> Self {
        self.username = username.to_string();
        self.password = password.to_string();
        self
    }

    /// 请求超时，None 表示不限
    pub fn timeout(mut self, timeout: impl Into<Option<Duration>>) -> Self {
        self.config.timeout = timeout.into();
        self
    }

    pub fn connect_timeout(mut self, timeout: impl Into<Option<Duration>>) -> Self {
        self.config.connect_timeout = timeout.into();
        self
    }

    pub fn user_agent(mut self, user_agent: &str) -> Self {
        self.config.user_agent = user_agent.to_string();
        self
    }

    pub fn http1_only(mut self, http1_only: bool) -> Self {
        self.config.http1_only = http1_only;
        self
    }

    /// 每个请求都附带的请求头；名称或值不合法时 `build()` 返回错误
    pub fn header(mut self, name: &str, value: &str) -> Self {
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => {
                self.config.headers.insert(name, value);
            }
            _ => {
                self.invalid_header.get_or_insert_with(|| name.to_string());
            }
        }
        self
    }

    /// 替换默认的 reqwest 传输
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn build(self) -> Result<WebDavClient, WebDavError> {
        if let Some(name) = self.invalid_header {
            return Err(WebDavError::InvalidHeader(name));
        }

        let base_url = format_base_url(&self.base_url)?;

        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new(&self.config)?),
        };

        Ok(WebDavClient {
            inner: Arc::new(ClientInner {
                base_url,
                auth: WebdavAuth::new(&self.username, &self.password),
                default_headers: self.config.headers,
                transport,
            }),
        })
    }
}
