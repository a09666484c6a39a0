use std::time::Duration;

use reqwest::header::HeaderMap;

/// 默认请求超时：60 秒
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// 默认连接超时：10 秒
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

pub const DEFAULT_USER_AGENT: &str =
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// 默认 HTTP 传输的配置，注入自定义传输时只有 `headers` 仍然生效。
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// 每个请求都附带的额外请求头
    pub headers: HeaderMap,
    pub user_agent: String,
    /// 部分 WebDAV 服务端对 HTTP/2 支持不好，默认只用 HTTP/1.1
    pub http1_only: bool,
    /// 整个请求（含读完响应体）的超时，None 表示不限
    pub timeout: Option<Duration>,
    pub connect_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            headers: HeaderMap::new(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            http1_only: true,
            timeout: Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            connect_timeout: Some(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS)),
        }
    }
}
