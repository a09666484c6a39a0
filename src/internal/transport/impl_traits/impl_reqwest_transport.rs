use async_trait::async_trait;
use futures_util::TryStreamExt;
use reqwest::{Body, Client};

use crate::client::ClientConfig;
use crate::error::{TransportError, WebDavError};
use crate::internal::transport::structs::{
    RequestBody, TransportResponse, WebDavRequest,
};
use crate::internal::transport::traits::transport::Transport;

/// 基于 reqwest 的默认传输层。`reqwest::Client` 内部是 Arc，克隆很便宜。
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(config: &ClientConfig) -> Result<Self, WebDavError> {
        // config.headers 由客户端逐个请求合并，注入的自定义传输同样生效
        let mut builder =
            Client::builder().user_agent(config.user_agent.as_str());

        if config.http1_only {
            builder = builder.http1_only();
        }
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = config.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| WebDavError::ClientInit(e.to_string()))?;

        Ok(Self { client })
    }

    /// 复用调用方已有的 reqwest 客户端
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(
        &self,
        request: WebDavRequest,
    ) -> Result<TransportResponse, TransportError> {
        let WebDavRequest { method, url, headers, body } = request;

        let mut builder = self.client.request(method, url).headers(headers);
        builder = match body {
            RequestBody::Empty => builder,
            RequestBody::Bytes(bytes) => builder.body(bytes),
            RequestBody::Stream(stream) => builder.body(Body::wrap_stream(stream)),
        };

        let res = builder.send().await?;

        let status = res.status();
        let headers = res.headers().clone();
        let body = res.bytes_stream().map_err(TransportError::from);

        Ok(TransportResponse::new(status, headers, Box::pin(body)))
    }
}
