use async_trait::async_trait;

use crate::error::TransportError;
use crate::internal::transport::structs::{TransportResponse, WebDavRequest};

/// 执行一次 HTTP 交换：发出请求，拿回状态码、响应头与响应体流。
///
/// 实现方负责连接池、TLS、重定向；客户端除了 401 认证重试之外不会自动重试。
/// 取消通过丢弃返回的 future 完成，实现方不能在 drop 之后继续占用连接。
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(
        &self,
        request: WebDavRequest,
    ) -> Result<TransportResponse, TransportError>;
}
