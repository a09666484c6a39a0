//! 传输层错误，由 [`crate::transport::Transport`] 的实现返回。

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP 请求失败: {0}")]
    Request(#[from] reqwest::Error),

    #[error("读取响应体失败: {0}")]
    Body(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl TransportError {
    pub fn is_timeout(&self) -> bool {
        match self {
            TransportError::Request(e) => e.is_timeout(),
            TransportError::Body(e) => e.kind() == std::io::ErrorKind::TimedOut,
            TransportError::Other(_) => false,
        }
    }
}
