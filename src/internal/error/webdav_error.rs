//! 客户端对外唯一的错误类型。
//!
//! 每个变体都带着操作名与路径，方便排查；调用方通过 [`WebDavError::kind`] 做分支。

use reqwest::StatusCode;
use thiserror::Error;

use super::error_kind::{classify_status, ErrorKind};
use super::transport_error::TransportError;

#[derive(Debug, Error)]
pub enum WebDavError {
    #[error("{operation} {path} 失败: HTTP {status}")]
    Status {
        operation: &'static str,
        path: String,
        status: StatusCode,
    },

    #[error("{operation} {path} 失败: 资源不存在")]
    NotFound {
        operation: &'static str,
        path: String,
    },

    #[error("{operation} {path} 响应格式异常: {message}")]
    Protocol {
        operation: &'static str,
        path: String,
        message: String,
    },

    #[error("{operation} {path} 网络请求失败: {source}")]
    Transport {
        operation: &'static str,
        path: String,
        #[source]
        source: TransportError,
    },

    #[error("请求已被取消")]
    Cancelled,

    #[error("请求超过截止时间")]
    DeadlineExceeded,

    #[error("URL 格式错误: {0}")]
    InvalidUrl(String),

    #[error("请求头不合法: {0}")]
    InvalidHeader(String),

    #[error("HTTP 客户端初始化失败: {0}")]
    ClientInit(String),
}

impl WebDavError {
    pub(crate) fn status(
        operation: &'static str,
        path: &str,
        status: StatusCode,
    ) -> Self {
        WebDavError::Status {
            operation,
            path: path.to_string(),
            status,
        }
    }

    pub(crate) fn protocol(
        operation: &'static str,
        path: &str,
        message: impl Into<String>,
    ) -> Self {
        WebDavError::Protocol {
            operation,
            path: path.to_string(),
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            WebDavError::Status { status, .. } => classify_status(*status),
            WebDavError::NotFound { .. } => ErrorKind::NotFound,
            WebDavError::Protocol { .. } => ErrorKind::Protocol,
            WebDavError::Transport { .. }
            | WebDavError::Cancelled
            | WebDavError::DeadlineExceeded => ErrorKind::Transport,
            WebDavError::InvalidUrl(_)
            | WebDavError::InvalidHeader(_)
            | WebDavError::ClientInit(_) => ErrorKind::InvalidInput,
        }
    }

    /// 服务端返回的原始状态码（若有）。
    pub fn status_code(&self) -> Option<StatusCode> {
        match self {
            WebDavError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// 出错的远程路径（若有）。
    pub fn path(&self) -> Option<&str> {
        match self {
            WebDavError::Status { path, .. }
            | WebDavError::NotFound { path, .. }
            | WebDavError::Protocol { path, .. }
            | WebDavError::Transport { path, .. } => Some(path),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    pub fn is_conflict(&self) -> bool {
        self.kind() == ErrorKind::Conflict
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, WebDavError::Cancelled)
    }

    pub fn is_timeout(&self) -> bool {
        match self {
            WebDavError::DeadlineExceeded => true,
            WebDavError::Transport { source, .. } => source.is_timeout(),
            _ => false,
        }
    }
}

/// 判断错误是否表示“资源不存在”。
pub fn is_not_found(err: &WebDavError) -> bool {
    err.is_not_found()
}

/// `ReadStream` 转成 `AsyncRead` 时需要 io::Error
impl From<WebDavError> for std::io::Error {
    fn from(err: WebDavError) -> Self {
        let kind = match err.kind() {
            ErrorKind::NotFound => std::io::ErrorKind::NotFound,
            ErrorKind::Forbidden | ErrorKind::Unauthorized => {
                std::io::ErrorKind::PermissionDenied
            }
            ErrorKind::InvalidInput => std::io::ErrorKind::InvalidInput,
            ErrorKind::Protocol => std::io::ErrorKind::InvalidData,
            _ if err.is_timeout() => std::io::ErrorKind::TimedOut,
            ErrorKind::Transport if err.is_cancelled() => {
                std::io::ErrorKind::Interrupted
            }
            _ => std::io::ErrorKind::Other,
        };
        std::io::Error::new(kind, err)
    }
}
