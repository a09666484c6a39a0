//! 错误分类：HTTP 状态码与传输失败统一收敛为 [`ErrorKind`]，调用方只需匹配种类。

pub mod error_kind;
pub mod transport_error;
pub mod webdav_error;

pub use error_kind::{classify_status, ErrorKind};
pub use transport_error::TransportError;
pub use webdav_error::{is_not_found, WebDavError};
