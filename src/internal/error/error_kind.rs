use reqwest::StatusCode;

/// 错误种类，调用方据此分支（例如“是否不存在”）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// 404/410，或 PROPFIND 没有返回任何条目
    NotFound,
    /// 409/412：拒绝覆盖、父目录缺失
    Conflict,
    /// 403
    Forbidden,
    /// 认证重试一次后仍然是 401
    Unauthorized,
    /// XML 不合法或状态码形态不符合预期
    Protocol,
    /// 连接、超时、取消
    Transport,
    /// 调用方传入的 URL、请求头等不合法
    InvalidInput,
    /// 其余 4xx/5xx
    Other,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "not_found",
            ErrorKind::Conflict => "conflict",
            ErrorKind::Forbidden => "forbidden",
            ErrorKind::Unauthorized => "unauthorized",
            ErrorKind::Protocol => "protocol",
            ErrorKind::Transport => "transport",
            ErrorKind::InvalidInput => "invalid_input",
            ErrorKind::Other => "other",
        }
    }
}

/// 将非成功的 HTTP 状态码映射为错误种类。
///
/// 只在调用方已经判定“这个状态码对当前操作不算成功”之后使用，
/// 所以 1xx/2xx/3xx 出现在这里意味着服务端的响应形态不对，归为 `Protocol`。
pub fn classify_status(status: StatusCode) -> ErrorKind {
    match status {
        StatusCode::UNAUTHORIZED => ErrorKind::Unauthorized,
        StatusCode::FORBIDDEN => ErrorKind::Forbidden,
        StatusCode::NOT_FOUND | StatusCode::GONE => ErrorKind::NotFound,
        StatusCode::CONFLICT | StatusCode::PRECONDITION_FAILED => {
            ErrorKind::Conflict
        }
        s if s.is_client_error() || s.is_server_error() => ErrorKind::Other,
        _ => ErrorKind::Protocol,
    }
}
