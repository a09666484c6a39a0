use reqwest::Method;

use crate::error::WebDavError;

/// WebDAV 扩展的 HTTP 方法；GET/PUT/DELETE 直接使用 [`Method`] 常量
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebDavMethod {
    PROPFIND,
    MKCOL,
    COPY,
    MOVE,
}

impl WebDavMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            WebDavMethod::PROPFIND => "PROPFIND",
            WebDavMethod::MKCOL => "MKCOL",
            WebDavMethod::COPY => "COPY",
            WebDavMethod::MOVE => "MOVE",
        }
    }

    pub fn to_head_method(&self) -> Result<Method, WebDavError> {
        Method::from_bytes(self.as_str().as_bytes())
            .map_err(|e| WebDavError::InvalidHeader(e.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Depth {
    /// 仅返回当前资源
    Zero,
    /// 返回当前资源及直接子资源
    One,
    /// 返回当前资源及所有子资源（谨慎使用）
    Infinity,
}

impl Depth {
    pub fn as_str(&self) -> &'static str {
        match self {
            Depth::Zero => "0",
            Depth::One => "1",
            Depth::Infinity => "infinity",
        }
    }
}

/// COPY/MOVE 的 `Overwrite` 头
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overwrite {
    /// `T`：目标存在时覆盖
    Replace,
    /// `F`：目标存在时服务端返回 412
    Refuse,
}

impl Overwrite {
    pub fn as_str(&self) -> &'static str {
        match self {
            Overwrite::Replace => "T",
            Overwrite::Refuse => "F",
        }
    }
}

impl From<bool> for Overwrite {
    fn from(overwrite: bool) -> Self {
        if overwrite {
            Overwrite::Replace
        } else {
            Overwrite::Refuse
        }
    }
}
