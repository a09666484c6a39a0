use std::sync::Arc;

use super::structs::digest_challenge::DigestChallenge;

/// 对外可见的认证协商状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Unauthenticated,
    BasicNegotiated,
    DigestNegotiated,
}

/// 已协商的认证方案，缓存在客户端内部
#[derive(Debug, Clone, Default)]
pub enum AuthScheme {
    /// 尚未收到过 401，请求不带 Authorization
    #[default]
    Unauthenticated,
    Basic,
    /// Digest 挑战会被后续请求复用，nonce 计数器在挑战内部递增
    Digest(Arc<DigestChallenge>),
}

impl AuthScheme {
    pub fn state(&self) -> AuthState {
        match self {
            AuthScheme::Unauthenticated => AuthState::Unauthenticated,
            AuthScheme::Basic => AuthState::BasicNegotiated,
            AuthScheme::Digest(_) => AuthState::DigestNegotiated,
        }
    }
}

/// Digest 摘要算法（RFC 2617 / RFC 7616）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigestAlgorithm {
    Md5,
    Md5Sess,
    Sha256,
    Sha256Sess,
}

impl DigestAlgorithm {
    /// 未识别的算法返回 None，调用方据此放弃 Digest
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        match raw.map(|s| s.to_ascii_uppercase()).as_deref() {
            None | Some("MD5") => Some(DigestAlgorithm::Md5),
            Some("MD5-SESS") => Some(DigestAlgorithm::Md5Sess),
            Some("SHA-256") => Some(DigestAlgorithm::Sha256),
            Some("SHA-256-SESS") => Some(DigestAlgorithm::Sha256Sess),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DigestAlgorithm::Md5 => "MD5",
            DigestAlgorithm::Md5Sess => "MD5-sess",
            DigestAlgorithm::Sha256 => "SHA-256",
            DigestAlgorithm::Sha256Sess => "SHA-256-sess",
        }
    }

    pub fn is_session(&self) -> bool {
        matches!(self, DigestAlgorithm::Md5Sess | DigestAlgorithm::Sha256Sess)
    }
}
