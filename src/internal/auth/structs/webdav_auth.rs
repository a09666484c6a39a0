use core::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use base64::Engine;
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Method,
};
use sha2::{Digest, Sha256};
use tracing::{info, warn};

use super::digest_challenge::DigestChallenge;
use super::www_authenticate::challenges_from_headers;
use crate::error::WebDavError;
use crate::internal::auth::enums::{AuthScheme, AuthState};

/// 认证结构体
///
/// 该结构体定位
/// - 保存账号密码，决定发往服务端的 `Authorization` 头
/// - 缓存已协商的认证方案（Basic / Digest），客户端的所有并发请求共享同一个槽位
///
/// 默认Eq时会匹配token，如果需要单独比较token，需使用eq_only_token方法
#[derive(Clone)]
pub struct WebdavAuth {
    credentials: Option<Arc<Credentials>>, // 匿名访问时为 None
    pub(crate) encrypted_token: Arc<String>, // 对外导出时，不允许直接访问，哪怕它是被加密的
    scheme: Arc<RwLock<AuthScheme>>,
}

struct Credentials {
    username: String,
    password: String,
}

impl WebdavAuth {
    /// 创建新的认证结构体；用户名和密码都为空时视为匿名访问
    pub fn new(username: &str, password: &str) -> Self {
        if username.is_empty() && password.is_empty() {
            return Self::anonymous();
        }

        let token = base64::engine::general_purpose::STANDARD
            .encode(format!("{username}:{password}"));

        Self {
            credentials: Some(Arc::new(Credentials {
                username: username.to_string(),
                password: password.to_string(),
            })),
            encrypted_token: Arc::new(Self::_encrypt_str(&token)),
            scheme: Arc::new(RwLock::new(AuthScheme::Unauthenticated)),
        }
    }

    /// 匿名访问，收到 401 时不会重试
    pub fn anonymous() -> Self {
        Self {
            credentials: None,
            encrypted_token: Arc::new(String::new()),
            scheme: Arc::new(RwLock::new(AuthScheme::Unauthenticated)),
        }
    }

    /// 仅比较token是否相等
    pub fn eq_only_token(&self, other: &Self) -> bool {
        self.encrypted_token == other.encrypted_token
    }

    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    /// 当前协商状态
    pub fn state(&self) -> AuthState {
        self.cached_scheme().state()
    }

    /// 读取缓存的方案（快照），锁中毒时沿用内部值
    pub(crate) fn cached_scheme(&self) -> AuthScheme {
        self.scheme
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// 根据 401 响应头选出新方案：优先 Digest，其次 Basic。
    ///
    /// 只返回方案，不写缓存；调用方用它做那一次重试，服务端接受后再 [`Self::commit`]。
    pub(crate) fn negotiate(&self, headers: &HeaderMap) -> Option<AuthScheme> {
        self.credentials.as_ref()?;

        let challenges = challenges_from_headers(headers);

        let digest = challenges
            .iter()
            .filter(|c| c.scheme == "digest")
            .find_map(DigestChallenge::from_challenge);

        let negotiated = match digest {
            Some(challenge) => AuthScheme::Digest(Arc::new(challenge)),
            None if challenges.iter().any(|c| c.scheme == "basic") => {
                AuthScheme::Basic
            }
            None => {
                let schemes: Vec<&str> =
                    challenges.iter().map(|c| c.scheme.as_str()).collect();
                warn!(?schemes, "401 响应没有可用的认证方案");
                return None;
            }
        };

        Some(negotiated)
    }

    /// 重试被服务端接受后写入缓存，后续请求直接带上这个方案
    pub(crate) fn commit(&self, scheme: AuthScheme) {
        let state = scheme.state();
        let mut slot = self.scheme.write().unwrap_or_else(PoisonError::into_inner);
        *slot = scheme;
        info!(?state, "认证方案已协商");
    }

    /// 按给定方案生成 `Authorization` 头；未协商或匿名时返回 None
    pub(crate) fn authorization(
        &self,
        scheme: &AuthScheme,
        method: &Method,
        request_target: &str,
    ) -> Result<Option<HeaderValue>, WebDavError> {
        let Some(credentials) = self.credentials.as_ref() else {
            return Ok(None);
        };

        let raw = match scheme {
            AuthScheme::Unauthenticated => return Ok(None),
            AuthScheme::Basic => {
                let token = base64::engine::general_purpose::STANDARD.encode(
                    format!("{}:{}", credentials.username, credentials.password),
                );
                format!("Basic {token}")
            }
            AuthScheme::Digest(challenge) => challenge.authorization(
                &credentials.username,
                &credentials.password,
                method.as_str(),
                request_target,
            ),
        };

        let mut value = HeaderValue::from_str(&raw)
            .map_err(|e| WebDavError::InvalidHeader(e.to_string()))?;
        value.set_sensitive(true);
        Ok(Some(value))
    }

    fn _encrypt_str(data: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(data.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}

/// 用于比较认证结构体是否相等
impl PartialEq for WebdavAuth {
    fn eq(&self, other: &Self) -> bool {
        self.encrypted_token == other.encrypted_token
    }
}

/// 防止debug泄漏账号
impl fmt::Debug for WebdavAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebdavAuth")
            .field("credentials", &"<hidden>")
            .field("state", &self.state())
            .finish()
    }
}
