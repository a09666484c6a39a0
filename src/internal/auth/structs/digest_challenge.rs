//! Digest 认证（RFC 2617，算法扩展见 RFC 7616）。
//!
//! 同一个挑战会被后续请求复用，直到服务端再次返回 401；
//! 每复用一次 nonce-count 加一，所以计数器放在挑战内部并用原子量保护。

use std::sync::atomic::{AtomicU32, Ordering};

use md5::Md5;
use sha2::{Digest, Sha256};
use tracing::warn;

use super::www_authenticate::Challenge;
use crate::internal::auth::enums::DigestAlgorithm;

#[derive(Debug)]
pub struct DigestChallenge {
    pub realm: String,
    pub nonce: String,
    pub opaque: Option<String>,
    pub algorithm: DigestAlgorithm,
    /// 服务端是否提供了 qop=auth；否则按 RFC 2069 兼容模式计算
    pub qop_auth: bool,
    nonce_count: AtomicU32,
}

impl DigestChallenge {
    /// 从解析后的挑战构造；缺少 nonce、算法不支持或只提供 auth-int 时返回 None
    pub fn from_challenge(challenge: &Challenge) -> Option<Self> {
        let nonce = challenge.param("nonce")?.to_string();
        let realm = challenge.param("realm").unwrap_or("").to_string();

        let Some(algorithm) = DigestAlgorithm::parse(challenge.param("algorithm"))
        else {
            warn!(
                algorithm = challenge.param("algorithm").unwrap_or(""),
                "不支持的 Digest 算法"
            );
            return None;
        };

        let qop_auth = match challenge.param("qop") {
            None => false,
            Some(qop) => {
                if !qop.split(',').any(|q| q.trim().eq_ignore_ascii_case("auth")) {
                    warn!(qop, "服务端只提供 auth-int，无法计算 Digest");
                    return None;
                }
                true
            }
        };

        Some(Self {
            realm,
            nonce,
            opaque: challenge.param("opaque").map(str::to_string),
            algorithm,
            qop_auth,
            nonce_count: AtomicU32::new(0),
        })
    }

    /// 为一次请求生成 `Authorization` 头的值
    pub fn authorization(
        &self,
        username: &str,
        password: &str,
        method: &str,
        uri: &str,
    ) -> String {
        let nc = self.nonce_count.fetch_add(1, Ordering::Relaxed) + 1;
        let cnonce = format!("{:016x}", rand::random::<u64>());
        self.authorization_with(username, password, method, uri, nc, &cnonce)
    }

    pub(crate) fn authorization_with(
        &self,
        username: &str,
        password: &str,
        method: &str,
        uri: &str,
        nc: u32,
        cnonce: &str,
    ) -> String {
        let response =
            self.compute_response(username, password, method, uri, nc, cnonce);

        let mut header = format!(
            "Digest username=\"{}\", realm=\"{}\", nonce=\"{}\", uri=\"{}\", algorithm={}, response=\"{}\"",
            quote(username),
            quote(&self.realm),
            quote(&self.nonce),
            quote(uri),
            self.algorithm.as_str(),
            response,
        );

        if self.qop_auth {
            header.push_str(&format!(", qop=auth, nc={nc:08x}"));
        }
        if self.qop_auth || self.algorithm.is_session() {
            header.push_str(&format!(", cnonce=\"{}\"", quote(cnonce)));
        }
        if let Some(opaque) = &self.opaque {
            header.push_str(&format!(", opaque=\"{}\"", quote(opaque)));
        }

        header
    }

    pub(crate) fn compute_response(
        &self,
        username: &str,
        password: &str,
        method: &str,
        uri: &str,
        nc: u32,
        cnonce: &str,
    ) -> String {
        let hash = |data: String| hex_digest(self.algorithm, &data);

        let mut ha1 = hash(format!("{username}:{}:{password}", self.realm));
        if self.algorithm.is_session() {
            ha1 = hash(format!("{ha1}:{}:{cnonce}", self.nonce));
        }
        let ha2 = hash(format!("{method}:{uri}"));

        if self.qop_auth {
            hash(format!("{ha1}:{}:{nc:08x}:{cnonce}:auth:{ha2}", self.nonce))
        } else {
            hash(format!("{ha1}:{}:{ha2}", self.nonce))
        }
    }
}

fn hex_digest(algorithm: DigestAlgorithm, data: &str) -> String {
    match algorithm {
        DigestAlgorithm::Md5 | DigestAlgorithm::Md5Sess => {
            format!("{:x}", Md5::digest(data.as_bytes()))
        }
        DigestAlgorithm::Sha256 | DigestAlgorithm::Sha256Sess => {
            format!("{:x}", Sha256::digest(data.as_bytes()))
        }
    }
}

fn quote(raw: &str) -> String {
    raw.replace('\\', "\\\\").replace('"', "\\\"")
}
