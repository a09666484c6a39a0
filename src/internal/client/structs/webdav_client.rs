//! WebDAV 客户端
//!
//! 一个 [`WebDavClient`] 对应一个服务端根 URL 和一组账号，创建后长期复用，克隆很便宜。
//! 唯一的共享可变状态是已协商的认证方案缓存，所以同一个客户端上可以并发调用任意操作。
//!
//! ## 认证
//!
//! 第一次请求不带 `Authorization`；收到 401 后解析 `WWW-Authenticate`，
//! 优先 Digest、其次 Basic，立刻用选出的方案重试一次；重试没有被拒绝（401/403）才写入缓存。
//! 重试仍然 401 时直接返回 Unauthorized，不会再试。
//!
//! ## 内部实现说明
//!
//! 每个对外操作放在同名子模块里，都以 `impl WebDavClient` 的形式扩展本结构体；
//! 它们共用这里的 [`WebDavClient::send`] 与 PROPFIND 辅助方法。

mod connect;
mod copy_move;
mod mkdir;
mod read;
mod read_dir;
mod remove;
mod stat;
mod write;

use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use reqwest::header::{HeaderMap, AUTHORIZATION};
use reqwest::StatusCode;
use tracing::debug;
use url::Url;

use super::request_context::RequestContext;
use super::webdav_client_builder::WebDavClientBuilder;
use crate::auth::enums::{AuthScheme, AuthState};
use crate::auth::WebdavAuth;
use crate::error::WebDavError;
use crate::internal::path::path_resolver::resolve_url;
use crate::internal::transport::structs::{TransportResponse, WebDavRequest};
use crate::internal::webdav::enums::Depth;
use crate::internal::webdav::functions::request_builder;
use crate::remote_file::ResourceInfo;
use crate::transport::Transport;
use crate::webdav::functions::parse_multi_status::parse_multi_status;
use crate::webdav::traits::ToResourceInfo;

#[derive(Clone)]
pub struct WebDavClient {
    pub(crate) inner: Arc<ClientInner>,
}

pub(crate) struct ClientInner {
    pub(crate) base_url: Url,
    pub(crate) auth: WebdavAuth,
    pub(crate) default_headers: HeaderMap,
    pub(crate) transport: Arc<dyn Transport>,
}

impl WebDavClient {
    /// 使用默认配置创建客户端；用户名和密码都为空时匿名访问
    pub fn new(base_url: &str, username: &str, password: &str) -> Result<Self, WebDavError> {
        WebDavClientBuilder::new(base_url)
            .credentials(username, password)
            .build()
    }

    pub fn builder(base_url: &str) -> WebDavClientBuilder {
        WebDavClientBuilder::new(base_url)
    }

    /// 规范化后的根 URL，总以 `/` 结尾
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// 当前缓存的认证方案
    pub fn auth_state(&self) -> AuthState {
        self.inner.auth.state()
    }

    pub(crate) fn url(&self, path: &str, collection: bool) -> Url {
        resolve_url(&self.inner.base_url, path, collection)
    }

    /// 在上下文约束下发送请求，必要时完成一次认证重试。
    ///
    /// 只有传输失败、取消、超时会返回 Err；任何 HTTP 状态码都原样交给调用方判断。
    pub(crate) async fn send(
        &self,
        ctx: &RequestContext,
        operation: &'static str,
        path: &str,
        request: WebDavRequest,
    ) -> Result<TransportResponse, WebDavError> {
        ctx.run(self.exchange(operation, path, request)).await
    }

    async fn exchange(
        &self,
        operation: &'static str,
        path: &str,
        mut request: WebDavRequest,
    ) -> Result<TransportResponse, WebDavError> {
        for (name, value) in &self.inner.default_headers {
            if !request.headers.contains_key(name) {
                request.headers.insert(name.clone(), value.clone());
            }
        }

        let replay = request.try_clone();
        let scheme = self.inner.auth.cached_scheme();
        let first = self.attempt(operation, path, request, &scheme).await?;

        if first.status() != StatusCode::UNAUTHORIZED {
            return Ok(first);
        }

        let Some(negotiated) = self.inner.auth.negotiate(first.headers()) else {
            return Ok(first);
        };

        // 流式请求体已经发出去了，没法验证新方案，也就不写缓存
        let Some(retry) = replay else {
            debug!(operation, %path, "请求体不可重放，跳过认证重试");
            return Ok(first);
        };

        drop(first);
        let response = self.attempt(operation, path, retry, &negotiated).await?;

        // 账号被拒绝时保持原状态
        if !matches!(
            response.status(),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
        ) {
            self.inner.auth.commit(negotiated);
        }
        Ok(response)
    }

    async fn attempt(
        &self,
        operation: &'static str,
        path: &str,
        mut request: WebDavRequest,
        scheme: &AuthScheme,
    ) -> Result<TransportResponse, WebDavError> {
        let target = request.request_target();
        if let Some(value) = self.inner.auth.authorization(scheme, &request.method, &target)? {
            request.headers.insert(AUTHORIZATION, value);
        }

        let state = scheme.state();
        debug!(operation, %path, method = %request.method, url = %request.url, ?state, "发送请求");

        let response = self
            .inner
            .transport
            .execute(request)
            .await
            .map_err(|source| WebDavError::Transport {
                operation,
                path: path.to_string(),
                source,
            })?;

        debug!(operation, %path, status = %response.status(), "收到响应");
        Ok(response)
    }

    /// 读完响应体
    pub(crate) async fn read_body(
        &self,
        operation: &'static str,
        path: &str,
        response: TransportResponse,
    ) -> Result<Bytes, WebDavError> {
        response.bytes().await.map_err(|source| WebDavError::Transport {
            operation,
            path: path.to_string(),
            source,
        })
    }

    /// PROPFIND 并解析 multistatus；只接受 207
    pub(crate) async fn propfind(
        &self,
        ctx: &RequestContext,
        operation: &'static str,
        path: &str,
        depth: Depth,
    ) -> Result<Vec<ResourceInfo>, WebDavError> {
        let url = self.url(path, depth != Depth::Zero);
        let request = request_builder::propfind(url, depth)?;

        let response = self.send(ctx, operation, path, request).await?;
        let status = response.status();
        if status != StatusCode::MULTI_STATUS {
            return Err(WebDavError::status(operation, path, status));
        }

        let body = ctx.run(self.read_body(operation, path, response)).await?;
        let multi_status = parse_multi_status(&body)
            .map_err(|message| WebDavError::protocol(operation, path, message))?;

        Ok(multi_status.to_resource_info(&self.inner.base_url))
    }

    /// DELETE/COPY/MOVE 返回 207 时，把第一个失败成员转成错误
    pub(crate) async fn check_multi_status(
        &self,
        ctx: &RequestContext,
        operation: &'static str,
        path: &str,
        response: TransportResponse,
        tolerate_not_found: bool,
    ) -> Result<(), WebDavError> {
        let body = ctx.run(self.read_body(operation, path, response)).await?;
        let multi_status = parse_multi_status(&body)
            .map_err(|message| WebDavError::protocol(operation, path, message))?;

        match multi_status.first_failure(&self.inner.base_url, tolerate_not_found) {
            Some((member, status)) => Err(WebDavError::status(operation, &member, status)),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for WebDavClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebDavClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("auth", &self.inner.auth)
            .finish_non_exhaustive()
    }
}
