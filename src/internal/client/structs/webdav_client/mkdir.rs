use reqwest::StatusCode;
use tracing::debug;

use super::WebDavClient;
use crate::client::RequestContext;
use crate::error::WebDavError;
use crate::internal::path::path_resolver::{ancestors, normalize};
use crate::internal::webdav::functions::request_builder;

impl WebDavClient {
    /// 创建单个目录（MKCOL），目录已存在视为成功。
    ///
    /// 父目录不存在时服务端返回 409，这里用一次 `Depth: 0` PROPFIND 区分
    /// “目录其实已存在” 和 “父目录缺失”，后者以 Conflict 返回。`mode` 不会发往服务端。
    pub async fn mkdir(
        &self,
        ctx: &RequestContext,
        path: &str,
        _mode: u32,
    ) -> Result<(), WebDavError> {
        let path = normalize(path);
        if path == "/" {
            return Ok(());
        }

        let request = request_builder::mkcol(self.url(&path, true))?;
        let status = self.send(ctx, "Mkdir", &path, request).await?.status();

        match status {
            s if s.is_success() => Ok(()),
            StatusCode::METHOD_NOT_ALLOWED => Ok(()),
            StatusCode::CONFLICT => match self.stat(ctx, &path).await {
                Ok(info) if info.is_dir() => Ok(()),
                Err(err) if err.is_cancelled() || err.is_timeout() => Err(err),
                _ => Err(WebDavError::status("Mkdir", &path, status)),
            },
            s => Err(WebDavError::status("Mkdir", &path, s)),
        }
    }

    /// 从根到叶逐级创建目录，已存在的层级跳过。
    ///
    /// 遇到第一个真正的失败就停止并返回，已经建好的上级目录不会回滚。
    pub async fn mkdir_all(
        &self,
        ctx: &RequestContext,
        path: &str,
        mode: u32,
    ) -> Result<(), WebDavError> {
        for dir in ancestors(path) {
            debug!(%dir, "mkdir_all");
            self.mkdir(ctx, &dir, mode).await?;
        }
        Ok(())
    }
}
