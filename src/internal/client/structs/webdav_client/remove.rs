use reqwest::StatusCode;

use super::WebDavClient;
use crate::client::RequestContext;
use crate::error::WebDavError;
use crate::internal::path::path_resolver::normalize;
use crate::internal::webdav::enums::Depth;
use crate::internal::webdav::functions::request_builder;

impl WebDavClient {
    /// 删除单个资源；资源不存在视为成功，重复调用结果相同
    pub async fn remove(&self, ctx: &RequestContext, path: &str) -> Result<(), WebDavError> {
        self.delete(ctx, "Remove", path, None, &[StatusCode::NOT_FOUND])
            .await
    }

    /// 递归删除（`Depth: infinity`，由服务端完成递归）。
    ///
    /// 路径或其上级不存在都视为成功，“没有东西可删” 永远不是错误。
    pub async fn remove_all(&self, ctx: &RequestContext, path: &str) -> Result<(), WebDavError> {
        self.delete(
            ctx,
            "RemoveAll",
            path,
            Some(Depth::Infinity),
            &[StatusCode::NOT_FOUND, StatusCode::CONFLICT],
        )
        .await
    }

    async fn delete(
        &self,
        ctx: &RequestContext,
        operation: &'static str,
        path: &str,
        depth: Option<Depth>,
        absorbed: &[StatusCode],
    ) -> Result<(), WebDavError> {
        let path = normalize(path);
        if path == "/" {
            return Err(WebDavError::InvalidUrl("不允许删除根目录".to_string()));
        }

        let request = request_builder::delete(self.url(&path, false), depth);
        let response = self.send(ctx, operation, &path, request).await?;

        match response.status() {
            StatusCode::MULTI_STATUS => {
                self.check_multi_status(ctx, operation, &path, response, true)
                    .await
            }
            s if s.is_success() || absorbed.contains(&s) => Ok(()),
            s => Err(WebDavError::status(operation, &path, s)),
        }
    }
}
