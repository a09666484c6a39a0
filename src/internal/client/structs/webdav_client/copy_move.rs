use reqwest::StatusCode;
use tracing::debug;

use super::WebDavClient;
use crate::client::RequestContext;
use crate::error::WebDavError;
use crate::internal::path::path_resolver::{normalize, parent};
use crate::internal::webdav::enums::{Overwrite, WebDavMethod};
use crate::internal::webdav::functions::request_builder;

impl WebDavClient {
    /// 复制 `src` 到 `dst`。
    ///
    /// `overwrite` 为 false 且目标已存在时，服务端返回 412，以 Conflict 原样返回；
    /// 需要覆盖时由调用方显式传 true 再试。
    pub async fn copy(
        &self,
        ctx: &RequestContext,
        src: &str,
        dst: &str,
        overwrite: bool,
    ) -> Result<(), WebDavError> {
        self.copy_move(ctx, WebDavMethod::COPY, "Copy", src, dst, overwrite)
            .await
    }

    /// 移动 / 重命名，语义同 [`WebDavClient::copy`]，成功后 `src` 不再存在
    pub async fn rename(
        &self,
        ctx: &RequestContext,
        src: &str,
        dst: &str,
        overwrite: bool,
    ) -> Result<(), WebDavError> {
        self.copy_move(ctx, WebDavMethod::MOVE, "Rename", src, dst, overwrite)
            .await
    }

    async fn copy_move(
        &self,
        ctx: &RequestContext,
        method: WebDavMethod,
        operation: &'static str,
        src: &str,
        dst: &str,
        overwrite: bool,
    ) -> Result<(), WebDavError> {
        let src = normalize(src);
        let dst = normalize(dst);

        let status = self
            .send_copy_move(ctx, method, operation, &src, &dst, overwrite)
            .await?;
        if status != Some(StatusCode::CONFLICT) {
            return Ok(());
        }

        // 409：目标的上级目录不存在，建好后只重试一次
        debug!(%src, %dst, "目标父目录缺失，创建后重试");
        self.mkdir_all(ctx, &parent(&dst), 0).await?;

        match self
            .send_copy_move(ctx, method, operation, &src, &dst, overwrite)
            .await?
        {
            None => Ok(()),
            Some(status) => Err(WebDavError::status(operation, &src, status)),
        }
    }

    /// 成功返回 None；409 交给调用方决定是否重试，其余失败直接返回错误
    async fn send_copy_move(
        &self,
        ctx: &RequestContext,
        method: WebDavMethod,
        operation: &'static str,
        src: &str,
        dst: &str,
        overwrite: bool,
    ) -> Result<Option<StatusCode>, WebDavError> {
        let request = request_builder::copy_move(
            method,
            self.url(src, false),
            &self.url(dst, false),
            Overwrite::from(overwrite),
        )?;

        let response = self.send(ctx, operation, src, request).await?;
        match response.status() {
            StatusCode::MULTI_STATUS => {
                self.check_multi_status(ctx, operation, src, response, false)
                    .await?;
                Ok(None)
            }
            s if s.is_success() => Ok(None),
            StatusCode::CONFLICT => Ok(Some(StatusCode::CONFLICT)),
            s => Err(WebDavError::status(operation, src, s)),
        }
    }
}
