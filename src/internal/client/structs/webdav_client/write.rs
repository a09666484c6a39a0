use bytes::Bytes;
use reqwest::StatusCode;
use tokio::io::AsyncRead;
use tokio_util::io::ReaderStream;
use tracing::debug;

use super::WebDavClient;
use crate::auth::enums::AuthState;
use crate::client::RequestContext;
use crate::error::WebDavError;
use crate::internal::path::path_resolver::{normalize, parent};
use crate::internal::transport::structs::RequestBody;
use crate::internal::webdav::functions::request_builder;

fn put_succeeded(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::OK | StatusCode::CREATED | StatusCode::NO_CONTENT
    )
}

fn parent_missing(status: StatusCode) -> bool {
    matches!(status, StatusCode::NOT_FOUND | StatusCode::CONFLICT)
}

impl WebDavClient {
    /// 上传整块数据。
    ///
    /// `mode` 只为和本地文件系统接口对齐，HTTP 上没有权限位，服务端不会执行它。
    /// 父目录不存在（PUT 返回 404/409）时先逐级创建父目录，再重试一次。
    pub async fn write(
        &self,
        ctx: &RequestContext,
        path: &str,
        data: impl Into<Bytes>,
        mode: u32,
    ) -> Result<(), WebDavError> {
        let path = normalize(path);
        let data = data.into();

        let status = self.put(ctx, &path, RequestBody::Bytes(data.clone())).await?;
        if put_succeeded(status) {
            return Ok(());
        }
        if !parent_missing(status) {
            return Err(WebDavError::status("Write", &path, status));
        }

        debug!(%path, %status, "父目录不存在，创建后重试");
        self.mkdir_all(ctx, &parent(&path), mode).await?;

        let status = self.put(ctx, &path, RequestBody::Bytes(data)).await?;
        if put_succeeded(status) {
            Ok(())
        } else {
            Err(WebDavError::status("Write", &path, status))
        }
    }

    /// 流式上传，`source` 只会被读取一次。
    ///
    /// 流式请求体无法重放，所以会先创建父目录，并在尚未协商认证时用 OPTIONS 触发一次挑战。
    pub async fn write_stream<R>(
        &self,
        ctx: &RequestContext,
        path: &str,
        source: R,
        mode: u32,
    ) -> Result<(), WebDavError>
    where
        R: AsyncRead + Send + Sync + 'static,
    {
        let path = normalize(path);

        let dir = parent(&path);
        if dir != "/" {
            self.mkdir_all(ctx, &dir, mode).await?;
        }

        if self.inner.auth.has_credentials() && self.auth_state() == AuthState::Unauthenticated {
            let probe = request_builder::options(self.url(&dir, true));
            // 只为拿到 WWW-Authenticate，状态码不重要
            drop(self.send(ctx, "WriteStream", &path, probe).await?);
        }

        let body = RequestBody::Stream(Box::pin(ReaderStream::new(source)));
        let status = self.put(ctx, &path, body).await?;
        if put_succeeded(status) {
            Ok(())
        } else {
            Err(WebDavError::status("WriteStream", &path, status))
        }
    }

    async fn put(
        &self,
        ctx: &RequestContext,
        path: &str,
        body: RequestBody,
    ) -> Result<StatusCode, WebDavError> {
        let request = request_builder::put(self.url(path, false), body);
        let response = self.send(ctx, "Write", path, request).await?;
        Ok(response.status())
    }
}
