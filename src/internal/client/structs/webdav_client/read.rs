use bytes::Bytes;
use reqwest::StatusCode;
use tracing::debug;

use super::WebDavClient;
use crate::client::RequestContext;
use crate::error::WebDavError;
use crate::internal::path::path_resolver::normalize;
use crate::internal::webdav::functions::request_builder;
use crate::remote_file::ReadStream;

impl WebDavClient {
    /// 读取整个文件到内存
    pub async fn read(&self, ctx: &RequestContext, path: &str) -> Result<Bytes, WebDavError> {
        self.read_stream(ctx, path).await?.bytes().await
    }

    /// 以流的方式读取文件。
    ///
    /// 返回的 [`ReadStream`] 持有底层连接，读完、`close()` 或 drop 后释放；
    /// 读取过程同样受 `ctx` 的取消与截止时间约束。
    pub async fn read_stream(
        &self,
        ctx: &RequestContext,
        path: &str,
    ) -> Result<ReadStream, WebDavError> {
        let path = normalize(path);
        let request = request_builder::get(self.url(&path, false), None)?;

        let response = self.send(ctx, "ReadStream", &path, request).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(WebDavError::status("ReadStream", &path, status));
        }

        Ok(ReadStream::new(&path, response.into_body(), ctx.interruption()))
    }

    /// 读取 `[offset, offset + length)`，length 为 0 时读到文件末尾。
    ///
    /// 服务端忽略 Range 直接返回 200 时，在客户端跳过前缀并截断，结果仍然是请求的那一段。
    pub async fn read_stream_range(
        &self,
        ctx: &RequestContext,
        path: &str,
        offset: u64,
        length: u64,
    ) -> Result<ReadStream, WebDavError> {
        let path = normalize(path);
        let request =
            request_builder::get(self.url(&path, false), Some((offset, length)))?;

        let response = self.send(ctx, "ReadStreamRange", &path, request).await?;
        let status = response.status();

        let stream = ReadStream::new(&path, response.into_body(), ctx.interruption());
        match status {
            StatusCode::PARTIAL_CONTENT => Ok(stream.window(0, length)),
            s if s.is_success() => {
                debug!(%path, offset, length, "服务端忽略了 Range，改为客户端截取");
                Ok(stream.window(offset, length))
            }
            s => Err(WebDavError::status("ReadStreamRange", &path, s)),
        }
    }
}
