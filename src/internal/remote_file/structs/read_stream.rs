//! 流式读取的响应体。
//!
//! 单次、惰性、有限的字节序列；读完、调用 [`ReadStream::close`] 或直接 drop 都会释放底层连接。

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::{Buf, Bytes, BytesMut};
use futures_util::{Stream, StreamExt};
use tokio_util::io::StreamReader;

use crate::error::WebDavError;
use crate::internal::client::structs::request_context::Interruption;
use crate::internal::transport::structs::BodyStream;

pub struct ReadStream {
    path: String,
    body: Option<BodyStream>,
    interruption: Option<Interruption>,
    /// 服务端忽略 Range 返回 200 时，需要在客户端丢弃的前缀字节数
    skip: u64,
    /// 还允许产出的字节数，None 表示读到末尾
    remaining: Option<u64>,
}

impl ReadStream {
    pub(crate) fn new(path: &str, body: BodyStream, interruption: Interruption) -> Self {
        Self {
            path: path.to_string(),
            body: Some(body),
            interruption: Some(interruption),
            skip: 0,
            remaining: None,
        }
    }

    /// 在客户端截取 `[offset, offset + length)`，length 为 0 表示截到末尾
    pub(crate) fn window(mut self, offset: u64, length: u64) -> Self {
        self.skip = offset;
        self.remaining = (length > 0).then_some(length);
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// 是否已经读完或已经关闭
    pub fn is_finished(&self) -> bool {
        self.body.is_none()
    }

    /// 提前关闭，释放连接
    pub fn close(mut self) {
        self.release();
    }

    /// 读完剩余全部内容
    pub async fn bytes(mut self) -> Result<Bytes, WebDavError> {
        let mut buf = BytesMut::new();
        while let Some(chunk) = self.next().await {
            buf.extend_from_slice(&chunk?);
        }
        Ok(buf.freeze())
    }

    /// 适配成 tokio 的 `AsyncRead`
    pub fn into_async_read(self) -> StreamReader<Self, Bytes> {
        StreamReader::new(self)
    }

    fn release(&mut self) {
        self.body = None;
        self.interruption = None;
    }
}

impl Stream for ReadStream {
    type Item = Result<Bytes, WebDavError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        if let Some(interruption) = this.interruption.as_mut() {
            if let Poll::Ready(err) = interruption.as_mut().poll(cx) {
                this.release();
                return Poll::Ready(Some(Err(err)));
            }
        }

        loop {
            if this.remaining == Some(0) {
                this.release();
                return Poll::Ready(None);
            }

            let Some(body) = this.body.as_mut() else {
                return Poll::Ready(None);
            };

            let mut chunk = match body.as_mut().poll_next(cx) {
                Poll::Pending => return Poll::Pending,
                Poll::Ready(None) => {
                    this.release();
                    return Poll::Ready(None);
                }
                Poll::Ready(Some(Err(source))) => {
                    this.release();
                    return Poll::Ready(Some(Err(WebDavError::Transport {
                        operation: "ReadStream",
                        path: this.path.clone(),
                        source,
                    })));
                }
                Poll::Ready(Some(Ok(chunk))) => chunk,
            };

            if this.skip > 0 {
                let n = this.skip.min(chunk.len() as u64);
                chunk.advance(n as usize);
                this.skip -= n;
            }

            if let Some(remaining) = this.remaining.as_mut() {
                if chunk.len() as u64 > *remaining {
                    chunk.truncate(*remaining as usize);
                }
                *remaining -= chunk.len() as u64;
            }

            if !chunk.is_empty() {
                return Poll::Ready(Some(Ok(chunk)));
            }
        }
    }
}

impl std::fmt::Debug for ReadStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReadStream")
            .field("path", &self.path)
            .field("finished", &self.is_finished())
            .finish_non_exhaustive()
    }
}
