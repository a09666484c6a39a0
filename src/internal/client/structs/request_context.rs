//! 请求上下文：每个操作都带一个，用来取消或限定截止时间。
//!
//! 上下文约束的是该操作的那一次 HTTP 交换（含一次认证重试）；
//! 对流式读取而言，还会约束后续读取响应体的过程。

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use tokio::time::{sleep_until, timeout_at, Instant};
use tokio_util::sync::CancellationToken;

use crate::error::WebDavError;

/// 取消或超时时完成的 future，由 [`crate::remote_file::ReadStream`] 持有
pub(crate) type Interruption = Pin<Box<dyn Future<Output = WebDavError> + Send>>;

#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl RequestContext {
    /// 不会被取消、没有截止时间的上下文
    pub fn background() -> Self {
        Self::default()
    }

    /// 绑定外部的取消令牌，调用 `token.cancel()` 即可中止操作
    pub fn with_cancellation(token: CancellationToken) -> Self {
        Self {
            token,
            deadline: None,
        }
    }

    /// 从现在起 `timeout` 之后过期
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_deadline(Instant::now() + timeout)
    }

    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            token: CancellationToken::new(),
            deadline: Some(deadline),
        }
    }

    /// 派生一个带截止时间的子上下文，父上下文取消时它也被取消
    pub fn child_with_timeout(&self, timeout: Duration) -> Self {
        let deadline = Instant::now() + timeout;
        Self {
            token: self.token.child_token(),
            deadline: Some(match self.deadline {
                Some(parent) => parent.min(deadline),
                None => deadline,
            }),
        }
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// 已取消或已过期时返回对应错误
    pub fn check(&self) -> Result<(), WebDavError> {
        if self.token.is_cancelled() {
            return Err(WebDavError::Cancelled);
        }
        if matches!(self.deadline, Some(d) if d <= Instant::now()) {
            return Err(WebDavError::DeadlineExceeded);
        }
        Ok(())
    }

    /// 在上下文约束下执行 future；取消或过期时立即丢弃它（连带中止进行中的请求）
    pub async fn run<F, T>(&self, fut: F) -> Result<T, WebDavError>
    where
        F: Future<Output = Result<T, WebDavError>>,
    {
        self.check()?;

        let guarded = async {
            match self.deadline {
                Some(deadline) => timeout_at(deadline, fut)
                    .await
                    .unwrap_or(Err(WebDavError::DeadlineExceeded)),
                None => fut.await,
            }
        };

        tokio::select! {
            biased;
            _ = self.token.cancelled() => Err(WebDavError::Cancelled),
            result = guarded => result,
        }
    }

    pub(crate) fn interruption(&self) -> Interruption {
        let token = self.token.clone();
        let deadline = self.deadline;

        Box::pin(async move {
            match deadline {
                Some(deadline) => tokio::select! {
                    _ = token.cancelled() => WebDavError::Cancelled,
                    _ = sleep_until(deadline) => WebDavError::DeadlineExceeded,
                },
                None => {
                    token.cancelled().await;
                    WebDavError::Cancelled
                }
            }
        })
    }
}
