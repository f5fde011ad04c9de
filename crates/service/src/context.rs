//! Request-scoped cancellation and deadlines.
//!
//! Every service call receives a [`RequestContext`]. Repository futures are
//! raced against the context, so a cancelled or expired request drops its
//! in-flight query instead of waiting for the backend.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::errors::ServiceError;

#[derive(Debug, Clone)]
pub struct RequestContext {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::background()
    }
}

impl RequestContext {
    /// Context without deadline that is only cancelled explicitly.
    pub fn background() -> Self {
        Self { token: CancellationToken::new(), deadline: None }
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self { token: CancellationToken::new(), deadline: Some(Instant::now() + timeout) }
    }

    /// Derived context: cancelled together with `self`, deadline is the
    /// earlier of the parent's and `timeout` when given.
    pub fn child(&self, timeout: Option<Duration>) -> Self {
        let own = timeout.map(|t| Instant::now() + t);
        let deadline = match (self.deadline, own) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
        Self { token: self.token.child_token(), deadline }
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Fails fast when the context is already done.
    pub fn check(&self) -> Result<(), ServiceError> {
        if self.token.is_cancelled() {
            return Err(ServiceError::Cancelled);
        }
        match self.deadline {
            Some(deadline) if deadline <= Instant::now() => Err(ServiceError::DeadlineExceeded),
            _ => Ok(()),
        }
    }

    /// Drive `fut` until it completes, the context is cancelled, or the
    /// deadline passes. The future is dropped on abort.
    pub async fn run<F: Future>(&self, fut: F) -> Result<F::Output, ServiceError> {
        self.check()?;
        match self.deadline {
            Some(deadline) => tokio::select! {
                biased;
                _ = self.token.cancelled() => Err(ServiceError::Cancelled),
                _ = tokio::time::sleep_until(deadline) => Err(ServiceError::DeadlineExceeded),
                out = fut => Ok(out),
            },
            None => tokio::select! {
                biased;
                _ = self.token.cancelled() => Err(ServiceError::Cancelled),
                out = fut => Ok(out),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn completes_when_not_aborted() {
        let ctx = RequestContext::with_timeout(Duration::from_secs(5));
        assert_eq!(ctx.run(async { 7 }).await, Ok(7));
    }

    #[tokio::test]
    async fn deadline_aborts_pending_work() {
        let ctx = RequestContext::with_timeout(Duration::from_millis(20));
        let res = ctx.run(std::future::pending::<()>()).await;
        assert_eq!(res, Err(ServiceError::DeadlineExceeded));
    }

    #[tokio::test]
    async fn cancellation_aborts_and_drops_future() {
        let ctx = RequestContext::background();
        let finished = Arc::new(AtomicBool::new(false));
        let flag = finished.clone();
        let canceller = ctx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            canceller.cancel();
        });
        let res = ctx
            .run(async move {
                tokio::time::sleep(Duration::from_secs(5)).await;
                flag.store(true, Ordering::SeqCst);
            })
            .await;
        assert_eq!(res, Err(ServiceError::Cancelled));
        assert!(!finished.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn already_cancelled_context_never_polls() {
        let ctx = RequestContext::background();
        ctx.cancel();
        let polled = Arc::new(AtomicBool::new(false));
        let flag = polled.clone();
        let res = ctx.run(async move { flag.store(true, Ordering::SeqCst) }).await;
        assert_eq!(res, Err(ServiceError::Cancelled));
        assert!(!polled.load(Ordering::SeqCst));
    }

    #[test]
    fn child_follows_parent_cancellation_and_tighter_deadline() {
        let parent = RequestContext::with_timeout(Duration::from_secs(60));
        let child = parent.child(Some(Duration::from_secs(1)));
        assert!(child.deadline() < parent.deadline());
        let loose = parent.child(Some(Duration::from_secs(600)));
        assert_eq!(loose.deadline(), parent.deadline());

        parent.cancel();
        assert!(child.is_cancelled());
        assert_eq!(child.check(), Err(ServiceError::Cancelled));
    }
}
