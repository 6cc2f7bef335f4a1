//! The remote check seam
//!
//! A check function takes the trimmed field value and answers with a reply
//! or fails. The controller treats it as a black box: it may be slow, it may
//! fail, and its text may be ambiguous.

use crate::error::CheckError;
use crate::reply::Reply;
use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;

/// Remote availability check
#[async_trait]
pub trait CheckFn: Send + Sync {
    /// Check a single (already trimmed, non-empty) value
    async fn check(&self, value: &str) -> Result<Reply, CheckError>;
}

/// Check function shared between a controller and its scheduled tasks
pub type SharedCheck = Arc<dyn CheckFn>;

#[async_trait]
impl<T: CheckFn + ?Sized> CheckFn for Arc<T> {
    async fn check(&self, value: &str) -> Result<Reply, CheckError> {
        (**self).check(value).await
    }
}

/// Check function backed by an async closure
pub struct FnCheck<F> {
    f: F,
}

/// Wrap an async closure as a [`CheckFn`]
///
/// ```ignore
/// let check = from_fn(|value: String| async move {
///     Ok::<_, CheckError>(format!("{value} 可用"))
/// });
/// ```
pub fn from_fn<F, Fut, R>(f: F) -> FnCheck<F>
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<R, CheckError>> + Send + 'static,
    R: Into<Reply> + Send + 'static,
{
    FnCheck { f }
}

#[async_trait]
impl<F, Fut, R> CheckFn for FnCheck<F>
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<R, CheckError>> + Send + 'static,
    R: Into<Reply> + Send + 'static,
{
    async fn check(&self, value: &str) -> Result<Reply, CheckError> {
        (self.f)(value.to_string()).await.map(Into::into)
    }
}
