//! Outcome of a single invocation.

use futures::future::BoxFuture;
use std::future::Future;

/// What one call of a retried operation produced.
///
/// An operation either settles on the spot (a value or an error) or hands back
/// a future that settles later. The executor picks the synchronous or the
/// asynchronous path per attempt from this variant.
///
/// # Examples
///
/// ```rust
/// use catchie::retry::Attempt;
///
/// let ready: Attempt<u32, &str> = Attempt::ok(1);
/// let failed: Attempt<u32, &str> = Attempt::err("boom");
/// let deferred: Attempt<u32, &str> = Attempt::deferred(async { Ok(1) });
///
/// assert!(!ready.is_deferred());
/// assert!(!failed.is_deferred());
/// assert!(deferred.is_deferred());
/// ```
pub enum Attempt<T, E> {
    /// The call returned or failed immediately.
    Ready(Result<T, E>),
    /// The call returned a pending result.
    Deferred(BoxFuture<'static, Result<T, E>>),
}

impl<T, E> Attempt<T, E> {
    /// An immediate success.
    pub fn ok(value: T) -> Self {
        Self::Ready(Ok(value))
    }

    /// An immediate failure.
    pub fn err(error: E) -> Self {
        Self::Ready(Err(error))
    }

    /// A pending result.
    pub fn deferred<Fut>(future: Fut) -> Self
    where
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        Self::Deferred(Box::pin(future))
    }

    /// Whether the call returned a pending result.
    pub fn is_deferred(&self) -> bool {
        matches!(self, Self::Deferred(_))
    }
}

impl<T, E> From<Result<T, E>> for Attempt<T, E> {
    fn from(result: Result<T, E>) -> Self {
        Self::Ready(result)
    }
}

impl<T, E> std::fmt::Debug for Attempt<T, E>
where
    T: std::fmt::Debug,
    E: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ready(result) => f.debug_tuple("Ready").field(result).finish(),
            Self::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}
