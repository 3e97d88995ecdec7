//! The retry executor.

use super::attempt::Attempt;
use super::budget::RetryCount;
use crate::config::ExecutorConfig;
use crate::error::{BoxError, Result, RetryError};
use crate::logger::{SharedLogger, retry_message};
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;
use std::future::IntoFuture;
use std::marker::PhantomData;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use tracing::{debug, warn};

/// A type-erased operation, as accepted by [`RetryExecutor::retry_dynamic`].
pub type Operation<A, T, E> = Box<dyn FnMut(&A) -> Attempt<T, E> + Send>;

/// Future returned when a retry chain went asynchronous.
pub type RetryFuture<T> = BoxFuture<'static, Result<T>>;

/// Box an operation for [`RetryExecutor::retry_dynamic`].
pub fn dynamic_target<A, T, E, F>(operation: F) -> Box<dyn Any + Send>
where
    F: FnMut(&A) -> Attempt<T, E> + Send + 'static,
    A: 'static,
    T: 'static,
    E: 'static,
{
    let operation: Operation<A, T, E> = Box::new(operation);
    Box::new(operation)
}

/// Outcome of a successful [`RetryExecutor::retry`] call.
///
/// Follows the calling convention of the attempts: if every attempt up to the
/// successful one settled immediately, the value is available right away.
/// Once an attempt returns a pending result, the rest of the chain runs inside
/// the returned future.
///
/// Both shapes can be awaited uniformly through [`IntoFuture`].
pub enum Settled<T> {
    /// The chain completed synchronously with this value.
    Ready(T),
    /// The chain continues asynchronously.
    Deferred(RetryFuture<T>),
}

impl<T> Settled<T> {
    /// Whether the chain continues asynchronously.
    pub fn is_deferred(&self) -> bool {
        matches!(self, Self::Deferred(_))
    }

    /// The synchronous value, if the chain completed synchronously.
    pub fn ready(self) -> Option<T> {
        match self {
            Self::Ready(value) => Some(value),
            Self::Deferred(_) => None,
        }
    }

    /// The pending future, if the chain went asynchronous.
    pub fn into_deferred(self) -> Option<RetryFuture<T>> {
        match self {
            Self::Ready(_) => None,
            Self::Deferred(future) => Some(future),
        }
    }
}

impl<T: Send + 'static> IntoFuture for Settled<T> {
    type Output = Result<T>;
    type IntoFuture = RetryFuture<T>;

    fn into_future(self) -> Self::IntoFuture {
        match self {
            Self::Ready(value) => Box::pin(futures::future::ready(Ok(value))),
            Self::Deferred(future) => future,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Settled<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready(value) => f.debug_tuple("Ready").field(value).finish(),
            Self::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}

/// Snapshot of an executor's attempt counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RetryStats {
    /// Attempts whose value was surfaced as the result
    pub success_count: u32,
    /// Attempts that failed
    pub failure_count: u32,
}

impl RetryStats {
    /// Total number of attempts.
    pub fn call_count(&self) -> u32 {
        self.success_count + self.failure_count
    }
}

#[derive(Debug, Default)]
struct Counters {
    success: AtomicU32,
    failure: AtomicU32,
}

impl Counters {
    fn clear(&self) {
        self.success.store(0, Ordering::SeqCst);
        self.failure.store(0, Ordering::SeqCst);
    }

    fn record_success(&self) {
        self.success.fetch_add(1, Ordering::SeqCst);
    }

    fn record_failure(&self) {
        self.failure.fetch_add(1, Ordering::SeqCst);
    }

    fn snapshot(&self) -> RetryStats {
        RetryStats {
            success_count: self.success.load(Ordering::SeqCst),
            failure_count: self.failure.load(Ordering::SeqCst),
        }
    }
}

/// Re-invokes failing operations up to a retry budget.
///
/// Handles operations that settle immediately and operations that return a
/// pending result, counting every attempt as a success or a failure.
///
/// # Counters
///
/// Each [`retry`](Self::retry) call resets the counters when it starts, so
/// they always describe the most recent chain. A deferred chain keeps updating
/// them until its future settles.
///
/// Overlapping retry chains on one executor corrupt each other's counts.
/// Clones share counters; use [`fork`](Self::fork) to get an executor with the
/// same configuration and its own counters for each concurrent chain.
///
/// # Examples
///
/// ```rust
/// use catchie::prelude::*;
///
/// let executor = RetryExecutor::default();
/// let mut calls = 0;
///
/// let settled = executor
///     .retry(
///         move |name: &&str| {
///             calls += 1;
///             if calls < 3 {
///                 Attempt::err("not yet")
///             } else {
///                 Attempt::ok(format!("hello {}", name))
///             }
///         },
///         "world",
///         4,
///     )
///     .unwrap();
///
/// assert_eq!(settled.ready().as_deref(), Some("hello world"));
/// assert_eq!(executor.failure_count(), 2);
/// assert_eq!(executor.success_count(), 1);
/// ```
#[derive(Clone)]
pub struct RetryExecutor {
    config: ExecutorConfig,
    logger: SharedLogger,
    counters: Arc<Counters>,
}

impl RetryExecutor {
    /// Create an executor from a configuration.
    pub fn new(config: ExecutorConfig) -> Self {
        let logger = config.resolved_logger();
        Self {
            config,
            logger,
            counters: Arc::new(Counters::default()),
        }
    }

    /// Create an executor with the same configuration and fresh counters.
    pub fn fork(&self) -> Self {
        Self {
            config: self.config.clone(),
            logger: Arc::clone(&self.logger),
            counters: Arc::new(Counters::default()),
        }
    }

    /// The configuration this executor was built from.
    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    /// The logger retry notices go to.
    pub fn logger(&self) -> &SharedLogger {
        &self.logger
    }

    /// Whether retry notices are suppressed.
    pub fn is_silent(&self) -> bool {
        self.config.silent
    }

    /// Attempts surfaced as success since the last reset.
    pub fn success_count(&self) -> u32 {
        self.counters.success.load(Ordering::SeqCst)
    }

    /// Failed attempts since the last reset.
    pub fn failure_count(&self) -> u32 {
        self.counters.failure.load(Ordering::SeqCst)
    }

    /// Total attempts since the last reset.
    pub fn call_count(&self) -> u32 {
        self.stats().call_count()
    }

    /// Snapshot of both counters.
    pub fn stats(&self) -> RetryStats {
        self.counters.snapshot()
    }

    /// Reset both counters to zero.
    pub fn clear(&self) {
        self.counters.clear();
    }

    /// Run `operation` with `args`, retrying on failure.
    ///
    /// `args` is bound once and every attempt receives the same `&args`.
    /// `retry_count` is the number of retries after the initial attempt; see
    /// [`RetryCount::resolve`] for how it is coerced and defaulted. It is
    /// resolved once, before the first attempt.
    ///
    /// # Returns
    /// - `Ok(Settled::Ready(v))`: an attempt succeeded before any attempt
    ///   returned a pending result
    /// - `Ok(Settled::Deferred(f))`: an attempt returned a pending result; `f`
    ///   drives the remaining attempts and resolves to the final outcome
    /// - `Err(RetryError::Exhausted { .. })`: every attempt failed
    ///   synchronously
    pub fn retry<F, A, T, E>(
        &self,
        operation: F,
        args: A,
        retry_count: impl Into<RetryCount>,
    ) -> Result<Settled<T>>
    where
        F: FnMut(&A) -> Attempt<T, E> + Send + 'static,
        A: Send + 'static,
        T: Send + 'static,
        E: Into<BoxError> + Send + 'static,
    {
        self.clear();
        let retry_count: RetryCount = retry_count.into();
        let budget = retry_count.resolve(self.config.default_retry_count.as_deref());

        RetryChain {
            operation,
            args,
            budget,
            retries_used: 0,
            counters: Arc::clone(&self.counters),
            logger: (!self.config.silent).then(|| Arc::clone(&self.logger)),
            _outcome: PhantomData,
        }
        .run()
    }

    /// Run a type-erased retry target.
    ///
    /// Fails with [`RetryError::InvalidArgument`] ("Wrong function type")
    /// before any attempt when `target` is not an [`Operation<A, T, E>`].
    /// Build targets with [`dynamic_target`].
    pub fn retry_dynamic<A, T, E>(
        &self,
        target: Box<dyn Any + Send>,
        args: A,
        retry_count: impl Into<RetryCount>,
    ) -> Result<Settled<T>>
    where
        A: Send + 'static,
        T: Send + 'static,
        E: Into<BoxError> + Send + 'static,
    {
        self.clear();
        let operation = target
            .downcast::<Operation<A, T, E>>()
            .map_err(|_| RetryError::wrong_function_type())?;
        self.retry(*operation, args, retry_count)
    }
}

impl Default for RetryExecutor {
    fn default() -> Self {
        Self::new(ExecutorConfig::default())
    }
}

impl fmt::Debug for RetryExecutor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryExecutor")
            .field("config", &self.config)
            .field("stats", &self.stats())
            .finish()
    }
}

/// State of one `retry` call.
struct RetryChain<F, A, T, E> {
    operation: F,
    args: A,
    budget: u32,
    retries_used: u32,
    counters: Arc<Counters>,
    // None when silent
    logger: Option<SharedLogger>,
    _outcome: PhantomData<fn() -> (T, E)>,
}

impl<F, A, T, E> RetryChain<F, A, T, E>
where
    F: FnMut(&A) -> Attempt<T, E> + Send + 'static,
    A: Send + 'static,
    T: Send + 'static,
    E: Into<BoxError> + Send + 'static,
{
    fn invoke(&mut self) -> Attempt<T, E> {
        (self.operation)(&self.args)
    }

    /// Count a failed attempt, then either allow another attempt or give up.
    fn fail(&mut self, error: E) -> Result<()> {
        let error: BoxError = error.into();
        self.counters.record_failure();
        let attempts = self.retries_used + 1;

        if self.retries_used >= self.budget {
            warn!(attempts, budget = self.budget, error = %error, "Retry budget exhausted");
            return Err(RetryError::exhausted(attempts, error));
        }

        self.retries_used += 1;
        debug!(
            attempt = attempts,
            retries_used = self.retries_used,
            budget = self.budget,
            error = %error,
            "Attempt failed, retrying"
        );
        if let Some(logger) = &self.logger {
            logger.info(&retry_message(&error));
        }
        Ok(())
    }

    /// Attempt synchronously until an attempt succeeds, the budget runs out,
    /// or an attempt returns a pending result.
    fn run(mut self) -> Result<Settled<T>> {
        loop {
            match self.invoke() {
                Attempt::Ready(Ok(value)) => {
                    self.counters.record_success();
                    return Ok(Settled::Ready(value));
                }
                Attempt::Ready(Err(error)) => self.fail(error)?,
                Attempt::Deferred(pending) => {
                    return Ok(Settled::Deferred(Box::pin(self.drive(pending))));
                }
            }
        }
    }

    async fn drive(
        mut self,
        mut pending: BoxFuture<'static, std::result::Result<T, E>>,
    ) -> Result<T> {
        loop {
            match pending.await {
                Ok(value) => {
                    self.counters.record_success();
                    return Ok(value);
                }
                Err(error) => self.fail(error)?,
            }

            // Next attempt starts from a fresh scheduling point.
            tokio::task::yield_now().await;

            pending = loop {
                match self.invoke() {
                    Attempt::Ready(Ok(value)) => {
                        self.counters.record_success();
                        return Ok(value);
                    }
                    Attempt::Ready(Err(error)) => self.fail(error)?,
                    Attempt::Deferred(next) => break next,
                }
            };
        }
    }
}
