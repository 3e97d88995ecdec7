#![deny(unsafe_code)]
#![warn(missing_docs)]

//! Retry operations that fail synchronously or asynchronously.
//!
//! `catchie` re-invokes a failing operation up to a retry budget, replaying the
//! same arguments on every attempt, and reports the outcome in the shape the
//! operation used:
//!
//! - **Synchronous attempts** return their value (or the terminal error)
//!   directly from [`RetryExecutor::retry`]
//! - **Asynchronous attempts** hand back a future that drives the remaining
//!   retries and resolves to the final outcome
//! - **Counters** record successful and failed attempts of the latest chain
//!
//! There is no backoff, jitter or retry predicate: every failure is retried
//! immediately until the budget is used up.
//!
//! # Examples
//!
//! Using the prelude for convenient imports:
//!
//! ```rust
//! use catchie::prelude::*;
//!
//! let executor = catchie::catchie(None, true);
//!
//! let err = executor
//!     .retry(|_: &()| Attempt::<(), _>::err("unavailable"), (), 4)
//!     .unwrap_err();
//!
//! assert_eq!(err.to_string(), "Error: unavailable");
//! assert_eq!(executor.failure_count(), 5);
//! ```

pub mod config;
pub mod error;
pub mod logger;
pub mod retry;

pub use config::{ExecutorConfig, MAX_RETRY_ENV};
pub use error::{BoxError, Result, RetryError};
pub use logger::{RetryLogger, SharedLogger, SilentLogger, TracingLogger};
pub use retry::{Attempt, RetryCount, RetryExecutor, Settled};

/// Convenient re-exports of commonly used items.
///
/// Import all core types with:
///
/// ```rust
/// use catchie::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::ExecutorConfig;
    pub use crate::error::RetryError;
    pub use crate::logger::{RetryLogger, SharedLogger};
    pub use crate::retry::{Attempt, RetryCount, RetryExecutor, RetryStats, Settled};
}

/// Build an executor with an optional logger and a silence flag.
///
/// A missing logger selects [`TracingLogger`]. The default retry budget is read
/// from `CATCHIE_MAX_RETRY` when the `env` feature is enabled.
pub fn catchie(logger: Option<SharedLogger>, silent: bool) -> RetryExecutor {
    #[cfg(feature = "env")]
    let config = ExecutorConfig::from_env();
    #[cfg(not(feature = "env"))]
    let config = ExecutorConfig::default();

    let config = match logger {
        Some(logger) => config.with_logger(logger),
        None => config,
    };

    RetryExecutor::new(config.with_silent(silent))
}
