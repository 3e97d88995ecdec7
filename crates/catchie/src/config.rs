//! Configuration for retry executors

use crate::logger::{SharedLogger, default_logger};
use std::fmt;

/// Environment variable holding the default retry budget.
pub const MAX_RETRY_ENV: &str = "CATCHIE_MAX_RETRY";

/// Configuration for a [`RetryExecutor`](crate::RetryExecutor).
///
/// Defaults are resolved explicitly here; building an executor never changes
/// the defaults seen by other executors.
#[derive(Clone, Default)]
pub struct ExecutorConfig {
    /// Logger for retry notices. `None` selects the default tracing logger.
    pub logger: Option<SharedLogger>,

    /// Suppress retry notices
    pub silent: bool,

    /// Retry budget used when a `retry` call gives no usable count.
    ///
    /// Kept as raw text and coerced with the same rules as the per-call
    /// count. Unset or unparseable means no retries.
    pub default_retry_count: Option<String>,
}

impl ExecutorConfig {
    /// Create a configuration with a logger.
    pub fn with_logger_instance(logger: SharedLogger) -> Self {
        Self {
            logger: Some(logger),
            ..Default::default()
        }
    }

    /// Set the logger for retry notices.
    pub fn with_logger(mut self, logger: SharedLogger) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Suppress or enable retry notices.
    pub fn with_silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    /// Set the default retry budget.
    ///
    /// Accepts anything that displays as an integer, e.g. `5` or `"5"`.
    pub fn with_default_retry_count(mut self, count: impl ToString) -> Self {
        self.default_retry_count = Some(count.to_string());
        self
    }

    /// Load configuration from environment variables.
    ///
    /// This will look for:
    /// - `CATCHIE_MAX_RETRY` for the default retry budget
    ///
    /// The value is kept as given; an unparseable value behaves like an unset
    /// one when a retry call falls back to it.
    #[cfg(feature = "env")]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(max_retry) = std::env::var(MAX_RETRY_ENV) {
            config.default_retry_count = Some(max_retry);
        }

        config
    }

    /// Merge another configuration into this one.
    ///
    /// Fields set in `other` take precedence; `silent` is taken from `other`.
    pub fn merge(mut self, other: Self) -> Self {
        if other.logger.is_some() {
            self.logger = other.logger;
        }
        if other.default_retry_count.is_some() {
            self.default_retry_count = other.default_retry_count;
        }
        self.silent = other.silent;
        self
    }

    pub(crate) fn resolved_logger(&self) -> SharedLogger {
        self.logger.clone().unwrap_or_else(default_logger)
    }
}

impl fmt::Debug for ExecutorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutorConfig")
            .field("logger", &self.logger.as_ref().map(|_| "<custom>"))
            .field("silent", &self.silent)
            .field("default_retry_count", &self.default_retry_count)
            .finish()
    }
}
