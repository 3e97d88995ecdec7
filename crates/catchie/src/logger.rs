//! Logger collaborator for retry notices
//!
//! The executor reports each retry through a [`RetryLogger`]. Anything with an
//! `info` method fits; the default forwards to `tracing`.

use std::fmt;
use std::sync::Arc;

/// Receives one informational message per retry.
///
/// # Examples
///
/// ```rust
/// use catchie::logger::RetryLogger;
/// use std::sync::Mutex;
///
/// #[derive(Default)]
/// struct Collecting(Mutex<Vec<String>>);
///
/// impl RetryLogger for Collecting {
///     fn info(&self, message: &str) {
///         self.0.lock().unwrap().push(message.to_string());
///     }
/// }
/// ```
pub trait RetryLogger: Send + Sync {
    /// Record an informational message.
    fn info(&self, message: &str);
}

impl<L: RetryLogger + ?Sized> RetryLogger for Arc<L> {
    fn info(&self, message: &str) {
        (**self).info(message)
    }
}

/// Default logger, forwarding messages to `tracing` at INFO level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl RetryLogger for TracingLogger {
    fn info(&self, message: &str) {
        tracing::info!(target: "catchie", "{}", message);
    }
}

/// Logger that discards every message.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentLogger;

impl RetryLogger for SilentLogger {
    fn info(&self, _message: &str) {}
}

/// Shared handle to a logger, as stored by executors.
pub type SharedLogger = Arc<dyn RetryLogger>;

/// The logger used when none is supplied.
pub fn default_logger() -> SharedLogger {
    Arc::new(TracingLogger)
}

/// Format the notice emitted before a retry.
pub(crate) fn retry_message(error: &dyn fmt::Display) -> String {
    format!("Retrying function due to {} error", error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder(Mutex<Vec<String>>);

    impl RetryLogger for Recorder {
        fn info(&self, message: &str) {
            self.0.lock().unwrap().push(message.to_string());
        }
    }

    #[test]
    fn test_retry_message_format() {
        assert_eq!(
            retry_message(&"socket closed"),
            "Retrying function due to socket closed error"
        );
    }

    #[test]
    fn test_arc_logger_forwards() {
        let recorder = Arc::new(Recorder::default());
        let shared: SharedLogger = recorder.clone();

        shared.info("first");
        Arc::clone(&shared).info("second");

        assert_eq!(*recorder.0.lock().unwrap(), vec!["first", "second"]);
    }

    #[test]
    fn test_builtin_loggers_do_not_panic() {
        TracingLogger.info("tracing");
        SilentLogger.info("silent");
        default_logger().info("default");
    }
}
