//! Error types for retry execution
//!
//! Every failure is local to a single `retry` call: either the operation was
//! rejected up front, or every attempt failed and the retry budget ran out.

use thiserror::Error;

/// Boxed error carried from a failed attempt.
///
/// Anything that converts into this works as an operation's error type,
/// including `&str`, `String`, `std::io::Error` and `anyhow::Error`.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type alias for retry operations.
pub type Result<T> = std::result::Result<T, RetryError>;

/// Message used when a dynamic retry target is not an operation.
pub const WRONG_FUNCTION_TYPE: &str = "Wrong function type";

/// Main error type for retry execution.
#[derive(Debug, Error)]
pub enum RetryError {
    /// The retry target is not a callable operation.
    ///
    /// Raised before any attempt is made.
    #[error("{0}")]
    InvalidArgument(String),

    /// Every attempt failed and the retry budget is used up.
    ///
    /// Displays as `Error: ` followed by the last underlying error.
    #[error("Error: {source}")]
    Exhausted {
        /// Total number of attempts made, the initial one included
        attempts: u32,
        /// The error returned by the last attempt
        #[source]
        source: BoxError,
    },
}

impl RetryError {
    /// Create the error raised for a non-callable retry target.
    pub fn wrong_function_type() -> Self {
        Self::InvalidArgument(WRONG_FUNCTION_TYPE.to_string())
    }

    /// Create the terminal error for an exhausted retry chain.
    pub fn exhausted(attempts: u32, source: impl Into<BoxError>) -> Self {
        Self::Exhausted {
            attempts,
            source: source.into(),
        }
    }

    /// Check if this error was raised before any attempt ran.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    /// Check if this error ends an exhausted retry chain.
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::Exhausted { .. })
    }

    /// Number of attempts made before giving up, if the chain ran at all.
    pub fn attempts(&self) -> Option<u32> {
        match self {
            Self::Exhausted { attempts, .. } => Some(*attempts),
            Self::InvalidArgument(_) => None,
        }
    }

    /// The error returned by the last attempt, if any.
    pub fn last_error(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            Self::Exhausted { source, .. } => Some(source.as_ref()),
            Self::InvalidArgument(_) => None,
        }
    }
}
