//! Retry execution.
//!
//! This module re-invokes failing operations up to a fixed retry budget.
//! Operations may settle immediately or return a pending result; the
//! executor follows whichever shape each attempt takes.
//!
//! # Key Types
//!
//! - [`RetryExecutor`] - Runs retry chains and counts attempts
//! - [`Attempt`] - Outcome of a single invocation
//! - [`Settled`] - Outcome of a whole chain, ready or deferred
//! - [`RetryCount`] - Loosely typed retry budget
//!
//! # Examples
//!
//! ```rust
//! use catchie::retry::{Attempt, RetryExecutor};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let executor = RetryExecutor::default();
//!
//! let value = executor
//!     .retry(
//!         |url: &String| {
//!             let url = url.clone();
//!             Attempt::deferred(async move {
//!                 // Your async operation here
//!                 Ok::<_, std::io::Error>(url.len())
//!             })
//!         },
//!         "https://example.com".to_string(),
//!         3,
//!     )?
//!     .await?;
//!
//! assert_eq!(value, 19);
//! # Ok(())
//! # }
//! ```

mod attempt;
mod budget;
mod executor;

pub use attempt::Attempt;
pub use budget::{RetryCount, parse_int};
pub use executor::{
    Operation, RetryExecutor, RetryFuture, RetryStats, Settled, dynamic_target,
};
