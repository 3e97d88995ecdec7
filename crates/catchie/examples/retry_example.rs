//! Example: Retrying synchronous and asynchronous operations
//!
//! This example demonstrates:
//! 1. Retrying an operation that fails synchronously a few times
//! 2. Retrying an operation that returns a pending result
//! 3. Running out of retries
//!
//! Run with:
//! ```bash
//! RUST_LOG=info cargo run -p catchie --example retry_example
//! ```

use catchie::prelude::*;
use std::error::Error;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// A simulated service that fails the first few times
#[derive(Clone)]
struct UnreliableService {
    attempts: Arc<AtomicU32>,
    fail_count: u32,
}

impl UnreliableService {
    fn new(fail_count: u32) -> Self {
        Self {
            attempts: Arc::new(AtomicU32::new(0)),
            fail_count,
        }
    }

    fn call(&self, greeting: &str, name: &str) -> Result<String, std::io::Error> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);

        if attempt < self.fail_count {
            println!("  Attempt {}: FAILED", attempt + 1);
            Err(std::io::Error::other(format!(
                "transient failure on attempt {}",
                attempt + 1
            )))
        } else {
            println!("  Attempt {}: SUCCESS", attempt + 1);
            Ok(format!("{}, {}!", greeting, name))
        }
    }

    async fn call_async(self, greeting: String, name: String) -> Result<String, std::io::Error> {
        tokio::time::sleep(Duration::from_millis(20)).await;
        self.call(&greeting, &name)
    }
}

/// Example 1: synchronous failures
fn example_sync_retry(executor: &RetryExecutor) -> Result<(), Box<dyn Error>> {
    println!("\n=== Example 1: Synchronous Retry ===\n");

    let service = UnreliableService::new(2);
    let settled = executor.retry(
        move |(greeting, name): &(&str, &str)| Attempt::from(service.call(greeting, name)),
        ("Hello", "World"),
        3,
    )?;

    println!("\nResult: {:?}", settled.ready());
    println!("Stats: {:?}", executor.stats());

    Ok(())
}

/// Example 2: pending results
async fn example_async_retry(executor: &RetryExecutor) -> Result<(), Box<dyn Error>> {
    println!("\n=== Example 2: Asynchronous Retry ===\n");

    let service = UnreliableService::new(3);
    let result = executor
        .retry(
            move |(greeting, name): &(String, String)| {
                Attempt::deferred(service.clone().call_async(greeting.clone(), name.clone()))
            },
            ("Hi".to_string(), "async world".to_string()),
            "5",
        )?
        .await?;

    println!("\nResult: {}", result);
    println!("Stats: {:?}", executor.stats());

    Ok(())
}

/// Example 3: exhausted budget
async fn example_exhausted(executor: &RetryExecutor) -> Result<(), Box<dyn Error>> {
    println!("\n=== Example 3: Exhausted Retry Budget ===\n");

    let service = UnreliableService::new(u32::MAX);
    let outcome = executor
        .retry(
            move |_: &()| Attempt::deferred(service.clone().call_async("Hey".into(), "nobody".into())),
            (),
            2,
        )?
        .await;

    match outcome {
        Ok(value) => println!("\nUnexpected success: {}", value),
        Err(err) => println!("\nGave up: {} (after {:?} attempts)", err, err.attempts()),
    }
    println!("Stats: {}", serde_json::to_string(&executor.stats())?);

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("==============================================");
    println!("   Catchie: Retry Examples");
    println!("==============================================");

    let executor = catchie::catchie(None, false);

    example_sync_retry(&executor)?;
    example_async_retry(&executor).await?;
    example_exhausted(&executor).await?;

    println!("\n==============================================");
    println!("   All examples completed successfully!");
    println!("==============================================\n");

    Ok(())
}
