//! Retry behaviour for operations that return pending results

mod common;

use catchie::prelude::*;
use common::{Spy, recording_executor};
use std::future::IntoFuture;
use std::time::Duration;

#[tokio::test]
async fn test_keeps_arguments_across_deferred_retries() {
    let (executor, _) = recording_executor();
    let spy = Spy::new();
    let counter = spy.clone();

    let settled = executor
        .retry(
            move |&(first, second): &(&'static str, &'static str)| {
                let call = counter.hit();
                Attempt::deferred(async move {
                    assert_eq!(first, "Hello");
                    assert_eq!(second, "World");
                    if call == 0 {
                        Err("rejected")
                    } else {
                        Ok(format!("{}{}", first, second))
                    }
                })
            },
            ("Hello", "World"),
            1,
        )
        .unwrap();

    assert!(settled.is_deferred());
    assert_eq!(settled.await.unwrap(), "HelloWorld");
    assert_eq!(spy.call_count(), executor.call_count());
    assert_eq!(executor.stats(), RetryStats { success_count: 1, failure_count: 1 });
}

#[tokio::test]
async fn test_propagates_rejection_after_cap_reached() {
    let (executor, logger) = recording_executor();
    let spy = Spy::new();
    let counter = spy.clone();

    let settled = executor
        .retry(
            move |_: &()| {
                counter.hit();
                Attempt::<(), _>::deferred(async {
                    Err(anyhow::anyhow!("Error: Promise rejected"))
                })
            },
            (),
            5,
        )
        .unwrap();

    let err = settled.await.unwrap_err();
    assert!(err.is_exhausted());
    assert_eq!(err.to_string(), "Error: Error: Promise rejected");
    assert_eq!(spy.call_count(), 6);
    assert_eq!(spy.call_count(), executor.call_count());
    assert_eq!(logger.messages().len(), 5);
    assert_eq!(
        logger.messages()[0],
        "Retrying function due to Error: Promise rejected error"
    );
}

#[tokio::test]
async fn test_delayed_rejection_keeps_counts() {
    let (executor, _) = recording_executor();
    let spy = Spy::new();
    let counter = spy.clone();

    let settled = executor
        .retry(
            move |_: &()| {
                let counter = counter.clone();
                Attempt::<(), _>::deferred(async move {
                    tokio::time::sleep(Duration::from_millis(10)).await;
                    counter.hit();
                    Err(std::io::Error::other("rejected"))
                })
            },
            (),
            5,
        )
        .unwrap();

    let err = settled.await.unwrap_err();
    assert!(err.is_exhausted());
    assert_eq!(spy.call_count(), 6);
    assert_eq!(spy.call_count(), executor.call_count());
}

#[tokio::test]
async fn test_delayed_resolution() {
    let (executor, _) = recording_executor();
    let spy = Spy::new();
    let counter = spy.clone();

    let settled = executor
        .retry(
            move |_: &()| {
                let counter = counter.clone();
                Attempt::<_, String>::deferred(async move {
                    tokio::time::sleep(Duration::from_millis(10)).await;
                    counter.hit();
                    Ok(15)
                })
            },
            (),
            5,
        )
        .unwrap();

    assert_eq!(settled.await.unwrap(), 15);
    assert_eq!(spy.call_count(), 1);
    assert_eq!(spy.call_count(), executor.call_count());
}

#[tokio::test]
async fn test_rejects_once_then_resolves() {
    let (executor, logger) = recording_executor();
    let spy = Spy::new();
    let counter = spy.clone();

    let settled = executor
        .retry(
            move |_: &()| {
                let call = counter.hit();
                Attempt::deferred(async move {
                    if call == 0 {
                        Err("first rejection".to_string())
                    } else {
                        Ok(15)
                    }
                })
            },
            (),
            5,
        )
        .unwrap();

    assert_eq!(settled.await.unwrap(), 15);
    assert_eq!(executor.success_count(), 1);
    assert_eq!(executor.failure_count(), 1);
    assert_eq!(
        logger.messages(),
        vec!["Retrying function due to first rejection error".to_string()]
    );
}

#[tokio::test]
async fn test_deferred_then_sync_success() {
    let (executor, _) = recording_executor();
    let spy = Spy::new();
    let counter = spy.clone();

    let settled = executor
        .retry(
            move |_: &()| {
                if counter.hit() == 0 {
                    Attempt::deferred(async { Err("pending failure") })
                } else {
                    Attempt::ok("ready")
                }
            },
            (),
            2,
        )
        .unwrap();

    // Once an attempt went asynchronous the rest of the chain stays in the future
    assert!(settled.is_deferred());
    assert_eq!(settled.await.unwrap(), "ready");
    assert_eq!(executor.stats(), RetryStats { success_count: 1, failure_count: 1 });
}

#[tokio::test]
async fn test_counters_update_while_chain_is_pending() {
    let (executor, _) = recording_executor();
    let (tx, rx) = tokio::sync::oneshot::channel::<()>();
    let mut gate = Some(rx);

    let settled = executor
        .retry(
            move |_: &()| match gate.take() {
                Some(rx) => Attempt::deferred(async move {
                    let _ = rx.await;
                    Err("released")
                }),
                None => Attempt::ok(1),
            },
            (),
            1,
        )
        .unwrap();

    let handle = tokio::spawn(settled.into_future());
    tokio::task::yield_now().await;
    assert_eq!(executor.call_count(), 0);

    tx.send(()).unwrap();
    assert_eq!(handle.await.unwrap().unwrap(), 1);
    assert_eq!(executor.stats(), RetryStats { success_count: 1, failure_count: 1 });
}

#[tokio::test]
async fn test_many_deferred_retries_do_not_grow_the_stack() {
    let (executor, _) = recording_executor();
    let spy = Spy::new();
    let counter = spy.clone();

    let err = executor
        .retry(
            move |_: &()| {
                counter.hit();
                Attempt::<(), _>::deferred(async { Err("still down") })
            },
            (),
            10_000,
        )
        .unwrap()
        .await
        .unwrap_err();

    assert_eq!(err.attempts(), Some(10_001));
    assert_eq!(spy.call_count(), 10_001);
}
