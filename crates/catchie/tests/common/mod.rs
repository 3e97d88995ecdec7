//! Common test utilities and helpers

use catchie::prelude::*;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

/// Counts calls made through the operations it hands out
#[derive(Clone, Default)]
pub struct Spy {
    calls: Arc<AtomicU32>,
}

impl Spy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one call and return its zero-based index
    pub fn hit(&self) -> u32 {
        self.calls.fetch_add(1, Ordering::SeqCst)
    }

    pub fn call_count(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    /// An operation that always fails synchronously
    #[allow(dead_code)]
    pub fn throws(&self) -> impl FnMut(&()) -> Attempt<(), String> + Send + use<> {
        let spy = self.clone();
        move |_: &()| {
            spy.hit();
            Attempt::err("Error".to_string())
        }
    }
}

/// Logger that keeps every message
#[allow(dead_code)]
#[derive(Default)]
pub struct RecordingLogger {
    messages: Mutex<Vec<String>>,
}

impl RecordingLogger {
    #[allow(dead_code)]
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl RetryLogger for RecordingLogger {
    fn info(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

/// Executor with no default retry budget and a recording logger
#[allow(dead_code)]
pub fn recording_executor() -> (RetryExecutor, Arc<RecordingLogger>) {
    let logger = Arc::new(RecordingLogger::default());
    let executor = RetryExecutor::new(ExecutorConfig::default().with_logger(logger.clone()));
    (executor, logger)
}
