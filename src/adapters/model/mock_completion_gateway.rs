//! Mock Completion Gateway for testing.
//!
//! Returns scripted completions in order and records every prompt it was
//! sent, so tests can assert on the exact model input.
//!
//! # Example
//!
//! ```ignore
//! let gateway = MockCompletionGateway::new()
//!     .with_completion("Hello, darling!")
//!     .with_error(GatewayError::Timeout { timeout_secs: 60 });
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{CompletionGateway, GatewayError};

/// A scripted gateway answer.
#[derive(Debug, Clone)]
pub enum MockCompletion {
    Text(String),
    Error(GatewayError),
}

/// Mock completion gateway for testing.
#[derive(Debug, Clone)]
pub struct MockCompletionGateway {
    /// Scripted answers (consumed in order).
    responses: Arc<Mutex<VecDeque<MockCompletion>>>,
    /// Answer once the script runs out.
    fallback: String,
    /// Simulated latency per request.
    delay: Duration,
    /// Prompts received, in order.
    calls: Arc<Mutex<Vec<String>>>,
}

impl Default for MockCompletionGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl MockCompletionGateway {
    /// Creates a mock that answers "Mock completion" until scripted otherwise.
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            fallback: "Mock completion".to_string(),
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Adds a successful completion to the queue.
    pub fn with_completion(self, text: impl Into<String>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(MockCompletion::Text(text.into()));
        self
    }

    /// Adds a failure to the queue.
    pub fn with_error(self, error: GatewayError) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(MockCompletion::Error(error));
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Returns the number of calls made to this gateway.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Returns all prompts received.
    pub fn get_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// The most recent prompt, if any.
    pub fn last_call(&self) -> Option<String> {
        self.calls.lock().unwrap().last().cloned()
    }

    fn next_response(&self) -> MockCompletion {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| MockCompletion::Text(self.fallback.clone()))
    }
}

#[async_trait]
impl CompletionGateway for MockCompletionGateway {
    async fn complete(&self, input: &str) -> Result<String, GatewayError> {
        self.calls.lock().unwrap().push(input.to_string());

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match self.next_response() {
            MockCompletion::Text(text) => Ok(text),
            MockCompletion::Error(err) => Err(err),
        }
    }
}
