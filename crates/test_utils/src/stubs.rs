//! Deterministic Completion Ports
//!
//! `ScriptedCompletionPort` answers each call with the next scripted result
//! and records every request it receives, so tests can assert both what the
//! pipeline produced and how many outbound calls it made.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;

use core_kernel::{CompletionError, CompletionPort, CompletionRequest, DomainPort};

/// A completion port that replays a fixed script
#[derive(Debug, Default)]
pub struct ScriptedCompletionPort {
    responses: Mutex<VecDeque<Result<Value, CompletionError>>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedCompletionPort {
    /// Creates a port with an empty script
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a port that answers with `responses` in order
    pub fn with_responses(responses: impl IntoIterator<Item = Result<Value, CompletionError>>) -> Self {
        let port = Self::new();
        port.responses
            .lock()
            .expect("script lock poisoned")
            .extend(responses);
        port
    }

    /// Appends a successful answer
    pub fn push_ok(&self, value: Value) -> &Self {
        self.responses
            .lock()
            .expect("script lock poisoned")
            .push_back(Ok(value));
        self
    }

    /// Appends a failure
    pub fn push_err(&self, error: CompletionError) -> &Self {
        self.responses
            .lock()
            .expect("script lock poisoned")
            .push_back(Err(error));
        self
    }

    /// Number of calls made so far
    pub fn call_count(&self) -> usize {
        self.requests.lock().expect("request lock poisoned").len()
    }

    /// Copies of every request received, in order
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().expect("request lock poisoned").clone()
    }

    /// Number of scripted answers not yet consumed
    pub fn remaining(&self) -> usize {
        self.responses.lock().expect("script lock poisoned").len()
    }
}

impl DomainPort for ScriptedCompletionPort {}

#[async_trait]
impl CompletionPort for ScriptedCompletionPort {
    async fn complete(&self, request: CompletionRequest) -> Result<Value, CompletionError> {
        self.requests
            .lock()
            .expect("request lock poisoned")
            .push(request);

        self.responses
            .lock()
            .expect("script lock poisoned")
            .pop_front()
            .unwrap_or_else(|| Err(CompletionError::unknown("scripted completion port exhausted")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_replays_in_order_and_records() {
        let port = ScriptedCompletionPort::new();
        port.push_ok(json!({ "n": 1 }))
            .push_err(CompletionError::unknown("boom"));

        let first = port.complete(CompletionRequest::json("a")).await;
        let second = port.complete(CompletionRequest::json("b")).await;
        let third = port.complete(CompletionRequest::json("c")).await;

        assert_eq!(first.unwrap(), json!({ "n": 1 }));
        assert_eq!(second.unwrap_err(), CompletionError::unknown("boom"));
        assert!(third.is_err());
        assert_eq!(port.call_count(), 3);
        assert_eq!(port.requests()[1].prompt, "b");
        assert_eq!(port.remaining(), 0);
    }
}
