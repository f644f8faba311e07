//! Shared utilities for integration testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use repobot::handlers::{Action, ActionError, Reply};
use repobot::routing::{MessageContext, Params};

/// Observed invocations of one recording action.
#[derive(Default)]
pub struct RecordingState {
    hits: AtomicUsize,
    calls: Mutex<Vec<HashMap<String, String>>>,
}

impl RecordingState {
    pub fn hit_count(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    /// Parameters of the most recent invocation.
    #[allow(dead_code)]
    pub fn last_call(&self) -> Option<HashMap<String, String>> {
        self.calls.lock().unwrap().last().cloned()
    }
}

/// Action that records every call and replies with a fixed string.
pub struct RecordingAction {
    state: Arc<RecordingState>,
    reply: String,
}

#[async_trait]
impl Action for RecordingAction {
    async fn call(&self, params: &Params, _ctx: &MessageContext) -> Result<Reply, ActionError> {
        self.state.hits.fetch_add(1, Ordering::SeqCst);
        self.state.calls.lock().unwrap().push(
            params
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        );
        Ok(Some(self.reply.clone()))
    }
}

pub fn recording_action(reply: &str) -> (Arc<dyn Action>, Arc<RecordingState>) {
    let state = Arc::new(RecordingState::default());
    (
        Arc::new(RecordingAction {
            state: state.clone(),
            reply: reply.to_string(),
        }),
        state,
    )
}

/// Action that always fails with the given message.
#[allow(dead_code)]
pub struct FailingAction {
    message: String,
}

#[async_trait]
impl Action for FailingAction {
    async fn call(&self, _params: &Params, _ctx: &MessageContext) -> Result<Reply, ActionError> {
        Err(self.message.clone().into())
    }
}

#[allow(dead_code)]
pub fn failing_action(message: &str) -> Arc<dyn Action> {
    Arc::new(FailingAction {
        message: message.to_string(),
    })
}
