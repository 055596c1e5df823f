//! Scripted scoring client for tests and dry runs.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::ports::{GenerateRequest, GenerateResponse, ScoringClient, ScoringError};

/// Replays a fixed list of responses; exhaustion turns into
/// `ScoringError::Unavailable`, matching a dead service.
pub struct ScriptedScoringClient {
    responses: Mutex<VecDeque<String>>,
    calls: AtomicUsize,
}

impl ScriptedScoringClient {
    pub fn new(responses: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().map(Into::into).collect()),
            calls: AtomicUsize::new(0),
        }
    }

    /// A client that always answers with the same score text.
    pub fn repeating(text: impl Into<String>, count: usize) -> Self {
        let text = text.into();
        Self::new(std::iter::repeat_n(text, count))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ScoringClient for ScriptedScoringClient {
    async fn generate(&self, _request: GenerateRequest) -> Result<GenerateResponse, ScoringError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self.responses.lock().expect("scripted responses poisoned").pop_front();
        match next {
            Some(text) => Ok(GenerateResponse { text }),
            None => Err(ScoringError::Unavailable("script exhausted".into())),
        }
    }
}
