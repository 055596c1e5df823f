//! Scoring service port.
//!
//! The scoring collaborator takes a system instruction plus a user
//! prompt and returns free text that is expected, but not guaranteed,
//! to end in a 0-100 integer. The service is nondeterministic; the
//! consensus grader deals with the noise.

use async_trait::async_trait;
use thiserror::Error;

/// Request to the scoring service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateRequest {
    /// System instruction framing the evaluation
    pub system: Option<String>,

    /// User prompt carrying the candidate context
    pub prompt: String,
}

impl GenerateRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self { system: None, prompt: prompt.into() }
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }
}

/// Free-text response from the scoring service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateResponse {
    pub text: String,
}

/// Errors raised by a scoring client. A single failed call costs one
/// sample; only total sample exhaustion is visible in the grade.
#[derive(Debug, Error)]
pub enum ScoringError {
    /// Service unreachable or out of retry budget
    #[error("scoring service unavailable: {0}")]
    Unavailable(String),

    /// Service rejected the request (bad model, bad payload)
    #[error("scoring service rejected request: {0}")]
    Rejected(String),

    /// Response body could not be decoded
    #[error("malformed scoring response: {0}")]
    Malformed(String),
}

/// Port for the external scoring service.
#[async_trait]
pub trait ScoringClient: Send + Sync {
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, ScoringError>;
}
