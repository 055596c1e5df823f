//! Scoring API error types with transient/permanent classification.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors from the scoring HTTP endpoint.
#[derive(Debug, Clone, Error)]
pub enum ScoringApiError {
    /// 429 from the service
    #[error("rate limit exceeded")]
    RateLimitExceeded,

    /// Request timed out
    #[error("request timed out")]
    Timeout,

    /// Connection-level failure
    #[error("network error: {0}")]
    Network(String),

    /// 5xx from the service
    #[error("server error {0}: {1}")]
    ServerError(StatusCode, String),

    /// 4xx other than 429 (bad model name, bad payload)
    #[error("invalid request ({0}): {1}")]
    InvalidRequest(StatusCode, String),

    /// Body could not be decoded
    #[error("invalid response body: {0}")]
    InvalidResponse(String),
}

impl ScoringApiError {
    /// Classify an HTTP error status.
    pub fn from_status(status: StatusCode, body: String) -> Self {
        if status == StatusCode::TOO_MANY_REQUESTS {
            Self::RateLimitExceeded
        } else if status.is_server_error() {
            Self::ServerError(status, body)
        } else {
            Self::InvalidRequest(status, body)
        }
    }

    /// Transient errors are worth retrying with backoff.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::RateLimitExceeded | Self::Timeout | Self::Network(_) | Self::ServerError(..)
        )
    }

    pub fn is_permanent(&self) -> bool {
        !self.is_transient()
    }
}
