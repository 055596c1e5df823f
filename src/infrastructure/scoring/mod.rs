//! Scoring service integration: HTTP client, retry, rate limiting.

pub mod client;
pub mod error;
pub mod rate_limiter;
pub mod retry;
pub mod scripted;
pub mod types;

pub use client::HttpScoringClient;
pub use error::ScoringApiError;
pub use rate_limiter::TokenBucketRateLimiter;
pub use retry::RetryPolicy;
pub use scripted::ScriptedScoringClient;
