//! HTTP client for the scoring generation endpoint.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client as ReqwestClient;

use super::error::ScoringApiError;
use super::rate_limiter::TokenBucketRateLimiter;
use super::retry::RetryPolicy;
use super::types::{GenerateApiRequest, GenerateApiResponse};
use crate::domain::models::{RateLimitConfig, RetryConfig, ScoringConfig};
use crate::domain::ports::{GenerateRequest, GenerateResponse, ScoringClient, ScoringError};

/// HTTP client for an Ollama-style generation endpoint.
///
/// Requests pass through a client-side token bucket and an
/// exponential-backoff retry policy; transient failures (timeouts, 429,
/// 5xx) are retried, everything else surfaces immediately.
pub struct HttpScoringClient {
    http: ReqwestClient,
    base_url: String,
    model: String,
    rate_limiter: TokenBucketRateLimiter,
    retry_policy: RetryPolicy,
}

impl HttpScoringClient {
    pub fn new(
        scoring: &ScoringConfig,
        rate_limit: &RateLimitConfig,
        retry: &RetryConfig,
    ) -> anyhow::Result<Self> {
        let http = ReqwestClient::builder()
            .timeout(Duration::from_secs(scoring.timeout_secs))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: scoring.base_url.trim_end_matches('/').to_string(),
            model: scoring.model.clone(),
            rate_limiter: TokenBucketRateLimiter::new(
                rate_limit.requests_per_second,
                rate_limit.burst_size,
            ),
            retry_policy: RetryPolicy::new(
                retry.max_retries,
                retry.initial_backoff_ms,
                retry.max_backoff_ms,
            ),
        })
    }

    async fn send_request(
        &self,
        request: &GenerateApiRequest,
    ) -> Result<GenerateApiResponse, ScoringApiError> {
        let response = self
            .http
            .post(format!("{}/api/generate", self.base_url))
            .json(request)
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    ScoringApiError::Timeout
                } else {
                    ScoringApiError::Network(err.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read error response".to_string());
            return Err(ScoringApiError::from_status(status, body));
        }

        response
            .json()
            .await
            .map_err(|err| ScoringApiError::InvalidResponse(err.to_string()))
    }
}

#[async_trait]
impl ScoringClient for HttpScoringClient {
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, ScoringError> {
        self.rate_limiter.acquire().await;

        let api_request = GenerateApiRequest {
            model: self.model.clone(),
            prompt: request.prompt,
            system: request.system,
            stream: false,
        };

        let response = self
            .retry_policy
            .execute(|| self.send_request(&api_request))
            .await
            .map_err(|err| match err {
                ScoringApiError::InvalidRequest(status, body) => {
                    ScoringError::Rejected(format!("{status}: {body}"))
                }
                ScoringApiError::InvalidResponse(reason) => ScoringError::Malformed(reason),
                transient => ScoringError::Unavailable(transient.to_string()),
            })?;

        Ok(GenerateResponse { text: response.response })
    }
}
