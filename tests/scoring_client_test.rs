//! HTTP scoring client integration tests against a mock server.

use sift::domain::models::{RateLimitConfig, RetryConfig, ScoringConfig};
use sift::domain::ports::{GenerateRequest, ScoringClient, ScoringError};
use sift::infrastructure::scoring::HttpScoringClient;

fn client_for(server: &mockito::ServerGuard) -> HttpScoringClient {
    let scoring = ScoringConfig {
        base_url: server.url(),
        model: "scorer".into(),
        timeout_secs: 5,
        ..Default::default()
    };
    let rate_limit = RateLimitConfig { requests_per_second: 1_000.0, burst_size: 10 };
    // Millisecond backoffs keep the retry tests fast.
    let retry = RetryConfig { max_retries: 2, initial_backoff_ms: 1, max_backoff_ms: 5 };
    HttpScoringClient::new(&scoring, &rate_limit, &retry).unwrap()
}

#[tokio::test]
async fn test_successful_generation() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/generate")
        .with_status(200)
        .with_body(r#"{"response":"87","done":true}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let response = client
        .generate(GenerateRequest::new("grade this").with_system("score 0-100"))
        .await
        .unwrap();

    assert_eq!(response.text, "87");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_client_error_is_not_retried() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/generate")
        .with_status(404)
        .with_body("model not found")
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server);
    let result = client.generate(GenerateRequest::new("grade")).await;

    assert!(matches!(result, Err(ScoringError::Rejected(_))));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_exhausted_retries_surface_as_unavailable() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/generate")
        .with_status(500)
        .expect(3) // initial attempt + 2 retries
        .create_async()
        .await;

    let client = client_for(&server);
    let result = client.generate(GenerateRequest::new("grade")).await;

    assert!(matches!(result, Err(ScoringError::Unavailable(_))));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_undecodable_body_is_malformed() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/generate")
        .with_status(200)
        .with_body("not json at all")
        .create_async()
        .await;

    let client = client_for(&server);
    let result = client.generate(GenerateRequest::new("grade")).await;
    assert!(matches!(result, Err(ScoringError::Malformed(_))));
}
