//! Consensus grading policy tests: best-of-5, mean of top 3, and the
//! degradation ladder down to zero.

use std::sync::Arc;

use sift::infrastructure::scoring::ScriptedScoringClient;
use sift::{ConsensusGrader, Criterion};

#[tokio::test]
async fn test_mean_of_top_three() {
    let client = Arc::new(ScriptedScoringClient::new(["90", "80", "70", "60", "50"]));
    let grader = ConsensusGrader::new(Arc::clone(&client), 5, 3);

    let score = grader.grade(Criterion::Community, "context").await;
    assert!((score - 80.0).abs() < f64::EPSILON);
    assert_eq!(client.calls(), 5);
}

#[tokio::test]
async fn test_single_low_outlier_is_damped() {
    let client = Arc::new(ScriptedScoringClient::new(["85", "3", "80", "90", "82"]));
    let grader = ConsensusGrader::new(client, 5, 3);

    // Top 3 of {85, 3, 80, 90, 82} = {90, 85, 82}.
    let score = grader.grade(Criterion::Research, "context").await;
    assert!((score - (90.0 + 85.0 + 82.0) / 3.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_invalid_samples_are_dropped() {
    // "no score" has no integer; "250" and "101" are out of range.
    let client = Arc::new(ScriptedScoringClient::new(["no score", "250", "101", "88", "72"]));
    let grader = ConsensusGrader::new(client, 5, 3);

    let score = grader.grade(Criterion::HackProject, "context").await;
    assert!((score - 80.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_fewer_than_top_k_valid_samples() {
    let client = Arc::new(ScriptedScoringClient::new(["60"]));
    // The remaining 4 calls fail (script exhausted).
    let grader = ConsensusGrader::new(Arc::clone(&client), 5, 3);

    let score = grader.grade(Criterion::Startup, "context").await;
    assert!((score - 60.0).abs() < f64::EPSILON);
    assert_eq!(client.calls(), 5);
}

#[tokio::test]
async fn test_total_exhaustion_yields_zero() {
    let client = Arc::new(ScriptedScoringClient::new(Vec::<String>::new()));
    let grader = ConsensusGrader::new(client, 5, 3);

    let score = grader.grade(Criterion::Community, "context").await;
    assert!(score.abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_last_integer_in_chatty_response_wins() {
    let client = Arc::new(ScriptedScoringClient::new([
        "Considering the strong community signals, I'd give this 75",
        "75",
        "75",
        "75",
        "75",
    ]));
    let grader = ConsensusGrader::new(client, 5, 3);

    let score = grader.grade(Criterion::Community, "context").await;
    assert!((score - 75.0).abs() < f64::EPSILON);
}
