//! Evaluator-level scenarios: cross-source verification outcomes
//! combined with the consensus scoring ladder.

mod common;

use std::sync::Arc;

use async_trait::async_trait;
use common::{ada_profile, reference_tables, StaticNetworkSource};
use sift::domain::models::{CandidateRecord, ResumeData};
use sift::domain::ports::{
    NullCodeHostSource, NullWebsiteSource, ResumeSource, SourceError,
};
use sift::infrastructure::scoring::ScriptedScoringClient;
use sift::services::CollaboratorSet;
use sift::{CandidateEvaluator, ConsensusGrader, EducationGrader, SnapshotCache};

struct FixedResumeSource(ResumeData);

#[async_trait]
impl ResumeSource for FixedResumeSource {
    async fn fetch(&self, _path: &str) -> Result<ResumeData, SourceError> {
        Ok(self.0.clone())
    }
}

fn evaluator_with(
    scoring: Arc<ScriptedScoringClient>,
    network: Arc<StaticNetworkSource>,
    resume: ResumeData,
) -> CandidateEvaluator<ScriptedScoringClient> {
    let (domestic, world) = reference_tables();
    CandidateEvaluator::new(
        EducationGrader::new(domestic, world),
        ConsensusGrader::new(scoring, 5, 3),
        CollaboratorSet {
            network,
            code_host: Arc::new(NullCodeHostSource),
            website: Arc::new(NullWebsiteSource),
            resume: Arc::new(FixedResumeSource(resume)),
        },
    )
}

#[tokio::test]
async fn test_fully_corroborated_candidate_keeps_full_trust() {
    let record = CandidateRecord {
        first_name: "Ada".into(),
        last_name: "Lovelace".into(),
        country_of_origin: "USA".into(),
        school: "Stanford University".into(),
        current_role: "CTO".into(),
        company_name: "TechStart".into(),
        network_profile_url: "https://network.example/in/ada".into(),
        resume_path: "ada.txt".into(),
        ..Default::default()
    };
    let profile = {
        let mut profile = ada_profile();
        // Same company/role, school switched to match the claim.
        profile.entries[0] = sift::domain::models::ProfileEntry::Education(
            sift::domain::models::EducationEntry {
                school: Some("Stanford University".into()),
                degree: None,
                years: None,
            },
        );
        profile
    };
    let resume = ResumeData {
        raw_text: "Stanford University graduate, CTO at TechStart".into(),
        ..Default::default()
    };

    let scoring = Arc::new(ScriptedScoringClient::repeating("90", 20));
    let evaluator =
        evaluator_with(scoring, Arc::new(StaticNetworkSource::new("ada", profile)), resume);

    let mut cache = SnapshotCache::new();
    let report = evaluator.evaluate(&record, &mut cache).await.unwrap();

    assert_eq!(report.verification.trust_score(), 100);
    assert!(report.verification.discrepancies.is_empty());
    // Stanford sits at world rank 3: top-10 shortcut.
    assert_eq!(report.grades.education, 100.0);
}

#[tokio::test]
async fn test_unverified_claims_cost_trust() {
    let record = CandidateRecord {
        first_name: "Mallory".into(),
        country_of_origin: "USA".into(),
        school: "MIT".into(),
        current_role: "CEO".into(),
        company_name: "Google".into(),
        network_profile_url: "https://network.example/in/ada".into(),
        resume_path: "mallory.txt".into(),
        ..Default::default()
    };
    // Profile and résumé both point at Stanford; Google appears nowhere.
    let resume = ResumeData { raw_text: "Stanford".into(), ..Default::default() };

    let scoring = Arc::new(ScriptedScoringClient::repeating("50", 20));
    let evaluator = evaluator_with(
        scoring,
        Arc::new(StaticNetworkSource::new("ada", ada_profile())),
        resume,
    );

    let mut cache = SnapshotCache::new();
    let report = evaluator.evaluate(&record, &mut cache).await.unwrap();

    // 100 - 20 (education) - 15 (company).
    assert_eq!(report.verification.trust_score(), 65);
    assert_eq!(report.verification.discrepancies.len(), 2);
}

#[tokio::test]
async fn test_consensus_ladder_across_criteria() {
    let record = CandidateRecord {
        first_name: "Casey".into(),
        country_of_origin: "Spain".into(),
        network_profile_url: "https://network.example/in/casey".into(),
        ..Default::default()
    };

    // Criteria are graded in order: Community, Hack/Project, Research,
    // Startup. Five samples each.
    let responses: Vec<&str> = vec![
        // Community: top 3 of {90, 80, 70, 60, 50} -> 80.
        "90", "80", "70", "60", "50",
        // Hack/Project: only one valid sample -> 55.
        "score unavailable", "n/a", "55", "overloaded", "301",
        // Research: nothing valid -> 0.
        "no", "no", "no", "no", "no",
        // Startup: forced ceiling -> 100.
        "100", "100", "100", "100", "100",
    ];
    let scoring = Arc::new(ScriptedScoringClient::new(responses));
    let evaluator = evaluator_with(
        Arc::clone(&scoring),
        Arc::new(StaticNetworkSource::new("casey", Default::default())),
        ResumeData::default(),
    );

    let mut cache = SnapshotCache::new();
    let report = evaluator.evaluate(&record, &mut cache).await.unwrap();

    assert!((report.grades.community - 80.0).abs() < f64::EPSILON);
    assert!((report.grades.hack_project - 55.0).abs() < f64::EPSILON);
    assert!(report.grades.research.abs() < f64::EPSILON);
    assert!((report.grades.startup - 100.0).abs() < f64::EPSILON);
    // No claims made, so trust stays untouched.
    assert_eq!(report.verification.trust_score(), 100);
    // Unknown school, unknown country: neutral education score.
    assert_eq!(report.grades.education, 50.0);
    assert_eq!(scoring.calls(), 20);
}
