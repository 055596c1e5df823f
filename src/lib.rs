//! Sift - batch applicant evaluation pipeline.
//!
//! Sift aggregates signals from several untrusted, partially-overlapping
//! sources (application form, professional-network profile, code-hosting
//! profile, personal website, résumé) into an eligibility decision, five
//! criterion grades, and a cross-source trust score, driving a resumable
//! state machine over a CSV candidate table.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): models, state machine, and ports
//! - **Service Layer** (`services`): the leaf scorers and the evaluator
//! - **Application Layer** (`application`): the batch orchestrator
//! - **Infrastructure Layer** (`infrastructure`): CSV store, scoring
//!   client, collaborator adapters, config, logging
//! - **CLI Layer** (`cli`): command-line interface

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use application::{BatchOrchestrator, RunSummary};
pub use domain::models::{
    CandidateRecord, CandidateStatus, Config, EligibilityDecision, GradeReport, Grades,
    NetworkProfile, VerificationReport,
};
pub use domain::ports::{
    CandidateStore, ChartRenderer, CodeHostSource, NetworkProfileSource, ResumeSource,
    ScoringClient, StoreError, WebsiteSource,
};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use infrastructure::store::CsvStore;
pub use services::{
    CandidateEvaluator, ConsensusGrader, Criterion, EducationGrader, EligibilityFilter,
    SnapshotCache, TrustVerifier,
};
