//! Candidate domain model.
//!
//! A candidate is one row of the tabular store. Rows move through a
//! small state machine: `pending` rows are picked up by the batch
//! orchestrator and end in exactly one terminal state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::verification::VerificationReport;
use crate::domain::errors::DomainError;

/// Status of a candidate row in the evaluation pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateStatus {
    /// Row has not been processed yet
    Pending,
    /// Row is currently being evaluated
    Processing,
    /// Evaluation finished, grades written
    Done,
    /// Evaluation raised an error (see `error_message`)
    Failed,
    /// Row did not pass the Europe eligibility gate
    RejectedEurope,
}

impl Default for CandidateStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl CandidateStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Done => "done",
            Self::Failed => "failed",
            Self::RejectedEurope => "rejected_europe",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "processing" => Some(Self::Processing),
            "done" => Some(Self::Done),
            "failed" => Some(Self::Failed),
            "rejected_europe" => Some(Self::RejectedEurope),
            _ => None,
        }
    }

    /// Check if this is a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Failed | Self::RejectedEurope)
    }

    /// Valid transitions from this status.
    pub fn valid_transitions(&self) -> Vec<CandidateStatus> {
        match self {
            Self::Pending => vec![Self::Processing],
            Self::Processing => vec![Self::Done, Self::Failed, Self::RejectedEurope],
            Self::Done | Self::Failed | Self::RejectedEurope => vec![],
        }
    }

    pub fn can_transition_to(&self, new_status: Self) -> bool {
        self.valid_transitions().contains(&new_status)
    }
}

/// The five criterion grades produced for a fully evaluated candidate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Grades {
    pub education: f64,
    pub community: f64,
    pub hack_project: f64,
    pub research: f64,
    pub startup: f64,
}

impl Grades {
    /// Criterion labels in display order.
    pub const LABELS: [&'static str; 5] =
        ["Education", "Community", "Hack/Project", "Research", "Startup"];

    /// Scores in the same order as [`Grades::LABELS`].
    pub fn values(&self) -> [f64; 5] {
        [
            self.education,
            self.community,
            self.hack_project,
            self.research,
            self.startup,
        ]
    }
}

/// Transient result of evaluating one candidate. Individual fields are
/// flattened into the candidate row; the report itself is never stored.
#[derive(Debug, Clone)]
pub struct GradeReport {
    pub grades: Grades,
    pub verification: VerificationReport,
}

/// One row of the candidate table.
///
/// Identity and form-declared fields are read from the input columns and
/// never modified; pipeline-managed fields are written exactly once when
/// the row reaches a terminal state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    /// Row index in the table; stable across runs.
    pub index: usize,

    // Identity
    pub first_name: String,
    pub last_name: String,
    pub country_of_origin: String,

    // Form-declared fields
    pub current_location: String,
    pub school: String,
    pub current_role: String,
    pub company_name: String,
    pub company_description: String,
    pub achievements: String,
    pub projects: String,
    pub programs: String,
    pub about: String,
    pub contribution: String,

    // Collaborator references
    pub network_profile_url: String,
    pub code_host_url: String,
    pub website_url: String,
    pub resume_path: String,

    // Pipeline-managed
    pub status: CandidateStatus,
    pub grade_education: Option<f64>,
    pub grade_community: Option<f64>,
    pub grade_hack_project: Option<f64>,
    pub grade_research: Option<f64>,
    pub grade_startup: Option<f64>,
    pub trust_score: Option<u8>,
    pub europe_reason: Option<String>,
    pub chart_path: Option<String>,
    pub error_message: Option<String>,
    pub processed_at: Option<DateTime<Utc>>,
}

impl CandidateRecord {
    /// Display name: "First Last", or a positional fallback when the
    /// form left both name fields blank.
    pub fn display_name(&self) -> String {
        let name = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let name = name.trim().to_string();
        if name.is_empty() {
            format!("candidate_{}", self.index)
        } else {
            name
        }
    }

    /// Check if can transition to given status.
    pub fn can_transition_to(&self, new_status: CandidateStatus) -> bool {
        self.status.can_transition_to(new_status)
    }

    fn transition_to(&mut self, new_status: CandidateStatus) -> Result<(), DomainError> {
        if !self.can_transition_to(new_status) {
            return Err(DomainError::InvalidStateTransition {
                from: self.status.as_str().to_string(),
                to: new_status.as_str().to_string(),
            });
        }
        self.status = new_status;
        Ok(())
    }

    /// Select the row for processing.
    pub fn begin_processing(&mut self) -> Result<(), DomainError> {
        self.transition_to(CandidateStatus::Processing)
    }

    /// Record a completed evaluation. Grades and the trust score are only
    /// ever populated through this transition.
    pub fn complete(
        &mut self,
        report: &GradeReport,
        chart_path: Option<String>,
    ) -> Result<(), DomainError> {
        self.transition_to(CandidateStatus::Done)?;
        self.grade_education = Some(report.grades.education);
        self.grade_community = Some(round1(report.grades.community));
        self.grade_hack_project = Some(round1(report.grades.hack_project));
        self.grade_research = Some(round1(report.grades.research));
        self.grade_startup = Some(round1(report.grades.startup));
        self.trust_score = Some(report.verification.trust_score());
        self.chart_path = chart_path;
        self.processed_at = Some(Utc::now());
        Ok(())
    }

    /// Record an eligibility rejection.
    pub fn reject(&mut self, reason: String) -> Result<(), DomainError> {
        self.transition_to(CandidateStatus::RejectedEurope)?;
        self.europe_reason = Some(reason);
        self.processed_at = Some(Utc::now());
        Ok(())
    }

    /// Record an evaluation failure. `error_message` is only ever
    /// populated through this transition.
    pub fn fail(&mut self, error: String) -> Result<(), DomainError> {
        self.transition_to(CandidateStatus::Failed)?;
        self.error_message = Some(error);
        self.processed_at = Some(Utc::now());
        Ok(())
    }

    /// Reset a row stranded in `processing` by a killed run back to
    /// `pending` so the next run re-selects it.
    pub fn reclaim(&mut self) {
        if self.status == CandidateStatus::Processing {
            self.status = CandidateStatus::Pending;
        }
    }
}

/// Grades are stored with one decimal, matching the consensus scorer's
/// averaged output.
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
