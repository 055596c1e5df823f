//! Cross-source trust verification.
//!
//! Checks form-declared claims against the network profile and the
//! résumé. Every check can only deduct from the score; corroborated
//! claims are recorded as matches at no cost.

use crate::domain::models::{CandidateRecord, NetworkProfile, ResumeData, VerificationReport};
use crate::domain::similarity::is_confident_match;

/// Education claimed but found in neither independent source.
const MISSING_EDUCATION_DEDUCTION: u8 = 20;
/// Company claimed but found in neither independent source.
const UNVERIFIED_COMPANY_DEDUCTION: u8 = 15;
/// Company confirmed but the claimed role does not match the title.
const ROLE_MISMATCH_DEDUCTION: u8 = 5;
/// Long project claims against a nearly empty résumé.
const SPARSE_RESUME_DEDUCTION: u8 = 10;

/// Claims lifted from the application form for verification.
#[derive(Debug, Clone, Default)]
pub struct FormClaims {
    pub school: Option<String>,
    pub current_role: Option<String>,
    pub company: Option<String>,
    pub projects: String,
}

impl FormClaims {
    pub fn from_record(record: &CandidateRecord) -> Self {
        Self {
            school: non_empty(&record.school),
            current_role: non_empty(&record.current_role),
            company: non_empty(&record.company_name),
            projects: record.projects.trim().to_string(),
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// The cross-source verifier. Stateless; all inputs arrive per call.
pub struct TrustVerifier;

impl TrustVerifier {
    /// Run all checks and produce the report.
    pub fn verify(
        claims: &FormClaims,
        profile: &NetworkProfile,
        resume: &ResumeData,
    ) -> VerificationReport {
        let mut report = VerificationReport::new();
        Self::check_education(claims, profile, resume, &mut report);
        Self::check_company(claims, profile, resume, &mut report);
        Self::check_projects(claims, resume, &mut report);
        report
    }

    /// The claimed school must appear on the profile (fuzzy) or in the
    /// résumé (substring over raw text, or fuzzy over education lines).
    fn check_education(
        claims: &FormClaims,
        profile: &NetworkProfile,
        resume: &ResumeData,
        report: &mut VerificationReport,
    ) {
        let Some(school) = claims.school.as_deref() else {
            return;
        };

        let profile_match = profile
            .education_entries()
            .filter_map(|entry| entry.school.as_deref())
            .any(|entry_school| is_confident_match(school, entry_school));

        let resume_match = resume
            .raw_text
            .to_lowercase()
            .contains(&school.to_lowercase())
            || resume
                .education
                .iter()
                .any(|line| is_confident_match(school, line));

        match (profile_match, resume_match) {
            (true, true) => {
                report.record_match(format!("Education '{school}' verified on profile and resume."));
            }
            (true, false) => {
                report.record_match(format!("Education '{school}' verified on profile."));
            }
            (false, true) => {
                report.record_match(format!("Education '{school}' verified on resume."));
            }
            (false, false) => report.deduct(
                MISSING_EDUCATION_DEDUCTION,
                format!(
                    "CRITICAL: Education '{school}' claimed in form but not found on profile or resume."
                ),
            ),
        }
    }

    /// The claimed company must appear in the profile's experience
    /// entries (fuzzy); when it does, the claimed role is also checked
    /// against that entry's title. A plain substring hit in the résumé
    /// is accepted as a fallback confirmation.
    fn check_company(
        claims: &FormClaims,
        profile: &NetworkProfile,
        resume: &ResumeData,
        report: &mut VerificationReport,
    ) {
        let Some(company) = claims.company.as_deref() else {
            return;
        };

        let matched_entry = profile.experience_entries().find(|entry| {
            entry
                .company
                .as_deref()
                .is_some_and(|entry_company| is_confident_match(company, entry_company))
        });

        if let Some(entry) = matched_entry {
            let title = entry.title.as_deref().unwrap_or("");
            match claims.current_role.as_deref() {
                Some(role) if is_confident_match(role, title) => {
                    report.record_match(format!(
                        "Role '{role}' at '{company}' verified on profile."
                    ));
                }
                Some(role) => {
                    report.record_match(format!(
                        "Company '{company}' verified on profile, but role '{role}' mismatch (found: {title})."
                    ));
                    report.penalize(ROLE_MISMATCH_DEDUCTION);
                }
                None => {
                    report.record_match(format!("Company '{company}' verified on profile."));
                }
            }
            return;
        }

        if resume.raw_text.to_lowercase().contains(&company.to_lowercase()) {
            report.record_match(format!("Company '{company}' found in resume (but not profile)."));
        } else {
            report.deduct(
                UNVERIFIED_COMPANY_DEDUCTION,
                format!("WARNING: Company '{company}' not found in profile experience or resume."),
            );
        }
    }

    /// Heuristic only: a long project claim against a nearly empty
    /// résumé is a sparse-corroboration signal.
    fn check_projects(claims: &FormClaims, resume: &ResumeData, report: &mut VerificationReport) {
        if claims.projects.len() < 10 {
            return;
        }
        if claims.projects.len() > 200 && resume.raw_text.len() < 200 {
            report.deduct(
                SPARSE_RESUME_DEDUCTION,
                "Detailed projects in form but resume is very sparse.",
            );
        }
    }
}
