//! Per-candidate evaluation.
//!
//! Composes the education grader, the collaborator snapshots, the trust
//! verifier, and the consensus grader into one grade report. Every
//! collaborator fetch is best-effort: a failure degrades to an empty
//! snapshot and evaluation continues.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::consensus::{ConsensusGrader, Criterion};
use super::education::EducationGrader;
use super::snapshot_cache::SnapshotCache;
use super::trust::{FormClaims, TrustVerifier};
use crate::domain::models::{
    CandidateRecord, DeveloperProfile, GradeReport, Grades, ResumeData, WebsiteData,
};
use crate::domain::ports::{
    CodeHostSource, NetworkProfileSource, ResumeSource, ScoringClient, WebsiteSource,
};

/// Website text is truncated to this many characters before entering a
/// scoring context, to bound prompt cost.
const WEBSITE_CONTEXT_CHARS: usize = 400;

/// External sources the evaluator draws on.
pub struct CollaboratorSet {
    pub network: Arc<dyn NetworkProfileSource>,
    pub code_host: Arc<dyn CodeHostSource>,
    pub website: Arc<dyn WebsiteSource>,
    pub resume: Arc<dyn ResumeSource>,
}

pub struct CandidateEvaluator<C: ScoringClient> {
    education: EducationGrader,
    consensus: ConsensusGrader<C>,
    sources: CollaboratorSet,
}

impl<C: ScoringClient> CandidateEvaluator<C> {
    pub fn new(
        education: EducationGrader,
        consensus: ConsensusGrader<C>,
        sources: CollaboratorSet,
    ) -> Self {
        Self { education, consensus, sources }
    }

    /// Evaluate one candidate. Populates the shared snapshot cache as a
    /// side effect; otherwise pure.
    pub async fn evaluate(
        &self,
        record: &CandidateRecord,
        cache: &mut SnapshotCache,
    ) -> anyhow::Result<GradeReport> {
        let education = self.education.grade(&record.school, &record.country_of_origin);
        debug!(score = education, "education grade computed");

        // Collaborator snapshots, each independently best-effort.
        let developer = self
            .developer_snapshot(&record.code_host_url, cache)
            .await;
        let resume = self.resume_snapshot(&record.resume_path).await;
        let website = self
            .website_snapshot(&developer, &record.website_url, &resume)
            .await;
        let network = cache
            .network_profile(&record.network_profile_url, &*self.sources.network)
            .await;

        let claims = FormClaims::from_record(record);
        let verification = TrustVerifier::verify(&claims, &network, &resume);
        info!(
            trust_score = verification.trust_score(),
            discrepancies = verification.discrepancies.len(),
            "cross-source verification finished"
        );

        let repo_context = repo_context(&developer);
        let resume_summary = resume.summary();

        let community_context = format!(
            "Role/Association: {}\nExperience: {}\nContributions: {}\nDeveloper Bio: {}\nResume: {}",
            record.programs,
            record.about,
            record.contribution,
            developer.bio.as_deref().unwrap_or(""),
            resume_summary,
        );

        let hack_context = format!(
            "Achievements: {}\nProjects: {}\nCode-host URL: {}\n\nDEVELOPER PROFILE:\n{}\nRESUME:\n{}",
            record.achievements, record.projects, record.code_host_url, repo_context, resume_summary,
        );

        let research_context = format!(
            "Projects/Papers: {}\nAbout: {}\nDEVELOPER PROFILE (may contain research code):\n{}\nRESUME:\n{}",
            record.projects, record.about, repo_context, resume_summary,
        );

        let startup_context = format!(
            "Startup Name: {}\nRole: {}\nDesc: {}\nExtra Info: {}\nWebsite URL: {}\nWebsite Content: {}\n{}\nTRUST SCORE: {}\nDISCREPANCIES: {}",
            record.company_name,
            record.current_role,
            record.company_description,
            record.about,
            developer.blog.as_deref().unwrap_or(""),
            truncate_chars(&website.raw_text, WEBSITE_CONTEXT_CHARS),
            funding_signal(&record.about),
            verification.trust_score(),
            verification.discrepancies.join("; "),
        );

        let community = self.consensus.grade(Criterion::Community, &community_context).await;
        let hack_project = self.consensus.grade(Criterion::HackProject, &hack_context).await;
        let research = self.consensus.grade(Criterion::Research, &research_context).await;
        let startup = self.consensus.grade(Criterion::Startup, &startup_context).await;

        Ok(GradeReport {
            grades: Grades { education, community, hack_project, research, startup },
            verification,
        })
    }

    async fn developer_snapshot(
        &self,
        code_host_url: &str,
        cache: &mut SnapshotCache,
    ) -> DeveloperProfile {
        let username = code_host_username(code_host_url);
        if username.is_empty() {
            return DeveloperProfile::default();
        }
        cache.developer_profile(&username, &*self.sources.code_host).await
    }

    async fn resume_snapshot(&self, resume_path: &str) -> ResumeData {
        if resume_path.trim().is_empty() {
            return ResumeData::default();
        }
        match self.sources.resume.fetch(resume_path.trim()).await {
            Ok(resume) => resume,
            Err(err) => {
                warn!(path = resume_path, error = %err, "resume fetch failed, continuing without it");
                ResumeData::default()
            }
        }
    }

    /// Resolve the website URL (code-host blog, then the form, then the
    /// résumé links) and fetch it.
    async fn website_snapshot(
        &self,
        developer: &DeveloperProfile,
        form_url: &str,
        resume: &ResumeData,
    ) -> WebsiteData {
        let url = developer
            .blog
            .as_deref()
            .filter(|blog| !blog.trim().is_empty())
            .or_else(|| Some(form_url).filter(|form| !form.trim().is_empty()))
            .or(resume.links.website.as_deref())
            .unwrap_or("")
            .trim();

        if !url.starts_with("http") {
            return WebsiteData::default();
        }
        match self.sources.website.fetch(url).await {
            Ok(website) => {
                if let Some(error) = &website.error {
                    debug!(url, error, "website fetch degraded");
                }
                website
            }
            Err(err) => {
                warn!(url, error = %err, "website fetch failed, continuing without it");
                WebsiteData::default()
            }
        }
    }
}

/// Code-host profile URLs carry the username as the last path segment;
/// bare handles pass through unchanged.
pub fn code_host_username(url: &str) -> String {
    url.trim()
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or("")
        .trim()
        .to_string()
}

fn repo_context(developer: &DeveloperProfile) -> String {
    if developer.is_empty() {
        return String::new();
    }
    let mut context = format!("Bio: {}\nTop Repositories:\n", developer.bio.as_deref().unwrap_or(""));
    for repo in developer.repos.iter().take(5) {
        context.push_str(&format!(
            "- {}: {} (Stars: {})\n",
            repo.name,
            repo.description.as_deref().unwrap_or(""),
            repo.stars,
        ));
    }
    context
}

/// Helper signal surfaced in the startup context when the free text
/// mentions a seven-figure raise.
fn funding_signal(about: &str) -> &'static str {
    let about = about.to_lowercase();
    if about.contains("raised") && (about.contains("million") || about.contains("1m")) {
        "IMPORTANT: APPLICANT HAS STATED THEY RAISED 1 MILLION OR MORE."
    } else {
        ""
    }
}

/// Char-safe truncation.
fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
