//! CLI command implementations.

pub mod grade;
pub mod rankings;
pub mod run;
pub mod status;

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::domain::models::{Config, DomesticTable, WorldTable};
use crate::domain::ports::NetworkProfileSource;
use crate::infrastructure::collaborators::{
    CodeHostClient, HttpWebsiteSource, JsonSnapshotSource, TextResumeSource,
};
use crate::infrastructure::scoring::HttpScoringClient;
use crate::services::{
    CandidateEvaluator, CollaboratorSet, ConsensusGrader, EducationGrader, EligibilityFilter,
};

/// Everything a grading command needs, wired from config.
pub struct Components {
    pub eligibility: EligibilityFilter,
    pub evaluator: CandidateEvaluator<HttpScoringClient>,
    pub network_source: Arc<dyn NetworkProfileSource>,
}

/// Build the evaluation stack from config. Ranking tables are required:
/// a run cannot start without its reference data.
pub fn build_components(config: &Config) -> Result<Components> {
    let domestic = Arc::new(
        DomesticTable::load(&config.rankings.domestic_table)
            .context("domestic ranking table is required for a run")?,
    );
    let world = Arc::new(
        WorldTable::load(&config.rankings.world_table)
            .context("world ranking table is required for a run")?,
    );

    let scoring_client = Arc::new(HttpScoringClient::new(
        &config.scoring,
        &config.rate_limit,
        &config.retry,
    )?);

    let network_source: Arc<dyn NetworkProfileSource> =
        Arc::new(JsonSnapshotSource::new(&config.collaborators.snapshot_dir));
    let sources = CollaboratorSet {
        network: Arc::clone(&network_source),
        code_host: Arc::new(CodeHostClient::new(&config.collaborators)?),
        website: Arc::new(HttpWebsiteSource::new(config.collaborators.website_timeout_secs)?),
        resume: Arc::new(TextResumeSource::new(&config.collaborators.resume_dir)),
    };

    let eligibility = EligibilityFilter::new(Arc::clone(&world));
    let education = EducationGrader::new(domestic, world);
    let consensus =
        ConsensusGrader::new(scoring_client, config.scoring.samples, config.scoring.top_k);
    let evaluator = CandidateEvaluator::new(education, consensus, sources);

    Ok(Components { eligibility, evaluator, network_source })
}
