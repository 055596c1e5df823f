//! Domain ports: traits for every external collaborator.

pub mod candidate_store;
pub mod chart_renderer;
pub mod null_sources;
pub mod profile_sources;
pub mod scoring_client;

pub use candidate_store::{CandidateStore, StoreError};
pub use chart_renderer::{ChartRenderer, NullChartRenderer};
pub use null_sources::{
    NullCodeHostSource, NullNetworkProfileSource, NullResumeSource, NullWebsiteSource,
};
pub use profile_sources::{
    CodeHostSource, NetworkProfileSource, ResumeSource, SourceError, WebsiteSource,
};
pub use scoring_client::{GenerateRequest, GenerateResponse, ScoringClient, ScoringError};
