//! Collaborator source ports.
//!
//! Each external data source is consumed through a narrow trait that
//! returns an explicit `Result`. Callers inspect the error and degrade
//! to an empty snapshot; a source failure never crosses the evaluation
//! boundary as a hard error.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::models::{DeveloperProfile, NetworkProfile, ResumeData, WebsiteData};

/// Soft failure of a collaborator fetch.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("malformed payload: {0}")]
    Malformed(String),

    #[error("unsupported reference: {0}")]
    Unsupported(String),
}

/// Professional-network profile source, keyed by profile URL.
#[async_trait]
pub trait NetworkProfileSource: Send + Sync {
    async fn fetch(&self, profile_url: &str) -> Result<NetworkProfile, SourceError>;
}

/// Code-hosting profile source, keyed by username.
#[async_trait]
pub trait CodeHostSource: Send + Sync {
    async fn fetch(&self, username: &str) -> Result<DeveloperProfile, SourceError>;
}

/// Personal-website source, keyed by URL. Soft fetch failures belong in
/// `WebsiteData::error`; `Err` is reserved for unusable references.
#[async_trait]
pub trait WebsiteSource: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<WebsiteData, SourceError>;
}

/// Résumé source, keyed by the path recorded on the candidate row.
#[async_trait]
pub trait ResumeSource: Send + Sync {
    async fn fetch(&self, path: &str) -> Result<ResumeData, SourceError>;
}
