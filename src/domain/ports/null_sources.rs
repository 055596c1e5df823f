//! Null collaborator sources.
//!
//! Used when a collaborator is not wired up but the type system
//! requires a source implementation. Every fetch succeeds with an
//! empty snapshot.

use async_trait::async_trait;

use super::profile_sources::{
    CodeHostSource, NetworkProfileSource, ResumeSource, SourceError, WebsiteSource,
};
use crate::domain::models::{DeveloperProfile, NetworkProfile, ResumeData, WebsiteData};

/// No-op network-profile source.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNetworkProfileSource;

#[async_trait]
impl NetworkProfileSource for NullNetworkProfileSource {
    async fn fetch(&self, _profile_url: &str) -> Result<NetworkProfile, SourceError> {
        Ok(NetworkProfile::default())
    }
}

/// No-op code-host source.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullCodeHostSource;

#[async_trait]
impl CodeHostSource for NullCodeHostSource {
    async fn fetch(&self, _username: &str) -> Result<DeveloperProfile, SourceError> {
        Ok(DeveloperProfile::default())
    }
}

/// No-op website source.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullWebsiteSource;

#[async_trait]
impl WebsiteSource for NullWebsiteSource {
    async fn fetch(&self, _url: &str) -> Result<WebsiteData, SourceError> {
        Ok(WebsiteData::default())
    }
}

/// No-op résumé source.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullResumeSource;

#[async_trait]
impl ResumeSource for NullResumeSource {
    async fn fetch(&self, _path: &str) -> Result<ResumeData, SourceError> {
        Ok(ResumeData::default())
    }
}
