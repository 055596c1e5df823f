//! In-process collaborator snapshot cache.
//!
//! Owned by the orchestrator and passed by reference into the
//! evaluator, keyed by normalized identity. Fetch-or-get contract:
//! successful fetches are cached for the process lifetime, failures
//! degrade to an empty snapshot and are not cached, so a later
//! candidate sharing the identity retries the source.

use std::collections::HashMap;

use tracing::warn;

use crate::domain::models::{DeveloperProfile, NetworkProfile};
use crate::domain::ports::{CodeHostSource, NetworkProfileSource};

#[derive(Debug, Default)]
pub struct SnapshotCache {
    developer: HashMap<String, DeveloperProfile>,
    network: HashMap<String, NetworkProfile>,
}

impl SnapshotCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize an identity (username or profile URL) into a cache key.
    pub fn normalize_key(raw: &str) -> String {
        raw.trim().trim_end_matches('/').to_lowercase()
    }

    /// Fetch-or-get a code-host profile.
    pub async fn developer_profile(
        &mut self,
        identity: &str,
        source: &dyn CodeHostSource,
    ) -> DeveloperProfile {
        let key = Self::normalize_key(identity);
        if key.is_empty() {
            return DeveloperProfile::default();
        }
        if let Some(profile) = self.developer.get(&key) {
            return profile.clone();
        }
        match source.fetch(&key).await {
            Ok(profile) => {
                self.developer.insert(key, profile.clone());
                profile
            }
            Err(err) => {
                warn!(identity = %key, error = %err, "code-host fetch failed, continuing with empty profile");
                DeveloperProfile::default()
            }
        }
    }

    /// Fetch-or-get a network profile.
    pub async fn network_profile(
        &mut self,
        profile_url: &str,
        source: &dyn NetworkProfileSource,
    ) -> NetworkProfile {
        let key = Self::normalize_key(profile_url);
        if key.is_empty() {
            return NetworkProfile::default();
        }
        if let Some(profile) = self.network.get(&key) {
            return profile.clone();
        }
        match source.fetch(&key).await {
            Ok(profile) => {
                self.network.insert(key, profile.clone());
                profile
            }
            Err(err) => {
                warn!(profile = %key, error = %err, "network-profile fetch failed, continuing with empty profile");
                NetworkProfile::default()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.developer.len() + self.network.len()
    }

    pub fn is_empty(&self) -> bool {
        self.developer.is_empty() && self.network.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::domain::ports::SourceError;

    struct CountingCodeHost {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl CodeHostSource for CountingCodeHost {
        async fn fetch(&self, _username: &str) -> Result<DeveloperProfile, SourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(SourceError::Network("down".into()))
            } else {
                Ok(DeveloperProfile { bio: Some("hi".into()), ..Default::default() })
            }
        }
    }

    #[tokio::test]
    async fn test_successful_fetch_is_cached() {
        let source = CountingCodeHost { calls: AtomicUsize::new(0), fail: false };
        let mut cache = SnapshotCache::new();

        let first = cache.developer_profile("Octocat", &source).await;
        let second = cache.developer_profile("octocat/", &source).await;

        assert_eq!(first, second);
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failures_degrade_and_are_not_cached() {
        let source = CountingCodeHost { calls: AtomicUsize::new(0), fail: true };
        let mut cache = SnapshotCache::new();

        let profile = cache.developer_profile("octocat", &source).await;
        assert!(profile.is_empty());

        cache.developer_profile("octocat", &source).await;
        // Both calls hit the source: errors do not populate the cache.
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_blank_identity_skips_source() {
        let source = CountingCodeHost { calls: AtomicUsize::new(0), fail: false };
        let mut cache = SnapshotCache::new();
        let profile = cache.developer_profile("  ", &source).await;
        assert!(profile.is_empty());
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }
}
