//! Shared test fixtures.
#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use sift::domain::models::{
    DomesticInstitution, DomesticTable, EducationEntry, ExperienceEntry, NetworkProfile, Notation,
    ProfileEntry, WorldInstitution, WorldTable,
};
use sift::domain::ports::SourceError;
use sift::NetworkProfileSource;

/// Write a candidate CSV into a temp dir and return (dir, path).
pub fn write_csv(contents: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("applicants.csv");
    std::fs::write(&path, contents).expect("write csv");
    (dir, path)
}

/// Reference tables used across the integration tests.
pub fn reference_tables() -> (Arc<DomesticTable>, Arc<WorldTable>) {
    let domestic = Arc::new(DomesticTable::from_entries(vec![
        DomesticInstitution { name: "Ecole Polytechnique".into(), notation: Notation::Aaa },
        DomesticInstitution { name: "Université de Bordeaux".into(), notation: Notation::Bb },
    ]));
    let world = Arc::new(WorldTable::from_entries(vec![
        WorldInstitution {
            name: "Ecole Polytechnique".into(),
            mean_rank: 38.0,
            region: Some("Europe".into()),
        },
        WorldInstitution {
            name: "Stanford University".into(),
            mean_rank: 3.0,
            region: Some("Outside Europe".into()),
        },
        WorldInstitution {
            name: "University of Tokyo".into(),
            mean_rank: 25.0,
            region: Some("Outside Europe".into()),
        },
    ]));
    (domestic, world)
}

/// Network-profile source serving one fixed profile for one handle,
/// counting every fetch that reaches it.
pub struct StaticNetworkSource {
    pub handle: String,
    pub profile: NetworkProfile,
    pub calls: AtomicUsize,
}

impl StaticNetworkSource {
    pub fn new(handle: &str, profile: NetworkProfile) -> Self {
        Self { handle: handle.to_lowercase(), profile, calls: AtomicUsize::new(0) }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NetworkProfileSource for StaticNetworkSource {
    async fn fetch(&self, profile_url: &str) -> Result<NetworkProfile, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if profile_url.to_lowercase().contains(&self.handle) {
            Ok(self.profile.clone())
        } else {
            Err(SourceError::NotFound(profile_url.to_string()))
        }
    }
}

/// A profile matching the "Ada" fixture rows in the CSVs below.
pub fn ada_profile() -> NetworkProfile {
    NetworkProfile {
        location: Some("Paris, France".into()),
        entries: vec![
            ProfileEntry::Education(EducationEntry {
                school: Some("Ecole Polytechnique".into()),
                degree: Some("MSc".into()),
                years: None,
            }),
            ProfileEntry::Experience(ExperienceEntry {
                company: Some("TechStart".into()),
                title: Some("CTO".into()),
                location: Some("Paris, France".into()),
                duration: None,
            }),
        ],
    }
}
