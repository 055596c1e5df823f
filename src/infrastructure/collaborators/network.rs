//! Network-profile snapshot reader.
//!
//! Live professional-network profiles sit behind an authenticated
//! browser session that is out of scope here. This adapter consumes
//! profile snapshots captured by that session as JSON files, one per
//! profile handle, under the configured snapshot directory.

use std::path::PathBuf;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::fs;
use tracing::debug;

use crate::domain::models::{
    CertificationEntry, EducationEntry, ExperienceEntry, NetworkProfile, ProfileEntry,
    ProjectEntry, SkillEntry,
};
use crate::domain::ports::{NetworkProfileSource, SourceError};

/// On-disk snapshot schema. Every section is optional; unknown fields
/// are ignored.
#[derive(Debug, Default, Deserialize)]
struct SnapshotFile {
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    education: Vec<SnapshotEducation>,
    #[serde(default)]
    experience: Vec<SnapshotExperience>,
    #[serde(default)]
    projects: Vec<SnapshotProject>,
    #[serde(default)]
    skills: Vec<String>,
    #[serde(default)]
    certifications: Vec<SnapshotCertification>,
}

#[derive(Debug, Default, Deserialize)]
struct SnapshotEducation {
    #[serde(default)]
    school: Option<String>,
    #[serde(default)]
    degree: Option<String>,
    #[serde(default)]
    years: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct SnapshotExperience {
    #[serde(default)]
    company: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    duration: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct SnapshotProject {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct SnapshotCertification {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    issuer: Option<String>,
}

pub struct JsonSnapshotSource {
    snapshot_dir: PathBuf,
}

impl JsonSnapshotSource {
    pub fn new(snapshot_dir: impl Into<PathBuf>) -> Self {
        Self { snapshot_dir: snapshot_dir.into() }
    }

    /// Profile URLs carry the handle as the last path segment; bare
    /// handles pass through unchanged.
    fn handle(profile_url: &str) -> String {
        profile_url
            .trim()
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or("")
            .to_lowercase()
    }
}

#[async_trait]
impl NetworkProfileSource for JsonSnapshotSource {
    async fn fetch(&self, profile_url: &str) -> Result<NetworkProfile, SourceError> {
        let handle = Self::handle(profile_url);
        if handle.is_empty() {
            return Err(SourceError::Unsupported("empty profile reference".into()));
        }

        let path = self.snapshot_dir.join(format!("{handle}.json"));
        debug!(path = %path.display(), "reading network-profile snapshot");
        let raw = fs::read_to_string(&path).await.map_err(|err| match err.kind() {
            std::io::ErrorKind::NotFound => SourceError::NotFound(path.display().to_string()),
            _ => SourceError::Malformed(err.to_string()),
        })?;

        let snapshot: SnapshotFile =
            serde_json::from_str(&raw).map_err(|err| SourceError::Malformed(err.to_string()))?;

        Ok(build_profile(snapshot))
    }
}

/// Map the loose snapshot into fixed-shape entries, kind by kind.
/// Missing sections simply contribute no entries.
fn build_profile(snapshot: SnapshotFile) -> NetworkProfile {
    let mut entries = Vec::new();

    for education in snapshot.education {
        entries.push(ProfileEntry::Education(EducationEntry {
            school: education.school,
            degree: education.degree,
            years: education.years,
        }));
    }

    for experience in snapshot.experience {
        entries.push(ProfileEntry::Experience(ExperienceEntry {
            company: experience.company,
            title: experience.title,
            location: experience.location,
            duration: experience.duration,
        }));
    }

    for project in snapshot.projects {
        entries.push(ProfileEntry::Project(ProjectEntry {
            name: project.name,
            description: project.description,
        }));
    }

    for skill in snapshot.skills {
        entries.push(ProfileEntry::Skill(SkillEntry { name: Some(skill) }));
    }

    for certification in snapshot.certifications {
        entries.push(ProfileEntry::Certification(CertificationEntry {
            name: certification.name,
            issuer: certification.issuer,
        }));
    }

    NetworkProfile { location: snapshot.location, entries }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = r#"{
        "location": "Paris, France",
        "education": [{"school": "Ecole Polytechnique", "degree": "MSc"}],
        "experience": [{"company": "TechStart", "title": "CTO", "location": "Paris, France"}],
        "projects": [{"name": "orbit", "description": "satellite tracker"}],
        "skills": ["Rust", "Python"],
        "ignored_field": true
    }"#;

    #[test]
    fn test_handle_extraction() {
        assert_eq!(
            JsonSnapshotSource::handle("https://network.example/in/Ada-Lovelace/"),
            "ada-lovelace"
        );
        assert_eq!(JsonSnapshotSource::handle("ada"), "ada");
        assert_eq!(JsonSnapshotSource::handle(""), "");
    }

    #[tokio::test]
    async fn test_reads_snapshot_into_entries() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("ada.json"), SNAPSHOT).unwrap();

        let source = JsonSnapshotSource::new(dir.path());
        let profile = source.fetch("https://network.example/in/ada").await.unwrap();

        assert_eq!(profile.location.as_deref(), Some("Paris, France"));
        assert_eq!(profile.education_entries().count(), 1);
        assert_eq!(
            profile.experience_entries().next().unwrap().company.as_deref(),
            Some("TechStart")
        );
        assert_eq!(profile.project_entries().count(), 1);
        assert_eq!(profile.skill_names().count(), 2);
    }

    #[tokio::test]
    async fn test_missing_snapshot_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let source = JsonSnapshotSource::new(dir.path());
        assert!(matches!(
            source.fetch("ghost").await,
            Err(SourceError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_malformed_snapshot_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("bad.json"), "{not json").unwrap();
        let source = JsonSnapshotSource::new(dir.path());
        assert!(matches!(
            source.fetch("bad").await,
            Err(SourceError::Malformed(_))
        ));
    }
}
