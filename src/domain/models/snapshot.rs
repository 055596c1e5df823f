//! Collaborator snapshot types.
//!
//! Everything an external collaborator can return about a candidate is
//! modeled here as plain data. All fields tolerate absence: a failed or
//! partial fetch degrades to the `Default` value of the snapshot type.
//! Snapshots live only in the in-process cache; they are never persisted.

use serde::{Deserialize, Serialize};

/// Entity kinds a professional-network profile can list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Education,
    Experience,
    Project,
    Skill,
    Certification,
}

/// One section entry of a network profile.
///
/// Each kind is a fixed-shape record with optional fields; blank entries
/// are built through [`ProfileEntry::blank`] so every kind has exactly
/// one canonical empty shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProfileEntry {
    Education(EducationEntry),
    Experience(ExperienceEntry),
    Project(ProjectEntry),
    Skill(SkillEntry),
    Certification(CertificationEntry),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub school: Option<String>,
    pub degree: Option<String>,
    pub years: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub company: Option<String>,
    pub title: Option<String>,
    pub location: Option<String>,
    pub duration: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillEntry {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificationEntry {
    pub name: Option<String>,
    pub issuer: Option<String>,
}

impl ProfileEntry {
    /// Factory for the canonical empty entry of a kind.
    pub fn blank(kind: EntryKind) -> Self {
        match kind {
            EntryKind::Education => Self::Education(EducationEntry::default()),
            EntryKind::Experience => Self::Experience(ExperienceEntry::default()),
            EntryKind::Project => Self::Project(ProjectEntry::default()),
            EntryKind::Skill => Self::Skill(SkillEntry::default()),
            EntryKind::Certification => Self::Certification(CertificationEntry::default()),
        }
    }

    pub fn kind(&self) -> EntryKind {
        match self {
            Self::Education(_) => EntryKind::Education,
            Self::Experience(_) => EntryKind::Experience,
            Self::Project(_) => EntryKind::Project,
            Self::Skill(_) => EntryKind::Skill,
            Self::Certification(_) => EntryKind::Certification,
        }
    }
}

/// Snapshot of a professional-network profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkProfile {
    /// Profile-declared location, used as a fallback for the form's
    /// current-location field.
    pub location: Option<String>,
    pub entries: Vec<ProfileEntry>,
}

impl NetworkProfile {
    pub fn is_empty(&self) -> bool {
        self.location.is_none() && self.entries.is_empty()
    }

    pub fn education_entries(&self) -> impl Iterator<Item = &EducationEntry> {
        self.entries.iter().filter_map(|entry| match entry {
            ProfileEntry::Education(edu) => Some(edu),
            _ => None,
        })
    }

    pub fn experience_entries(&self) -> impl Iterator<Item = &ExperienceEntry> {
        self.entries.iter().filter_map(|entry| match entry {
            ProfileEntry::Experience(exp) => Some(exp),
            _ => None,
        })
    }

    pub fn project_entries(&self) -> impl Iterator<Item = &ProjectEntry> {
        self.entries.iter().filter_map(|entry| match entry {
            ProfileEntry::Project(project) => Some(project),
            _ => None,
        })
    }

    pub fn skill_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().filter_map(|entry| match entry {
            ProfileEntry::Skill(skill) => skill.name.as_deref(),
            _ => None,
        })
    }
}

/// One repository listed on a code-hosting profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoSummary {
    pub name: String,
    pub description: Option<String>,
    pub stars: u64,
    pub language: Option<String>,
}

/// Snapshot of a code-hosting profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeveloperProfile {
    pub bio: Option<String>,
    pub company: Option<String>,
    /// Blog / personal-website URL declared on the profile.
    pub blog: Option<String>,
    pub repos: Vec<RepoSummary>,
}

impl DeveloperProfile {
    pub fn is_empty(&self) -> bool {
        self.bio.is_none() && self.company.is_none() && self.blog.is_none() && self.repos.is_empty()
    }
}

/// Links discovered in a résumé.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeLinks {
    pub github: Option<String>,
    pub linkedin: Option<String>,
    pub website: Option<String>,
}

/// Snapshot of a parsed résumé. `raw_text` is the full extracted text;
/// the section vectors hold the lines found under the matching headings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeData {
    pub name: Option<String>,
    pub skills: Vec<String>,
    pub experience: Vec<String>,
    pub education: Vec<String>,
    pub links: ResumeLinks,
    pub raw_text: String,
}

impl ResumeData {
    pub fn is_empty(&self) -> bool {
        self.raw_text.is_empty()
    }

    /// Short summary used when assembling scoring context: capped skill
    /// and experience lists, never the raw dump.
    pub fn summary(&self) -> String {
        let mut summary = String::new();
        if !self.skills.is_empty() {
            let skills: Vec<&str> = self.skills.iter().map(String::as_str).take(20).collect();
            summary.push_str(&format!("Skills: {}\n", skills.join(", ")));
        }
        if !self.experience.is_empty() {
            summary.push_str("Experience:\n");
            for line in self.experience.iter().take(5) {
                summary.push_str(&format!("- {line}\n"));
            }
        }
        summary
    }
}

/// Snapshot of a personal website. Soft fetch failures are reported in
/// `error` rather than as hard errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebsiteData {
    pub name: Option<String>,
    pub companies: Vec<String>,
    pub raw_text: String,
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_factory_round_trips_kind() {
        for kind in [
            EntryKind::Education,
            EntryKind::Experience,
            EntryKind::Project,
            EntryKind::Skill,
            EntryKind::Certification,
        ] {
            assert_eq!(ProfileEntry::blank(kind).kind(), kind);
        }
    }

    #[test]
    fn test_entry_filters() {
        let profile = NetworkProfile {
            location: None,
            entries: vec![
                ProfileEntry::Education(EducationEntry {
                    school: Some("ETH Zurich".into()),
                    ..Default::default()
                }),
                ProfileEntry::Experience(ExperienceEntry {
                    company: Some("TechStart".into()),
                    title: Some("CTO".into()),
                    location: Some("Zurich, Switzerland".into()),
                    duration: None,
                }),
                ProfileEntry::Skill(SkillEntry { name: Some("Rust".into()) }),
            ],
        };

        assert_eq!(profile.education_entries().count(), 1);
        assert_eq!(profile.experience_entries().count(), 1);
        assert_eq!(profile.skill_names().collect::<Vec<_>>(), vec!["Rust"]);
    }

    #[test]
    fn test_resume_summary_caps_lists() {
        let resume = ResumeData {
            skills: (0..30).map(|i| format!("skill{i}")).collect(),
            experience: (0..8).map(|i| format!("job{i}")).collect(),
            ..Default::default()
        };
        let summary = resume.summary();
        assert!(summary.contains("skill19"));
        assert!(!summary.contains("skill20"));
        assert!(summary.contains("job4"));
        assert!(!summary.contains("job5"));
    }
}
