//! Résumé reader over pre-extracted text.
//!
//! Document-to-text extraction happens upstream; this adapter consumes
//! plain-text résumés, splits the common section headings into line
//! lists, and scans for profile links. Remote résumé references are not
//! downloaded here.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use crate::domain::models::{ResumeData, ResumeLinks};
use crate::domain::ports::{ResumeSource, SourceError};

const SKILL_HEADINGS: &[&str] = &["skills", "technologies", "competencies"];
const EXPERIENCE_HEADINGS: &[&str] = &["experience", "employment", "work history"];
const EDUCATION_HEADINGS: &[&str] = &["education", "academic"];

/// Heading lines are short; anything longer is body text even if it
/// happens to contain a heading keyword.
const MAX_HEADING_LEN: usize = 40;

pub struct TextResumeSource {
    resume_dir: PathBuf,
}

impl TextResumeSource {
    pub fn new(resume_dir: impl Into<PathBuf>) -> Self {
        Self { resume_dir: resume_dir.into() }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        let candidate = Path::new(path);
        if candidate.is_absolute() {
            candidate.to_path_buf()
        } else {
            self.resume_dir.join(candidate)
        }
    }
}

#[async_trait]
impl ResumeSource for TextResumeSource {
    async fn fetch(&self, path: &str) -> Result<ResumeData, SourceError> {
        if path.starts_with("http") {
            return Err(SourceError::Unsupported(
                "remote resume references are not downloaded".into(),
            ));
        }

        let resolved = self.resolve(path);
        debug!(path = %resolved.display(), "reading resume text");
        let text = fs::read_to_string(&resolved)
            .await
            .map_err(|err| match err.kind() {
                std::io::ErrorKind::NotFound => {
                    SourceError::NotFound(resolved.display().to_string())
                }
                _ => SourceError::Malformed(err.to_string()),
            })?;

        Ok(parse_resume_text(&text))
    }
}

/// Split pre-extracted résumé text into the structured snapshot.
pub fn parse_resume_text(text: &str) -> ResumeData {
    let lines: Vec<&str> = text.lines().collect();

    let name = lines
        .iter()
        .map(|line| line.trim())
        .find(|line| !line.is_empty())
        .map(ToString::to_string);

    let mut skills = Vec::new();
    let mut experience = Vec::new();
    let mut education = Vec::new();
    let mut current: Option<Section> = None;

    for line in &lines {
        let trimmed = line.trim();
        if let Some(section) = heading_kind(trimmed) {
            current = Some(section);
            continue;
        }
        if trimmed.is_empty() {
            continue;
        }
        match current {
            Some(Section::Skills) => skills.push(trimmed.to_string()),
            Some(Section::Experience) => experience.push(trimmed.to_string()),
            Some(Section::Education) => education.push(trimmed.to_string()),
            None => {}
        }
    }

    ResumeData {
        name,
        skills,
        experience,
        education,
        links: extract_links(text),
        raw_text: text.to_string(),
    }
}

#[derive(Clone, Copy)]
enum Section {
    Skills,
    Experience,
    Education,
}

fn heading_kind(line: &str) -> Option<Section> {
    if line.is_empty() || line.len() > MAX_HEADING_LEN {
        return None;
    }
    let lower = line.to_lowercase();
    if SKILL_HEADINGS.iter().any(|heading| lower.contains(heading)) {
        return Some(Section::Skills);
    }
    if EXPERIENCE_HEADINGS.iter().any(|heading| lower.contains(heading)) {
        return Some(Section::Experience);
    }
    if EDUCATION_HEADINGS.iter().any(|heading| lower.contains(heading)) {
        return Some(Section::Education);
    }
    None
}

/// Scan for profile links: code-host and network handles plus the first
/// unrelated http URL, taken as the personal website.
fn extract_links(text: &str) -> ResumeLinks {
    let website = text
        .split_whitespace()
        .map(|token| token.trim_end_matches(['.', ',', ';', ')']))
        .find(|token| {
            token.starts_with("http")
                && !token.contains("github.com")
                && !token.contains("linkedin.com")
        })
        .map(ToString::to_string);

    ResumeLinks {
        github: handle_after(text, "github.com/"),
        linkedin: handle_after(text, "linkedin.com/in/"),
        website,
    }
}

/// The handle is the run of `[a-z0-9-]` immediately after the marker.
fn handle_after(text: &str, marker: &str) -> Option<String> {
    let lower = text.to_lowercase();
    let start = lower.find(marker)? + marker.len();
    let handle: String = lower[start..]
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect();
    (!handle.is_empty()).then_some(handle)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Ada Lovelace
Analyst and programmer
github.com/adal | linkedin.com/in/ada-lovelace | https://adalove.dev

Skills
Mathematics
Mechanical computation

Experience
- Analytical Engine programme, 1843

Education
- Private tuition, London
";

    #[test]
    fn test_parse_sections() {
        let resume = parse_resume_text(SAMPLE);
        assert_eq!(resume.name.as_deref(), Some("Ada Lovelace"));
        assert_eq!(resume.skills, vec!["Mathematics", "Mechanical computation"]);
        assert_eq!(resume.experience, vec!["- Analytical Engine programme, 1843"]);
        assert_eq!(resume.education, vec!["- Private tuition, London"]);
        assert!(resume.raw_text.contains("Analyst"));
    }

    #[test]
    fn test_extract_links() {
        let resume = parse_resume_text(SAMPLE);
        assert_eq!(resume.links.github.as_deref(), Some("adal"));
        assert_eq!(resume.links.linkedin.as_deref(), Some("ada-lovelace"));
        assert_eq!(resume.links.website.as_deref(), Some("https://adalove.dev"));
    }

    #[test]
    fn test_long_lines_are_not_headings() {
        let text = "Jo Doe\nI have experience with large systems and education pipelines\nSkills\nRust\n";
        let resume = parse_resume_text(text);
        assert_eq!(resume.skills, vec!["Rust"]);
        assert!(resume.experience.is_empty());
    }

    #[tokio::test]
    async fn test_remote_reference_is_unsupported() {
        let source = TextResumeSource::new("cvs");
        assert!(matches!(
            source.fetch("https://drive.example.com/cv.pdf").await,
            Err(SourceError::Unsupported(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let source = TextResumeSource::new(dir.path());
        assert!(matches!(
            source.fetch("nope.txt").await,
            Err(SourceError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_reads_relative_to_resume_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("ada.txt"), SAMPLE).unwrap();
        let source = TextResumeSource::new(dir.path());
        let resume = source.fetch("ada.txt").await.unwrap();
        assert_eq!(resume.name.as_deref(), Some("Ada Lovelace"));
    }
}
