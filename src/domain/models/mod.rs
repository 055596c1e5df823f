//! Domain models.

pub mod candidate;
pub mod config;
pub mod eligibility;
pub mod rankings;
pub mod snapshot;
pub mod verification;

pub use candidate::{CandidateRecord, CandidateStatus, GradeReport, Grades};
pub use config::{
    CollaboratorsConfig, Config, LoggingConfig, RankingsConfig, RateLimitConfig, RetryConfig,
    ScoringConfig, StoreConfig,
};
pub use eligibility::EligibilityDecision;
pub use rankings::{
    DomesticInstitution, DomesticTable, Notation, RankingTableError, WorldInstitution, WorldTable,
};
pub use snapshot::{
    CertificationEntry, DeveloperProfile, EducationEntry, EntryKind, ExperienceEntry,
    NetworkProfile, ProfileEntry, ProjectEntry, RepoSummary, ResumeData, ResumeLinks, SkillEntry,
    WebsiteData,
};
pub use verification::VerificationReport;
