//! Service layer: the leaf scorers and the per-candidate evaluator.

pub mod consensus;
pub mod education;
pub mod eligibility;
pub mod evaluator;
pub mod snapshot_cache;
pub mod trust;

pub use consensus::{ConsensusGrader, Criterion};
pub use education::EducationGrader;
pub use eligibility::EligibilityFilter;
pub use evaluator::{CandidateEvaluator, CollaboratorSet};
pub use snapshot_cache::SnapshotCache;
pub use trust::{FormClaims, TrustVerifier};
