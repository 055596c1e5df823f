//! Logging infrastructure.

pub mod candidate_log;

pub use candidate_log::{sanitize_name, CandidateLog};
