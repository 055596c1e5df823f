//! Eligibility decision value type.

use serde::{Deserialize, Serialize};

/// Result of the geographic eligibility gate.
///
/// The reason always names the signal that passed, or states that all
/// three failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityDecision {
    pub eligible: bool,
    pub reason: String,
}

impl EligibilityDecision {
    /// A passing decision, naming the signal and the matched detail.
    pub fn passed(signal: &str, detail: &str) -> Self {
        Self {
            eligible: true,
            reason: format!("passed: {signal} ({detail})"),
        }
    }

    /// The single rejection shape: every signal failed.
    pub fn rejected() -> Self {
        Self {
            eligible: false,
            reason: "rejected: all criteria non-European".to_string(),
        }
    }
}
