//! Cross-source verification report.

use serde::{Deserialize, Serialize};

/// Outcome of cross-checking a candidate's claims against independent
/// sources.
///
/// The trust score starts at 100 and can only go down: checks deduct
/// points and record a discrepancy, or record a match at no cost. The
/// score can never leave `[0, 100]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationReport {
    trust_score: u8,
    /// Human-readable discrepancy descriptions, in check order.
    pub discrepancies: Vec<String>,
    /// Human-readable confirmations, in check order.
    pub matches: Vec<String>,
}

impl Default for VerificationReport {
    fn default() -> Self {
        Self::new()
    }
}

impl VerificationReport {
    pub fn new() -> Self {
        Self {
            trust_score: 100,
            discrepancies: Vec::new(),
            matches: Vec::new(),
        }
    }

    pub fn trust_score(&self) -> u8 {
        self.trust_score
    }

    /// Deduct points and record the discrepancy that caused it.
    /// Saturates at zero.
    pub fn deduct(&mut self, points: u8, discrepancy: impl Into<String>) {
        self.trust_score = self.trust_score.saturating_sub(points);
        self.discrepancies.push(discrepancy.into());
    }

    /// Deduct points without recording a discrepancy. Used for minor
    /// mismatches that are reported as qualified matches instead.
    pub fn penalize(&mut self, points: u8) {
        self.trust_score = self.trust_score.saturating_sub(points);
    }

    /// Record a confirmed claim. Matches never raise the score.
    pub fn record_match(&mut self, note: impl Into<String>) {
        self.matches.push(note.into());
    }

    /// One-line summary derived from the final score.
    pub fn summary(&self) -> &'static str {
        if self.trust_score >= 90 {
            "High data consistency across all sources."
        } else if self.trust_score >= 70 {
            "Mostly consistent, with some minor missing details."
        } else {
            "Significant discrepancies found. Important claims not verified in external sources."
        }
    }
}
