//! Token-sort string similarity.
//!
//! The single fuzzy-match measure used across the pipeline: both inputs
//! are lowercased, split into whitespace tokens, sorted, and rejoined
//! before a normalized Levenshtein comparison. Word order therefore
//! never matters ("University of Oxford" vs "Oxford University").

use strsim::normalized_levenshtein;

/// Scores at or above this value count as a confident match.
pub const CONFIDENT_MATCH: u8 = 80;

fn token_sort(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// Token-sort similarity on a 0-100 scale.
pub fn token_sort_ratio(a: &str, b: &str) -> u8 {
    let a = token_sort(&a.to_lowercase());
    let b = token_sort(&b.to_lowercase());
    if a.is_empty() && b.is_empty() {
        return 100;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let score = (normalized_levenshtein(&a, &b) * 100.0).round() as u8;
    score
}

/// Confident-match check at the shared threshold.
pub fn is_confident_match(a: &str, b: &str) -> bool {
    if a.trim().is_empty() || b.trim().is_empty() {
        return false;
    }
    token_sort_ratio(a, b) >= CONFIDENT_MATCH
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_strings() {
        assert_eq!(token_sort_ratio("Stanford University", "Stanford University"), 100);
    }

    #[test]
    fn test_word_order_is_ignored() {
        assert_eq!(
            token_sort_ratio("University of Oxford", "Oxford of University"),
            100
        );
    }

    #[test]
    fn test_case_is_ignored() {
        assert_eq!(token_sort_ratio("MIT", "mit"), 100);
    }

    #[test]
    fn test_dissimilar_strings_score_low() {
        assert!(token_sort_ratio("MIT", "Stanford University") < CONFIDENT_MATCH);
    }

    #[test]
    fn test_small_typos_stay_confident() {
        assert!(token_sort_ratio("Ecole Polytechnique", "École Polytechnique") >= CONFIDENT_MATCH);
        assert!(is_confident_match("Stanford Univeristy", "Stanford University"));
    }

    #[test]
    fn test_empty_inputs_never_match_confidently() {
        assert!(!is_confident_match("", "Stanford"));
        assert!(!is_confident_match("Stanford", "  "));
    }
}
