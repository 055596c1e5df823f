//! Rule-based education grading.
//!
//! Two references feed the grade: the domestic notation table for
//! candidates declaring France as their country, and the world
//! mean-rank table for everyone else (and for domestic candidates whose
//! school is absent from the domestic table).

use std::sync::Arc;

use crate::domain::models::{DomesticTable, WorldTable};

/// Score returned when neither table yields a confident match.
const NEUTRAL_SCORE: f64 = 50.0;

pub struct EducationGrader {
    domestic: Arc<DomesticTable>,
    world: Arc<WorldTable>,
}

impl EducationGrader {
    pub fn new(domestic: Arc<DomesticTable>, world: Arc<WorldTable>) -> Self {
        Self { domestic, world }
    }

    /// Grade a declared school, branching on the declared country.
    pub fn grade(&self, school: &str, country: &str) -> f64 {
        let is_domestic = country.to_lowercase().contains("france");

        if is_domestic {
            if let Some(institution) = self.domestic.confident_match(school) {
                if let Some(score) = elite_override(&institution.name) {
                    return score;
                }
                return institution.notation.score();
            }
            // No confident domestic match: fall through to the world table.
        }

        if let Some(institution) = self.world.confident_match(school) {
            return world_rank_score(institution.mean_rank);
        }

        NEUTRAL_SCORE
    }
}

/// Absolute overrides that bypass the notation ladder. The Milano guard
/// keeps the Italian polytechnic from inheriting the French override.
fn elite_override(matched_name: &str) -> Option<f64> {
    let name = matched_name.to_lowercase();
    if name.contains("polytechnique") && !name.contains("milano") {
        return Some(100.0);
    }
    if name.contains("ens ulm") || (name.contains("normale supérieure") && name.contains("paris")) {
        return Some(100.0);
    }
    None
}

/// Piecewise-linear decay over the world mean rank.
///
/// Anchors: rank 10 -> 100, 50 -> 95, 150 -> 85, 300 -> 75; the last
/// segment decays at 0.08 points per rank. Ranks at or below 10 short-
/// circuit to 100 before the decay applies.
fn world_rank_score(rank: f64) -> f64 {
    if rank <= 10.0 {
        return 100.0;
    }
    let score = if rank <= 50.0 {
        100.0 + (rank - 10.0) * -0.125
    } else if rank <= 150.0 {
        95.0 + (rank - 50.0) * -0.1
    } else if rank <= 300.0 {
        85.0 + (rank - 150.0) * (-10.0 / 150.0)
    } else {
        75.0 + (rank - 300.0) * -0.08
    };
    score.clamp(0.0, 100.0)
}
