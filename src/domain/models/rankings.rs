//! Institution ranking reference tables.
//!
//! Two independent references feed the education grade: a domestic
//! table with categorical notations (AAA..C) and a world table carrying
//! a pre-merged mean rank across three ranking sources plus a region
//! column used by the eligibility gate.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::similarity::{token_sort_ratio, CONFIDENT_MATCH};

/// Categorical quality notation used by the domestic ranking table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Notation {
    Aaa,
    Aa,
    A,
    Bbb,
    Bb,
    B,
    Ccc,
    Cc,
    C,
    Other,
}

impl Notation {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_uppercase().as_str() {
            "AAA" => Self::Aaa,
            "AA" => Self::Aa,
            "A" => Self::A,
            "BBB" => Self::Bbb,
            "BB" => Self::Bb,
            "B" => Self::B,
            "CCC" => Self::Ccc,
            "CC" => Self::Cc,
            "C" => Self::C,
            _ => Self::Other,
        }
    }

    /// Fixed score ladder, strictly descending with notation rank.
    pub fn score(&self) -> f64 {
        match self {
            Self::Aaa => 95.0,
            Self::Aa => 85.0,
            Self::A => 75.0,
            Self::Bbb => 65.0,
            Self::Bb => 55.0,
            Self::B => 45.0,
            Self::Ccc => 35.0,
            Self::Cc => 25.0,
            Self::C => 15.0,
            Self::Other => 10.0,
        }
    }
}

/// One row of the domestic ranking table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomesticInstitution {
    pub name: String,
    pub notation: Notation,
}

/// Domestic ranking table with fuzzy lookup.
#[derive(Debug, Clone, Default)]
pub struct DomesticTable {
    entries: Vec<DomesticInstitution>,
}

impl DomesticTable {
    pub fn from_entries(entries: Vec<DomesticInstitution>) -> Self {
        Self { entries }
    }

    /// Load from a headered CSV with `Name` and `Notation` columns.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RankingTableError> {
        let mut reader = csv::Reader::from_path(path.as_ref()).map_err(|err| {
            RankingTableError::Unreadable {
                path: path.as_ref().display().to_string(),
                source: err,
            }
        })?;
        let headers = reader.headers().map_err(RankingTableError::Malformed)?.clone();
        let name_col = find_column(&headers, &["name"]);
        let notation_col = find_column(&headers, &["notation"]);
        let (Some(name_col), Some(notation_col)) = (name_col, notation_col) else {
            return Err(RankingTableError::MissingColumns {
                path: path.as_ref().display().to_string(),
                expected: "Name, Notation",
            });
        };

        let mut entries = Vec::new();
        for row in reader.records() {
            let row = row.map_err(RankingTableError::Malformed)?;
            let name = row.get(name_col).unwrap_or_default().trim();
            if name.is_empty() {
                continue;
            }
            entries.push(DomesticInstitution {
                name: name.to_string(),
                notation: Notation::from_str(row.get(notation_col).unwrap_or_default()),
            });
        }
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Best fuzzy match for a school name, with its similarity score.
    pub fn best_match(&self, school: &str) -> Option<(&DomesticInstitution, u8)> {
        best_by_similarity(self.entries.iter(), school, |entry| &entry.name)
    }

    /// Best match at the confident threshold, if any.
    pub fn confident_match(&self, school: &str) -> Option<&DomesticInstitution> {
        self.best_match(school)
            .filter(|(_, score)| *score > CONFIDENT_MATCH)
            .map(|(entry, _)| entry)
    }
}

/// One row of the world ranking table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldInstitution {
    pub name: String,
    /// Mean rank across the merged ranking sources.
    pub mean_rank: f64,
    /// "Europe" / "Outside Europe" / absent.
    pub region: Option<String>,
}

impl WorldInstitution {
    pub fn in_europe(&self) -> bool {
        self.region.as_deref() == Some("Europe")
    }
}

/// World ranking table with fuzzy lookup.
#[derive(Debug, Clone, Default)]
pub struct WorldTable {
    entries: Vec<WorldInstitution>,
}

impl WorldTable {
    pub fn from_entries(entries: Vec<WorldInstitution>) -> Self {
        Self { entries }
    }

    /// Load from a headered CSV with `University Name`, `Mean Rank` and
    /// optional `Region` columns.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RankingTableError> {
        let mut reader = csv::Reader::from_path(path.as_ref()).map_err(|err| {
            RankingTableError::Unreadable {
                path: path.as_ref().display().to_string(),
                source: err,
            }
        })?;
        let headers = reader.headers().map_err(RankingTableError::Malformed)?.clone();
        let name_col = find_column(&headers, &["university name", "name"]);
        let rank_col = find_column(&headers, &["mean rank"]);
        let region_col = find_column(&headers, &["region"]);
        let (Some(name_col), Some(rank_col)) = (name_col, rank_col) else {
            return Err(RankingTableError::MissingColumns {
                path: path.as_ref().display().to_string(),
                expected: "University Name, Mean Rank",
            });
        };

        let mut entries = Vec::new();
        for row in reader.records() {
            let row = row.map_err(RankingTableError::Malformed)?;
            let name = row.get(name_col).unwrap_or_default().trim();
            let Ok(mean_rank) = row.get(rank_col).unwrap_or_default().trim().parse::<f64>()
            else {
                continue;
            };
            if name.is_empty() {
                continue;
            }
            entries.push(WorldInstitution {
                name: name.to_string(),
                mean_rank,
                region: region_col
                    .and_then(|col| row.get(col))
                    .map(str::trim)
                    .filter(|region| !region.is_empty())
                    .map(ToString::to_string),
            });
        }
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn best_match(&self, school: &str) -> Option<(&WorldInstitution, u8)> {
        best_by_similarity(self.entries.iter(), school, |entry| &entry.name)
    }

    pub fn confident_match(&self, school: &str) -> Option<&WorldInstitution> {
        self.best_match(school)
            .filter(|(_, score)| *score > CONFIDENT_MATCH)
            .map(|(entry, _)| entry)
    }
}

fn best_by_similarity<'a, T>(
    entries: impl Iterator<Item = &'a T>,
    needle: &str,
    name: impl Fn(&T) -> &str,
) -> Option<(&'a T, u8)> {
    if needle.trim().is_empty() {
        return None;
    }
    entries
        .map(|entry| (entry, token_sort_ratio(needle, name(entry))))
        .max_by_key(|(_, score)| *score)
}

/// Errors raised while loading a ranking table.
#[derive(Debug, thiserror::Error)]
pub enum RankingTableError {
    #[error("ranking table {path} is unreadable: {source}")]
    Unreadable { path: String, source: csv::Error },

    #[error("ranking table row is malformed: {0}")]
    Malformed(csv::Error),

    #[error("ranking table {path} is missing expected columns ({expected})")]
    MissingColumns { path: String, expected: &'static str },
}

fn find_column(headers: &csv::StringRecord, names: &[&str]) -> Option<usize> {
    headers
        .iter()
        .position(|header| names.contains(&header.trim().to_lowercase().as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world() -> WorldTable {
        WorldTable::from_entries(vec![
            WorldInstitution {
                name: "Stanford University".into(),
                mean_rank: 3.0,
                region: Some("Outside Europe".into()),
            },
            WorldInstitution {
                name: "ETH Zurich".into(),
                mean_rank: 11.0,
                region: Some("Europe".into()),
            },
        ])
    }

    #[test]
    fn test_notation_ladder_is_strictly_descending() {
        let ladder = [
            Notation::Aaa,
            Notation::Aa,
            Notation::A,
            Notation::Bbb,
            Notation::Bb,
            Notation::B,
            Notation::Ccc,
            Notation::Cc,
            Notation::C,
            Notation::Other,
        ];
        for pair in ladder.windows(2) {
            assert!(pair[0].score() > pair[1].score());
        }
        assert_eq!(Notation::Aaa.score(), 95.0);
        assert_eq!(Notation::Other.score(), 10.0);
    }

    #[test]
    fn test_notation_parse_is_case_insensitive() {
        assert_eq!(Notation::from_str("aaa"), Notation::Aaa);
        assert_eq!(Notation::from_str(" B "), Notation::B);
        assert_eq!(Notation::from_str("?"), Notation::Other);
    }

    #[test]
    fn test_confident_match_requires_threshold() {
        let table = world();
        assert_eq!(
            table.confident_match("Stanford Univeristy").map(|e| e.name.as_str()),
            Some("Stanford University")
        );
        assert!(table.confident_match("Tiny Unknown College").is_none());
        assert!(table.confident_match("").is_none());
    }

    #[test]
    fn test_region_lookup() {
        let table = world();
        let eth = table.confident_match("ETH Zurich").unwrap();
        assert!(eth.in_europe());
        let stanford = table.confident_match("Stanford University").unwrap();
        assert!(!stanford.in_europe());
    }
}
