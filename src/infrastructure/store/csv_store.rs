//! CSV-backed candidate store.
//!
//! The table is loaded fully into memory; pipeline-managed columns are
//! appended to the header when missing. `persist` rewrites the whole
//! file through a temp-file rename, which is the crash-safety contract:
//! the on-disk table is always a complete snapshot taken after some row
//! transition. Input columns the pipeline does not know about are
//! carried through rewrites untouched.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::domain::models::{CandidateRecord, CandidateStatus};
use crate::domain::ports::{CandidateStore, StoreError};

/// Input columns read into the candidate record.
const IDENTITY_COLUMNS: &[(&str, fn(&mut CandidateRecord, String))] = &[
    ("first_name", |r, v| r.first_name = v),
    ("last_name", |r, v| r.last_name = v),
    ("country_of_origin", |r, v| r.country_of_origin = v),
    ("current_location", |r, v| r.current_location = v),
    ("school", |r, v| r.school = v),
    ("current_role", |r, v| r.current_role = v),
    ("company_name", |r, v| r.company_name = v),
    ("company_description", |r, v| r.company_description = v),
    ("achievements", |r, v| r.achievements = v),
    ("projects", |r, v| r.projects = v),
    ("programs", |r, v| r.programs = v),
    ("about", |r, v| r.about = v),
    ("contribution", |r, v| r.contribution = v),
    ("network_profile_url", |r, v| r.network_profile_url = v),
    ("code_host_url", |r, v| r.code_host_url = v),
    ("website_url", |r, v| r.website_url = v),
    ("resume_path", |r, v| r.resume_path = v),
];

/// Columns owned by the pipeline, appended with defaults when absent.
pub const PIPELINE_COLUMNS: &[&str] = &[
    "status",
    "grade_education",
    "grade_community",
    "grade_hack_project",
    "grade_research",
    "grade_startup",
    "trust_score",
    "europe_reason",
    "chart_path",
    "error_message",
    "processed_at",
];

pub struct CsvStore {
    path: PathBuf,
    headers: Vec<String>,
    /// Raw cell values, row-major, padded to the header width. Unknown
    /// columns live only here and round-trip unchanged.
    rows: Vec<Vec<String>>,
    records: Vec<CandidateRecord>,
    column_index: HashMap<String, usize>,
}

impl CsvStore {
    /// Load the table. An unreadable file is fatal: the caller must not
    /// start a run without the store.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(&path)
            .map_err(|err| StoreError::Unreadable {
                path: path.display().to_string(),
                reason: err.to_string(),
            })?;

        let mut headers: Vec<String> = reader
            .headers()
            .map_err(|err| StoreError::Unreadable {
                path: path.display().to_string(),
                reason: err.to_string(),
            })?
            .iter()
            .map(|header| header.trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for row in reader.records() {
            let row = row.map_err(|err| StoreError::Unreadable {
                path: path.display().to_string(),
                reason: err.to_string(),
            })?;
            let mut cells: Vec<String> = row.iter().map(ToString::to_string).collect();
            cells.resize(headers.len(), String::new());
            rows.push(cells);
        }

        // Append pipeline columns missing from the input.
        for column in PIPELINE_COLUMNS {
            if !headers.iter().any(|header| header == column) {
                debug!(column, "adding missing pipeline column");
                headers.push((*column).to_string());
                for row in &mut rows {
                    row.push(String::new());
                }
            }
        }

        let column_index: HashMap<String, usize> = headers
            .iter()
            .enumerate()
            .map(|(idx, header)| (header.clone(), idx))
            .collect();

        let records = rows
            .iter()
            .enumerate()
            .map(|(index, row)| build_record(index, row, &column_index))
            .collect();

        Ok(Self { path, headers, rows, records, column_index })
    }

    /// All rows currently in a given status.
    pub fn indices_with_status(&self, status: CandidateStatus) -> Vec<usize> {
        self.records
            .iter()
            .filter(|record| record.status == status)
            .map(|record| record.index)
            .collect()
    }

    pub fn records(&self) -> &[CandidateRecord] {
        &self.records
    }

    fn write_cell(&mut self, row: usize, column: &str, value: String) {
        if let Some(&col) = self.column_index.get(column) {
            self.rows[row][col] = value;
        }
    }

    fn sync_pipeline_cells(&mut self, index: usize) {
        let record = self.records[index].clone();
        self.write_cell(index, "status", record.status.as_str().to_string());
        self.write_cell(index, "grade_education", format_float(record.grade_education));
        self.write_cell(index, "grade_community", format_float(record.grade_community));
        self.write_cell(index, "grade_hack_project", format_float(record.grade_hack_project));
        self.write_cell(index, "grade_research", format_float(record.grade_research));
        self.write_cell(index, "grade_startup", format_float(record.grade_startup));
        self.write_cell(
            index,
            "trust_score",
            record.trust_score.map(|score| score.to_string()).unwrap_or_default(),
        );
        self.write_cell(index, "europe_reason", record.europe_reason.unwrap_or_default());
        self.write_cell(index, "chart_path", record.chart_path.unwrap_or_default());
        self.write_cell(index, "error_message", record.error_message.unwrap_or_default());
        self.write_cell(
            index,
            "processed_at",
            record.processed_at.map(|ts| ts.to_rfc3339()).unwrap_or_default(),
        );
    }
}

impl CandidateStore for CsvStore {
    fn len(&self) -> usize {
        self.records.len()
    }

    fn get(&self, index: usize) -> Option<&CandidateRecord> {
        self.records.get(index)
    }

    fn set(&mut self, index: usize, record: CandidateRecord) -> Result<(), StoreError> {
        if index >= self.records.len() {
            return Err(StoreError::OutOfBounds { index, len: self.records.len() });
        }
        if record.index != index {
            return Err(StoreError::IndexMismatch { record: record.index, slot: index });
        }
        self.records[index] = record;
        self.sync_pipeline_cells(index);
        Ok(())
    }

    fn persist(&self) -> Result<(), StoreError> {
        let tmp_path = self.path.with_extension("csv.tmp");
        {
            let mut writer = csv::Writer::from_path(&tmp_path)
                .map_err(|err| StoreError::WriteFailed(err.to_string()))?;
            writer
                .write_record(&self.headers)
                .map_err(|err| StoreError::WriteFailed(err.to_string()))?;
            for row in &self.rows {
                writer
                    .write_record(row)
                    .map_err(|err| StoreError::WriteFailed(err.to_string()))?;
            }
            writer.flush().map_err(|err| StoreError::WriteFailed(err.to_string()))?;
        }
        fs::rename(&tmp_path, &self.path)
            .map_err(|err| StoreError::WriteFailed(err.to_string()))
    }
}

fn build_record(
    index: usize,
    row: &[String],
    column_index: &HashMap<String, usize>,
) -> CandidateRecord {
    let cell = |name: &str| -> String {
        column_index
            .get(name)
            .and_then(|&col| row.get(col))
            .map(|value| value.trim().to_string())
            .unwrap_or_default()
    };

    let mut record = CandidateRecord { index, ..Default::default() };
    for &(column, assign) in IDENTITY_COLUMNS {
        assign(&mut record, cell(column));
    }

    // Rows with no recognizable status start as pending.
    record.status = CandidateStatus::from_str(&cell("status")).unwrap_or_default();
    record.grade_education = parse_float(&cell("grade_education"));
    record.grade_community = parse_float(&cell("grade_community"));
    record.grade_hack_project = parse_float(&cell("grade_hack_project"));
    record.grade_research = parse_float(&cell("grade_research"));
    record.grade_startup = parse_float(&cell("grade_startup"));
    record.trust_score = cell("trust_score").parse().ok();
    record.europe_reason = non_empty(cell("europe_reason"));
    record.chart_path = non_empty(cell("chart_path"));
    record.error_message = non_empty(cell("error_message"));
    record.processed_at = DateTime::parse_from_rfc3339(&cell("processed_at"))
        .ok()
        .map(|ts| ts.with_timezone(&Utc));
    record
}

fn parse_float(value: &str) -> Option<f64> {
    value.parse().ok()
}

fn non_empty(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}

fn format_float(value: Option<f64>) -> String {
    value.map(|v| format!("{v}")).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn store_from(contents: &str) -> (tempfile::TempDir, CsvStore) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("applicants.csv");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        (dir, CsvStore::load(&path).unwrap())
    }

    #[test]
    fn test_missing_pipeline_columns_are_added() {
        let (_dir, store) = store_from("first_name,last_name\nAda,Lovelace\n");
        assert_eq!(store.len(), 1);
        let record = store.get(0).unwrap();
        assert_eq!(record.first_name, "Ada");
        assert_eq!(record.status, CandidateStatus::Pending);
        assert!(record.trust_score.is_none());
    }

    #[test]
    fn test_existing_status_is_preserved() {
        let (_dir, store) =
            store_from("first_name,status,trust_score\nAda,done,88\nGrace,,\n");
        assert_eq!(store.get(0).unwrap().status, CandidateStatus::Done);
        assert_eq!(store.get(0).unwrap().trust_score, Some(88));
        assert_eq!(store.get(1).unwrap().status, CandidateStatus::Pending);
    }

    #[test]
    fn test_set_and_persist_round_trip() {
        let (dir, mut store) = store_from("first_name,custom_note\nAda,keep-me\n");
        let mut record = store.get(0).unwrap().clone();
        record.begin_processing().unwrap();
        record
            .fail("collaborator timeout".into())
            .unwrap();
        store.set(0, record).unwrap();
        store.persist().unwrap();

        let reloaded = CsvStore::load(dir.path().join("applicants.csv")).unwrap();
        let record = reloaded.get(0).unwrap();
        assert_eq!(record.status, CandidateStatus::Failed);
        assert_eq!(record.error_message.as_deref(), Some("collaborator timeout"));
        assert!(record.processed_at.is_some());

        // Unknown input columns survive the rewrite.
        let raw = fs::read_to_string(dir.path().join("applicants.csv")).unwrap();
        assert!(raw.contains("custom_note"));
        assert!(raw.contains("keep-me"));
    }

    #[test]
    fn test_set_rejects_index_mismatch() {
        let (_dir, mut store) = store_from("first_name\nAda\nGrace\n");
        let record = store.get(1).unwrap().clone();
        assert!(matches!(
            store.set(0, record),
            Err(StoreError::IndexMismatch { .. })
        ));
    }

    #[test]
    fn test_unreadable_table_is_an_error() {
        assert!(matches!(
            CsvStore::load("/nonexistent/applicants.csv"),
            Err(StoreError::Unreadable { .. })
        ));
    }

    #[test]
    fn test_indices_with_status() {
        let (_dir, store) = store_from(
            "first_name,status\nAda,done\nGrace,\nKatherine,failed\nMargaret,\n",
        );
        assert_eq!(store.indices_with_status(CandidateStatus::Pending), vec![1, 3]);
        assert_eq!(store.indices_with_status(CandidateStatus::Done), vec![0]);
    }
}
