//! Candidate store port.

use thiserror::Error;

use crate::domain::models::CandidateRecord;

/// In-memory table abstraction over the durable candidate store.
///
/// Mutations are row-level `set` calls; nothing reaches durable storage
/// until `persist`, which rewrites the whole table. The orchestrator
/// persists after every row transition, which is the pipeline's
/// crash-safety contract.
pub trait CandidateStore: Send {
    /// Number of rows in the table.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fetch a row by index.
    fn get(&self, index: usize) -> Option<&CandidateRecord>;

    /// Replace a row. The record's own `index` field must equal `index`.
    fn set(&mut self, index: usize, record: CandidateRecord) -> Result<(), StoreError>;

    /// Rewrite the entire table to durable storage.
    fn persist(&self) -> Result<(), StoreError>;
}

/// Errors raised by a candidate store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("candidate table {path} is unreadable: {reason}")]
    Unreadable { path: String, reason: String },

    #[error("candidate table write failed: {0}")]
    WriteFailed(String),

    #[error("row index {index} out of bounds (table has {len} rows)")]
    OutOfBounds { index: usize, len: usize },

    #[error("row index mismatch: record says {record}, store slot is {slot}")]
    IndexMismatch { record: usize, slot: usize },
}
