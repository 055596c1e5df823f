//! Durable candidate store implementations.

pub mod csv_store;

pub use csv_store::{CsvStore, PIPELINE_COLUMNS};
