//! Chart renderer port.
//!
//! Rendering the per-candidate score chart is an external concern; the
//! pipeline only records the artifact path the renderer hands back.

use std::path::{Path, PathBuf};

use crate::domain::models::Grades;

/// Port for the chart-rendering collaborator.
pub trait ChartRenderer: Send + Sync {
    /// Render a chart for one candidate. Returns the artifact path, or
    /// `None` when no chart was produced.
    fn render(&self, candidate_name: &str, grades: &Grades, output_dir: &Path) -> Option<PathBuf>;
}

/// A no-op renderer used when chart output is not wired up.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullChartRenderer;

impl ChartRenderer for NullChartRenderer {
    fn render(&self, _candidate_name: &str, _grades: &Grades, _output_dir: &Path) -> Option<PathBuf> {
        None
    }
}
