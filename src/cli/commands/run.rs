//! `sift run` - the batch pipeline.

use std::sync::Arc;

use anyhow::{Context, Result};
use console::style;
use serde_json::json;

use super::build_components;
use crate::application::BatchOrchestrator;
use crate::domain::models::Config;
use crate::domain::ports::NullChartRenderer;
use crate::infrastructure::config::ConfigLoader;
use crate::infrastructure::store::CsvStore;

pub async fn execute(csv: Option<String>, output_dir: Option<String>, json: bool) -> Result<()> {
    let mut config: Config = ConfigLoader::load()?;
    if let Some(csv) = csv {
        config.store.csv_path = csv;
    }
    if let Some(output_dir) = output_dir {
        config.store.output_dir = output_dir;
    }

    // An unreadable table is fatal before any row is touched.
    let store = CsvStore::load(&config.store.csv_path)
        .with_context(|| format!("cannot open candidate table {}", config.store.csv_path))?;

    let components = build_components(&config)?;
    let mut orchestrator = BatchOrchestrator::new(
        store,
        components.eligibility,
        components.evaluator,
        components.network_source,
        Arc::new(NullChartRenderer),
        &config.store.output_dir,
    );
    if !json {
        orchestrator = orchestrator.with_progress();
    }

    let summary = orchestrator.run().await?;

    if json {
        println!(
            "{}",
            json!({
                "done": summary.done,
                "rejected": summary.rejected,
                "failed": summary.failed,
                "reclaimed": summary.reclaimed,
            })
        );
    } else {
        println!(
            "{} done: {}, rejected: {}, failed: {}",
            style("batch finished.").green().bold(),
            summary.done,
            summary.rejected,
            summary.failed,
        );
        if summary.reclaimed > 0 {
            println!(
                "{} {} row(s) were stranded in processing and re-queued",
                style("note:").yellow(),
                summary.reclaimed
            );
        }
    }
    Ok(())
}
