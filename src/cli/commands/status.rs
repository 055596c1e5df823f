//! `sift status` - table summary without running anything.

use anyhow::{Context, Result};
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, Table};
use serde_json::json;

use crate::domain::models::{CandidateStatus, Config};
use crate::infrastructure::config::ConfigLoader;
use crate::infrastructure::store::CsvStore;

pub fn execute(csv: Option<String>, json: bool) -> Result<()> {
    let mut config: Config = ConfigLoader::load()?;
    if let Some(csv) = csv {
        config.store.csv_path = csv;
    }

    let store = CsvStore::load(&config.store.csv_path)
        .with_context(|| format!("cannot open candidate table {}", config.store.csv_path))?;

    let mut counts = std::collections::BTreeMap::new();
    for record in store.records() {
        *counts.entry(record.status.as_str()).or_insert(0_usize) += 1;
    }

    if json {
        let rows: Vec<_> = store
            .records()
            .iter()
            .map(|record| {
                json!({
                    "index": record.index,
                    "name": record.display_name(),
                    "status": record.status.as_str(),
                    "trust_score": record.trust_score,
                    "europe_reason": record.europe_reason,
                    "error_message": record.error_message,
                })
            })
            .collect();
        println!("{}", json!({ "counts": counts, "rows": rows }));
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(["row", "name", "status", "edu", "comm", "hack", "res", "start", "trust"]);
    for record in store.records() {
        table.add_row([
            Cell::new(record.index),
            Cell::new(record.display_name()),
            Cell::new(record.status.as_str()),
            grade_cell(record.grade_education),
            grade_cell(record.grade_community),
            grade_cell(record.grade_hack_project),
            grade_cell(record.grade_research),
            grade_cell(record.grade_startup),
            Cell::new(
                record
                    .trust_score
                    .map(|score| score.to_string())
                    .unwrap_or_else(|| "-".into()),
            ),
        ]);
    }
    println!("{table}");

    let pending = counts.get(CandidateStatus::Pending.as_str()).copied().unwrap_or(0);
    let summary: Vec<String> =
        counts.iter().map(|(status, count)| format!("{status}: {count}")).collect();
    println!("{}", summary.join(", "));
    if pending > 0 {
        println!("{pending} row(s) still pending; `sift run` will pick them up");
    }
    Ok(())
}

fn grade_cell(grade: Option<f64>) -> Cell {
    match grade {
        Some(grade) => Cell::new(format!("{grade:.1}")),
        None => Cell::new("-"),
    }
}
