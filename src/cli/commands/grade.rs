//! `sift grade` - evaluate one candidate without touching the table.

use anyhow::{bail, Context, Result};
use console::style;
use serde_json::json;

use super::build_components;
use crate::domain::models::{Config, Grades};
use crate::domain::ports::{CandidateStore, NetworkProfileSource};
use crate::infrastructure::config::ConfigLoader;
use crate::infrastructure::store::CsvStore;
use crate::services::SnapshotCache;

pub async fn execute(index: usize, csv: Option<String>, json: bool) -> Result<()> {
    let mut config: Config = ConfigLoader::load()?;
    if let Some(csv) = csv {
        config.store.csv_path = csv;
    }

    let store = CsvStore::load(&config.store.csv_path)
        .with_context(|| format!("cannot open candidate table {}", config.store.csv_path))?;
    let Some(record) = store.get(index) else {
        bail!("row index {index} out of bounds (table has {} rows)", store.len());
    };
    let record = record.clone();

    let components = build_components(&config)?;
    let mut cache = SnapshotCache::new();

    let profile = components
        .network_source
        .fetch(&record.network_profile_url)
        .await
        .unwrap_or_default();
    let decision = components.eligibility.is_eligible(&record, &profile);

    let report = components.evaluator.evaluate(&record, &mut cache).await?;

    if json {
        println!(
            "{}",
            json!({
                "name": record.display_name(),
                "eligible": decision.eligible,
                "eligibility_reason": decision.reason,
                "grades": {
                    "education": report.grades.education,
                    "community": report.grades.community,
                    "hack_project": report.grades.hack_project,
                    "research": report.grades.research,
                    "startup": report.grades.startup,
                },
                "trust_score": report.verification.trust_score(),
                "summary": report.verification.summary(),
                "matches": report.verification.matches,
                "discrepancies": report.verification.discrepancies,
            })
        );
        return Ok(());
    }

    println!("{} {}", style("candidate:").bold(), record.display_name());
    println!("eligibility: {}", decision.reason);
    for (label, value) in Grades::LABELS.iter().zip(report.grades.values()) {
        println!("  {label:<14} {value:>6.1}");
    }
    println!(
        "trust score: {}/100 ({})",
        report.verification.trust_score(),
        report.verification.summary()
    );
    for matched in &report.verification.matches {
        println!("  {} {matched}", style("ok").green());
    }
    for discrepancy in &report.verification.discrepancies {
        println!("  {} {discrepancy}", style("!!").red());
    }
    Ok(())
}
