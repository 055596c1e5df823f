//! The resumable batch state machine.
//!
//! Walks the candidate table in row order, picks up `pending` rows,
//! gates them through the eligibility filter, evaluates the eligible
//! ones, and persists the whole table after every row transition. One
//! bad candidate never aborts the run: any evaluation error lands in
//! that row as `failed` and the loop moves on.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use crate::domain::models::{CandidateRecord, CandidateStatus, GradeReport};
use crate::domain::ports::{CandidateStore, ChartRenderer, NetworkProfileSource, ScoringClient};
use crate::infrastructure::logging::CandidateLog;
use crate::services::{CandidateEvaluator, EligibilityFilter, SnapshotCache};

/// Tally of row transitions performed by one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub done: usize,
    pub rejected: usize,
    pub failed: usize,
    /// Rows reset from a stale `processing` state at startup.
    pub reclaimed: usize,
}

impl RunSummary {
    pub fn processed(&self) -> usize {
        self.done + self.rejected + self.failed
    }
}

pub struct BatchOrchestrator<S: CandidateStore, C: ScoringClient> {
    store: S,
    eligibility: EligibilityFilter,
    evaluator: CandidateEvaluator<C>,
    network_source: Arc<dyn NetworkProfileSource>,
    chart_renderer: Arc<dyn ChartRenderer>,
    output_dir: PathBuf,
    cache: SnapshotCache,
    show_progress: bool,
}

impl<S: CandidateStore, C: ScoringClient> BatchOrchestrator<S, C> {
    pub fn new(
        store: S,
        eligibility: EligibilityFilter,
        evaluator: CandidateEvaluator<C>,
        network_source: Arc<dyn NetworkProfileSource>,
        chart_renderer: Arc<dyn ChartRenderer>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            store,
            eligibility,
            evaluator,
            network_source,
            chart_renderer,
            output_dir: output_dir.into(),
            cache: SnapshotCache::new(),
            show_progress: false,
        }
    }

    /// Enable the terminal progress bar (CLI runs only).
    pub fn with_progress(mut self) -> Self {
        self.show_progress = true;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Process every pending row, sequentially, committing each row to
    /// durable storage before the next one begins.
    pub async fn run(&mut self) -> Result<RunSummary> {
        let logs_dir = self.output_dir.join("logs");
        std::fs::create_dir_all(&logs_dir)
            .with_context(|| format!("failed to create output directory {}", logs_dir.display()))?;

        let run_log = CandidateLog::open(&logs_dir, "pipeline")?;
        run_log.info(format!("batch run started over {} row(s)", self.store.len()));

        let reclaimed = self.reclaim_stale_rows(&run_log)?;
        let mut summary = RunSummary { reclaimed, ..Default::default() };

        let pending = self.indices_with_status(CandidateStatus::Pending);
        info!(pending = pending.len(), "candidate rows pending");
        run_log.info(format!("{} candidate(s) pending", pending.len()));

        let bar = if self.show_progress {
            let bar = ProgressBar::new(pending.len() as u64);
            bar.set_style(
                ProgressStyle::with_template("{bar:30} {pos}/{len} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar()),
            );
            Some(bar)
        } else {
            None
        };

        for index in pending {
            let Some(record) = self.store.get(index) else { continue };
            let record = record.clone();
            let name = record.display_name();

            if let Some(bar) = &bar {
                bar.set_message(name.clone());
            }

            self.process_row(index, record, &logs_dir, &mut summary).await?;

            if let Some(bar) = &bar {
                bar.inc(1);
            }
        }

        if let Some(bar) = &bar {
            bar.finish_and_clear();
        }

        info!(
            done = summary.done,
            rejected = summary.rejected,
            failed = summary.failed,
            "batch run finished"
        );
        run_log.info(format!(
            "batch run finished. done: {}, rejected: {}, failed: {}",
            summary.done, summary.rejected, summary.failed
        ));
        Ok(summary)
    }

    /// One row: pending -> processing -> terminal, with a persist after
    /// every transition.
    async fn process_row(
        &mut self,
        index: usize,
        mut record: CandidateRecord,
        logs_dir: &std::path::Path,
        summary: &mut RunSummary,
    ) -> Result<()> {
        let name = record.display_name();
        let log = CandidateLog::open(logs_dir, &name)?;
        log.info(format!("--- processing: {name} (row {index}) ---"));

        record.begin_processing()?;
        self.commit(index, record.clone())?;

        // Pre-fetch the network profile: the eligibility gate needs it,
        // and the evaluator will hit the cache afterwards.
        let profile = self
            .cache
            .network_profile(&record.network_profile_url, &*self.network_source)
            .await;

        let decision = self.eligibility.is_eligible(&record, &profile);
        if !decision.eligible {
            log.info(format!("rejected by eligibility gate: {}", decision.reason));
            record.reject(decision.reason)?;
            self.commit(index, record)?;
            summary.rejected += 1;
            return Ok(());
        }
        log.info(format!("eligibility gate: {}", decision.reason));
        record.europe_reason = Some(decision.reason.clone());

        match self.evaluator.evaluate(&record, &mut self.cache).await {
            Ok(report) => {
                let chart_path = self
                    .chart_renderer
                    .render(&name, &report.grades, &self.output_dir)
                    .map(|path| path.display().to_string());

                log_grades(&log, &report);
                record.complete(&report, chart_path)?;
                self.commit(index, record)?;
                summary.done += 1;
            }
            Err(err) => {
                let message = short_error(&err);
                warn!(candidate = %name, error = %message, "evaluation failed, continuing with next row");
                log.error(format!("FAILED: {message}"));
                record.fail(message)?;
                self.commit(index, record)?;
                summary.failed += 1;
            }
        }
        Ok(())
    }

    /// Rows stuck in `processing` are leftovers of a killed run. They
    /// are reset to `pending` so this run re-selects them instead of
    /// stranding the candidate forever.
    fn reclaim_stale_rows(&mut self, run_log: &CandidateLog) -> Result<usize> {
        let stale = self.indices_with_status(CandidateStatus::Processing);
        if stale.is_empty() {
            return Ok(0);
        }

        warn!(rows = stale.len(), "reclaiming rows stranded in processing by a previous run");
        run_log.warn(format!("reclaiming {} row(s) stranded in processing", stale.len()));
        let count = stale.len();
        for index in stale {
            if let Some(record) = self.store.get(index) {
                let mut record = record.clone();
                record.reclaim();
                self.store.set(index, record)?;
            }
        }
        self.store.persist()?;
        Ok(count)
    }

    fn indices_with_status(&self, status: CandidateStatus) -> Vec<usize> {
        (0..self.store.len())
            .filter(|&index| {
                self.store.get(index).is_some_and(|record| record.status == status)
            })
            .collect()
    }

    fn commit(&mut self, index: usize, record: CandidateRecord) -> Result<()> {
        self.store.set(index, record)?;
        self.store.persist()?;
        Ok(())
    }
}

fn log_grades(log: &CandidateLog, report: &GradeReport) {
    let grades = &report.grades;
    log.info(format!(
        "done. education={} community={:.1} hack={:.1} research={:.1} startup={:.1} trust={}",
        grades.education,
        grades.community,
        grades.hack_project,
        grades.research,
        grades.startup,
        report.verification.trust_score(),
    ));
    for discrepancy in &report.verification.discrepancies {
        log.warn(format!("discrepancy: {discrepancy}"));
    }
}

/// Failure rows carry a one-line error message, not a report.
fn short_error(err: &anyhow::Error) -> String {
    let message = format!("{err:#}");
    let mut shortened: String = message.chars().take(300).collect();
    if shortened.len() < message.len() {
        shortened.push_str("...");
    }
    shortened
}
