//! Per-candidate log files.
//!
//! Every candidate processed by a batch run gets an append-mode log
//! under `<output>/logs/<sanitized-name>.log`, so a single candidate's
//! history can be inspected without grepping the run output. Lines are
//! timestamped and level-tagged.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use chrono::Utc;

/// Append-mode line logger for one candidate (or for the run itself).
pub struct CandidateLog {
    file: Mutex<File>,
    path: PathBuf,
}

impl CandidateLog {
    /// Open (or create) the log file for a name. Parent directories are
    /// created as needed; existing content is preserved across runs.
    pub fn open(logs_dir: impl AsRef<Path>, name: &str) -> Result<Self> {
        let logs_dir = logs_dir.as_ref();
        std::fs::create_dir_all(logs_dir)
            .with_context(|| format!("failed to create logs directory {}", logs_dir.display()))?;

        let path = logs_dir.join(format!("{}.log", sanitize_name(name)));
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("failed to open candidate log {}", path.display()))?;

        Ok(Self { file: Mutex::new(file), path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn info(&self, message: impl AsRef<str>) {
        self.line("INFO", message.as_ref());
    }

    pub fn warn(&self, message: impl AsRef<str>) {
        self.line("WARN", message.as_ref());
    }

    pub fn error(&self, message: impl AsRef<str>) {
        self.line("ERROR", message.as_ref());
    }

    fn line(&self, level: &str, message: &str) {
        let stamp = Utc::now().format("%H:%M:%S");
        if let Ok(mut file) = self.file.lock() {
            // A failed log write must never take the pipeline down.
            let _ = writeln!(file, "{stamp} [{level}] {message}");
        }
    }
}

/// Keep alphanumerics, dashes and underscores; everything else becomes
/// an underscore so names map cleanly onto file paths.
pub fn sanitize_name(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    if sanitized.is_empty() {
        "unnamed".to_string()
    } else {
        sanitized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("Ada Lovelace"), "Ada_Lovelace");
        assert_eq!(sanitize_name("j.o/e"), "j_o_e");
        assert_eq!(sanitize_name(""), "unnamed");
    }

    #[test]
    fn test_log_lines_append() {
        let dir = tempfile::tempdir().unwrap();
        {
            let log = CandidateLog::open(dir.path(), "Ada Lovelace").unwrap();
            log.info("processing started");
            log.error("collaborator timeout");
        }
        {
            let log = CandidateLog::open(dir.path(), "Ada Lovelace").unwrap();
            log.info("second run");
        }

        let contents =
            std::fs::read_to_string(dir.path().join("Ada_Lovelace.log")).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("[INFO] processing started"));
        assert!(lines[1].contains("[ERROR] collaborator timeout"));
        assert!(lines[2].contains("second run"));
    }
}
