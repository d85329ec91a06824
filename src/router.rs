//! Batch routing: list candidates, validate each, move to its destination.
//!
//! A run is a single pass in file-name order. Per-file problems become
//! rejections; only an unlistable input directory stops the run early.

use anyhow::{Context, Result};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::audit::AuditLog;
use crate::config::IntakeConfig;
use crate::validator::{self, Verdict};

/// Extension identifying candidate files.
pub const CANDIDATE_EXTENSION: &str = ".csv";

/// Counters for one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub accepted: usize,
    pub rejected: usize,
}

impl BatchSummary {
    pub fn total(&self) -> usize {
        self.accepted + self.rejected
    }
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchOutcome {
    /// The input directory could not be listed; nothing was moved
    InputMissing,
    /// No candidate files were present
    NoCandidates,
    /// Every candidate was routed
    Completed(BatchSummary),
}

/// Routes candidate files to the accepted or quarantine directory.
pub struct BatchRouter {
    config: IntakeConfig,
    audit: AuditLog,
}

impl BatchRouter {
    pub fn new(config: IntakeConfig, audit: AuditLog) -> Self {
        Self { config, audit }
    }

    /// Process every candidate file in `input_dir`.
    ///
    /// Errors are returned only for environmental failures: a destination
    /// directory that cannot be created, a move that fails, or an audit log
    /// that cannot be written.
    pub fn process_batch(&self, input_dir: &Path) -> Result<BatchOutcome> {
        self.audit.record(&format!(
            "--- INITIALIZING PIPELINE FOR: {} ---",
            input_dir.display()
        ))?;

        for dir in [&self.config.accepted_dir, &self.config.quarantine_dir] {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
        }

        let candidates = match list_candidates(input_dir) {
            Ok(candidates) => candidates,
            Err(err) => {
                self.audit.record(&format!(
                    "CRITICAL ERROR: Input folder '{}' not found.",
                    input_dir.display()
                ))?;
                self.audit.record(&format!("Reason: {:#}", err))?;
                return Ok(BatchOutcome::InputMissing);
            }
        };

        if candidates.is_empty() {
            self.audit.record("No CSV files found in input directory.")?;
            return Ok(BatchOutcome::NoCandidates);
        }

        let mut summary = BatchSummary::default();

        for filename in &candidates {
            let source = input_dir.join(filename);
            self.audit.record(&format!(
                "Auditing file: {}...",
                filename.to_string_lossy()
            ))?;

            let verdict = validator::validate(&source);

            match &verdict {
                Verdict::Accepted => {
                    move_with_overwrite(&source, &self.config.accepted_dir.join(filename))?;
                    summary.accepted += 1;
                    self.audit.record(&format!(
                        "SUCCESS: File valid. Moved to {}",
                        self.config.accepted_dir.display()
                    ))?;
                }
                Verdict::Rejected(_) => {
                    move_with_overwrite(&source, &self.config.quarantine_dir.join(filename))?;
                    summary.rejected += 1;
                    self.audit.record(&format!(
                        "FAILURE: {}. Moved to {}",
                        verdict.reason(),
                        self.config.quarantine_dir.display()
                    ))?;
                }
            }
        }

        self.audit.record("--- BATCH COMPLETE ---")?;
        self.audit.record(&format!(
            "Summary: {} Valid | {} Rejected",
            summary.accepted, summary.rejected
        ))?;

        Ok(BatchOutcome::Completed(summary))
    }
}

/// File names in `input_dir` ending with [`CANDIDATE_EXTENSION`], sorted.
///
/// Names are matched on their raw bytes, so names that are not valid UTF-8
/// are still candidates. Directories are skipped even if their name matches.
pub fn list_candidates(input_dir: &Path) -> Result<Vec<OsString>> {
    let entries = fs::read_dir(input_dir)
        .with_context(|| format!("Failed to read directory: {}", input_dir.display()))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry
            .with_context(|| format!("Failed to read entry in {}", input_dir.display()))?;

        if entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
            continue;
        }

        let name = entry.file_name();
        if name.as_encoded_bytes().ends_with(CANDIDATE_EXTENSION.as_bytes()) {
            names.push(name);
        }
    }

    names.sort();
    Ok(names)
}

/// Move `src` to `dst`, replacing any existing file at `dst`.
///
/// Uses rename, falling back to copy + delete when rename fails (for example
/// across filesystems).
pub fn move_with_overwrite(src: &Path, dst: &Path) -> Result<PathBuf> {
    if dst.exists() {
        fs::remove_file(dst)
            .with_context(|| format!("Failed to remove existing file: {}", dst.display()))?;
    }

    if fs::rename(src, dst).is_err() {
        fs::copy(src, dst).with_context(|| {
            format!(
                "Failed to move file from {} to {}",
                src.display(),
                dst.display()
            )
        })?;
        fs::remove_file(src)
            .with_context(|| format!("Failed to remove source file: {}", src.display()))?;
    }

    Ok(dst.to_path_buf())
}
