//! Append-only audit trail
//!
//! Each event becomes one `[YYYY-MM-DD HH:MM:SS] message` line, echoed to
//! stdout and appended to the log file. The file is opened and closed on
//! every call so no handle outlives a single event.

use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::ui;

/// Writer for the audit log
#[derive(Debug, Clone)]
pub struct AuditLog {
    log_path: PathBuf,
    echo: bool,
}

impl AuditLog {
    /// Audit log at `log_path` that also echoes to stdout unless quiet mode is set.
    pub fn new(log_path: impl AsRef<Path>) -> Self {
        Self {
            log_path: log_path.as_ref().to_path_buf(),
            echo: !ui::is_quiet(),
        }
    }

    /// Audit log that only writes to the file.
    pub fn file_only(log_path: impl AsRef<Path>) -> Self {
        Self {
            log_path: log_path.as_ref().to_path_buf(),
            echo: false,
        }
    }

    /// Record an event with the current local timestamp
    pub fn record(&self, message: &str) -> Result<()> {
        self.record_at(&crate::local_timestamp(), message)
    }

    fn record_at(&self, timestamp: &str, message: &str) -> Result<()> {
        if self.echo {
            println!("{}", ui::console_line(timestamp, message));
        }

        if let Some(parent) = self.log_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create log directory: {}", parent.display())
                })?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .with_context(|| format!("Failed to open audit log: {}", self.log_path.display()))?;

        writeln!(file, "[{}] {}", timestamp, message).with_context(|| {
            format!("Failed to write to audit log: {}", self.log_path.display())
        })?;

        Ok(())
    }

    /// Get the path to the log file
    pub fn log_path(&self) -> &Path {
        &self.log_path
    }
}
