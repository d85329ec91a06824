//! # csv-intake - Batch intake for tabular drops
//!
//! Scans an input directory for `.csv` files, validates each one against a
//! fixed set of structural and business rules, and moves it into either the
//! accepted or the quarantine directory. Every step is appended to a
//! timestamped audit log.
//!
//! ## Modules
//!
//! - [`table`] - Decoding (UTF-8 with Windows-1252 fallback) and CSV parsing
//! - [`validator`] - Per-file rules producing a [`validator::Verdict`]
//! - [`router`] - Batch orchestration: list, validate, move, summarize
//! - [`audit`] - Append-only audit log with console echo
//! - [`config`] - Destination and log locations
//! - [`ui`] - Console colouring and quiet mode
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//! use intake::audit::AuditLog;
//! use intake::config::IntakeConfig;
//! use intake::router::{BatchOutcome, BatchRouter};
//!
//! let config = IntakeConfig::default();
//! let audit = AuditLog::new(&config.audit_log);
//! let router = BatchRouter::new(config, audit);
//!
//! match router.process_batch(Path::new("incoming")).expect("batch failed") {
//!     BatchOutcome::Completed(summary) => println!("{} accepted", summary.accepted),
//!     BatchOutcome::NoCandidates | BatchOutcome::InputMissing => {}
//! }
//! ```

pub mod audit;
pub mod config;
pub mod router;
pub mod table;
pub mod ui;
pub mod validator;

/// Default locations, relative to the working directory.
pub mod paths {
    /// Directory receiving files that pass validation: `processed_data`
    pub const ACCEPTED_DIR: &str = "processed_data";
    /// Directory receiving files that fail validation: `quarantine_data`
    pub const QUARANTINE_DIR: &str = "quarantine_data";
    /// Append-only audit log: `pipeline_audit.log`
    pub const AUDIT_LOG: &str = "pipeline_audit.log";
}

/// Local wall-clock timestamp used as the audit line prefix: `YYYY-MM-DD HH:MM:SS`
pub fn local_timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}
