//! CLI entry point for csv-intake.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use intake::audit::AuditLog;
use intake::config::IntakeConfig;
use intake::router::BatchRouter;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\ncommit: ",
    env!("GIT_SHA"),
    "\nbuilt: ",
    env!("BUILD_DATE")
);

#[derive(Parser)]
#[command(name = "csv-intake")]
#[command(version, long_version = LONG_VERSION)]
#[command(about = "Automated Data Ingestion Pipeline", long_about = None)]
#[command(
    after_help = "LAYOUT:\n    Valid files are moved to processed_data/, rejected files to quarantine_data/.\n    Every step is appended to pipeline_audit.log. Paths are relative to the\n    working directory unless overridden with --config.\n\n    Set INTAKE_QUIET=1 to stop echoing audit lines to the console."
)]
struct Cli {
    /// Path to the input folder containing CSVs
    #[arg(long, value_name = "DIR")]
    input: PathBuf,

    /// YAML file overriding destination and audit log locations
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match cli.config.as_deref() {
        Some(path) => IntakeConfig::load_from(path)?,
        None => IntakeConfig::default(),
    };

    let audit = AuditLog::new(&config.audit_log);
    BatchRouter::new(config, audit).process_batch(&cli.input)?;

    Ok(())
}
