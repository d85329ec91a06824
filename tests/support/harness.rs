use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

use super::fixtures::load_fixture;

/// TestHarness provides an isolated working directory for intake runs.
/// Each harness creates a temporary directory with an empty `incoming/`
/// input folder; destinations and the audit log use the default relative
/// layout inside it.
pub struct TestHarness {
    pub dir: TempDir,
    pub input_dir: PathBuf,
    #[allow(dead_code)]
    pub intake_binary: PathBuf,
}

impl TestHarness {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let input_dir = temp_dir.path().join("incoming");
        fs::create_dir_all(&input_dir).expect("Failed to create input dir");

        TestHarness {
            dir: temp_dir,
            input_dir,
            intake_binary: PathBuf::from(env!("CARGO_BIN_EXE_csv-intake")),
        }
    }

    /// Returns the base directory path (the TempDir path).
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Executes the binary with the given arguments in the harness directory.
    /// Console echo is silenced unless the caller overrides `INTAKE_QUIET`.
    #[allow(dead_code)]
    pub fn run(&self, args: &[&str]) -> Output {
        self.run_with_env(args, &[("INTAKE_QUIET", "1")])
    }

    #[allow(dead_code)]
    pub fn run_with_env(&self, args: &[&str], env: &[(&str, &str)]) -> Output {
        let mut cmd = Command::new(&self.intake_binary);
        cmd.args(args).current_dir(self.path());
        for (key, value) in env {
            cmd.env(key, value);
        }
        cmd.output().expect("Failed to run csv-intake")
    }

    /// Runs against the harness input folder.
    #[allow(dead_code)]
    pub fn run_batch(&self) -> Output {
        self.run(&["--input", "incoming"])
    }

    /// Writes a file into the input folder.
    pub fn drop_file(&self, name: &str, content: impl AsRef<[u8]>) {
        fs::write(self.input_dir.join(name), content).expect("Failed to write input file");
    }

    /// Copies `tests/fixtures/<fixture>.csv` into the input folder as `name`.
    pub fn drop_fixture(&self, name: &str, fixture: &str) {
        self.drop_file(name, load_fixture(fixture));
    }

    #[allow(dead_code)]
    pub fn accepted(&self, name: &str) -> PathBuf {
        self.path().join("processed_data").join(name)
    }

    #[allow(dead_code)]
    pub fn quarantined(&self, name: &str) -> PathBuf {
        self.path().join("quarantine_data").join(name)
    }

    pub fn incoming(&self, name: &str) -> PathBuf {
        self.input_dir.join(name)
    }

    /// Audit log content, or empty if no log was written.
    #[allow(dead_code)]
    pub fn audit_log(&self) -> String {
        fs::read_to_string(self.path().join("pipeline_audit.log")).unwrap_or_default()
    }

    /// Audit messages with the `[timestamp] ` prefix removed.
    #[allow(dead_code)]
    pub fn audit_messages(&self) -> Vec<String> {
        self.audit_log()
            .lines()
            .map(|line| line.get(22..).unwrap_or_default().to_string())
            .collect()
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
