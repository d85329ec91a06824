//! Routing configuration: where accepted files, quarantined files, and the
//! audit log live.
//!
//! Defaults match the fixed layout in [`crate::paths`]. A config file may be
//! plain YAML or markdown with YAML frontmatter:
//!
//! ```yaml
//! ---
//! accepted_dir: out/accepted
//! quarantine_dir: out/quarantine
//! audit_log: out/audit.log
//! ---
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::paths::{ACCEPTED_DIR, AUDIT_LOG, QUARANTINE_DIR};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IntakeConfig {
    /// Destination for files that pass validation
    #[serde(default = "default_accepted_dir")]
    pub accepted_dir: PathBuf,
    /// Destination for files that fail validation
    #[serde(default = "default_quarantine_dir")]
    pub quarantine_dir: PathBuf,
    /// Append-only audit log file
    #[serde(default = "default_audit_log")]
    pub audit_log: PathBuf,
}

fn default_accepted_dir() -> PathBuf {
    PathBuf::from(ACCEPTED_DIR)
}

fn default_quarantine_dir() -> PathBuf {
    PathBuf::from(QUARANTINE_DIR)
}

fn default_audit_log() -> PathBuf {
    PathBuf::from(AUDIT_LOG)
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            accepted_dir: default_accepted_dir(),
            quarantine_dir: default_quarantine_dir(),
            audit_log: default_audit_log(),
        }
    }
}

impl IntakeConfig {
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let config = Self::parse(&content)
            .with_context(|| format!("Invalid config in {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse config text. Frontmatter is used when present, otherwise the
    /// whole document is read as YAML. An empty document yields the defaults.
    pub fn parse(content: &str) -> Result<Self> {
        let yaml = extract_frontmatter(content).unwrap_or_else(|| content.to_string());

        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(&yaml).context("Failed to parse config YAML")
    }

    /// Validate destination settings
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("accepted_dir", &self.accepted_dir),
            ("quarantine_dir", &self.quarantine_dir),
            ("audit_log", &self.audit_log),
        ] {
            if value.as_os_str().is_empty() {
                anyhow::bail!("{} must not be empty", name);
            }
        }

        if self.accepted_dir == self.quarantine_dir {
            anyhow::bail!(
                "accepted_dir and quarantine_dir must differ, both are '{}'",
                self.accepted_dir.display()
            );
        }

        Ok(())
    }
}

fn extract_frontmatter(content: &str) -> Option<String> {
    let content = content.trim();

    let rest = content.strip_prefix("---")?;
    rest.find("\n---").map(|end| rest[..end].to_string())
}
