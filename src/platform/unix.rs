//! Unix (macOS, Linux) platform implementations.

use anyhow::{Context, Result};
use std::path::Path;
use std::process::Command;

use super::PrivilegedReplace;

/// Installs the new file next to the target as root:644, then renames it into place.
const REPLACE_SCRIPT: &str = r#"install -m 644 "$0" "$1.hostess-new" && mv -f "$1.hostess-new" "$1""#;

/// Replaces the target by running a shell through an elevation command (pkexec, sudo, ...).
#[derive(Debug, Clone)]
pub struct ElevatedReplacer {
    program: String,
}

impl ElevatedReplacer {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl PrivilegedReplace for ElevatedReplacer {
    fn replace(&self, temp: &Path, target: &Path) -> Result<()> {
        let status = Command::new(&self.program)
            .arg("sh")
            .arg("-c")
            .arg(REPLACE_SCRIPT)
            .arg(temp)
            .arg(target)
            .status()
            .with_context(|| format!("spawn {}", self.program))?;
        if !status.success() {
            anyhow::bail!("{} exited with {status}", self.program);
        }
        Ok(())
    }
}
