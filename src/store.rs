//! Data store layout and first-run bootstrap.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::config::{Config, HostessPaths};
use crate::error::{HostessError, Result};
use crate::profile::ProfileStore;

/// Which backup slot a hosts snapshot went to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackupSlot {
    /// First run: the untouched pre-hostess file.
    Original,
    /// Later runs: latest snapshot, replaced each time.
    Recent,
}

/// Ensure the hostess directory exists.
pub fn ensure_dirs(paths: &HostessPaths) -> Result<()> {
    fs::create_dir_all(&paths.config_dir)
        .map_err(|e| HostessError::io("create directory", &paths.config_dir, e))
}

/// Copy the hosts file into the backup area. The original backup is never overwritten.
pub fn backup_hosts(paths: &HostessPaths, hosts_file: &Path) -> Result<BackupSlot> {
    ensure_dirs(paths)?;
    let (slot, dest) = if paths.backup_original.exists() {
        (BackupSlot::Recent, &paths.backup_recent)
    } else {
        (BackupSlot::Original, &paths.backup_original)
    };
    fs::copy(hosts_file, dest).map_err(|e| HostessError::io("back up hosts file", hosts_file, e))?;
    info!(from = %hosts_file.display(), to = %dest.display(), ?slot, "backed up hosts file");
    Ok(slot)
}

/// Back up the hosts file as the original unless that backup already exists.
/// Returns true when a backup was written.
pub fn ensure_original_backup(paths: &HostessPaths, hosts_file: &Path) -> Result<bool> {
    if paths.backup_original.exists() {
        return Ok(false);
    }
    backup_hosts(paths, hosts_file)?;
    Ok(true)
}

/// First-run setup: directories, hosts backup, empty profile document, default config.
pub fn initialize(paths: &HostessPaths, config: &Config) -> Result<BackupSlot> {
    ensure_dirs(paths)?;
    let slot = backup_hosts(paths, &config.hosts_file)?;
    ProfileStore::new(&paths.profiles_file).ensure_exists()?;
    if !paths.config_file.is_file() {
        Config::default().save(paths)?;
    } else {
        debug!(path = %paths.config_file.display(), "config exists, leaving it unchanged");
    }
    Ok(slot)
}
