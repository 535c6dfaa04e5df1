//! Platform abstraction for replacing the hosts file.

#[cfg(unix)]
pub mod unix;

use anyhow::Result;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::HostessError;

/// Capability to move a fully written temp file over a protected target path.
pub trait PrivilegedReplace: Send + Sync {
    /// Replace `target` with the contents of `temp`. Must be all-or-nothing for `target`.
    /// A `HostessError` returned here is passed through by commit; anything else is
    /// reported as a privilege failure.
    fn replace(&self, temp: &Path, target: &Path) -> Result<()>;
}

/// Get platform PrivilegedReplace implementation.
/// If HOSTESS_HOSTS_FILE is set (e.g. in tests), the target is assumed writable and
/// FileReplacer is used.
pub fn default_replacer(config: &Config) -> Box<dyn PrivilegedReplace> {
    if std::env::var_os("HOSTESS_HOSTS_FILE").is_some() {
        return Box::new(FileReplacer);
    }
    #[cfg(unix)]
    return Box::new(unix::ElevatedReplacer::new(config.elevate_command.clone()));

    #[cfg(not(unix))]
    {
        let _ = config;
        Box::new(FileReplacer)
    }
}

/// Replaces the target in-process with an atomic rename; needs write access to its directory.
/// Failures are plain I/O and surface as `HostessError::Io`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileReplacer;

impl PrivilegedReplace for FileReplacer {
    fn replace(&self, temp: &Path, target: &Path) -> Result<()> {
        let dir = parent_dir(target);
        let contents =
            std::fs::read(temp).map_err(|e| HostessError::io("read temp file", temp, e))?;
        let mut staged = tempfile::Builder::new()
            .prefix(".hostess-")
            .tempfile_in(&dir)
            .map_err(|e| HostessError::io("create staging file in", &dir, e))?;
        staged
            .write_all(&contents)
            .and_then(|()| staged.as_file().sync_all())
            .map_err(|e| HostessError::io("write staging file", staged.path(), e))?;
        if let Ok(meta) = std::fs::metadata(target) {
            staged
                .as_file()
                .set_permissions(meta.permissions())
                .map_err(|e| HostessError::io("set permissions on", staged.path(), e))?;
        }
        staged
            .persist(target)
            .map_err(|e| HostessError::io("rename staging file over", target, e.error))?;
        Ok(())
    }
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
