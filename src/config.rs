//! Configuration loading and path resolution.
//!
//! Supports HOSTESS_HOME and HOSTESS_HOSTS_FILE env vars for testing.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{HostessError, Result};

#[cfg(windows)]
pub const DEFAULT_HOSTS_FILE: &str = r"C:\Windows\System32\drivers\etc\hosts";
#[cfg(not(windows))]
pub const DEFAULT_HOSTS_FILE: &str = "/etc/hosts";

pub const DEFAULT_ELEVATE_COMMAND: &str = "pkexec";

/// Paths for the hostess data store.
#[derive(Debug, Clone)]
pub struct HostessPaths {
    pub config_dir: PathBuf,
    pub config_file: PathBuf,
    pub profiles_file: PathBuf,
    pub backup_original: PathBuf,
    pub backup_recent: PathBuf,
}

impl HostessPaths {
    /// Build paths from base directory (e.g. ~/.hostess or HOSTESS_HOME).
    pub fn from_base(base: PathBuf) -> Self {
        Self {
            config_file: base.join("config.toml"),
            profiles_file: base.join("profiles.json"),
            backup_original: base.join("hosts_backup_original"),
            backup_recent: base.join("hosts_backup_recent"),
            config_dir: base,
        }
    }

    /// Paths for testing: use a temp dir as base.
    pub fn for_test(base: impl AsRef<Path>) -> Self {
        Self::from_base(base.as_ref().to_path_buf())
    }

    /// Get default hostess paths (respects HOSTESS_HOME).
    pub fn default_paths() -> Self {
        let base = if let Some(home) = std::env::var_os("HOSTESS_HOME") {
            PathBuf::from(home)
        } else if let Some(dirs) = directories::BaseDirs::new() {
            dirs.home_dir().join(".hostess")
        } else {
            PathBuf::from(".hostess")
        };
        Self::from_base(base)
    }
}

/// config.toml structure.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Config {
    /// Hosts file to manage.
    #[serde(default = "default_hosts_file")]
    pub hosts_file: PathBuf,
    /// Program used to gain root for the final replace (pkexec, sudo, doas...).
    #[serde(default = "default_elevate_command")]
    pub elevate_command: String,
}

fn default_hosts_file() -> PathBuf {
    PathBuf::from(DEFAULT_HOSTS_FILE)
}

fn default_elevate_command() -> String {
    DEFAULT_ELEVATE_COMMAND.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hosts_file: default_hosts_file(),
            elevate_command: default_elevate_command(),
        }
    }
}

impl Config {
    /// Load config.toml if present, then apply HOSTESS_HOSTS_FILE.
    pub fn load(paths: &HostessPaths) -> Result<Config> {
        let mut cfg = Self::load_file(&paths.config_file)?;
        if let Some(hosts) = std::env::var_os("HOSTESS_HOSTS_FILE") {
            cfg.hosts_file = PathBuf::from(hosts);
        }
        Ok(cfg)
    }

    /// Load config from a file, defaults when it does not exist.
    pub fn load_file(path: &Path) -> Result<Config> {
        if !path.is_file() {
            return Ok(Config::default());
        }
        let s = fs::read_to_string(path).map_err(|e| HostessError::io("read config", path, e))?;
        toml::from_str(&s).map_err(|source| HostessError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Save config to paths. Creates parent dirs if needed.
    pub fn save(&self, paths: &HostessPaths) -> Result<()> {
        let path = &paths.config_file;
        if let Some(p) = path.parent() {
            fs::create_dir_all(p).map_err(|e| HostessError::io("create config directory", p, e))?;
        }
        let s = toml::to_string_pretty(self).map_err(|e| {
            HostessError::io(
                "serialize config",
                path,
                std::io::Error::new(std::io::ErrorKind::InvalidData, e),
            )
        })?;
        fs::write(path, s).map_err(|e| HostessError::io("write config", path, e))
    }
}
