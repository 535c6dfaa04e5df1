//! Error kinds surfaced by the hosts region and profile stores.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for core hostess operations.
pub type Result<T> = std::result::Result<T, HostessError>;

/// Errors produced by the hosts region, profile store and bootstrap.
#[derive(Debug, Error)]
pub enum HostessError {
    /// Ownership region is malformed (unterminated, duplicated, or holds a foreign line).
    #[error("hosts file line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("failed to {operation} {}: {source}", .path.display())]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid profile document {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Elevated replace of the real file failed or was declined.
    #[error("could not replace {}: {message}", .target.display())]
    Privilege { target: PathBuf, message: String },

    #[error("profile '{name}' not found")]
    KeyNotFound { name: String },

    #[error("entry index {index} out of range ({len} entries)")]
    Index { index: usize, len: usize },

    #[error("invalid target {target:?}: {reason}")]
    InvalidTarget { target: String, reason: &'static str },

    #[error("{operation} is not supported yet")]
    Unsupported { operation: &'static str },
}

impl HostessError {
    pub(crate) fn io(operation: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }
}
