//! Single-line codec for managed hosts entries.

use serde::{Deserialize, Serialize};

use crate::error::{HostessError, Result};

/// Address every managed target is routed to.
pub const LOOPBACK: &str = "127.0.1.1";

/// One managed target and whether it is currently routed to the loopback address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(rename = "display")]
    pub target: String,
    #[serde(rename = "blocked")]
    pub active: bool,
}

impl Entry {
    /// New entry, active by default (the "add new" path).
    pub fn new(target: impl Into<String>) -> Self {
        Self::with_state(target, true)
    }

    pub fn with_state(target: impl Into<String>, active: bool) -> Self {
        Self {
            target: target.into(),
            active,
        }
    }
}

/// Parse a hosts line into an entry.
///
/// Accepts `127.0.1.1\t<target>` (active) and `#127.0.1.1\t<target>` (inactive),
/// anchored at the start of the line. One trailing newline is ignored.
pub fn parse_line(line: &str) -> Option<Entry> {
    let line = line.strip_suffix('\n').unwrap_or(line);
    let (active, rest) = match line.strip_prefix('#') {
        Some(rest) => (false, rest),
        None => (true, line),
    };
    let target = rest.strip_prefix(LOOPBACK)?.strip_prefix('\t')?;
    if target.is_empty() {
        return None;
    }
    Some(Entry::with_state(target, active))
}

/// Serialize an entry to a hosts line, newline included.
pub fn serialize(entry: &Entry) -> String {
    let comment = if entry.active { "" } else { "#" };
    format!("{comment}{LOOPBACK}\t{}\n", entry.target)
}

/// Reject targets that cannot be written as a single hosts line.
pub fn validate_target(target: &str) -> Result<()> {
    let reason = if target.is_empty() {
        "empty target"
    } else if target.contains('\n') || target.contains('\r') {
        "target spans more than one line"
    } else {
        return Ok(());
    };
    Err(HostessError::InvalidTarget {
        target: target.to_string(),
        reason,
    })
}
