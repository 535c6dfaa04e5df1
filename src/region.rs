//! Hostess-owned region of the hosts file: parse, mutate, render, commit.
//!
//! The file is split into three parts around the ownership markers:
//! pre-region lines, managed entries, post-region lines. Lines outside the
//! region are kept verbatim (terminators included) so a commit only ever
//! changes the bytes between the markers.

use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::entry::{self, Entry};
use crate::error::{HostessError, Result};
use crate::platform::PrivilegedReplace;

/// Line opening the owned region.
pub const BEGIN_MARKER: &str = "# begin Hostess ownership\n";
/// Line closing the owned region.
pub const END_MARKER: &str = "# end Hostess ownership\n";

/// Parsed hosts file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionDocument {
    pub pre_region: Vec<String>,
    pub entries: Vec<Entry>,
    pub post_region: Vec<String>,
}

impl RegionDocument {
    /// Split file content into pre-region, entries and post-region.
    ///
    /// Without a begin marker the whole text is pre-region. A begin marker
    /// without a following end marker, a second region, or a line inside the
    /// region that is not an entry are errors; no partial document is returned.
    pub fn parse(text: &str) -> Result<Self> {
        let lines: Vec<&str> = text.split_inclusive('\n').collect();
        warn_near_markers(&lines);

        let Some(begin) = lines.iter().position(|l| *l == BEGIN_MARKER) else {
            return Ok(Self {
                pre_region: to_owned(&lines),
                ..Self::default()
            });
        };
        let end = lines[begin + 1..]
            .iter()
            .position(|l| *l == END_MARKER)
            .map(|offset| begin + 1 + offset)
            .ok_or_else(|| HostessError::Parse {
                line: begin + 1,
                message: "begin marker has no matching end marker".to_string(),
            })?;

        let mut entries = Vec::with_capacity(end - begin - 1);
        for (idx, line) in lines.iter().enumerate().take(end).skip(begin + 1) {
            let entry = entry::parse_line(line).ok_or_else(|| HostessError::Parse {
                line: idx + 1,
                message: format!("not a managed entry: {:?}", line.trim_end_matches('\n')),
            })?;
            entries.push(entry);
        }

        if let Some(offset) = lines[end + 1..].iter().position(|l| *l == BEGIN_MARKER) {
            return Err(HostessError::Parse {
                line: end + 2 + offset,
                message: "more than one ownership region".to_string(),
            });
        }

        Ok(Self {
            pre_region: to_owned(&lines[..begin]),
            entries,
            post_region: to_owned(&lines[end + 1..]),
        })
    }

    /// Rebuild the file. Markers are only emitted when there are entries.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.pre_region {
            out.push_str(line);
        }
        if !self.entries.is_empty() {
            // An unterminated last line would otherwise swallow the marker.
            if !out.is_empty() && !out.ends_with('\n') {
                out.push('\n');
            }
            out.push_str(BEGIN_MARKER);
            for e in &self.entries {
                out.push_str(&entry::serialize(e));
            }
            out.push_str(END_MARKER);
        }
        for line in &self.post_region {
            out.push_str(line);
        }
        out
    }
}

/// Marker lines with other endings or trailing space do not delimit the region.
fn warn_near_markers(lines: &[&str]) {
    for (idx, line) in lines.iter().enumerate() {
        let trimmed = line.trim_end();
        let near = [BEGIN_MARKER, END_MARKER]
            .iter()
            .any(|m| *line != *m && trimmed == m.trim_end());
        if near {
            warn!(line = idx + 1, text = ?line, "ownership marker with non-LF ending is ignored");
        }
    }
}

fn to_owned(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|l| (*l).to_string()).collect()
}

/// Hosts file loaded for one load/mutate/commit cycle.
#[derive(Debug, Clone)]
pub struct RegionStore {
    path: PathBuf,
    document: RegionDocument,
    backup: String,
    dirty: bool,
}

impl RegionStore {
    /// Read and parse the hosts file at `path`.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let text = std::fs::read_to_string(&path)
            .map_err(|e| HostessError::io("read hosts file", &path, e))?;
        let store = Self::from_text(path, text)?;
        debug!(
            path = %store.path.display(),
            entries = store.document.entries.len(),
            "loaded hosts file"
        );
        Ok(store)
    }

    /// Build a store from already-read content; `path` is where commit will write.
    pub fn from_text(path: impl Into<PathBuf>, text: String) -> Result<Self> {
        let document = RegionDocument::parse(&text)?;
        Ok(Self {
            path: path.into(),
            document,
            backup: text,
            dirty: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn document(&self) -> &RegionDocument {
        &self.document
    }

    pub fn entries(&self) -> &[Entry] {
        &self.document.entries
    }

    /// File content exactly as read at load time.
    pub fn backup(&self) -> &str {
        &self.backup
    }

    /// True when entries changed since load or the last successful commit.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Append an active entry. Duplicate targets are allowed.
    pub fn add_entry(&mut self, target: impl Into<String>) -> Result<()> {
        let target = target.into();
        entry::validate_target(&target)?;
        self.document.entries.push(Entry::new(target));
        self.dirty = true;
        Ok(())
    }

    /// Remove every entry whose target equals `target`. Returns how many were removed.
    pub fn remove_entry(&mut self, target: &str) -> usize {
        let before = self.document.entries.len();
        self.document.entries.retain(|e| e.target != target);
        let removed = before - self.document.entries.len();
        if removed > 0 {
            self.dirty = true;
        }
        removed
    }

    pub fn set_active(&mut self, index: usize, active: bool) -> Result<()> {
        let len = self.document.entries.len();
        let entry = self
            .document
            .entries
            .get_mut(index)
            .ok_or(HostessError::Index { index, len })?;
        if entry.active != active {
            entry.active = active;
            self.dirty = true;
        }
        Ok(())
    }

    /// Swap in a whole entry list, e.g. one loaded from a profile.
    pub fn replace_entries(&mut self, entries: Vec<Entry>) {
        if self.document.entries != entries {
            self.document.entries = entries;
            self.dirty = true;
        }
    }

    pub fn render(&self) -> String {
        self.document.render()
    }

    /// Write the rendered file to a temp file, then hand it to `replacer`.
    ///
    /// The real file is either fully replaced or left untouched.
    pub fn commit(&mut self, replacer: &dyn PrivilegedReplace) -> Result<()> {
        let rendered = self.render();

        let mut temp = tempfile::Builder::new()
            .prefix("hostess_hosts_")
            .suffix(".tmp")
            .tempfile()
            .map_err(|e| HostessError::io("create temp file", std::env::temp_dir(), e))?;
        temp.write_all(rendered.as_bytes())
            .and_then(|()| temp.as_file().sync_all())
            .map_err(|e| HostessError::io("write temp file", temp.path(), e))?;
        let temp_path = temp.into_temp_path();

        replacer
            .replace(&temp_path, &self.path)
            .map_err(|e| match e.downcast::<HostessError>() {
                Ok(err) => err,
                Err(e) => HostessError::Privilege {
                    target: self.path.clone(),
                    message: format!("{e:#}"),
                },
            })?;

        self.dirty = false;
        info!(
            path = %self.path.display(),
            entries = self.document.entries.len(),
            "committed hosts file"
        );
        Ok(())
    }

    /// Restore the file as it was at the start of this session.
    pub fn revert_session(&mut self) -> Result<()> {
        Err(HostessError::Unsupported {
            operation: "revert to session start",
        })
    }

    /// Restore the file as it was before hostess first touched it.
    pub fn revert_original(&mut self) -> Result<()> {
        Err(HostessError::Unsupported {
            operation: "revert to pre-hostess hosts file",
        })
    }
}
