//! Named snapshots of the managed entry list, stored as one JSON document.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::entry::{self, Entry};
use crate::error::{HostessError, Result};

/// Profile name -> entries, as stored in profiles.json.
pub type ProfileDocument = BTreeMap<String, Vec<Entry>>;

/// Reads and rewrites the profile document at a fixed path.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    path: PathBuf,
}

impl ProfileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the document as `{}` when it is missing or empty.
    pub fn ensure_exists(&self) -> Result<()> {
        if self.read_raw()?.trim().is_empty() {
            self.write_document(&ProfileDocument::new())?;
        }
        Ok(())
    }

    /// Profile names, sorted.
    pub fn list_profiles(&self) -> Result<Vec<String>> {
        Ok(self.read_document()?.into_keys().collect())
    }

    /// Store `entries` under `name`, overwriting any profile with that name.
    pub fn save_profile(&self, name: &str, entries: &[Entry]) -> Result<()> {
        let mut doc = self.read_document()?;
        let replaced = doc.insert(name.to_string(), entries.to_vec()).is_some();
        self.write_document(&doc)?;
        info!(profile = name, entries = entries.len(), replaced, "saved profile");
        Ok(())
    }

    /// Entries saved under `name`, with their active flags.
    pub fn load_profile(&self, name: &str) -> Result<Vec<Entry>> {
        let mut doc = self.read_document()?;
        let entries = doc.remove(name).ok_or_else(|| HostessError::KeyNotFound {
            name: name.to_string(),
        })?;
        for e in &entries {
            entry::validate_target(&e.target)?;
        }
        debug!(profile = name, entries = entries.len(), "loaded profile");
        Ok(entries)
    }

    /// Whole document; a missing or blank file reads as empty.
    pub fn read_document(&self) -> Result<ProfileDocument> {
        let raw = self.read_raw()?;
        if raw.trim().is_empty() {
            return Ok(ProfileDocument::new());
        }
        serde_json::from_str(&raw).map_err(|source| HostessError::Json {
            path: self.path.clone(),
            source,
        })
    }

    fn read_raw(&self) -> Result<String> {
        match std::fs::read_to_string(&self.path) {
            Ok(s) => Ok(s),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(String::new()),
            Err(e) => Err(HostessError::io("read profiles", &self.path, e)),
        }
    }

    /// Write via a sibling temp file and rename, so readers never see a partial document.
    fn write_document(&self, doc: &ProfileDocument) -> Result<()> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir)
            .map_err(|e| HostessError::io("create profiles directory", &dir, e))?;

        let s = serde_json::to_string_pretty(doc).map_err(|source| HostessError::Json {
            path: self.path.clone(),
            source,
        })?;
        let mut file = tempfile::NamedTempFile::new_in(&dir)
            .map_err(|e| HostessError::io("create temp profiles", &dir, e))?;
        file.write_all(s.as_bytes())
            .and_then(|()| file.as_file().sync_all())
            .map_err(|e| HostessError::io("write temp profiles", &self.path, e))?;
        file.persist(&self.path)
            .map_err(|e| HostessError::io("replace profiles", &self.path, e.error))?;
        Ok(())
    }
}
