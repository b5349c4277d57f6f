// fcl-mirror: FCL download mirror front end
//
// SPDX-FileCopyrightText: 2026 fcl-mirror contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! String key/value store persisted as a JSON object.
//!
//! ```text
//! LocalStore::open(path)   missing file -> empty store
//!   get / set / remove     in memory
//!   save()                 NamedTempFile in same dir -> persist (atomic rename)
//! ```

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::StorageError;

pub const THEME: &str = "theme";
pub const VISIT_COUNT: &str = "visitCount";
pub const SYS_INFO_PANEL_CLASS: &str = "xf_sysInfoPanelClass";
pub const ANNOUNCEMENT_CHECKSUM: &str = "xf_announcement_checksum";

/// Keys the site itself uses.
pub const KNOWN_KEYS: &[&str] = &[THEME, VISIT_COUNT, SYS_INFO_PANEL_CLASS, ANNOUNCEMENT_CHECKSUM];

#[derive(Debug, Clone)]
pub struct LocalStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl LocalStore {
    /// Load the store at `path`. A missing file is an empty store.
    ///
    /// # Errors
    ///
    /// `Read` if the file exists but cannot be read, `Corrupt` if it is not
    /// a JSON object of strings.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => BTreeMap::new(),
            Ok(text) => serde_json::from_str(&text).map_err(|e| StorageError::Corrupt {
                path: path.display().to_string(),
                message: e.to_string(),
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => {
                return Err(StorageError::Read {
                    path: path.display().to_string(),
                    source,
                });
            }
        };
        debug!(path = %path.display(), keys = entries.len(), "opened local store");
        Ok(Self { path, entries })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.remove(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Increment `visitCount`, treating a missing or garbled value as 0.
    pub fn bump_visit_count(&mut self) -> u64 {
        let count = self
            .get(VISIT_COUNT)
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(0)
            + 1;
        self.set(VISIT_COUNT, count.to_string());
        count
    }

    /// Write the store atomically.
    ///
    /// # Errors
    ///
    /// `Write` if the temporary file cannot be created, written or renamed.
    pub fn save(&self) -> Result<(), StorageError> {
        let write_err = |source: std::io::Error| StorageError::Write {
            path: self.path.display().to_string(),
            source,
        };
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir).map_err(write_err)?;

        let json = serde_json::to_string_pretty(&self.entries)
            .map_err(|e| write_err(std::io::Error::other(e)))?;
        let mut file = NamedTempFile::new_in(&dir).map_err(write_err)?;
        file.write_all(json.as_bytes()).map_err(write_err)?;
        file.persist(&self.path).map_err(|e| write_err(e.error))?;
        debug!(path = %self.path.display(), "saved local store");
        Ok(())
    }
}
