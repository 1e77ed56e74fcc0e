/// Per-file cursor database: remembers where the user left each file.
///
/// Stored as one compact JSON object keyed by file path. A snapshot of the last
/// written contents lets periodic saves skip the write when nothing changed.
use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};

use crate::state::CursorState;

/// In-memory view of the database file.
#[derive(Debug, Clone, Default)]
pub struct PositionDatabase {
    entries: BTreeMap<String, CursorState>,
    last_saved: BTreeMap<String, CursorState>,
}

impl PositionDatabase {
    /// Creates an empty database.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the database at `path`. A missing file yields an empty database.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but can't be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read position database: {}", path.display()))?;
        let entries: BTreeMap<String, CursorState> = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse position database: {}", path.display()))?;
        Ok(Self {
            last_saved: entries.clone(),
            entries,
        })
    }

    /// Like [`load`](Self::load), but starts empty when the file is unusable.
    pub fn load_or_empty(path: &Path) -> Self {
        match Self::load(path) {
            Ok(db) => db,
            Err(e) => {
                tracing::error!("Can't read position database: {e:#}");
                Self::new()
            }
        }
    }

    pub fn get(&self, file: &str) -> Option<&CursorState> {
        self.entries.get(file)
    }

    pub fn insert(&mut self, file: impl Into<String>, state: CursorState) {
        self.entries.insert(file.into(), state);
    }

    /// Forgets a deleted file.
    pub fn remove(&mut self, file: &str) -> Option<CursorState> {
        self.entries.remove(file)
    }

    /// Moves the entry of a renamed file.
    ///
    /// When `old` has no entry, whatever was stored under `new` is dropped:
    /// the file now living at `new` has no remembered position.
    pub fn rename(&mut self, old: &str, new: &str) {
        match self.entries.remove(old) {
            Some(state) => {
                self.entries.insert(new.to_string(), state);
            }
            None => {
                self.entries.remove(new);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn files(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Whether the contents differ from what was last written.
    pub fn is_dirty(&self) -> bool {
        self.entries != self.last_saved
    }

    /// Writes the database to `path` if it changed since the last write.
    ///
    /// Creates the parent directory when missing. Returns whether a write happened.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file can't be written.
    pub fn save_if_changed(&mut self, path: &Path) -> Result<bool> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create database directory: {}", parent.display())
            })?;
        }
        if !self.is_dirty() {
            return Ok(false);
        }

        let json =
            serde_json::to_string(&self.entries).context("Failed to serialize position database")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write position database: {}", path.display()))?;
        self.last_saved = self.entries.clone();
        tracing::debug!("Saved {} cursor positions to {}", self.len(), path.display());
        Ok(true)
    }
}
