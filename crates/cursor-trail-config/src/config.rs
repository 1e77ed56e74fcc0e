/// Settings file: load, save and sanitize.
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Interval at which hosts are expected to poll the active editor.
pub const CURSOR_POSITION_UPDATE_INTERVAL_MS: u64 = 200;

pub const MIN_SAVE_TIMEOUT_MS: u64 = 5_000;
pub const MAX_SAVE_TIMEOUT_MS: u64 = MIN_SAVE_TIMEOUT_MS * 10;

pub const MAX_DELAY_AFTER_FILE_OPENING_MS: u64 = 300;

pub const DEFAULT_MAX_HISTORY_LENGTH: usize = 500;
pub const MIN_HISTORY_LENGTH: usize = 100;
pub const MAX_HISTORY_LENGTH: usize = 2_000;

const DEFAULT_DATABASE_FILE: &str = "cursor-position-history.json";

/// User settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrailConfig {
    /// Where the per-file cursor database is stored. Relative paths resolve
    /// against the data directory.
    pub database_file_path: String,
    /// Grace period after a file opens before its stored position is applied,
    /// so links that scroll to a heading win.
    pub delay_after_file_opening_ms: u64,
    /// Interval between periodic database writes.
    pub save_timeout_ms: u64,
    /// Bound on each navigation history stack.
    pub max_history_length: usize,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            database_file_path: DEFAULT_DATABASE_FILE.to_string(),
            delay_after_file_opening_ms: 100,
            save_timeout_ms: MIN_SAVE_TIMEOUT_MS,
            max_history_length: DEFAULT_MAX_HISTORY_LENGTH,
        }
    }
}

impl TrailConfig {
    /// Returns the config file path.
    ///
    /// Resolution order:
    /// 1. `CURSOR_TRAIL_CONFIG` environment variable
    /// 2. `<config dir>/cursor-trail/cursor-trail.json`
    /// 3. `cursor-trail.json` in the working directory
    pub fn config_path() -> PathBuf {
        if let Ok(path) = std::env::var("CURSOR_TRAIL_CONFIG") {
            return PathBuf::from(path);
        }
        dirs::config_dir()
            .map(|d| d.join("cursor-trail").join("cursor-trail.json"))
            .unwrap_or_else(|| PathBuf::from("cursor-trail.json"))
    }

    /// Loads config from `path`, creating a default file if it doesn't exist.
    /// Returns defaults on any error (missing file, parse error, etc.).
    pub fn load_or_create(path: &Path) -> Self {
        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(contents) => match serde_json::from_str::<TrailConfig>(&contents) {
                    Ok(mut config) => {
                        config.sanitize();
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {}: {e}", path.display());
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {}: {e}", path.display());
                }
            }
            // Don't overwrite a broken file
            Self::default()
        } else {
            let config = Self::default();
            if let Err(e) = config.save(path) {
                tracing::warn!("Failed to create default config at {}: {e}", path.display());
            }
            config
        }
    }

    /// Saves config to `path` as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }

    /// Resolves the database file against `data_dir` unless it is absolute.
    pub fn database_path(&self, data_dir: &Path) -> PathBuf {
        let path = Path::new(&self.database_file_path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            data_dir.join(path)
        }
    }

    /// Clamps values to valid ranges and resets invalid fields.
    pub fn sanitize(&mut self) {
        if self.database_file_path.trim().is_empty() {
            self.database_file_path = DEFAULT_DATABASE_FILE.to_string();
        }
        self.delay_after_file_opening_ms = self
            .delay_after_file_opening_ms
            .min(MAX_DELAY_AFTER_FILE_OPENING_MS);
        self.save_timeout_ms = self
            .save_timeout_ms
            .clamp(MIN_SAVE_TIMEOUT_MS, MAX_SAVE_TIMEOUT_MS);
        self.max_history_length = self
            .max_history_length
            .clamp(MIN_HISTORY_LENGTH, MAX_HISTORY_LENGTH);
    }
}

/// Resolves the data directory for relative database paths.
///
/// Resolution order:
/// 1. `CURSOR_TRAIL_DATA_DIR` environment variable
/// 2. `<data dir>/cursor-trail`
/// 3. the working directory
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("CURSOR_TRAIL_DATA_DIR") {
        return PathBuf::from(dir);
    }
    dirs::data_dir()
        .map(|d| d.join("cursor-trail"))
        .unwrap_or_else(|| PathBuf::from("."))
}
