/// Session orchestration: remembers where each file was left and feeds the
/// navigation history.
///
/// The host calls `poll` every `CURSOR_POSITION_UPDATE_INTERVAL_MS`, `restore`
/// whenever a file opens, and `run_command` for the two navigation shortcuts.
use std::path::Path;
use std::time::Duration;

use anyhow::Result;

use cursor_trail_config::{CursorState, PositionDatabase, SharedConfig};
use cursor_trail_mod_history::{
    DocumentId, HistoricPosition, Jump, NavigationCommand, NavigationHistory,
};

use crate::capture::{apply_state, capture_state};
use crate::host::{SessionHost, ViewRef};

/// Extra pause before applying a stored state, after the configured delay.
const SETTLE_DELAY: Duration = Duration::from_millis(10);

/// Tracks cursor positions for one editing session.
pub struct CursorTracker {
    config: SharedConfig,
    database: PositionDatabase,
    history: NavigationHistory<SharedConfig>,
    /// Last state seen by `poll` (or restored). `None` until seeded.
    latest_state: Option<CursorState>,
    /// File whose positions `poll` records.
    last_loaded_file: Option<DocumentId>,
    /// Identifiers of views that were open at the last restore.
    loaded_views: Vec<String>,
    /// Epoch milliseconds of the last periodic save.
    last_save_ms: Option<i64>,
}

impl std::fmt::Debug for CursorTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CursorTracker")
            .field("files", &self.database.len())
            .field("history", &self.history)
            .field("last_loaded_file", &self.last_loaded_file)
            .finish()
    }
}

impl CursorTracker {
    pub fn new(config: SharedConfig, database: PositionDatabase) -> Self {
        let history = NavigationHistory::new(SharedConfig::clone(&config));
        Self {
            config,
            database,
            history,
            latest_state: None,
            last_loaded_file: None,
            loaded_views: Vec::new(),
            last_save_ms: None,
        }
    }

    pub fn history(&self) -> &NavigationHistory<SharedConfig> {
        &self.history
    }

    pub fn database(&self) -> &PositionDatabase {
        &self.database
    }

    pub fn config(&self) -> &SharedConfig {
        &self.config
    }

    pub fn last_loaded_file(&self) -> Option<&DocumentId> {
        self.last_loaded_file.as_ref()
    }

    /// Records the active editor's state if it changed since the last poll.
    ///
    /// Only the file that finished loading is recorded; polls during a file
    /// switch are ignored. Returns whether a new state was recorded.
    pub fn poll<H: SessionHost + ?Sized>(&mut self, host: &mut H) -> bool {
        let Some(file) = host.active_document() else {
            return false;
        };
        if self.last_loaded_file.as_ref() != Some(&file) {
            return false;
        }

        let now_ms = host.now_ms();
        let state = capture_state(host.active_editor().as_deref());
        let latest = self.latest_state.get_or_insert_with(|| state.clone());

        if !state.is_restorable() || state.same_position(Some(&*latest)) {
            return false;
        }

        if let Some(cursor) = state.cursor {
            self.history.update_current_position(HistoricPosition::new(
                file.clone(),
                cursor.to.line,
                cursor.to.ch,
                now_ms,
            ));
        }
        self.database.insert(file.as_str(), state.clone());
        self.latest_state = Some(state);
        true
    }

    /// Applies the stored state of the file that just opened.
    ///
    /// Skipped when the active view was already open at the last restore:
    /// that view kept its own position. Skipped as well when the host
    /// highlighted a link target while the file was settling. Returns whether
    /// a stored state was applied.
    pub async fn restore<H: SessionHost + ?Sized>(&mut self, host: &mut H) -> bool {
        let Some(file) = host.active_document() else {
            return false;
        };

        if self.is_active_view_loaded(host) {
            if self.last_loaded_file.as_ref() != Some(&file) {
                tracing::debug!("{file} already open in this view; tracking without restore");
                self.track_without_restore(file);
            }
            return false;
        }

        self.remember_open_views(host);

        if self.last_loaded_file.as_ref() == Some(&file) {
            return false;
        }

        self.last_loaded_file = Some(file.clone());

        let stored = self.database.get(file.as_str()).cloned();
        let mut restored = false;
        if let Some(state) = &stored {
            let delay = Duration::from_millis(self.config.borrow().delay_after_file_opening_ms);
            host.wait(delay).await;

            if host.link_target_highlighted() {
                tracing::debug!("Link target highlighted in {file}; not restoring");
            } else {
                host.wait(SETTLE_DELAY).await;
                if let Some(editor) = host.active_editor() {
                    apply_state(editor, state);
                    restored = true;
                    tracing::debug!("Restored cursor state of {file}");
                }
            }
        }
        self.latest_state = stored;
        restored
    }

    /// Starts recording `file` from whatever state its editor is in.
    fn track_without_restore(&mut self, file: DocumentId) {
        self.last_loaded_file = Some(file);
        self.latest_state = None;
    }

    fn remember_open_views<H: SessionHost + ?Sized>(&mut self, host: &H) {
        self.loaded_views = host
            .open_views()
            .iter()
            .filter_map(ViewRef::identifier)
            .collect();
    }

    fn is_active_view_loaded<H: SessionHost + ?Sized>(&self, host: &H) -> bool {
        host.most_recent_view()
            .and_then(|view| view.identifier())
            .is_some_and(|id| self.loaded_views.contains(&id))
    }

    /// Follows a file rename in the database and the history.
    pub fn rename_file(&mut self, old: &str, new: &str) {
        self.database.rename(old, new);
        let (old_id, new_id) = (DocumentId::from(old), DocumentId::from(new));
        self.history.rename_document(&old_id, &new_id);
        if self.last_loaded_file.as_ref() == Some(&old_id) {
            self.last_loaded_file = Some(new_id);
        }
    }

    /// Forgets the stored state of a deleted file.
    ///
    /// History entries stay; jumping to one reports the host's open error.
    pub fn delete_file(&mut self, file: &str) {
        self.database.remove(file);
    }

    /// Runs a navigation shortcut.
    ///
    /// # Errors
    ///
    /// Returns the host's error when the target document can't be opened.
    pub async fn run_command<H: SessionHost + ?Sized>(
        &mut self,
        command: NavigationCommand,
        host: &mut H,
    ) -> Result<()> {
        self.navigate(command, host).await.map(|_| ())
    }

    /// Like [`run_command`](Self::run_command), reporting the jump taken.
    ///
    /// A jump into another document adopts it directly: the history already
    /// placed the cursor, so the file's stored state is not restored on top.
    pub async fn navigate<H: SessionHost + ?Sized>(
        &mut self,
        command: NavigationCommand,
        host: &mut H,
    ) -> Result<Option<Jump>> {
        let jump = match command {
            NavigationCommand::Back => self.history.go_back(host).await?,
            NavigationCommand::Forward => self.history.go_forward(host).await?,
        };
        if let Some(jump) = jump.as_ref().filter(|j| j.switched_document) {
            self.remember_open_views(host);
            self.track_without_restore(jump.target.document.clone());
        }
        match &jump {
            Some(jump) => tracing::debug!(
                "{command}: {}:{} (centered: {})",
                jump.target.document,
                jump.target.line,
                jump.centered
            ),
            None => tracing::trace!("{command}: nothing to do"),
        }
        Ok(jump)
    }

    /// Writes the database to `path` if it changed.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn save(&mut self, path: &Path) -> Result<bool> {
        self.database.save_if_changed(path)
    }

    /// Saves when `save_timeout_ms` has passed since the last periodic save.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn save_if_due(&mut self, now_ms: i64, path: &Path) -> Result<bool> {
        let interval = self.save_interval().as_millis() as i64;
        let last = *self.last_save_ms.get_or_insert(now_ms);
        if now_ms.saturating_sub(last) < interval {
            return Ok(false);
        }
        self.last_save_ms = Some(now_ms);
        self.save(path)
    }

    pub fn save_interval(&self) -> Duration {
        Duration::from_millis(self.config.borrow().save_timeout_ms)
    }
}
