/// Drives a `CursorTracker` through a trace the way an editor host would.
use std::fmt;
use std::path::PathBuf;

use anyhow::Result;
use pollster::block_on;
use serde::Serialize;

use cursor_trail_config::config::CURSOR_POSITION_UPDATE_INTERVAL_MS;
use cursor_trail_config::{
    shared, CursorPoint, EditorRange, PositionDatabase, ScrollState, TrailConfig,
};
use cursor_trail_core::CursorTracker;
use cursor_trail_mod_history::{EditorSurface, HistoricPosition, NavigationCommand, Workspace};

use crate::sim::SimWorkspace;
use crate::trace::TraceEvent;

/// Replay clock start: 2024-01-01T00:00:00Z.
const START_MS: i64 = 1_704_067_200_000;

/// State of the session after a replay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub events: usize,
    pub current: Option<HistoricPosition>,
    pub back: Vec<HistoricPosition>,
    pub forward: Vec<HistoricPosition>,
    pub files: usize,
    pub navigation_errors: usize,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn write_stack(
            f: &mut fmt::Formatter<'_>,
            name: &str,
            stack: &[HistoricPosition],
        ) -> fmt::Result {
            writeln!(f, "{name} ({}):", stack.len())?;
            for p in stack.iter().rev() {
                writeln!(f, "  {}:{}:{}", p.document, p.line, p.column)?;
            }
            Ok(())
        }

        writeln!(f, "Replayed {} events", self.events)?;
        match &self.current {
            Some(p) => writeln!(f, "current: {}:{}:{}", p.document, p.line, p.column)?,
            None => writeln!(f, "current: none")?,
        }
        write_stack(f, "back", &self.back)?;
        write_stack(f, "forward", &self.forward)?;
        writeln!(f, "remembered files: {}", self.files)?;
        write!(f, "navigation errors: {}", self.navigation_errors)
    }
}

/// One replay session.
pub struct Replay {
    tracker: CursorTracker,
    workspace: SimWorkspace,
    database_path: PathBuf,
    events: usize,
    navigation_errors: usize,
}

impl Replay {
    /// Loads the database at `database_path`, starting empty when it is unusable.
    pub fn new(config: TrailConfig, database_path: PathBuf) -> Self {
        let database = PositionDatabase::load_or_empty(&database_path);
        tracing::info!(
            "Loaded {} cursor positions from {}",
            database.len(),
            database_path.display()
        );
        Self {
            tracker: CursorTracker::new(shared(config), database),
            workspace: SimWorkspace::new(START_MS),
            database_path,
            events: 0,
            navigation_errors: 0,
        }
    }

    #[cfg(test)]
    pub fn workspace(&self) -> &SimWorkspace {
        &self.workspace
    }

    /// Applies one event, then runs the periodic save.
    ///
    /// # Errors
    ///
    /// Returns an error only when an explicit `save` event fails to write.
    pub fn apply(&mut self, event: &TraceEvent) -> Result<()> {
        self.events += 1;
        match event {
            TraceEvent::Open {
                document,
                line_count,
                link,
            } => {
                self.workspace.show(document, *line_count);
                self.workspace.set_link_highlighted(*link);
                block_on(self.tracker.restore(&mut self.workspace));
                self.workspace.set_link_highlighted(false);
                self.tick();
            }
            TraceEvent::Cursor { line, ch, anchor } => {
                let head = CursorPoint::new(*line, *ch);
                if let Some(editor) = self.workspace.active_editor() {
                    editor.set_selection(anchor.unwrap_or(head), head);
                    editor.scroll_into_view(EditorRange::caret(head), false);
                } else {
                    tracing::warn!("Cursor event without an open document");
                }
                self.tick();
            }
            TraceEvent::Scroll { top, left } => {
                if let Some(editor) = self.workspace.active_editor() {
                    editor.scroll_to(ScrollState {
                        top: *top,
                        left: *left,
                    });
                }
                self.tick();
            }
            TraceEvent::Wait { ms } => self.workspace.advance(*ms),
            TraceEvent::Back => self.navigate(NavigationCommand::Back),
            TraceEvent::Forward => self.navigate(NavigationCommand::Forward),
            TraceEvent::Rename { from, to } => {
                self.workspace.rename(from, to);
                self.tracker.rename_file(from, to);
            }
            TraceEvent::Delete { document } => {
                self.workspace.delete(document);
                self.tracker.delete_file(document);
            }
            TraceEvent::Settings { max_history_length } => {
                let mut config = self.tracker.config().borrow_mut();
                config.max_history_length = *max_history_length;
                config.sanitize();
                tracing::info!("History length set to {}", config.max_history_length);
            }
            TraceEvent::Save => {
                self.tracker.save(&self.database_path)?;
            }
        }

        let now_ms = self.workspace.now_ms();
        if let Err(e) = self.tracker.save_if_due(now_ms, &self.database_path) {
            tracing::error!("Periodic save failed: {e:#}");
        }
        Ok(())
    }

    /// Lets one poll interval pass and polls.
    fn tick(&mut self) {
        self.workspace.advance(CURSOR_POSITION_UPDATE_INTERVAL_MS);
        self.tracker.poll(&mut self.workspace);
    }

    fn navigate(&mut self, command: NavigationCommand) {
        match block_on(self.tracker.navigate(command, &mut self.workspace)) {
            Ok(Some(jump)) => tracing::info!(
                "{}: {}:{}{}",
                command.name(),
                jump.target.document,
                jump.target.line,
                if jump.centered { " (centered)" } else { "" }
            ),
            Ok(None) => tracing::info!("{}: nothing to do", command.name()),
            Err(e) => {
                self.navigation_errors += 1;
                tracing::error!("{} failed: {e:#}", command.name());
            }
        }
        self.tick();
    }

    /// Saves the database and reports the final state.
    ///
    /// # Errors
    ///
    /// Returns an error if the database can't be written.
    pub fn finish(mut self) -> Result<Summary> {
        if self.tracker.save(&self.database_path)? {
            tracing::info!("Saved cursor positions to {}", self.database_path.display());
        }
        let history = self.tracker.history();
        Ok(Summary {
            events: self.events,
            current: history.current().cloned(),
            back: history.back_stack().to_vec(),
            forward: history.forward_stack().to_vec(),
            files: self.tracker.database().len(),
            navigation_errors: self.navigation_errors,
        })
    }
}

/// Replays `events` and saves the database at the end.
///
/// # Errors
///
/// Returns an error if the database can't be written.
pub fn run(config: TrailConfig, database_path: PathBuf, events: &[TraceEvent]) -> Result<Summary> {
    let mut replay = Replay::new(config, database_path);
    for event in events {
        replay.apply(event)?;
    }
    replay.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::parse_trace;

    fn replay(trace: &str) -> (Summary, tempfile::TempDir) {
        let dir = tempfile::tempdir().expect("tempdir");
        let events = parse_trace(trace).expect("valid trace");
        let summary = run(
            TrailConfig::default(),
            dir.path().join("positions.json"),
            &events,
        )
        .expect("replay");
        (summary, dir)
    }

    fn at(p: &HistoricPosition) -> (&str, usize) {
        (p.document.as_str(), p.line)
    }

    #[test]
    fn test_two_document_walk() {
        let (summary, _dir) = replay(
            r#"
{"event": "open", "document": "a.md"}
{"event": "cursor", "line": 5, "ch": 0}
{"event": "open", "document": "b.md"}
{"event": "cursor", "line": 1, "ch": 0}
{"event": "back"}
"#,
        );
        assert_eq!(summary.events, 5);
        assert_eq!(summary.current.as_ref().map(at), Some(("a.md", 5)));
        assert!(summary.back.is_empty());
        assert_eq!(summary.forward.iter().map(at).collect::<Vec<_>>(), vec![("b.md", 1)]);
        assert_eq!(summary.files, 2);
        assert_eq!(summary.navigation_errors, 0);
    }

    #[test]
    fn test_forward_survives_quick_edit_but_not_idle() {
        let (summary, _dir) = replay(
            r#"
{"event": "open", "document": "a.md"}
{"event": "cursor", "line": 10, "ch": 0}
{"event": "cursor", "line": 200, "ch": 0}
{"event": "back"}
{"event": "cursor", "line": 12, "ch": 0}
"#,
        );
        assert_eq!(summary.forward.len(), 1);

        let (summary, _dir) = replay(
            r#"
{"event": "open", "document": "a.md"}
{"event": "cursor", "line": 10, "ch": 0}
{"event": "cursor", "line": 200, "ch": 0}
{"event": "back"}
{"event": "wait", "ms": 61000}
{"event": "cursor", "line": 12, "ch": 0}
"#,
        );
        assert!(summary.forward.is_empty());
    }

    #[test]
    fn test_back_to_deleted_document_is_reported() {
        let (summary, _dir) = replay(
            r#"
{"event": "open", "document": "a.md"}
{"event": "cursor", "line": 5, "ch": 0}
{"event": "open", "document": "b.md"}
{"event": "cursor", "line": 1, "ch": 0}
{"event": "delete", "document": "a.md"}
{"event": "back"}
"#,
        );
        assert_eq!(summary.navigation_errors, 1);
        assert_eq!(summary.current.as_ref().map(at), Some(("a.md", 5)));
        assert_eq!(summary.files, 1);
    }

    #[test]
    fn test_rename_follows_history() {
        let (summary, _dir) = replay(
            r#"
{"event": "open", "document": "a.md"}
{"event": "cursor", "line": 5, "ch": 0}
{"event": "open", "document": "b.md"}
{"event": "cursor", "line": 1, "ch": 0}
{"event": "rename", "from": "a.md", "to": "archive/a.md"}
{"event": "back"}
"#,
        );
        assert_eq!(summary.navigation_errors, 0);
        assert_eq!(summary.current.as_ref().map(at), Some(("archive/a.md", 5)));
    }

    #[test]
    fn test_settings_are_clamped() {
        let mut lines = String::from(
            "{\"event\": \"open\", \"document\": \"a.md\", \"line_count\": 1000}\n\
             {\"event\": \"settings\", \"max_history_length\": 3}\n",
        );
        for line in 1..=150 {
            lines.push_str(&format!("{{\"event\": \"cursor\", \"line\": {line}, \"ch\": 0}}\n"));
        }
        let (summary, _dir) = replay(&lines);
        assert_eq!(summary.back.len(), 100);
    }

    #[test]
    fn test_positions_persist_between_runs() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("positions.json");
        let first = parse_trace(
            r#"
{"event": "open", "document": "a.md"}
{"event": "cursor", "line": 77, "ch": 3}
"#,
        )
        .expect("trace");
        run(TrailConfig::default(), path.clone(), &first).expect("first run");
        assert!(path.exists());

        let mut replay = Replay::new(TrailConfig::default(), path);
        replay
            .apply(&TraceEvent::Open {
                document: "a.md".into(),
                line_count: None,
                link: false,
            })
            .expect("open");
        let editor = replay.workspace().editor("a.md").expect("editor");
        assert_eq!(
            editor.selection().map(|s| s.to),
            Some(CursorPoint::new(77, 3))
        );
        assert!(editor.top_line() <= 77 && 77 <= editor.bottom_line());
    }

    #[test]
    fn test_link_open_keeps_highlighted_target() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("positions.json");
        let first = parse_trace(
            r#"
{"event": "open", "document": "a.md"}
{"event": "cursor", "line": 77, "ch": 3}
"#,
        )
        .expect("trace");
        run(TrailConfig::default(), path.clone(), &first).expect("first run");

        let mut replay = Replay::new(TrailConfig::default(), path);
        replay
            .apply(&TraceEvent::Open {
                document: "a.md".into(),
                line_count: None,
                link: true,
            })
            .expect("open");
        let editor = replay.workspace().editor("a.md").expect("editor");
        assert_eq!(editor.selection().map(|s| s.to.line), Some(0));
    }

    #[test]
    fn test_summary_text() {
        let (summary, _dir) = replay(
            r#"
{"event": "open", "document": "a.md"}
{"event": "cursor", "line": 5, "ch": 2}
{"event": "cursor", "line": 50, "ch": 0}
"#,
        );
        let text = summary.to_string();
        assert!(text.contains("current: a.md:50:0"));
        assert!(text.contains("back (1):\n  a.md:5:2"));
        assert!(text.contains("forward (0):"));
    }
}
