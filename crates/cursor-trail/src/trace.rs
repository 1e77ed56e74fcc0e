/// Editor event traces: one JSON object per line, tagged by `"event"`.
///
/// ```text
/// # comments and blank lines are skipped
/// {"event": "open", "document": "notes/a.md", "line_count": 300}
/// {"event": "cursor", "line": 120, "ch": 4}
/// {"event": "back"}
/// ```
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use cursor_trail_config::CursorPoint;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TraceEvent {
    /// The user opens a document. `link` means it was opened through a link
    /// whose target the host highlighted.
    Open {
        document: String,
        #[serde(default)]
        line_count: Option<usize>,
        #[serde(default)]
        link: bool,
    },
    /// The caret moves; `anchor` makes it a selection.
    Cursor {
        line: usize,
        ch: usize,
        #[serde(default)]
        anchor: Option<CursorPoint>,
    },
    Scroll {
        top: f64,
        #[serde(default)]
        left: f64,
    },
    /// Idle time.
    Wait { ms: u64 },
    Back,
    Forward,
    Rename { from: String, to: String },
    Delete { document: String },
    Settings { max_history_length: usize },
    Save,
}

/// Parses a trace, reporting the offending line number on failure.
pub fn parse_trace(text: &str) -> Result<Vec<TraceEvent>> {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(number, line)| {
            serde_json::from_str(line).with_context(|| format!("Invalid event on line {number}"))
        })
        .collect()
}

pub fn read_trace(path: &Path) -> Result<Vec<TraceEvent>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read trace: {}", path.display()))?;
    parse_trace(&text).with_context(|| format!("Failed to parse trace: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_event_kinds() {
        let text = r#"
# session start
{"event": "open", "document": "a.md", "line_count": 120}
{"event": "open", "document": "b.md", "link": true}
{"event": "cursor", "line": 3, "ch": 1}
{"event": "cursor", "line": 4, "ch": 0, "anchor": {"line": 2, "ch": 5}}
{"event": "scroll", "top": 400.5}
{"event": "wait", "ms": 61000}
{"event": "back"}
{"event": "forward"}
{"event": "rename", "from": "a.md", "to": "z.md"}
{"event": "delete", "document": "b.md"}
{"event": "settings", "max_history_length": 150}
{"event": "save"}
"#;
        let events = parse_trace(text).expect("valid trace");
        assert_eq!(events.len(), 12);
        assert_eq!(
            events[0],
            TraceEvent::Open {
                document: "a.md".into(),
                line_count: Some(120),
                link: false
            }
        );
        assert_eq!(
            events[3],
            TraceEvent::Cursor {
                line: 4,
                ch: 0,
                anchor: Some(CursorPoint::new(2, 5))
            }
        );
        assert_eq!(events[4], TraceEvent::Scroll { top: 400.5, left: 0.0 });
        assert_eq!(events[6], TraceEvent::Back);
        assert_eq!(events[11], TraceEvent::Save);
    }

    #[test]
    fn test_parse_error_names_line() {
        let text = "{\"event\": \"back\"}\n\n{\"event\": \"teleport\"}\n";
        let err = parse_trace(text).expect_err("unknown event");
        assert!(format!("{err:#}").contains("line 3"));
    }

    #[test]
    fn test_empty_trace() {
        assert!(parse_trace("# nothing\n\n").expect("empty").is_empty());
    }

    #[test]
    fn test_read_trace_from_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("trace.jsonl");
        std::fs::write(&path, "{\"event\": \"forward\"}\n").expect("write");
        assert_eq!(read_trace(&path).expect("read"), vec![TraceEvent::Forward]);
    }

    #[test]
    fn test_read_missing_trace_fails() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(read_trace(&dir.path().join("missing.jsonl")).is_err());
    }
}
