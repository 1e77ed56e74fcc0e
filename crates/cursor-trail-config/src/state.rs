/// Serializable cursor and scroll snapshots.
///
/// Field names follow the on-disk database format (camelCase keys, `line`/`ch`
/// points), which editor integrations read directly.
use serde::{Deserialize, Serialize};

/// A caret location: 0-indexed line and char offset within the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CursorPoint {
    pub line: usize,
    pub ch: usize,
}

impl CursorPoint {
    pub fn new(line: usize, ch: usize) -> Self {
        Self { line, ch }
    }
}

/// A selection. `from` is the anchor and `to` is the head (where the caret sits).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EditorRange {
    pub from: CursorPoint,
    pub to: CursorPoint,
}

impl EditorRange {
    /// A collapsed selection at `point`.
    pub fn caret(point: CursorPoint) -> Self {
        Self {
            from: point,
            to: point,
        }
    }
}

/// Scroll offsets of an editor viewport, in host units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScrollState {
    pub top: f64,
    pub left: f64,
}

impl ScrollState {
    pub fn is_finite(&self) -> bool {
        self.top.is_finite() && self.left.is_finite()
    }
}

/// Last known cursor state of one file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CursorState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<EditorRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scroll_state: Option<ScrollState>,
}

impl CursorState {
    /// Whether the state carries usable scroll offsets.
    pub fn is_restorable(&self) -> bool {
        self.scroll_state.is_some_and(|s| s.is_finite())
    }

    /// Compares two states the way the position poller does.
    ///
    /// Two states without a cursor are the same regardless of scrolling.
    /// Otherwise anchor, head and scroll offsets must all match.
    pub fn same_position(&self, other: Option<&CursorState>) -> bool {
        let other_cursor = other.and_then(|o| o.cursor);
        match (self.cursor, other_cursor) {
            (None, None) => return true,
            (Some(a), Some(b)) if a == b => {}
            _ => return false,
        }
        self.scroll_state == other.and_then(|o| o.scroll_state)
    }
}
