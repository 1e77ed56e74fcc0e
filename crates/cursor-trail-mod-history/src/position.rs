/// Core types for recorded positions.
use std::fmt;

use serde::{Deserialize, Serialize};

use cursor_trail_config::CursorPoint;

/// Identifies a document, usually by its path inside the workspace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for DocumentId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A position the user visited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoricPosition {
    pub document: DocumentId,
    /// 0-indexed line number.
    pub line: usize,
    /// 0-indexed char offset within the line.
    pub column: usize,
    /// Last time the user was seen here, in epoch milliseconds.
    pub timestamp_ms: i64,
}

impl HistoricPosition {
    pub fn new(
        document: impl Into<DocumentId>,
        line: usize,
        column: usize,
        timestamp_ms: i64,
    ) -> Self {
        Self {
            document: document.into(),
            line,
            column,
            timestamp_ms,
        }
    }

    /// Whether `other` is a different place worth recording.
    ///
    /// The column is ignored: it changes on nearly every keystroke.
    pub fn is_spatially_different(&self, other: &HistoricPosition) -> bool {
        self.document != other.document || self.line != other.line
    }

    pub fn point(&self) -> CursorPoint {
        CursorPoint::new(self.line, self.column)
    }
}
