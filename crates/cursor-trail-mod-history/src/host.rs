/// Seams to the editing host.
///
/// The history engine never talks to a concrete editor. Hosts implement
/// `EditorSurface` for whatever shows the active document and `Workspace` for
/// switching documents.
use async_trait::async_trait;

use cursor_trail_config::{CursorPoint, EditorRange, ScrollState};

use crate::position::DocumentId;

/// Result of an optional introspection query.
#[derive(Debug)]
pub enum Introspection<T> {
    /// The host answered.
    Available(T),
    /// The host has no way to answer this query.
    Unavailable,
    /// The host tried and failed.
    Failed(anyhow::Error),
}

impl<T> Introspection<T> {
    /// Maps the answer, keeping `Unavailable` and `Failed` as they are.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Introspection<U> {
        match self {
            Introspection::Available(value) => Introspection::Available(f(value)),
            Introspection::Unavailable => Introspection::Unavailable,
            Introspection::Failed(e) => Introspection::Failed(e),
        }
    }
}

/// Character offsets currently on screen, inclusive at both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleRange {
    pub from: usize,
    pub to: usize,
}

impl VisibleRange {
    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.from && offset <= self.to
    }

    pub fn is_well_formed(&self) -> bool {
        self.from <= self.to
    }
}

/// The editor showing the active document.
pub trait EditorSurface {
    /// Current selection, if the editor has one.
    fn selection(&self) -> Option<EditorRange>;

    /// Current scroll offsets.
    fn scroll_state(&self) -> Option<ScrollState>;

    fn set_selection(&mut self, anchor: CursorPoint, head: CursorPoint);

    /// Scrolls `range` into view, centering it or scrolling as little as possible.
    fn scroll_into_view(&mut self, range: EditorRange, center: bool);

    fn scroll_to(&mut self, scroll: ScrollState);

    /// Absolute character range currently rendered in the viewport.
    fn visible_char_range(&self) -> Introspection<VisibleRange> {
        Introspection::Unavailable
    }

    /// Absolute character offset at which `line` starts.
    fn line_start_offset(&self, _line: usize) -> Introspection<usize> {
        Introspection::Unavailable
    }
}

/// The window that hosts editors and can switch between documents.
#[async_trait(?Send)]
pub trait Workspace {
    type Editor: EditorSurface;

    /// The document currently shown, if any.
    fn active_document(&self) -> Option<DocumentId>;

    /// Makes `document` the active one. Completes once its editor exists.
    ///
    /// # Errors
    ///
    /// Fails when the document can't be opened (e.g. it was deleted).
    async fn open_document(&mut self, document: &DocumentId) -> anyhow::Result<()>;

    /// The editor of the active document, or `None` when nothing is open.
    fn active_editor(&mut self) -> Option<&mut Self::Editor>;

    /// Current time in epoch milliseconds. Navigation stamps the position it
    /// leaves with it.
    fn now_ms(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}
