/// Simulated editing host used to replay traces.
///
/// Every document is a run of fixed-width lines shown in a single view with a
/// line-based viewport, which is enough to answer the visible-range queries
/// the centering heuristic asks for.
use std::collections::BTreeMap;
use std::time::Duration;

use anyhow::anyhow;
use async_trait::async_trait;

use cursor_trail_config::{CursorPoint, EditorRange, ScrollState};
use cursor_trail_core::{SessionHost, ViewRef};
use cursor_trail_mod_history::{
    DocumentId, EditorSurface, Introspection, VisibleRange, Workspace,
};

pub const DEFAULT_LINE_COUNT: usize = 500;
/// Characters per line, newline included.
pub const LINE_WIDTH: usize = 40;
pub const LINE_HEIGHT: f64 = 20.0;
pub const VIEWPORT_LINES: usize = 30;

const VIEW_ID: &str = "main";

/// Editor of one simulated document.
#[derive(Debug, Clone)]
pub struct SimEditor {
    line_count: usize,
    selection: Option<EditorRange>,
    scroll: ScrollState,
}

impl SimEditor {
    pub fn new(line_count: usize) -> Self {
        Self {
            line_count: line_count.max(1),
            selection: Some(EditorRange::caret(CursorPoint::new(0, 0))),
            scroll: ScrollState::default(),
        }
    }

    /// First line in the viewport.
    pub fn top_line(&self) -> usize {
        (self.scroll.top.max(0.0) / LINE_HEIGHT) as usize
    }

    /// Last line in the viewport.
    pub fn bottom_line(&self) -> usize {
        (self.top_line() + VIEWPORT_LINES - 1).min(self.line_count - 1)
    }

    fn clamp(&self, point: CursorPoint) -> CursorPoint {
        CursorPoint::new(point.line.min(self.line_count - 1), point.ch.min(LINE_WIDTH - 1))
    }

    fn scroll_to_line(&mut self, top_line: usize) {
        let max_top = self.line_count.saturating_sub(VIEWPORT_LINES);
        self.scroll.top = top_line.min(max_top) as f64 * LINE_HEIGHT;
    }
}

impl EditorSurface for SimEditor {
    fn selection(&self) -> Option<EditorRange> {
        self.selection
    }

    fn scroll_state(&self) -> Option<ScrollState> {
        Some(self.scroll)
    }

    fn set_selection(&mut self, anchor: CursorPoint, head: CursorPoint) {
        self.selection = Some(EditorRange {
            from: self.clamp(anchor),
            to: self.clamp(head),
        });
    }

    fn scroll_into_view(&mut self, range: EditorRange, center: bool) {
        let line = range.to.line.min(self.line_count - 1);
        if center {
            self.scroll_to_line(line.saturating_sub(VIEWPORT_LINES / 2));
        } else if line < self.top_line() {
            self.scroll_to_line(line);
        } else if line > self.bottom_line() {
            self.scroll_to_line(line + 1 - VIEWPORT_LINES);
        }
    }

    fn scroll_to(&mut self, scroll: ScrollState) {
        self.scroll = scroll;
    }

    fn visible_char_range(&self) -> Introspection<VisibleRange> {
        Introspection::Available(VisibleRange {
            from: self.top_line() * LINE_WIDTH,
            to: (self.bottom_line() + 1) * LINE_WIDTH - 1,
        })
    }

    fn line_start_offset(&self, line: usize) -> Introspection<usize> {
        if line >= self.line_count {
            return Introspection::Failed(anyhow!(
                "line {line} is past the end of a {}-line document",
                self.line_count
            ));
        }
        Introspection::Available(line * LINE_WIDTH)
    }
}

/// Single-view workspace with a manual clock.
#[derive(Debug)]
pub struct SimWorkspace {
    documents: BTreeMap<DocumentId, SimEditor>,
    active: Option<DocumentId>,
    now_ms: i64,
    link_highlighted: bool,
}

impl SimWorkspace {
    pub fn new(start_ms: i64) -> Self {
        Self {
            documents: BTreeMap::new(),
            active: None,
            now_ms: start_ms,
            link_highlighted: false,
        }
    }

    /// Opens `document` the way a user would, creating it on first sight.
    pub fn show(&mut self, document: &str, line_count: Option<usize>) {
        let id = DocumentId::from(document);
        let editor = self
            .documents
            .entry(id.clone())
            .or_insert_with(|| SimEditor::new(line_count.unwrap_or(DEFAULT_LINE_COUNT)));
        if let Some(count) = line_count.filter(|&c| c != editor.line_count) {
            *editor = SimEditor::new(count);
        }
        self.active = Some(id);
    }

    pub fn rename(&mut self, from: &str, to: &str) {
        let (from, to) = (DocumentId::from(from), DocumentId::from(to));
        if let Some(editor) = self.documents.remove(&from) {
            self.documents.insert(to.clone(), editor);
        }
        if self.active.as_ref() == Some(&from) {
            self.active = Some(to);
        }
    }

    /// Removes `document`; its view closes if it was active.
    pub fn delete(&mut self, document: &str) {
        let id = DocumentId::from(document);
        self.documents.remove(&id);
        if self.active.as_ref() == Some(&id) {
            self.active = None;
        }
    }

    #[cfg(test)]
    pub fn editor(&self, document: &str) -> Option<&SimEditor> {
        self.documents.get(&DocumentId::from(document))
    }

    pub fn set_link_highlighted(&mut self, highlighted: bool) {
        self.link_highlighted = highlighted;
    }

    pub fn advance(&mut self, ms: u64) {
        self.now_ms = self.now_ms.saturating_add(ms as i64);
    }
}

#[async_trait(?Send)]
impl Workspace for SimWorkspace {
    type Editor = SimEditor;

    fn active_document(&self) -> Option<DocumentId> {
        self.active.clone()
    }

    async fn open_document(&mut self, document: &DocumentId) -> anyhow::Result<()> {
        if !self.documents.contains_key(document) {
            anyhow::bail!("{document} does not exist");
        }
        self.active = Some(document.clone());
        Ok(())
    }

    fn active_editor(&mut self) -> Option<&mut SimEditor> {
        let id = self.active.as_ref()?;
        self.documents.get_mut(id)
    }

    fn now_ms(&self) -> i64 {
        self.now_ms
    }
}

#[async_trait(?Send)]
impl SessionHost for SimWorkspace {
    fn open_views(&self) -> Vec<ViewRef> {
        self.most_recent_view().into_iter().collect()
    }

    fn most_recent_view(&self) -> Option<ViewRef> {
        self.active
            .as_ref()
            .map(|doc| ViewRef::new(VIEW_ID, doc.clone()))
    }

    fn link_target_highlighted(&self) -> bool {
        self.link_highlighted
    }

    async fn wait(&mut self, delay: Duration) {
        self.advance(delay.as_millis() as u64);
    }
}
