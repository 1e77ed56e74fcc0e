use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;

use cursor_trail_config::{CursorPoint, EditorRange, ScrollState};
use cursor_trail_core::{SessionHost, ViewRef};
use cursor_trail_mod_history::{DocumentId, EditorSurface, Workspace};

/// Editor of one document in the fake host.
#[derive(Debug, Clone)]
pub struct FakeEditor {
    pub selection: Option<EditorRange>,
    pub scroll: Option<ScrollState>,
    pub centered: Vec<EditorRange>,
}

impl Default for FakeEditor {
    fn default() -> Self {
        Self {
            selection: Some(EditorRange::caret(CursorPoint::new(0, 0))),
            scroll: Some(ScrollState::default()),
            centered: Vec::new(),
        }
    }
}

impl EditorSurface for FakeEditor {
    fn selection(&self) -> Option<EditorRange> {
        self.selection
    }

    fn scroll_state(&self) -> Option<ScrollState> {
        self.scroll
    }

    fn set_selection(&mut self, anchor: CursorPoint, head: CursorPoint) {
        self.selection = Some(EditorRange { from: anchor, to: head });
    }

    fn scroll_into_view(&mut self, range: EditorRange, center: bool) {
        if center {
            self.centered.push(range);
        }
        self.scroll = Some(ScrollState {
            top: range.to.line as f64 * 20.0,
            left: 0.0,
        });
    }

    fn scroll_to(&mut self, scroll: ScrollState) {
        self.scroll = Some(scroll);
    }
}

/// Single-window host with one editor per open document.
#[derive(Debug)]
pub struct FakeHost {
    pub existing: Vec<DocumentId>,
    pub active: Option<DocumentId>,
    pub view_id: String,
    pub other_views: Vec<ViewRef>,
    pub editors: HashMap<DocumentId, FakeEditor>,
    pub now_ms: i64,
    pub waits: Vec<Duration>,
    pub link_highlighted: bool,
}

impl FakeHost {
    pub fn new(documents: &[&str]) -> Self {
        Self {
            existing: documents.iter().map(|d| DocumentId::from(*d)).collect(),
            active: None,
            view_id: "leaf-1".to_string(),
            other_views: Vec::new(),
            editors: HashMap::new(),
            now_ms: 1_700_000_000_000,
            waits: Vec::new(),
            link_highlighted: false,
        }
    }

    /// Makes `document` active the way a user click would.
    pub fn show(&mut self, document: &str) {
        let id = DocumentId::from(document);
        self.editors.entry(id.clone()).or_default();
        self.active = Some(id);
    }

    pub fn editor(&self, document: &str) -> &FakeEditor {
        &self.editors[&DocumentId::from(document)]
    }

    pub fn active_mut(&mut self) -> &mut FakeEditor {
        let id = self.active.clone().expect("no active document");
        self.editors.entry(id).or_default()
    }

    /// Moves the caret and scrolls so it stays in view.
    pub fn move_to(&mut self, line: usize, ch: usize) {
        let editor = self.active_mut();
        editor.selection = Some(EditorRange::caret(CursorPoint::new(line, ch)));
        editor.scroll = Some(ScrollState {
            top: line as f64 * 20.0,
            left: 0.0,
        });
    }

    pub fn advance(&mut self, ms: i64) {
        self.now_ms += ms;
    }
}

#[async_trait(?Send)]
impl Workspace for FakeHost {
    type Editor = FakeEditor;

    fn active_document(&self) -> Option<DocumentId> {
        self.active.clone()
    }

    async fn open_document(&mut self, document: &DocumentId) -> anyhow::Result<()> {
        if !self.existing.contains(document) {
            anyhow::bail!("{document} no longer exists");
        }
        self.editors.entry(document.clone()).or_default();
        self.active = Some(document.clone());
        Ok(())
    }

    fn active_editor(&mut self) -> Option<&mut FakeEditor> {
        let id = self.active.as_ref()?;
        self.editors.get_mut(id)
    }

    fn now_ms(&self) -> i64 {
        self.now_ms
    }
}

#[async_trait(?Send)]
impl SessionHost for FakeHost {
    fn open_views(&self) -> Vec<ViewRef> {
        self.most_recent_view()
            .into_iter()
            .chain(self.other_views.iter().cloned())
            .collect()
    }

    fn most_recent_view(&self) -> Option<ViewRef> {
        self.active
            .as_ref()
            .map(|doc| ViewRef::new(self.view_id.clone(), doc.clone()))
    }

    fn link_target_highlighted(&self) -> bool {
        self.link_highlighted
    }

    async fn wait(&mut self, delay: Duration) {
        self.waits.push(delay);
        self.now_ms += delay.as_millis() as i64;
    }
}
