/// What the session layer needs from the host beyond document switching.
use std::time::Duration;

use async_trait::async_trait;

use cursor_trail_mod_history::{DocumentId, Workspace};

const NO_VIEW_ID: &str = "[NO_VIEW_ID]";

/// One editor view (a tab or pane) and the document it shows.
///
/// The same document can be open in several views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewRef {
    pub view_id: Option<String>,
    pub document: Option<DocumentId>,
}

impl ViewRef {
    pub fn new(view_id: impl Into<String>, document: impl Into<DocumentId>) -> Self {
        Self {
            view_id: Some(view_id.into()),
            document: Some(document.into()),
        }
    }

    /// `"<view id>:<document>"`, or `None` for a view without a document.
    pub fn identifier(&self) -> Option<String> {
        let document = self.document.as_ref()?;
        let view_id = self.view_id.as_deref().unwrap_or(NO_VIEW_ID);
        Some(format!("{view_id}:{document}"))
    }
}

/// A workspace that can also report its views and wait.
#[async_trait(?Send)]
pub trait SessionHost: Workspace {
    /// Every open view.
    fn open_views(&self) -> Vec<ViewRef>;

    /// The view the user interacted with last.
    fn most_recent_view(&self) -> Option<ViewRef>;

    /// Whether the host just scrolled to and highlighted a link target
    /// (e.g. a heading). Restoring a stored position would undo that.
    fn link_target_highlighted(&self) -> bool {
        false
    }

    /// Lets the host settle (e.g. finish loading a document) for `delay`.
    async fn wait(&mut self, delay: Duration);
}
