/// Backward and forward traversal of a `NavigationHistory`.
use anyhow::{Context, Result};
use cursor_trail_config::{EditorRange, SettingsProvider};

use crate::centering::should_scroll_to_center;
use crate::history::NavigationHistory;
use crate::host::{EditorSurface, Workspace};
use crate::position::HistoricPosition;

/// What a successful `go_back` / `go_forward` did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Jump {
    /// The position that is now current.
    pub target: HistoricPosition,
    /// Whether the workspace was asked to switch documents first.
    pub switched_document: bool,
    /// Whether the viewport was centered on the target. `false` when no
    /// editor was available to position.
    pub centered: bool,
}

impl<P: SettingsProvider> NavigationHistory<P> {
    /// The equivalent of "Undo" for the cursor position.
    ///
    /// The position left behind goes onto the forward stack stamped with the
    /// workspace's clock, so the decay window starts at the jump.
    /// Returns `Ok(None)` when there is nowhere to go back to.
    ///
    /// # Errors
    ///
    /// Returns the workspace's error when the target document can't be
    /// opened. The stacks have already moved by then.
    pub async fn go_back<W: Workspace + ?Sized>(
        &mut self,
        workspace: &mut W,
    ) -> Result<Option<Jump>> {
        let Some(target) = self.back_stack.pop() else {
            return Ok(None);
        };

        let superseded = self.current.replace(target.clone());
        if let Some(previous) = superseded.clone() {
            self.push_forward(left_at(previous, workspace.now_ms()));
        }

        self.navigate_to(workspace, superseded.as_ref(), target)
            .await
            .map(Some)
    }

    /// The equivalent of "Redo" for the cursor position.
    ///
    /// Returns `Ok(None)` when nothing was undone.
    ///
    /// # Errors
    ///
    /// Same as [`go_back`](Self::go_back).
    pub async fn go_forward<W: Workspace + ?Sized>(
        &mut self,
        workspace: &mut W,
    ) -> Result<Option<Jump>> {
        let Some(target) = self.forward_stack.pop() else {
            return Ok(None);
        };

        let superseded = self.current.replace(target.clone());
        if let Some(previous) = superseded.clone() {
            self.push_back(left_at(previous, workspace.now_ms()));
        }

        self.navigate_to(workspace, superseded.as_ref(), target)
            .await
            .map(Some)
    }

    async fn navigate_to<W: Workspace + ?Sized>(
        &self,
        workspace: &mut W,
        from: Option<&HistoricPosition>,
        to: HistoricPosition,
    ) -> Result<Jump> {
        let switched_document = from.map_or(true, |f| f.document != to.document);
        if switched_document {
            tracing::debug!("Switching to {} for history navigation", to.document);
            workspace
                .open_document(&to.document)
                .await
                .with_context(|| format!("Failed to open {}", to.document))?;
        }

        let Some(editor) = workspace.active_editor() else {
            tracing::debug!("No active editor; skipping cursor placement");
            return Ok(Jump {
                target: to,
                switched_document,
                centered: false,
            });
        };

        let centered = should_scroll_to_center(
            Some(&*editor),
            from,
            &to,
            self.config.big_line_change_threshold,
        );
        let point = to.point();
        editor.set_selection(point, point);
        editor.scroll_into_view(EditorRange::caret(point), centered);

        Ok(Jump {
            target: to,
            switched_document,
            centered,
        })
    }
}

/// The user was at `position` until the jump at `now_ms`.
fn left_at(mut position: HistoricPosition, now_ms: i64) -> HistoricPosition {
    position.timestamp_ms = position.timestamp_ms.max(now_ms);
    position
}
