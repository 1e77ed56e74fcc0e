/// Decides whether a jump should re-center the viewport.
///
/// Jumps to something already on screen scroll minimally so the view doesn't
/// move under the user's eyes. Everything else is centered.
use crate::host::{EditorSurface, Introspection};
use crate::position::HistoricPosition;

/// Returns whether jumping from `from` to `to` should center the viewport.
///
/// - no editor: `false`, there is nothing to scroll
/// - no origin, or another document: `true`
/// - the editor reports its visible range: center iff the target is off screen
/// - the editor can't tell: center iff the jump spans more than `threshold` lines
///
/// Introspection failures are logged and resolve to `false`.
pub fn should_scroll_to_center<E: EditorSurface + ?Sized>(
    editor: Option<&E>,
    from: Option<&HistoricPosition>,
    to: &HistoricPosition,
    threshold: usize,
) -> bool {
    let Some(editor) = editor else {
        return false;
    };
    let Some(from) = from.filter(|f| f.document == to.document) else {
        return true;
    };

    let visible = match editor.visible_char_range() {
        Introspection::Available(range) if range.is_well_formed() => Some(range),
        Introspection::Available(range) => {
            tracing::warn!(
                "Failed to determine whether to scroll to center: malformed visible range {}..={}",
                range.from,
                range.to
            );
            return false;
        }
        Introspection::Unavailable => None,
        Introspection::Failed(e) => {
            tracing::warn!("Failed to determine whether to scroll to center: {e:#}");
            return false;
        }
    };

    if let Some(visible) = visible {
        match editor
            .line_start_offset(to.line)
            .map(|start| start.saturating_add(to.column))
        {
            Introspection::Available(offset) => return !visible.contains(offset),
            Introspection::Unavailable => {}
            Introspection::Failed(e) => {
                tracing::warn!("Failed to determine whether to scroll to center: {e:#}");
                return false;
            }
        }
    }

    from.line.abs_diff(to.line) > threshold
}
