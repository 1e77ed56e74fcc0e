/// Reading and applying an editor's cursor state.
use cursor_trail_config::CursorState;
use cursor_trail_mod_history::EditorSurface;

/// Snapshots selection and scroll offsets. Empty when there is no editor.
pub fn capture_state<E: EditorSurface + ?Sized>(editor: Option<&E>) -> CursorState {
    match editor {
        Some(editor) => CursorState {
            cursor: editor.selection(),
            scroll_state: editor.scroll_state(),
        },
        None => CursorState::default(),
    }
}

/// Puts the editor back into `state`.
///
/// A stored selection is restored and centered; without one, the raw scroll
/// offsets are applied.
pub fn apply_state<E: EditorSurface + ?Sized>(editor: &mut E, state: &CursorState) {
    if let Some(cursor) = state.cursor {
        editor.set_selection(cursor.from, cursor.to);
        editor.scroll_into_view(cursor, true);
    } else if let Some(scroll) = state.scroll_state {
        editor.scroll_to(scroll);
    }
}
