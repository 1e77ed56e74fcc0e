/// Tuning constants for the navigation history.

/// Gap after which a new position discards the forward history.
const DEFAULT_FORWARD_DECAY_MS: i64 = 60_000;

/// Line distance beyond which a jump re-centers the viewport when the
/// editor can't tell what is visible.
const DEFAULT_BIG_LINE_CHANGE_THRESHOLD: usize = 20;

/// Configuration for a `NavigationHistory`.
///
/// The stack bound is not here: it comes from a `SettingsProvider` and is
/// read live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationConfig {
    /// A spatially different position more than this many milliseconds after
    /// the newest forward entry clears the forward stack.
    pub forward_decay_ms: i64,
    /// Fallback centering threshold, in lines.
    pub big_line_change_threshold: usize,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            forward_decay_ms: DEFAULT_FORWARD_DECAY_MS,
            big_line_change_threshold: DEFAULT_BIG_LINE_CHANGE_THRESHOLD,
        }
    }
}
