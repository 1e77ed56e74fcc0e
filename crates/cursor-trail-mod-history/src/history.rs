/// Back/forward navigation history across documents.
///
/// One `NavigationHistory` owns the whole state: the back stack, the forward
/// stack and the current position. Position updates fold into it through
/// `update_current_position`; `go_back` and `go_forward` (see `navigator`)
/// traverse it.
use cursor_trail_config::SettingsProvider;

use crate::config::NavigationConfig;
use crate::position::{DocumentId, HistoricPosition};

/// Cursor-position history for a session.
///
/// Both stacks are ordered oldest first and bounded by the settings
/// provider's `max_history_length`, read on every push.
pub struct NavigationHistory<P> {
    /// Positions to go back to, most recent last.
    pub(crate) back_stack: Vec<HistoricPosition>,
    /// Positions undone by going back, most recently undone last.
    pub(crate) forward_stack: Vec<HistoricPosition>,
    /// Where the user is now. Never a member of either stack.
    pub(crate) current: Option<HistoricPosition>,
    pub(crate) settings: P,
    pub(crate) config: NavigationConfig,
}

impl<P> std::fmt::Debug for NavigationHistory<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationHistory")
            .field("back_len", &self.back_stack.len())
            .field("forward_len", &self.forward_stack.len())
            .field("current", &self.current)
            .finish()
    }
}

impl<P: SettingsProvider> NavigationHistory<P> {
    /// Creates an empty history with default tuning.
    pub fn new(settings: P) -> Self {
        Self::with_config(settings, NavigationConfig::default())
    }

    pub fn with_config(settings: P, config: NavigationConfig) -> Self {
        Self {
            back_stack: Vec::new(),
            forward_stack: Vec::new(),
            current: None,
            settings,
            config,
        }
    }

    /// Folds a newly observed position into the history.
    ///
    /// A position on another document or line demotes the current one to the
    /// back stack. The forward stack survives unless the newest forward entry
    /// is older than the decay window, so a stray selection right after going
    /// back doesn't cost the way forward. Reaching the next forward target by
    /// hand pops it, as if going forward. A position on the same line only
    /// refreshes the current timestamp.
    pub fn update_current_position(&mut self, position: HistoricPosition) {
        let Some(current) = self.current.as_mut() else {
            tracing::trace!("First position: {}:{}", position.document, position.line);
            self.current = Some(position);
            return;
        };

        if !current.is_spatially_different(&position) {
            if position.timestamp_ms > current.timestamp_ms {
                current.timestamp_ms = position.timestamp_ms;
            }
            return;
        }

        if let Some(previous) = self.current.take() {
            self.push_back(previous);
        }
        if self.forward_has_decayed(position.timestamp_ms) {
            tracing::debug!(
                "Discarding {} stale forward positions",
                self.forward_stack.len()
            );
            self.forward_stack.clear();
        }
        // Moving onto the next forward target consumes it
        if self
            .forward_stack
            .last()
            .is_some_and(|next| !next.is_spatially_different(&position))
        {
            self.forward_stack.pop();
        }
        self.current = Some(position);
    }

    pub fn current(&self) -> Option<&HistoricPosition> {
        self.current.as_ref()
    }

    /// Back stack, oldest first.
    pub fn back_stack(&self) -> &[HistoricPosition] {
        &self.back_stack
    }

    /// Forward stack, oldest first; the next `go_forward` target is last.
    pub fn forward_stack(&self) -> &[HistoricPosition] {
        &self.forward_stack
    }

    pub fn can_go_back(&self) -> bool {
        !self.back_stack.is_empty()
    }

    pub fn can_go_forward(&self) -> bool {
        !self.forward_stack.is_empty()
    }

    pub fn settings(&self) -> &P {
        &self.settings
    }

    /// Drops all history, including the current position.
    pub fn clear(&mut self) {
        self.back_stack.clear();
        self.forward_stack.clear();
        self.current = None;
    }

    /// Rewrites positions of a renamed document so they keep resolving.
    pub fn rename_document(&mut self, old: &DocumentId, new: &DocumentId) {
        let mut renamed = 0;
        let positions = self
            .back_stack
            .iter_mut()
            .chain(self.forward_stack.iter_mut())
            .chain(self.current.iter_mut());
        for position in positions.filter(|p| &p.document == old) {
            position.document = new.clone();
            renamed += 1;
        }
        if renamed > 0 {
            tracing::debug!("Renamed {renamed} history positions from {old} to {new}");
        }
    }

    fn forward_has_decayed(&self, now_ms: i64) -> bool {
        self.forward_stack.last().is_some_and(|newest| {
            now_ms.saturating_sub(newest.timestamp_ms) > self.config.forward_decay_ms
        })
    }

    pub(crate) fn push_back(&mut self, position: HistoricPosition) {
        let max = self.settings.max_history_length();
        push_bounded(&mut self.back_stack, position, max);
    }

    pub(crate) fn push_forward(&mut self, position: HistoricPosition) {
        let max = self.settings.max_history_length();
        push_bounded(&mut self.forward_stack, position, max);
    }
}

/// Pushes onto `stack`, evicting the oldest entries beyond `max`.
fn push_bounded(stack: &mut Vec<HistoricPosition>, position: HistoricPosition, max: usize) {
    stack.push(position);
    if stack.len() > max {
        let excess = stack.len() - max;
        stack.drain(..excess);
    }
}
