/// User-facing navigation commands.
use std::fmt;

/// The two actions a host binds to shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavigationCommand {
    /// Go back in the history.
    Back,
    /// Go forward again after going back.
    Forward,
}

impl NavigationCommand {
    pub const ALL: [NavigationCommand; 2] = [NavigationCommand::Back, NavigationCommand::Forward];

    /// Stable identifier for keybinding configuration.
    pub fn id(self) -> &'static str {
        match self {
            NavigationCommand::Back => "previous-cursor-position",
            NavigationCommand::Forward => "cursor-position-forward",
        }
    }

    /// Name shown in command palettes.
    pub fn name(self) -> &'static str {
        match self {
            NavigationCommand::Back => "Return to previous cursor position",
            NavigationCommand::Forward => "Re-return to next cursor position",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.id() == id)
    }
}

impl fmt::Display for NavigationCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
