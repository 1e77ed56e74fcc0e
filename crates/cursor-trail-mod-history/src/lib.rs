/// Cross-document cursor navigation history.
///
/// Provides a `NavigationHistory` that records where the user has been as a
/// bounded back/forward double stack and jumps between those positions
/// through the host's `Workspace` and `EditorSurface` traits.
/// History lives for the session only.
pub mod centering;
pub mod command;
pub mod config;
pub mod history;
pub mod host;
pub mod navigator;
pub mod position;

pub use centering::should_scroll_to_center;
pub use command::NavigationCommand;
pub use config::NavigationConfig;
pub use history::NavigationHistory;
pub use host::{EditorSurface, Introspection, VisibleRange, Workspace};
pub use navigator::Jump;
pub use position::{DocumentId, HistoricPosition};
