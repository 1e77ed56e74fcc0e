/// Cursor position memory for an editing session.
///
/// `CursorTracker` remembers where each file was left, restores that position
/// when the file opens again, and feeds every position it observes into the
/// cross-document navigation history of `cursor-trail-mod-history`.
pub mod capture;
pub mod host;
pub mod tracker;

pub use capture::{apply_state, capture_state};
pub use host::{SessionHost, ViewRef};
pub use tracker::CursorTracker;
