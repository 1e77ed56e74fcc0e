pub mod config;
pub mod database;
pub mod settings;
pub mod state;

pub use config::{resolve_data_dir, TrailConfig};
pub use database::PositionDatabase;
pub use settings::{shared, FixedSettings, SettingsProvider, SharedConfig};
pub use state::{CursorPoint, CursorState, EditorRange, ScrollState};
