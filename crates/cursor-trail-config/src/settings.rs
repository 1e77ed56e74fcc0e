/// Live access to the settings that the history engine reads on every
/// bounding operation.
use std::cell::RefCell;
use std::rc::Rc;

use crate::config::TrailConfig;

/// Config shared between the session and whoever edits settings at runtime.
pub type SharedConfig = Rc<RefCell<TrailConfig>>;

/// Wraps a config for shared, single-threaded mutation.
pub fn shared(config: TrailConfig) -> SharedConfig {
    Rc::new(RefCell::new(config))
}

/// Source of the history bound. Read each time a stack is trimmed, so
/// changes apply without restarting.
pub trait SettingsProvider {
    fn max_history_length(&self) -> usize;
}

impl SettingsProvider for TrailConfig {
    fn max_history_length(&self) -> usize {
        self.max_history_length
    }
}

impl<P: SettingsProvider + ?Sized> SettingsProvider for Rc<RefCell<P>> {
    fn max_history_length(&self) -> usize {
        self.borrow().max_history_length()
    }
}

impl<P: SettingsProvider + ?Sized> SettingsProvider for &P {
    fn max_history_length(&self) -> usize {
        (**self).max_history_length()
    }
}

/// A constant bound, bypassing the config file's sanitized range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedSettings(pub usize);

impl SettingsProvider for FixedSettings {
    fn max_history_length(&self) -> usize {
        self.0
    }
}
