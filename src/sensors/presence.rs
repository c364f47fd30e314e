//! Presence and geofence signals.
//!
//! Both are plain booleans written by the outside world. No validation,
//! no debounce: a write is visible to the very next risk evaluation.

use serde::{Deserialize, Serialize};

/// Latest values of the two external presence signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresenceSignals {
    /// Motion detected near the stove.
    pub is_in_use: bool,
    /// Owner's phone is inside the home geofence.
    pub at_home: bool,
}

impl Default for PresenceSignals {
    fn default() -> Self {
        Self {
            is_in_use: false,
            at_home: true,
        }
    }
}

impl PresenceSignals {
    /// Set the motion signal. Returns `true` if the value changed.
    pub fn set_in_use(&mut self, in_use: bool) -> bool {
        let changed = self.is_in_use != in_use;
        self.is_in_use = in_use;
        changed
    }

    /// Set the geofence signal. Returns `true` if the value changed.
    pub fn set_at_home(&mut self, at_home: bool) -> bool {
        let changed = self.at_home != at_home;
        self.at_home = at_home;
        changed
    }
}
