//! Ignition history.
//!
//! An append-only log with one entry per successful ignition toggle and
//! one per raised alert. Entries are never edited or removed. Viewers list
//! them newest first.

use serde::{Deserialize, Serialize};

/// Maximum length of an entry's free-text details.
pub const DETAILS_CAP: usize = 48;

/// Details text for toggles issued through the app.
pub const REMOTE_ACTION_DETAILS: &str = "Remote action from app";

/// What happened to the burner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HistoryAction {
    On,
    Off,
    /// A risk alert was raised.
    Alert,
}

/// Which icon a viewer should draw next to the entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IconHint {
    Flame,
    PowerOff,
    Alert,
}

impl HistoryAction {
    pub fn icon(self) -> IconHint {
        match self {
            Self::On => IconHint::Flame,
            Self::Off => IconHint::PowerOff,
            Self::Alert => IconHint::Alert,
        }
    }
}

/// One entry of the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEvent {
    pub id: u64,
    /// Uptime (seconds) when the toggle happened.
    pub timestamp_secs: u64,
    pub action: HistoryAction,
    pub details: heapless::String<DETAILS_CAP>,
    pub icon: IconHint,
}

impl HistoryEvent {
    /// Build an entry. `details` longer than [`DETAILS_CAP`] is truncated
    /// on a character boundary.
    pub fn new(id: u64, timestamp_secs: u64, action: HistoryAction, details: &str) -> Self {
        let mut d = heapless::String::new();
        for ch in details.chars() {
            if d.push(ch).is_err() {
                break;
            }
        }
        Self {
            id,
            timestamp_secs,
            action,
            details: d,
            icon: action.icon(),
        }
    }
}

/// Append-only ignition log.
#[derive(Debug, Default)]
pub struct HistoryLog {
    entries: Vec<HistoryEvent>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry and return a copy of it. `details` may be any
    /// [`Display`](core::fmt::Display); it is truncated to [`DETAILS_CAP`].
    pub fn record(
        &mut self,
        timestamp_secs: u64,
        action: HistoryAction,
        details: impl core::fmt::Display,
    ) -> HistoryEvent {
        let id = self.entries.len() as u64 + 1;
        let event = HistoryEvent::new(id, timestamp_secs, action, &details.to_string());
        self.entries.push(event.clone());
        event
    }

    /// Entries, newest first.
    pub fn recent(&self) -> impl Iterator<Item = &HistoryEvent> {
        self.entries.iter().rev()
    }

    pub fn latest(&self) -> Option<&HistoryEvent> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
