//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port. Adapters on the other side
//! decide what to do with them: log them, push a notification, refresh a
//! screen.

use core::fmt::Write;

use serde::Serialize;

use crate::alerts::Alert;
use crate::config::RuleConfig;
use crate::error::IgnitionBlocked;
use crate::fsm::context::StoveState;
use crate::history::HistoryEvent;
use crate::risk::RiskLevel;

/// Structured events emitted by the application core.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// The service has started (carries the initial state).
    Started(StoveState),

    /// A successful ignition toggle, with its history entry.
    IgnitionChanged(HistoryEvent),

    /// An ignition request was refused.
    IgnitionBlocked(IgnitionBlocked),

    /// The risk classification changed.
    RiskChanged { from: RiskLevel, to: RiskLevel },

    /// A new alert was raised on a `Low -> elevated` edge.
    AlertRaised(Alert),

    /// An alert was marked resolved.
    AlertResolved(u32),

    /// A presence or geofence signal changed value.
    SignalsChanged { is_in_use: bool, at_home: bool },

    /// Rule configuration changed (carries the new rules).
    ConfigUpdated(RuleConfig),

    /// Periodic telemetry snapshot.
    Telemetry(TelemetryData),
}

/// A point-in-time telemetry snapshot suitable for logging or display.
#[derive(Debug, Clone, Serialize)]
pub struct TelemetryData {
    pub state: StoveState,
    /// `time_on_secs` as `HH:MM:SS`.
    pub elapsed: heapless::String<16>,
    pub unresolved_alerts: usize,
    pub total_ticks: u64,
}

/// Format seconds as a zero-padded `HH:MM:SS` clock. Hours are not
/// wrapped at 24.
pub fn format_elapsed(secs: u32) -> heapless::String<16> {
    let hrs = secs / 3600;
    let mins = (secs % 3600) / 60;
    let s = secs % 60;
    let mut out = heapless::String::new();
    // u32::MAX / 3600 has 7 digits; 7 + 6 fits in 16.
    let _ = write!(out, "{hrs:02}:{mins:02}:{s:02}");
    out
}
