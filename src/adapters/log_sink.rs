//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the `log` facade (stderr via `env_logger` in the demo binary).
//! A push-notification adapter would implement the same trait.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] as one line.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Telemetry(t) => {
                info!(
                    "TELEM | on={} | T={:.1}\u{00b0}C | elapsed={} | risk={} | \
                     in_use={} at_home={} | alerts={} | ticks={}",
                    t.state.is_on,
                    t.state.temperature_c,
                    t.elapsed,
                    t.state.risk_level,
                    t.state.is_in_use,
                    t.state.at_home,
                    t.unresolved_alerts,
                    t.total_ticks,
                );
            }
            AppEvent::Started(state) => {
                info!("START | initial_state={:?}", state);
            }
            AppEvent::IgnitionChanged(entry) => {
                info!(
                    "HIST | #{} {:?} at {}s ({})",
                    entry.id, entry.action, entry.timestamp_secs, entry.details
                );
            }
            AppEvent::IgnitionBlocked(reason) => {
                info!("STATE | ignition {}", reason);
            }
            AppEvent::RiskChanged { from, to } => {
                info!("RISK | {} -> {}", from, to);
            }
            AppEvent::AlertRaised(alert) if alert.silenced => {
                info!(
                    "ALERT | #{} {} [{}] (quiet hours)",
                    alert.id, alert.kind, alert.severity
                );
            }
            AppEvent::AlertRaised(alert) => {
                warn!("ALERT | #{} {} [{}]", alert.id, alert.kind, alert.severity);
            }
            AppEvent::AlertResolved(id) => {
                info!("ALERT | #{} resolved", id);
            }
            AppEvent::SignalsChanged { is_in_use, at_home } => {
                info!("STATE | in_use={} at_home={}", is_in_use, at_home);
            }
            AppEvent::ConfigUpdated(rules) => {
                info!(
                    "STATE | rules: A={}min B={}min conditional_ignition={}",
                    rules.rule_a_minutes, rules.rule_b_minutes, rules.conditional_ignition
                );
            }
        }
    }
}
