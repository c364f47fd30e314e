//! Inbound commands to the application service.
//!
//! These represent actions requested by the presentation layer (dashboard
//! buttons, the geofence screen, the rules screen) that the
//! [`AppService`](super::service::AppService) interprets and acts upon.

use crate::config::{RuleConfigPatch, Step, TimedRule};

/// Commands that the outside world can send into the application core.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppCommand {
    /// Light or extinguish the burner.
    ToggleIgnition,

    /// Inject the geofence signal.
    SetAtHome(bool),

    /// Flip the geofence signal (manual home/away switch).
    ToggleAtHome,

    /// Inject the motion signal.
    SetInUse(bool),

    /// Partial configuration update.
    UpdateConfig(RuleConfigPatch),

    /// `+`/`-` on one of the rule thresholds.
    StepRule(TimedRule, Step),

    /// Mark an alert as handled.
    ResolveAlert(u32),
}
