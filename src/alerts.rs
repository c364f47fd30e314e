//! Risk alerts.
//!
//! The [`AlertSupervisor`] watches the risk level after every evaluation
//! and reports the **edge** from `Low` to an elevated level. Staying
//! elevated raises nothing further, so a burner left on for an hour yields
//! one alert, not 3600.
//!
//! ## Alert lifecycle
//!
//! 1. Risk moves `Low -> Medium` or `Low -> High`.
//! 2. The supervisor reports the edge with the rule that caused it.
//! 3. The service appends an [`Alert`] to the [`AlertLog`] (`resolved = false`).
//! 4. The user resolves it; it stays in the log, marked resolved.
//! 5. Risk must fall back to `Low` before another alert can be raised.
//!
//! `Medium -> High` escalation is not a new alert. It is still visible as
//! a risk-change event.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::risk::{RiskAssessment, RiskLevel, RuleId};
use log::{info, warn};

/// What kind of danger an alert reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertKind {
    /// No presence near a lit burner for longer than rule A.
    Inactivity,
    /// Burner lit for longer than rule B.
    ElapsedTime,
    /// Burner lit while the owner is away from home.
    AwayFromHome,
}

impl From<RuleId> for AlertKind {
    fn from(rule: RuleId) -> Self {
        match rule {
            RuleId::Inactivity => Self::Inactivity,
            RuleId::ElapsedTime => Self::ElapsedTime,
            RuleId::AwayFromHome => Self::AwayFromHome,
        }
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inactivity => write!(f, "no movement near the stove"),
            Self::ElapsedTime => write!(f, "burner on too long"),
            Self::AwayFromHome => write!(f, "burner on while away from home"),
        }
    }
}

/// A raised alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub id: u32,
    /// Uptime (seconds) when the alert was raised.
    pub timestamp_secs: u64,
    pub kind: AlertKind,
    pub severity: RiskLevel,
    pub resolved: bool,
    /// Raised during quiet hours; recorded but not announced.
    pub silenced: bool,
}

/// An elevated-risk edge reported by the supervisor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiskEdge {
    pub kind: AlertKind,
    pub severity: RiskLevel,
}

// ───────────────────────────────────────────────────────────────
// Supervisor
// ───────────────────────────────────────────────────────────────

/// Edge detector over successive risk assessments.
#[derive(Debug, Default)]
pub struct AlertSupervisor {
    last: RiskLevel,
}

impl AlertSupervisor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the latest assessment. Returns an edge only on `Low -> elevated`.
    pub fn observe(&mut self, assessment: &RiskAssessment) -> Option<RiskEdge> {
        let prev = self.last;
        self.last = assessment.level;

        if prev.is_elevated() || !assessment.level.is_elevated() {
            return None;
        }
        // An elevated level always has a deciding rule.
        let rule = assessment.decided_by?;
        Some(RiskEdge {
            kind: rule.into(),
            severity: assessment.level,
        })
    }

    /// Level seen on the last call to [`observe`](Self::observe).
    pub fn last_level(&self) -> RiskLevel {
        self.last
    }
}

// ───────────────────────────────────────────────────────────────
// Log
// ───────────────────────────────────────────────────────────────

/// All alerts raised since startup, oldest first.
#[derive(Debug)]
pub struct AlertLog {
    alerts: Vec<Alert>,
    next_id: u32,
}

impl Default for AlertLog {
    fn default() -> Self {
        Self::new()
    }
}

impl AlertLog {
    pub fn new() -> Self {
        Self {
            alerts: Vec::new(),
            next_id: 1,
        }
    }

    /// Record a new unresolved alert and return a copy of it.
    pub fn raise(&mut self, edge: RiskEdge, timestamp_secs: u64, silenced: bool) -> Alert {
        let alert = Alert {
            id: self.next_id,
            timestamp_secs,
            kind: edge.kind,
            severity: edge.severity,
            resolved: false,
            silenced,
        };
        self.next_id = self.next_id.wrapping_add(1);
        self.alerts.push(alert);

        if silenced {
            info!("ALERT RAISED (quiet hours): #{} {} [{}]", alert.id, alert.kind, alert.severity);
        } else {
            warn!("ALERT RAISED: #{} {} [{}]", alert.id, alert.kind, alert.severity);
        }
        alert
    }

    /// Mark an alert resolved. Returns `false` for unknown or already
    /// resolved ids.
    pub fn resolve(&mut self, id: u32) -> bool {
        match self.alerts.iter_mut().find(|a| a.id == id) {
            Some(a) if !a.resolved => {
                a.resolved = true;
                info!("ALERT RESOLVED: #{id}");
                true
            }
            Some(_) => false,
            None => {
                warn!("ALERT RESOLVE: unknown id #{id}");
                false
            }
        }
    }

    /// Every alert, oldest first.
    pub fn all(&self) -> &[Alert] {
        &self.alerts
    }

    /// Unresolved alerts, oldest first.
    pub fn unresolved(&self) -> impl Iterator<Item = &Alert> {
        self.alerts.iter().filter(|a| !a.resolved)
    }

    /// Badge count.
    pub fn unresolved_count(&self) -> usize {
        self.unresolved().count()
    }
}
