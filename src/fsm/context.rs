//! Shared mutable context threaded through every FSM handler.
//!
//! `StoveContext` is the single record state handlers read from and write
//! to: the burner readings, the presence signals, the rule configuration
//! and the noise roll for the current tick. It is the only owner of the
//! stove state; everything outside the service sees [`StoveState`] copies.

use serde::{Deserialize, Serialize};

use crate::config::RuleConfig;
use crate::risk::{RiskAssessment, RiskInputs, RiskLevel};
use crate::sensors::presence::PresenceSignals;
use crate::sensors::temperature::IDLE_TEMP_C;

// ---------------------------------------------------------------------------
// Burner readings (written by state handlers)
// ---------------------------------------------------------------------------

/// Burner-side part of the stove state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BurnerReadings {
    pub is_on: bool,
    /// Simulated burner temperature (°C).
    pub temperature_c: f64,
    /// Seconds since the last ignition.
    pub time_on_secs: u32,
    /// Latest risk classification and the rule that produced it.
    pub risk: RiskAssessment,
}

impl Default for BurnerReadings {
    fn default() -> Self {
        Self {
            is_on: false,
            temperature_c: IDLE_TEMP_C,
            time_on_secs: 0,
            risk: RiskAssessment::LOW,
        }
    }
}

// ---------------------------------------------------------------------------
// Read-only snapshot handed to the presentation layer
// ---------------------------------------------------------------------------

/// Point-in-time copy of the full stove state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StoveState {
    pub is_on: bool,
    pub is_in_use: bool,
    pub at_home: bool,
    pub temperature_c: f64,
    pub time_on_secs: u32,
    pub risk_level: RiskLevel,
}

// ---------------------------------------------------------------------------
// StoveContext
// ---------------------------------------------------------------------------

/// The shared context passed to every state handler function.
pub struct StoveContext {
    // -- Burner --
    pub burner: BurnerReadings,

    // -- External signals --
    pub signals: PresenceSignals,

    // -- Configuration --
    pub rules: RuleConfig,

    // -- Noise --
    /// Uniform roll in `[0, 1)` for this tick's temperature step.
    /// Written by the service before every FSM tick.
    pub drift_roll: f32,
}

impl StoveContext {
    /// Create a new context with the given rules. Burner off, owner home.
    pub fn new(rules: RuleConfig) -> Self {
        Self {
            burner: BurnerReadings::default(),
            signals: PresenceSignals::default(),
            rules,
            drift_roll: 0.0,
        }
    }

    /// Inputs for [`crate::risk::classify`] as of right now.
    pub fn risk_inputs(&self) -> RiskInputs {
        RiskInputs {
            time_on_secs: self.burner.time_on_secs,
            is_in_use: self.signals.is_in_use,
            at_home: self.signals.at_home,
            is_on: self.burner.is_on,
        }
    }

    /// Current risk level.
    pub fn risk_level(&self) -> RiskLevel {
        self.burner.risk.level
    }

    /// Copy out the public stove state.
    pub fn snapshot(&self) -> StoveState {
        StoveState {
            is_on: self.burner.is_on,
            is_in_use: self.signals.is_in_use,
            at_home: self.signals.at_home,
            temperature_c: self.burner.temperature_c,
            time_on_secs: self.burner.time_on_secs,
            risk_level: self.burner.risk.level,
        }
    }
}
