//! Concrete state handler functions and table builder.
//!
//! ```text
//!        toggle (guarded by conditional ignition)
//!   OFF ─────────────────────────────────────────▶ ON
//!    ▲                                              │
//!    └────────────────── toggle ────────────────────┘
//!
//!   ON, every tick:  time_on += 1 → temperature walk → classify risk
//!   OFF, every tick: risk pinned to Low, nothing advances
//! ```
//!
//! Neither update handler ever requests a transition; the burner only
//! changes state through ignition toggles.

use super::context::StoveContext;
use super::{StateDescriptor, StateId};
use crate::risk::{self, RiskAssessment};
use crate::sensors::temperature::{self, IDLE_TEMP_C, IGNITION_TEMP_C};
use log::{debug, info};

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static state table. Called once at startup.
pub fn build_state_table() -> [StateDescriptor; StateId::COUNT] {
    [
        // Index 0: Off
        StateDescriptor {
            name: "Off",
            on_enter: off_enter,
            on_update: off_update,
        },
        // Index 1: On
        StateDescriptor {
            name: "On",
            on_enter,
            on_update,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  OFF state
// ═══════════════════════════════════════════════════════════════════════════

fn off_enter(ctx: &mut StoveContext) {
    ctx.burner.is_on = false;
    ctx.burner.time_on_secs = 0;
    ctx.burner.temperature_c = IDLE_TEMP_C;
    ctx.burner.risk = RiskAssessment::LOW;
    info!("OFF: burner extinguished, {IDLE_TEMP_C:.1}°C");
}

fn off_update(ctx: &mut StoveContext) -> Option<StateId> {
    ctx.burner.risk = RiskAssessment::LOW;
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  ON state: burner lit, risk evaluated every tick
// ═══════════════════════════════════════════════════════════════════════════

fn on_enter(ctx: &mut StoveContext) {
    ctx.burner.is_on = true;
    ctx.burner.time_on_secs = 0;
    ctx.burner.temperature_c = IGNITION_TEMP_C;
    ctx.burner.risk = RiskAssessment::LOW;
    info!(
        "ON: burner lit, rule A {} min, rule B {} min",
        ctx.rules.rule_a_minutes, ctx.rules.rule_b_minutes
    );
}

fn on_update(ctx: &mut StoveContext) -> Option<StateId> {
    ctx.burner.time_on_secs = ctx.burner.time_on_secs.saturating_add(1);
    ctx.burner.temperature_c = temperature::step(ctx.burner.temperature_c, ctx.drift_roll);
    ctx.burner.risk = risk::classify(&ctx.risk_inputs(), &ctx.rules);

    debug!(
        "ON: t={}s T={:.1}°C risk={}",
        ctx.burner.time_on_secs, ctx.burner.temperature_c, ctx.burner.risk.level
    );
    None
}
