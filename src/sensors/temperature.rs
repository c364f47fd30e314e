//! Burner temperature model.
//!
//! A one-second random walk: with probability 0.3 the burner warms by
//! 0.2 °C, otherwise it cools by 0.1 °C. The walk is capped at 280 °C.
//! There is no lower bound, so a long-running burner drifts downward
//! without limit. The walk is kept in `f64`: in `f32` the 0.1 °C step
//! is lost to rounding once the magnitude passes about a million degrees.
//!
//! The randomness is injected as a uniform roll in `[0, 1)` so tests can
//! script exact sequences.

/// Temperature the burner reports immediately after ignition.
pub const IGNITION_TEMP_C: f64 = 30.0;
/// Temperature the burner reports immediately after shut-off.
pub const IDLE_TEMP_C: f64 = 24.0;
/// Ceiling of the random walk.
pub const MAX_TEMP_C: f64 = 280.0;

/// A roll strictly above this warms the burner (probability 0.3).
pub const RISE_ROLL_ABOVE: f32 = 0.7;
pub const RISE_STEP_C: f64 = 0.2;
pub const FALL_STEP_C: f64 = 0.1;

/// Advance the walk by one tick.
pub fn step(temp_c: f64, roll: f32) -> f64 {
    let next = if roll > RISE_ROLL_ABOVE {
        temp_c + RISE_STEP_C
    } else {
        temp_c - FALL_STEP_C
    };
    next.min(MAX_TEMP_C)
}
