//! System configuration parameters
//!
//! All tunable parameters for the GasSafe monitor. The risk thresholds
//! live in [`RuleConfig`]; the simulator cadence and alert policy sit
//! alongside it in [`SystemConfig`].

use serde::{Deserialize, Deserializer, Serialize};

use crate::scheduler::QuietHours;

/// Granularity of the rule thresholds, in minutes.
pub const RULE_STEP_MINUTES: u32 = 5;

/// Smallest allowed rule threshold, in minutes.
pub const RULE_MIN_MINUTES: u32 = 5;

/// Snap a rule threshold onto the 5-minute grid, never below the minimum.
pub fn clamp_rule_minutes(minutes: u32) -> u32 {
    let m = minutes.max(RULE_MIN_MINUTES);
    m - m % RULE_STEP_MINUTES
}

/// Identifies one of the two time-based risk rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimedRule {
    /// Inactivity threshold (MEDIUM).
    A,
    /// Elapsed-time threshold (HIGH).
    B,
}

/// Direction of a settings-screen `+`/`-` press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Step {
    Up,
    Down,
}

/// Risk rule thresholds and ignition policy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Minutes without presence before the burner is MEDIUM risk.
    pub rule_a_minutes: u32,
    /// Minutes since ignition before the burner is HIGH risk.
    pub rule_b_minutes: u32,
    /// Temperature-change threshold (°C). Reserved; not used by the rules.
    pub temp_threshold_c: f32,
    /// Refuse ignition while the owner is outside the geofence.
    pub conditional_ignition: bool,
    /// Alerts raised inside this window are recorded but silenced.
    pub quiet_hours: Option<QuietHours>,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            rule_a_minutes: 15,
            rule_b_minutes: 20,
            temp_threshold_c: 2.5,
            conditional_ignition: true,
            quiet_hours: None,
        }
    }
}

impl RuleConfig {
    /// Rule A threshold in seconds.
    pub fn rule_a_secs(&self) -> u32 {
        self.rule_a_minutes.saturating_mul(60)
    }

    /// Rule B threshold in seconds.
    pub fn rule_b_secs(&self) -> u32 {
        self.rule_b_minutes.saturating_mul(60)
    }

    /// Apply a partial update. Rule minutes are clamped onto the grid.
    pub fn apply(&mut self, patch: &RuleConfigPatch) {
        if let Some(m) = patch.rule_a_minutes {
            self.rule_a_minutes = clamp_rule_minutes(m);
        }
        if let Some(m) = patch.rule_b_minutes {
            self.rule_b_minutes = clamp_rule_minutes(m);
        }
        if let Some(t) = patch.temp_threshold_c {
            self.temp_threshold_c = t;
        }
        if let Some(c) = patch.conditional_ignition {
            self.conditional_ignition = c;
        }
        if let Some(q) = patch.quiet_hours {
            self.quiet_hours = q;
        }
    }

    /// Snap both rule thresholds onto the grid. Used on configs loaded
    /// from outside, which bypass [`apply`](Self::apply).
    pub fn normalize(&mut self) {
        self.rule_a_minutes = clamp_rule_minutes(self.rule_a_minutes);
        self.rule_b_minutes = clamp_rule_minutes(self.rule_b_minutes);
    }

    /// Move one rule threshold by one grid step, flooring at the minimum.
    pub fn step(&mut self, rule: TimedRule, step: Step) {
        let minutes = match rule {
            TimedRule::A => &mut self.rule_a_minutes,
            TimedRule::B => &mut self.rule_b_minutes,
        };
        *minutes = match step {
            Step::Up => clamp_rule_minutes(minutes.saturating_add(RULE_STEP_MINUTES)),
            Step::Down => clamp_rule_minutes(minutes.saturating_sub(RULE_STEP_MINUTES)),
        };
    }
}

/// Partial [`RuleConfig`] update. `None` leaves the field untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleConfigPatch {
    pub rule_a_minutes: Option<u32>,
    pub rule_b_minutes: Option<u32>,
    pub temp_threshold_c: Option<f32>,
    pub conditional_ignition: Option<bool>,
    /// `Some(None)` clears quiet hours. In JSON, an absent key leaves
    /// them alone and an explicit `null` clears them.
    #[serde(
        default,
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub quiet_hours: Option<Option<QuietHours>>,
}

/// Maps a present field to `Some`, so a JSON `null` becomes `Some(None)`.
/// Absent fields never reach this and fall back to `default`.
fn present_or_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Core system configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Rules ---
    pub rules: RuleConfig,

    // --- Alerts ---
    /// Raise an alert on each LOW -> MEDIUM/HIGH risk edge.
    pub alert_on_risk_edge: bool,

    // --- Timing ---
    /// Simulated tick period (milliseconds). One tick is one second of burner time.
    pub tick_interval_ms: u32,
    /// Telemetry report interval (seconds)
    pub telemetry_interval_secs: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            rules: RuleConfig::default(),
            alert_on_risk_edge: true,
            tick_interval_ms: 1000,        // 1 Hz
            telemetry_interval_secs: 60,   // 1/min
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_sane() {
        let c = SystemConfig::default();
        assert!(c.rules.rule_a_minutes >= RULE_MIN_MINUTES);
        assert!(c.rules.rule_b_minutes >= RULE_MIN_MINUTES);
        assert_eq!(c.rules.rule_a_minutes % RULE_STEP_MINUTES, 0);
        assert_eq!(c.rules.rule_b_minutes % RULE_STEP_MINUTES, 0);
        assert!(c.rules.conditional_ignition);
        assert!(c.tick_interval_ms > 0);
        assert!(c.telemetry_interval_secs > 0);
    }

    #[test]
    fn rule_a_fires_before_rule_b_by_default() {
        let c = RuleConfig::default();
        assert!(
            c.rule_a_minutes < c.rule_b_minutes,
            "inactivity warning should precede the hard elapsed-time limit"
        );
    }

    #[test]
    fn clamp_snaps_to_grid() {
        assert_eq!(clamp_rule_minutes(0), 5);
        assert_eq!(clamp_rule_minutes(4), 5);
        assert_eq!(clamp_rule_minutes(5), 5);
        assert_eq!(clamp_rule_minutes(7), 5);
        assert_eq!(clamp_rule_minutes(14), 10);
        assert_eq!(clamp_rule_minutes(30), 30);
    }

    #[test]
    fn step_down_floors_at_five() {
        let mut c = RuleConfig {
            rule_a_minutes: 10,
            ..Default::default()
        };
        c.step(TimedRule::A, Step::Down);
        assert_eq!(c.rule_a_minutes, 5);
        c.step(TimedRule::A, Step::Down);
        assert_eq!(c.rule_a_minutes, 5);
    }

    #[test]
    fn step_up_moves_by_five() {
        let mut c = RuleConfig::default();
        c.step(TimedRule::B, Step::Up);
        assert_eq!(c.rule_b_minutes, 25);
        assert_eq!(c.rule_a_minutes, 15);
    }

    #[test]
    fn patch_touches_only_given_fields() {
        let mut c = RuleConfig::default();
        c.apply(&RuleConfigPatch {
            rule_b_minutes: Some(42),
            conditional_ignition: Some(false),
            ..Default::default()
        });
        assert_eq!(c.rule_a_minutes, 15);
        assert_eq!(c.rule_b_minutes, 40);
        assert!(!c.conditional_ignition);
        assert!((c.temp_threshold_c - 2.5).abs() < f32::EPSILON);
    }

    #[test]
    fn patch_can_clear_quiet_hours() {
        let mut c = RuleConfig {
            quiet_hours: Some(QuietHours {
                start_hour: 3,
                end_hour: 6,
            }),
            ..Default::default()
        };
        c.apply(&RuleConfigPatch {
            quiet_hours: Some(None),
            ..Default::default()
        });
        assert!(c.quiet_hours.is_none());
    }

    #[test]
    fn normalize_fixes_loaded_rules() {
        let mut c: RuleConfig = serde_json::from_str(
            r#"{"rule_a_minutes":0,"rule_b_minutes":33,"temp_threshold_c":2.5,
                "conditional_ignition":true,"quiet_hours":null}"#,
        )
        .unwrap();
        c.normalize();
        assert_eq!(c.rule_a_minutes, 5);
        assert_eq!(c.rule_b_minutes, 30);
    }

    #[test]
    fn json_null_clears_quiet_hours() {
        let mut c = RuleConfig {
            quiet_hours: Some(QuietHours {
                start_hour: 3,
                end_hour: 6,
            }),
            ..Default::default()
        };
        let patch: RuleConfigPatch = serde_json::from_str(r#"{"quiet_hours": null}"#).unwrap();
        assert_eq!(patch.quiet_hours, Some(None));
        c.apply(&patch);
        assert!(c.quiet_hours.is_none());
    }

    #[test]
    fn json_quiet_hours_set_and_absent() {
        let patch: RuleConfigPatch =
            serde_json::from_str(r#"{"quiet_hours": {"start_hour": 22, "end_hour": 7}}"#).unwrap();
        assert_eq!(
            patch.quiet_hours,
            Some(Some(QuietHours {
                start_hour: 22,
                end_hour: 7
            }))
        );

        let patch: RuleConfigPatch = serde_json::from_str(r#"{"rule_b_minutes": 30}"#).unwrap();
        assert_eq!(patch.quiet_hours, None);
    }

    #[test]
    fn patch_json_roundtrip_keeps_clear() {
        let clear = RuleConfigPatch {
            quiet_hours: Some(None),
            ..Default::default()
        };
        let json = serde_json::to_string(&clear).unwrap();
        let back: RuleConfigPatch = serde_json::from_str(&json).unwrap();
        assert_eq!(back, clear);
    }

    #[test]
    fn serde_roundtrip() {
        let c = SystemConfig::default();
        let json = serde_json::to_string(&c).unwrap();
        let c2: SystemConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(c, c2);
    }

    #[test]
    fn patch_from_partial_json() {
        let patch: RuleConfigPatch = serde_json::from_str(r#"{"rule_a_minutes": 25}"#).unwrap();
        assert_eq!(patch.rule_a_minutes, Some(25));
        assert!(patch.rule_b_minutes.is_none());
        assert!(patch.conditional_ignition.is_none());
    }
}
