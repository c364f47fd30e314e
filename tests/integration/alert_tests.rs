//! Alert edge detection, quiet hours and resolution.

use crate::mock_env::{Harness, MockEnv};
use gassafe::alerts::AlertKind;
use gassafe::app::commands::AppCommand;
use gassafe::app::events::AppEvent;
use gassafe::config::{RuleConfigPatch, SystemConfig};
use gassafe::history::{HistoryAction, IconHint};
use gassafe::risk::RiskLevel;
use gassafe::scheduler::QuietHours;

#[test]
fn medium_edge_raises_one_inactivity_alert() {
    let mut h = Harness::new();
    h.ignite();
    h.run_secs(1000);

    let alerts = h.app.alerts();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].kind, AlertKind::Inactivity);
    assert_eq!(alerts[0].severity, RiskLevel::Medium);
    assert_eq!(alerts[0].timestamp_secs, 901);
    assert!(!alerts[0].resolved);
}

#[test]
fn escalation_to_high_raises_no_second_alert() {
    let mut h = Harness::new();
    h.ignite();
    h.run_secs(1300);
    assert_eq!(h.app.state().risk_level, RiskLevel::High);
    assert_eq!(h.app.alerts().len(), 1);
}

#[test]
fn geofence_alert_is_away_from_home() {
    let mut h = Harness::new();
    h.ignite();
    h.set_at_home(false);
    h.run_secs(10);
    let alerts = h.app.alerts();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].kind, AlertKind::AwayFromHome);
    assert_eq!(alerts[0].severity, RiskLevel::High);
}

#[test]
fn returning_to_low_rearms_alerting() {
    let mut h = Harness::new();
    h.ignite();
    h.set_at_home(false);
    h.run_secs(1);
    h.set_at_home(true);
    h.run_secs(1);
    h.set_at_home(false);
    h.run_secs(1);
    assert_eq!(h.app.alerts().len(), 2);
}

#[test]
fn quiet_hours_record_silenced_alerts() {
    let env = MockEnv::new();
    env.set_hour(Some(23));
    let mut h = Harness::with(SystemConfig::default(), env);
    h.app.update_config(
        &RuleConfigPatch {
            quiet_hours: Some(Some(QuietHours {
                start_hour: 22,
                end_hour: 7,
            })),
            ..Default::default()
        },
        &h.env,
        &mut h.sink,
    );
    h.ignite();
    h.set_at_home(false);
    h.run_secs(1);

    let alerts = h.app.alerts();
    assert_eq!(alerts.len(), 1);
    assert!(alerts[0].silenced);
    assert_eq!(h.app.unresolved_alert_count(), 1);
}

#[test]
fn unknown_hour_never_silences() {
    let env = MockEnv::new();
    env.set_hour(None);
    let mut h = Harness::with(SystemConfig::default(), env);
    h.app.update_config(
        &RuleConfigPatch {
            quiet_hours: Some(Some(QuietHours {
                start_hour: 0,
                end_hour: 23,
            })),
            ..Default::default()
        },
        &h.env,
        &mut h.sink,
    );
    h.ignite();
    h.set_at_home(false);
    h.run_secs(1);
    assert!(!h.app.alerts()[0].silenced);
}

#[test]
fn resolve_clears_badge_but_keeps_alert() {
    let mut h = Harness::new();
    h.ignite();
    h.set_at_home(false);
    h.run_secs(1);
    let id = h.app.alerts()[0].id;

    h.app
        .handle_command(AppCommand::ResolveAlert(id), &h.env, &mut h.sink)
        .unwrap();
    assert_eq!(h.app.unresolved_alert_count(), 0);
    assert_eq!(h.app.alerts().len(), 1);
    assert!(h.app.alerts()[0].resolved);
    assert_eq!(h.sink.count(|e| matches!(e, AppEvent::AlertResolved(_))), 1);

    // Unknown ids are ignored.
    h.app
        .handle_command(AppCommand::ResolveAlert(99), &h.env, &mut h.sink)
        .unwrap();
    assert_eq!(h.sink.count(|e| matches!(e, AppEvent::AlertResolved(_))), 1);
}

#[test]
fn alert_generation_can_be_turned_off() {
    let config = SystemConfig {
        alert_on_risk_edge: false,
        ..Default::default()
    };
    let mut h = Harness::with(config, MockEnv::new());
    h.ignite();
    h.set_at_home(false);
    h.run_secs(5);
    assert_eq!(h.app.state().risk_level, RiskLevel::High);
    assert!(h.app.alerts().is_empty());
    assert_eq!(h.sink.count(|e| matches!(e, AppEvent::AlertRaised(_))), 0);
}

#[test]
fn late_poll_keeps_tick_timestamps() {
    let mut h = Harness::new();
    h.ignite();
    h.env.advance_ms(2_000_000);
    assert_eq!(h.app.poll(&mut h.env, &mut h.sink), 2000);

    let alerts = h.app.alerts();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].kind, AlertKind::Inactivity);
    assert_eq!(alerts[0].timestamp_secs, 901);
}

#[test]
fn raised_alert_is_logged_in_history() {
    let mut h = Harness::new();
    h.ignite();
    h.run_secs(1300);

    let alert_entries: Vec<_> = h
        .app
        .history()
        .recent()
        .filter(|e| e.action == HistoryAction::Alert)
        .collect();
    assert_eq!(alert_entries.len(), 1);
    assert_eq!(alert_entries[0].icon, IconHint::Alert);
    assert_eq!(alert_entries[0].timestamp_secs, 901);
    assert_eq!(alert_entries[0].details.as_str(), "no movement near the stove");
}
