//! Ignition, thermal walk and rule-step behaviour through the harness.

use crate::mock_env::{Harness, MockEnv};
use gassafe::app::commands::AppCommand;
use gassafe::app::events::AppEvent;
use gassafe::config::{RuleConfigPatch, Step, SystemConfig, TimedRule};
use gassafe::history::{HistoryAction, IconHint};
use gassafe::risk::RiskLevel;

#[test]
fn scripted_rolls_drive_temperature() {
    // rise, fall, fall, rise
    let env = MockEnv::with_rolls(&[0.9, 0.1, 0.7, 0.71], 0.0);
    let mut h = Harness::with(SystemConfig::default(), env);
    h.ignite();
    h.run_secs(4);
    let t = h.app.state().temperature_c;
    // 30 + 0.2 - 0.1 - 0.1 + 0.2
    assert!((t - 30.2).abs() < 1e-4, "got {t}");
}

#[test]
fn roll_of_exactly_0_7_falls() {
    let env = MockEnv::with_rolls(&[0.7], 0.0);
    let mut h = Harness::with(SystemConfig::default(), env);
    h.ignite();
    h.run_secs(1);
    assert!(h.app.state().temperature_c < 30.0);
}

#[test]
fn reignition_restarts_elapsed_time() {
    let mut h = Harness::new();
    h.ignite();
    h.run_secs(600);
    h.ignite(); // off
    h.ignite(); // on again
    assert_eq!(h.app.state().time_on_secs, 0);
    h.run_secs(600);
    assert_eq!(h.app.state().risk_level, RiskLevel::Low);
}

#[test]
fn history_entries_carry_icons() {
    let mut h = Harness::new();
    h.ignite();
    h.run_secs(3);
    h.ignite();
    let recent: Vec<_> = h.app.history().recent().collect();
    assert_eq!(recent[0].action, HistoryAction::Off);
    assert_eq!(recent[0].icon, IconHint::PowerOff);
    assert_eq!(recent[1].action, HistoryAction::On);
    assert_eq!(recent[1].icon, IconHint::Flame);
    assert_eq!(recent[0].id, 2);
}

#[test]
fn rule_step_shifts_medium_threshold() {
    let mut h = Harness::new();
    h.app
        .handle_command(AppCommand::StepRule(TimedRule::A, Step::Down), &h.env, &mut h.sink)
        .unwrap();
    assert_eq!(h.app.rules().rule_a_minutes, 10);

    h.ignite();
    h.run_secs(600);
    assert_eq!(h.app.state().risk_level, RiskLevel::Low);
    h.run_secs(1);
    assert_eq!(h.app.state().risk_level, RiskLevel::Medium);
}

#[test]
fn rule_step_never_goes_below_five() {
    let mut h = Harness::new();
    for _ in 0..10 {
        h.app
            .handle_command(AppCommand::StepRule(TimedRule::B, Step::Down), &h.env, &mut h.sink)
            .unwrap();
    }
    assert_eq!(h.app.rules().rule_b_minutes, 5);
}

#[test]
fn config_update_event_only_on_change() {
    let mut h = Harness::new();
    let same = RuleConfigPatch {
        rule_a_minutes: Some(15),
        ..Default::default()
    };
    h.app.update_config(&same, &h.env, &mut h.sink);
    assert_eq!(h.sink.count(|e| matches!(e, AppEvent::ConfigUpdated(_))), 0);

    let odd = RuleConfigPatch {
        rule_a_minutes: Some(17),
        ..Default::default()
    };
    h.app.update_config(&odd, &h.env, &mut h.sink);
    assert_eq!(h.app.rules().rule_a_minutes, 15);
    assert_eq!(h.sink.count(|e| matches!(e, AppEvent::ConfigUpdated(_))), 0);

    let longer = RuleConfigPatch {
        rule_b_minutes: Some(45),
        ..Default::default()
    };
    h.app.update_config(&longer, &h.env, &mut h.sink);
    assert_eq!(h.sink.count(|e| matches!(e, AppEvent::ConfigUpdated(_))), 1);
}

#[test]
fn rule_a_shorter_than_b_escalates_medium_then_high() {
    let mut h = Harness::new();
    h.ignite();
    h.run_secs(901);
    assert_eq!(h.app.state().risk_level, RiskLevel::Medium);
    h.run_secs(300);
    assert_eq!(h.app.state().risk_level, RiskLevel::High);

    let changes: Vec<_> = h
        .sink
        .events
        .iter()
        .filter_map(|e| match e {
            AppEvent::RiskChanged { from, to } => Some((*from, *to)),
            _ => None,
        })
        .collect();
    assert_eq!(
        changes,
        [
            (RiskLevel::Low, RiskLevel::Medium),
            (RiskLevel::Medium, RiskLevel::High)
        ]
    );
}

#[test]
fn presence_cannot_mask_geofence() {
    let mut h = Harness::new();
    h.ignite();
    h.set_in_use(true);
    h.set_at_home(false);
    h.run_secs(1);
    assert_eq!(h.app.state().risk_level, RiskLevel::High);
}
