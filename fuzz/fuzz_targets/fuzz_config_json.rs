//! Fuzz target: configuration JSON
//!
//! Feeds arbitrary bytes to the `SystemConfig` / `RuleConfigPatch`
//! deserialisers. Whatever parses must be accepted by the service, and
//! rule minutes must land on the 5-minute grid afterwards.
//!
//! cargo fuzz run fuzz_config_json

#![no_main]

use std::cell::Cell;

use gassafe::app::events::AppEvent;
use gassafe::app::ports::{ClockPort, EventSink};
use gassafe::app::service::AppService;
use gassafe::config::{RuleConfigPatch, SystemConfig, clamp_rule_minutes};
use libfuzzer_sys::fuzz_target;

struct FixedClock(Cell<u64>);

impl ClockPort for FixedClock {
    fn now_ms(&self) -> u64 {
        self.0.get()
    }
    fn current_hour(&self) -> Option<u8> {
        None
    }
}

struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: &AppEvent) {}
}

fuzz_target!(|data: &[u8]| {
    if let Ok(config) = serde_json::from_slice::<SystemConfig>(data) {
        let _ = serde_json::to_vec(&config);
        let mut app = AppService::new(config);
        app.start(&FixedClock(Cell::new(0)), &mut NullSink);
    }

    if let Ok(patch) = serde_json::from_slice::<RuleConfigPatch>(data) {
        let clock = FixedClock(Cell::new(0));
        let mut app = AppService::new(SystemConfig::default());
        app.update_config(&patch, &clock, &mut NullSink);
        let rules = app.rules();
        assert_eq!(rules.rule_a_minutes, clamp_rule_minutes(rules.rule_a_minutes));
        assert_eq!(rules.rule_b_minutes, clamp_rule_minutes(rules.rule_b_minutes));
    }
});
