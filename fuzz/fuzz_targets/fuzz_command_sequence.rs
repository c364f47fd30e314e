//! Fuzz target: command and time interleavings
//!
//! Decodes the input as a stream of one-byte opcodes (plus an argument
//! byte where needed) and drives an `AppService` on a simulated clock:
//! - No panics under arbitrary input
//! - Burner off implies risk LOW and zero elapsed time
//! - Temperature never exceeds 280 °C
//! - Tick timer armed exactly while the burner is on
//!
//! cargo fuzz run fuzz_command_sequence

#![no_main]

use std::cell::Cell;

use gassafe::app::commands::AppCommand;
use gassafe::app::events::AppEvent;
use gassafe::app::ports::{ClockPort, EntropyPort, EventSink};
use gassafe::app::service::AppService;
use gassafe::config::{RuleConfigPatch, Step, SystemConfig, TimedRule};
use gassafe::risk::RiskLevel;
use libfuzzer_sys::fuzz_target;

struct FuzzEnv {
    now: Cell<u64>,
    roll: f32,
}

impl ClockPort for FuzzEnv {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
    fn current_hour(&self) -> Option<u8> {
        Some((self.now.get() / 3_600_000 % 24) as u8)
    }
}

impl EntropyPort for FuzzEnv {
    fn roll(&mut self) -> f32 {
        self.roll
    }
}

struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: &AppEvent) {}
}

fuzz_target!(|data: &[u8]| {
    let mut app = AppService::new(SystemConfig::default());
    let mut env = FuzzEnv {
        now: Cell::new(0),
        roll: 0.5,
    };
    let mut sink = NullSink;
    app.start(&env, &mut sink);

    let mut bytes = data.iter().copied();
    while let Some(op) = bytes.next() {
        let arg = bytes.next().unwrap_or(0);
        let cmd = match op % 9 {
            0 => Some(AppCommand::ToggleIgnition),
            1 => Some(AppCommand::SetAtHome(arg & 1 == 1)),
            2 => Some(AppCommand::SetInUse(arg & 1 == 1)),
            3 => Some(AppCommand::ToggleAtHome),
            4 => Some(AppCommand::UpdateConfig(RuleConfigPatch {
                rule_a_minutes: Some(u32::from(arg)),
                ..Default::default()
            })),
            5 => Some(AppCommand::StepRule(
                if arg & 1 == 0 { TimedRule::A } else { TimedRule::B },
                if arg & 2 == 0 { Step::Up } else { Step::Down },
            )),
            6 => Some(AppCommand::ResolveAlert(u32::from(arg))),
            7 => {
                env.roll = f32::from(arg) / 256.0;
                None
            }
            _ => {
                // Up to ~70 min of burner time per opcode.
                env.now.set(env.now.get() + u64::from(arg) * 16_000);
                app.poll(&mut env, &mut sink);
                None
            }
        };
        if let Some(cmd) = cmd {
            let _ = app.handle_command(cmd, &env, &mut sink);
        }

        let s = app.state();
        if !s.is_on {
            assert_eq!(s.risk_level, RiskLevel::Low);
            assert_eq!(s.time_on_secs, 0);
        }
        assert!(s.temperature_c <= 280.0);
        assert_eq!(app.is_timer_armed(), s.is_on);
    }
});
