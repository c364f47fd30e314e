//! GasSafe: headless demo.
//!
//! Replays a scripted evening in the kitchen on a simulated clock and
//! prints the final state, alerts and ignition history as JSON.
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                  Adapters (outer ring)                    │
//! │                                                           │
//! │  SimClock       RngEntropy       LogEventSink             │
//! │  (ClockPort)    (EntropyPort)    (EventSink)              │
//! │                                                           │
//! │  ──────────────── Port Trait Boundary ─────────────────   │
//! │                                                           │
//! │  ┌─────────────────────────────────────────────────────┐  │
//! │  │           AppService (pure logic)                   │  │
//! │  │  FSM · Risk · Alerts · History · TickScheduler      │  │
//! │  └─────────────────────────────────────────────────────┘  │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! `RUST_LOG` controls verbosity (default `info`). Set `GASSAFE_SEED` to
//! replay a different temperature walk.
#![deny(unused_must_use)]

use anyhow::{Context, Result};
use log::info;
use serde::Serialize;

use gassafe::adapters::clock::SimClock;
use gassafe::adapters::entropy::RngEntropy;
use gassafe::adapters::log_sink::LogEventSink;
use gassafe::alerts::Alert;
use gassafe::app::commands::AppCommand;
use gassafe::app::events::{AppEvent, TelemetryData};
use gassafe::app::ports::{ClockPort, EntropyPort, EventSink};
use gassafe::app::service::AppService;
use gassafe::config::{Step, SystemConfig, TimedRule};
use gassafe::history::HistoryEvent;

const DEFAULT_SEED: u64 = 0x6a5_5afe;

/// Clock and noise bundled so the service can borrow both at once.
struct SimEnv {
    clock: SimClock,
    entropy: RngEntropy<rand::rngs::StdRng>,
}

impl ClockPort for SimEnv {
    fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    fn current_hour(&self) -> Option<u8> {
        self.clock.current_hour()
    }
}

impl EntropyPort for SimEnv {
    fn roll(&mut self) -> f32 {
        self.entropy.roll()
    }
}

/// Final export.
#[derive(Serialize)]
struct Snapshot<'a> {
    telemetry: TelemetryData,
    config: SystemConfig,
    alerts: &'a [Alert],
    history: Vec<&'a HistoryEvent>,
}

struct Demo {
    app: AppService,
    env: SimEnv,
    sink: LogEventSink,
    telemetry_every: u64,
    telemetry_counter: u64,
}

impl Demo {
    /// Advance simulated time second by second, running due ticks and
    /// emitting telemetry on the configured interval.
    fn run_for(&mut self, secs: u64) {
        for _ in 0..secs {
            self.env.clock.advance_secs(1);
            self.app.poll(&mut self.env, &mut self.sink);

            self.telemetry_counter += 1;
            if self.telemetry_counter >= self.telemetry_every {
                self.telemetry_counter = 0;
                let t = self.app.build_telemetry();
                self.sink.emit(&AppEvent::Telemetry(t));
            }
        }
    }

    fn command(&mut self, cmd: AppCommand) {
        if let Err(e) = self.app.handle_command(cmd, &self.env.clock, &mut self.sink) {
            info!("Command {:?} refused: {}", cmd, e);
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init()
        .context("logger init")?;

    info!("GasSafe simulator v{}", env!("CARGO_PKG_VERSION"));

    let seed = match std::env::var("GASSAFE_SEED") {
        Ok(s) => s.parse().context("GASSAFE_SEED must be an unsigned integer")?,
        Err(_) => DEFAULT_SEED,
    };
    info!("Temperature walk seed: {seed}");

    let config = SystemConfig::default();
    let clock = SimClock::new();
    clock.set_hour(Some(19));

    let mut demo = Demo {
        app: AppService::new(config),
        env: SimEnv {
            clock,
            entropy: RngEntropy::from_seed(seed),
        },
        sink: LogEventSink::new(),
        telemetry_every: u64::from(config.telemetry_interval_secs.max(1)),
        telemetry_counter: 0,
    };
    demo.app.start(&demo.env.clock, &mut demo.sink);

    // Dinner on the stove, nobody watching: rule A fires after 15 min.
    demo.command(AppCommand::ToggleIgnition);
    demo.run_for(u64::from(config.rules.rule_a_secs()) + 1);

    // Owner leaves the house with the burner still lit.
    demo.command(AppCommand::SetAtHome(false));
    demo.run_for(5);

    // Remote shut-off from the app, then a refused re-ignition.
    demo.command(AppCommand::ToggleIgnition);
    demo.command(AppCommand::ToggleIgnition);

    // Back home, tighten rule A and cook while standing at the stove.
    demo.command(AppCommand::SetAtHome(true));
    demo.command(AppCommand::StepRule(TimedRule::A, Step::Down));
    demo.command(AppCommand::SetInUse(true));
    demo.command(AppCommand::ToggleIgnition);
    demo.run_for(120);
    demo.command(AppCommand::ToggleIgnition);

    let first_unresolved = demo.app.alerts().iter().find(|a| !a.resolved).map(|a| a.id);
    if let Some(id) = first_unresolved {
        demo.command(AppCommand::ResolveAlert(id));
    }

    let snapshot = Snapshot {
        telemetry: demo.app.build_telemetry(),
        config: demo.app.current_config(),
        alerts: demo.app.alerts(),
        history: demo.app.history().recent().collect(),
    };
    let json = serde_json::to_string_pretty(&snapshot).context("snapshot export")?;
    println!("{json}");

    info!(
        "Done: {} ticks, {} alert(s) unresolved",
        demo.app.tick_count(),
        demo.app.unresolved_alert_count()
    );
    Ok(())
}
