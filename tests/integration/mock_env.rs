//! Mock environment for integration tests.
//!
//! `MockEnv` is a manual clock plus a scripted noise source; `MockSink`
//! records every event so tests can assert on the full event history.

use gassafe::app::events::AppEvent;
use gassafe::app::ports::{ClockPort, EntropyPort, EventSink};
use gassafe::app::service::AppService;
use gassafe::config::SystemConfig;
use std::cell::Cell;
use std::collections::VecDeque;

// ── MockEnv ───────────────────────────────────────────────────

pub struct MockEnv {
    now_ms: Cell<u64>,
    hour: Cell<Option<u8>>,
    /// Rolls handed out in order; `fallback` once exhausted.
    script: VecDeque<f32>,
    fallback: f32,
}

#[allow(dead_code)]
impl MockEnv {
    pub fn new() -> Self {
        Self {
            now_ms: Cell::new(0),
            hour: Cell::new(Some(12)),
            script: VecDeque::new(),
            fallback: 0.5,
        }
    }

    pub fn with_rolls(rolls: &[f32], fallback: f32) -> Self {
        Self {
            script: rolls.iter().copied().collect(),
            fallback,
            ..Self::new()
        }
    }

    pub fn set_hour(&self, hour: Option<u8>) {
        self.hour.set(hour);
    }

    pub fn advance_ms(&self, ms: u64) {
        self.now_ms.set(self.now_ms.get() + ms);
    }
}

impl ClockPort for MockEnv {
    fn now_ms(&self) -> u64 {
        self.now_ms.get()
    }
    fn current_hour(&self) -> Option<u8> {
        self.hour.get()
    }
}

impl EntropyPort for MockEnv {
    fn roll(&mut self) -> f32 {
        self.script.pop_front().unwrap_or(self.fallback)
    }
}

// ── MockSink ──────────────────────────────────────────────────

pub struct MockSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl MockSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl EventSink for MockSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── Harness ───────────────────────────────────────────────────

pub struct Harness {
    pub app: AppService,
    pub env: MockEnv,
    pub sink: MockSink,
}

#[allow(dead_code)]
impl Harness {
    pub fn new() -> Self {
        Self::with(SystemConfig::default(), MockEnv::new())
    }

    pub fn with(config: SystemConfig, env: MockEnv) -> Self {
        let mut app = AppService::new(config);
        let mut sink = MockSink::new();
        app.start(&env, &mut sink);
        Self { app, env, sink }
    }

    /// Advance one simulated second at a time, polling after each.
    pub fn run_secs(&mut self, secs: u32) {
        for _ in 0..secs {
            self.env.advance_ms(1000);
            self.app.poll(&mut self.env, &mut self.sink);
        }
    }

    pub fn ignite(&mut self) {
        self.app
            .toggle_ignition(&self.env, &mut self.sink)
            .expect("ignition should be allowed");
    }

    pub fn set_at_home(&mut self, at_home: bool) {
        self.app.set_at_home(at_home, &self.env, &mut self.sink);
    }

    pub fn set_in_use(&mut self, in_use: bool) {
        self.app.set_in_use(in_use, &self.env, &mut self.sink);
    }
}
