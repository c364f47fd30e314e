//! Application service: the hexagonal core.
//!
//! [`AppService`] is the stove risk simulator. It owns the burner FSM, the
//! shared stove context, the tick scheduler, the alert supervisor and the
//! two append-only logs. It exposes a hardware-agnostic API; time, noise
//! and event delivery are injected through port traits at call sites.
//!
//! ```text
//!   ClockPort ───▶ ┌──────────────────────────────┐ ──▶ EventSink
//!                  │          AppService          │
//! EntropyPort ───▶ │ FSM · Risk · Alerts · Sched  │
//!                  └──────────────────────────────┘
//! ```
//!
//! Every mutation that touches a tick dependency (burner on/off, either
//! presence signal, the rules) finishes by re-syncing the scheduler, so
//! the next tick always sees the current inputs.

use log::{debug, info};

use crate::alerts::{Alert, AlertLog, AlertSupervisor};
use crate::config::{RuleConfig, RuleConfigPatch, Step, SystemConfig, TimedRule};
use crate::error::{IgnitionBlocked, Result};
use crate::fsm::context::{StoveContext, StoveState};
use crate::fsm::states::build_state_table;
use crate::fsm::{Fsm, StateId};
use crate::history::{HistoryAction, HistoryLog, REMOTE_ACTION_DETAILS};
use crate::risk::RiskLevel;
use crate::scheduler::{SyncOutcome, TickKey, TickScheduler};

use super::commands::AppCommand;
use super::events::{AppEvent, TelemetryData, format_elapsed};
use super::ports::{ClockPort, EntropyPort, EventSink};

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct AppService {
    fsm: Fsm,
    ctx: StoveContext,
    scheduler: TickScheduler,
    supervisor: AlertSupervisor,
    alerts: AlertLog,
    history: HistoryLog,
    /// Non-rule settings. The live rules are in `ctx.rules`.
    config: SystemConfig,
    tick_count: u64,
}

impl AppService {
    /// Construct the service from configuration.
    ///
    /// Does **not** start the FSM. Call [`start`](Self::start) next.
    pub fn new(mut config: SystemConfig) -> Self {
        config.rules.normalize();
        let ctx = StoveContext::new(config.rules);
        let fsm = Fsm::new(build_state_table(), StateId::Off);

        Self {
            fsm,
            ctx,
            scheduler: TickScheduler::new(config.tick_interval_ms),
            supervisor: AlertSupervisor::new(),
            alerts: AlertLog::new(),
            history: HistoryLog::new(),
            config,
            tick_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Start the FSM in its initial state (burner off).
    pub fn start(&mut self, clock: &impl ClockPort, sink: &mut impl EventSink) {
        self.fsm.start(&mut self.ctx);
        self.resync(clock.now_ms());
        sink.emit(&AppEvent::Started(self.state()));
        info!("AppService started in {:?}", self.fsm.current_state());
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run every tick that has fallen due since the last poll.
    /// Returns the number of ticks executed.
    ///
    /// A late poll replays each missed period in order, and each replayed
    /// tick is stamped with its own deadline rather than the poll time.
    pub fn poll(
        &mut self,
        env: &mut (impl ClockPort + EntropyPort),
        sink: &mut impl EventSink,
    ) -> u32 {
        let now_ms = env.now_ms();
        let mut ran = 0u32;
        while let Some(due_ms) = self.scheduler.pop_due(now_ms) {
            self.tick_at(due_ms, env, sink);
            ran = ran.saturating_add(1);
        }
        ran
    }

    /// Run one tick now: roll noise → FSM → risk bookkeeping.
    ///
    /// Normally driven by [`poll`](Self::poll). Calling it while the burner
    /// is off is harmless: the `Off` handler advances nothing.
    pub fn tick(&mut self, env: &mut (impl ClockPort + EntropyPort), sink: &mut impl EventSink) {
        let now_ms = env.now_ms();
        self.tick_at(now_ms, env, sink);
    }

    fn tick_at(
        &mut self,
        at_ms: u64,
        env: &mut (impl ClockPort + EntropyPort),
        sink: &mut impl EventSink,
    ) {
        self.tick_count += 1;
        let prev = self.ctx.risk_level();

        self.ctx.drift_roll = env.roll();
        self.fsm.tick(&mut self.ctx);

        self.after_risk_update(prev, at_ms / 1000, env.current_hour(), sink);
    }

    // ── Operations ────────────────────────────────────────────

    /// Light or extinguish the burner.
    ///
    /// Lighting is refused with [`IgnitionBlocked::AwayFromHome`] while the
    /// owner is away and conditional ignition is on. Extinguishing always
    /// succeeds.
    pub fn toggle_ignition(
        &mut self,
        clock: &impl ClockPort,
        sink: &mut impl EventSink,
    ) -> Result<()> {
        let turning_on = !self.ctx.burner.is_on;

        if turning_on && !self.ctx.signals.at_home && self.ctx.rules.conditional_ignition {
            let reason = IgnitionBlocked::AwayFromHome;
            info!("Ignition {reason}");
            sink.emit(&AppEvent::IgnitionBlocked(reason));
            return Err(reason.into());
        }

        let prev = self.ctx.risk_level();
        let next = self.fsm.current_state().toggled();
        self.fsm.force_transition(next, &mut self.ctx);

        let action = if turning_on {
            HistoryAction::On
        } else {
            HistoryAction::Off
        };
        let entry = self
            .history
            .record(clock.uptime_secs(), action, REMOTE_ACTION_DETAILS);
        sink.emit(&AppEvent::IgnitionChanged(entry));

        self.after_risk_update(prev, clock.uptime_secs(), clock.current_hour(), sink);
        self.resync(clock.now_ms());
        Ok(())
    }

    /// Inject the geofence signal. Effective from the next tick.
    pub fn set_at_home(&mut self, at_home: bool, clock: &impl ClockPort, sink: &mut impl EventSink) {
        if self.ctx.signals.set_at_home(at_home) {
            info!("SIGNAL | at_home={at_home}");
            self.emit_signals(sink);
        }
        self.resync(clock.now_ms());
    }

    /// Flip the geofence signal.
    pub fn toggle_at_home(&mut self, clock: &impl ClockPort, sink: &mut impl EventSink) {
        let flipped = !self.ctx.signals.at_home;
        self.set_at_home(flipped, clock, sink);
    }

    /// Inject the motion signal. Effective from the next tick.
    pub fn set_in_use(&mut self, in_use: bool, clock: &impl ClockPort, sink: &mut impl EventSink) {
        if self.ctx.signals.set_in_use(in_use) {
            info!("SIGNAL | in_use={in_use}");
            self.emit_signals(sink);
        }
        self.resync(clock.now_ms());
    }

    /// Apply a partial rule update. Out-of-range minutes are clamped.
    pub fn update_config(
        &mut self,
        patch: &RuleConfigPatch,
        clock: &impl ClockPort,
        sink: &mut impl EventSink,
    ) {
        let mut rules = self.ctx.rules;
        rules.apply(patch);
        self.replace_rules(rules, clock, sink);
    }

    /// Move one rule threshold by one 5-minute step.
    pub fn step_rule(
        &mut self,
        rule: TimedRule,
        step: Step,
        clock: &impl ClockPort,
        sink: &mut impl EventSink,
    ) {
        let mut rules = self.ctx.rules;
        rules.step(rule, step);
        self.replace_rules(rules, clock, sink);
    }

    /// Mark an alert resolved. Unknown ids are a logged no-op.
    pub fn resolve_alert(&mut self, id: u32, sink: &mut impl EventSink) -> bool {
        let resolved = self.alerts.resolve(id);
        if resolved {
            sink.emit(&AppEvent::AlertResolved(id));
        }
        resolved
    }

    // ── Command handling ──────────────────────────────────────

    /// Process an external command from the presentation layer.
    pub fn handle_command(
        &mut self,
        cmd: AppCommand,
        clock: &impl ClockPort,
        sink: &mut impl EventSink,
    ) -> Result<()> {
        match cmd {
            AppCommand::ToggleIgnition => return self.toggle_ignition(clock, sink),
            AppCommand::SetAtHome(at_home) => self.set_at_home(at_home, clock, sink),
            AppCommand::ToggleAtHome => self.toggle_at_home(clock, sink),
            AppCommand::SetInUse(in_use) => self.set_in_use(in_use, clock, sink),
            AppCommand::UpdateConfig(patch) => self.update_config(&patch, clock, sink),
            AppCommand::StepRule(rule, step) => self.step_rule(rule, step, clock, sink),
            AppCommand::ResolveAlert(id) => {
                self.resolve_alert(id, sink);
            }
        }
        Ok(())
    }

    // ── Queries ───────────────────────────────────────────────

    /// Read-only snapshot of the stove.
    pub fn state(&self) -> StoveState {
        self.ctx.snapshot()
    }

    /// Current burner FSM state.
    pub fn burner_state(&self) -> StateId {
        self.fsm.current_state()
    }

    /// Live rule configuration.
    pub fn rules(&self) -> RuleConfig {
        self.ctx.rules
    }

    /// Full configuration including the live rules.
    pub fn current_config(&self) -> SystemConfig {
        SystemConfig {
            rules: self.ctx.rules,
            ..self.config
        }
    }

    /// Every alert raised since startup, oldest first.
    pub fn alerts(&self) -> &[Alert] {
        self.alerts.all()
    }

    /// Badge count.
    pub fn unresolved_alert_count(&self) -> usize {
        self.alerts.unresolved_count()
    }

    /// Ignition and alert log.
    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    /// Total ticks executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Whether the tick timer is running.
    pub fn is_timer_armed(&self) -> bool {
        self.scheduler.is_armed()
    }

    /// Identity of the running tick timer, `None` when disarmed.
    pub fn timer_generation(&self) -> Option<u64> {
        self.scheduler.generation()
    }

    /// Build a telemetry snapshot from the current context.
    pub fn build_telemetry(&self) -> TelemetryData {
        TelemetryData {
            state: self.state(),
            elapsed: format_elapsed(self.ctx.burner.time_on_secs),
            unresolved_alerts: self.alerts.unresolved_count(),
            total_ticks: self.tick_count,
        }
    }

    // ── Internal ──────────────────────────────────────────────

    /// Emit risk changes and raise an alert on a `Low -> elevated` edge.
    /// `at_secs` is the uptime of the tick that produced the current risk.
    fn after_risk_update(
        &mut self,
        prev: RiskLevel,
        at_secs: u64,
        hour: Option<u8>,
        sink: &mut impl EventSink,
    ) {
        let now = self.ctx.burner.risk;

        if now.level != prev {
            match now.decided_by {
                Some(rule) => info!("RISK | {prev} -> {} ({rule})", now.level),
                None => info!("RISK | {prev} -> {}", now.level),
            }
            sink.emit(&AppEvent::RiskChanged {
                from: prev,
                to: now.level,
            });
        }

        // The supervisor must see every level, even with alerts disabled,
        // so its edge tracking stays in step with the burner.
        let Some(edge) = self.supervisor.observe(&now) else {
            return;
        };
        if !self.config.alert_on_risk_edge {
            return;
        }
        let silenced = match (self.ctx.rules.quiet_hours, hour) {
            (Some(q), Some(hour)) => q.is_quiet(hour),
            _ => false,
        };
        let alert = self.alerts.raise(edge, at_secs, silenced);
        self.history.record(at_secs, HistoryAction::Alert, alert.kind);
        sink.emit(&AppEvent::AlertRaised(alert));
    }

    fn replace_rules(&mut self, rules: RuleConfig, clock: &impl ClockPort, sink: &mut impl EventSink) {
        if rules != self.ctx.rules {
            self.ctx.rules = rules;
            info!(
                "Configuration updated: rule A {} min, rule B {} min, conditional ignition {}",
                rules.rule_a_minutes, rules.rule_b_minutes, rules.conditional_ignition
            );
            sink.emit(&AppEvent::ConfigUpdated(rules));
        }
        self.resync(clock.now_ms());
    }

    fn emit_signals(&self, sink: &mut impl EventSink) {
        sink.emit(&AppEvent::SignalsChanged {
            is_in_use: self.ctx.signals.is_in_use,
            at_home: self.ctx.signals.at_home,
        });
    }

    /// Tear down and re-arm the tick timer if any dependency changed.
    fn resync(&mut self, now_ms: u64) {
        let key = TickKey {
            is_on: self.ctx.burner.is_on,
            is_in_use: self.ctx.signals.is_in_use,
            at_home: self.ctx.signals.at_home,
            rules: self.ctx.rules,
        };
        match self.scheduler.sync(key, now_ms) {
            SyncOutcome::Unchanged | SyncOutcome::Idle => {}
            outcome => debug!("Tick timer {outcome:?} at {now_ms} ms"),
        }
    }
}
