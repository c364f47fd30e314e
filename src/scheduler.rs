//! Tick scheduler.
//!
//! A single cancellable periodic timer that drives the burner tick. The
//! timer is keyed by a [`TickKey`]: the snapshot of every input the tick
//! depends on. Whenever the key changes the timer is torn down and armed
//! again from scratch, so a tick never runs against stale inputs.
//!
//! ```text
//!   service mutation ──▶ sync(key, now)
//!                          │
//!            key == armed? ├── yes ──▶ Unchanged (phase kept)
//!                          │
//!                          ├── key.is_on  ──▶ teardown + arm  (next = now + period)
//!                          └── !key.is_on ──▶ teardown        (no-op if idle)
//!
//!   poll ──▶ pop_due(now) ──▶ Some(deadline) ──▶ tick at deadline ──┐
//!              ▲                                                   │
//!              └───────────────────────────────────────────────────┘
//! ```
//!
//! There is only ever one slot, so re-arming cannot leave a second timer
//! running alongside the first.

use serde::{Deserialize, Serialize};

use crate::config::RuleConfig;
use log::{debug, info};

// ═══════════════════════════════════════════════════════════════
//  Quiet hours
// ═══════════════════════════════════════════════════════════════

/// Time-of-day restriction (quiet hours).
/// During quiet hours, raised alerts are recorded but silenced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuietHours {
    /// Start hour (0-23 inclusive).  E.g. 3 = 3 AM.
    pub start_hour: u8,
    /// End hour (0-23, exclusive).  E.g. 6 = 6 AM.
    pub end_hour: u8,
}

impl QuietHours {
    /// Check if the given hour is within quiet hours.
    pub fn is_quiet(&self, hour: u8) -> bool {
        if self.start_hour <= self.end_hour {
            // e.g., 3..6
            hour >= self.start_hour && hour < self.end_hour
        } else {
            // e.g., 23..7 (wraps around midnight)
            hour >= self.start_hour || hour < self.end_hour
        }
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tick key
// ═══════════════════════════════════════════════════════════════

/// Everything the tick closure depends on. A change to any field
/// re-arms the timer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickKey {
    pub is_on: bool,
    pub is_in_use: bool,
    pub at_home: bool,
    pub rules: RuleConfig,
}

/// What [`TickScheduler::sync`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Key unchanged; the running timer (or its absence) is kept as is.
    Unchanged,
    /// A timer was armed where none was running.
    Armed,
    /// The running timer was torn down and a fresh one armed.
    Rearmed,
    /// The running timer was torn down and not replaced.
    Disarmed,
    /// Nothing was running and nothing needs to run.
    Idle,
}

// ═══════════════════════════════════════════════════════════════
//  Scheduler engine
// ═══════════════════════════════════════════════════════════════

/// Internal bookkeeping for the live timer.
#[derive(Debug, Clone, Copy)]
struct ArmedTimer {
    /// Monotonic time (ms) at which the next tick is due.
    next_due_ms: u64,
    /// Arm counter value when this timer was created.
    generation: u64,
}

/// The single-slot tick scheduler.
pub struct TickScheduler {
    period_ms: u64,
    /// Key the current slot was last synced against.
    key: Option<TickKey>,
    slot: Option<ArmedTimer>,
    /// Incremented on every arm; identifies the live timer.
    generation: u64,
}

impl TickScheduler {
    pub fn new(period_ms: u32) -> Self {
        Self {
            period_ms: u64::from(period_ms.max(1)),
            key: None,
            slot: None,
            generation: 0,
        }
    }

    /// Bring the timer in line with `key`.
    ///
    /// Same key as last time: nothing happens. Different key: the current
    /// timer (if any) is torn down, and a new one is armed when the
    /// burner is on.
    pub fn sync(&mut self, key: TickKey, now_ms: u64) -> SyncOutcome {
        if self.key == Some(key) {
            return SyncOutcome::Unchanged;
        }
        self.key = Some(key);

        let had_timer = self.teardown();
        if key.is_on {
            self.arm(now_ms);
            if had_timer {
                SyncOutcome::Rearmed
            } else {
                SyncOutcome::Armed
            }
        } else if had_timer {
            SyncOutcome::Disarmed
        } else {
            SyncOutcome::Idle
        }
    }

    /// Tear down the timer unconditionally. A no-op when nothing is armed.
    pub fn cancel(&mut self) {
        self.teardown();
        self.key = None;
    }

    /// Take the oldest deadline at or before `now_ms`, if any, and move
    /// the timer on by one period. Call until `None` to catch up; each
    /// missed period comes back once, carrying its own deadline.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<u64> {
        let timer = self.slot.as_mut()?;
        if timer.next_due_ms > now_ms {
            return None;
        }
        let due = timer.next_due_ms;
        timer.next_due_ms += self.period_ms;
        Some(due)
    }

    /// Whether a timer is currently armed.
    pub fn is_armed(&self) -> bool {
        self.slot.is_some()
    }

    /// Identity of the live timer, `None` when disarmed.
    pub fn generation(&self) -> Option<u64> {
        self.slot.map(|t| t.generation)
    }

    // ── Internal ──────────────────────────────────────────────

    fn arm(&mut self, now_ms: u64) {
        self.generation += 1;
        self.slot = Some(ArmedTimer {
            next_due_ms: now_ms + self.period_ms,
            generation: self.generation,
        });
        info!(
            "Scheduler: tick timer #{} armed ({} ms)",
            self.generation, self.period_ms
        );
    }

    /// Returns `true` if a timer was running.
    fn teardown(&mut self) -> bool {
        match self.slot.take() {
            Some(t) => {
                debug!("Scheduler: tick timer #{} torn down", t.generation);
                true
            }
            None => false,
        }
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════
