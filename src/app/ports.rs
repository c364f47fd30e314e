//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (clock, noise source, event sinks) implement these
//! traits. The [`AppService`](super::service::AppService) consumes them via
//! generics, so the domain core never reads the system clock or a global
//! RNG directly.

// ───────────────────────────────────────────────────────────────
// Clock port (driven adapter: time → domain)
// ───────────────────────────────────────────────────────────────

/// Monotonic time and hour-of-day.
pub trait ClockPort {
    /// Milliseconds since an arbitrary fixed origin (monotonic).
    fn now_ms(&self) -> u64;

    /// Current hour-of-day (0-23), or `None` if wall-clock time is unknown.
    fn current_hour(&self) -> Option<u8>;

    /// Whole seconds since the origin.
    fn uptime_secs(&self) -> u64 {
        self.now_ms() / 1000
    }
}

// ───────────────────────────────────────────────────────────────
// Entropy port (driven adapter: randomness → domain)
// ───────────────────────────────────────────────────────────────

/// Source of the per-tick temperature noise.
pub trait EntropyPort {
    /// A uniform sample in `[0, 1)`.
    fn roll(&mut self) -> f32;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / UI)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port. Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
