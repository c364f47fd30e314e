//! Clock adapters.
//!
//! - [`SystemClock`] reads `std::time`: monotonic milliseconds from an
//!   [`Instant`] taken at construction, hour-of-day from the UTC wall clock.
//! - [`SimClock`] is driven by hand. The demo binary and the tests use it
//!   to replay hours of burner time in microseconds.

use std::cell::Cell;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use crate::app::ports::ClockPort;

/// Host clock.
pub struct SystemClock {
    start: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl ClockPort for SystemClock {
    fn now_ms(&self) -> u64 {
        u64::try_from(self.start.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    /// UTC hour. `None` if the wall clock is before 2020-01-01.
    fn current_hour(&self) -> Option<u8> {
        const EPOCH_2020: u64 = 1_577_836_800;
        let secs = SystemTime::now().duration_since(UNIX_EPOCH).ok()?.as_secs();
        if secs < EPOCH_2020 {
            return None;
        }
        u8::try_from((secs % 86_400) / 3600).ok()
    }
}

/// Manually advanced clock.
#[derive(Debug, Default)]
pub struct SimClock {
    now_ms: Cell<u64>,
    hour: Cell<Option<u8>>,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward.
    pub fn advance_ms(&self, ms: u64) {
        self.now_ms.set(self.now_ms.get().saturating_add(ms));
    }

    pub fn advance_secs(&self, secs: u64) {
        self.advance_ms(secs.saturating_mul(1000));
    }

    /// Pin the reported hour-of-day. `None` means "unknown".
    pub fn set_hour(&self, hour: Option<u8>) {
        self.hour.set(hour.map(|h| h % 24));
    }
}

impl ClockPort for SimClock {
    fn now_ms(&self) -> u64 {
        self.now_ms.get()
    }

    fn current_hour(&self) -> Option<u8> {
        self.hour.get()
    }
}
