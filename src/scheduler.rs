//! Wake-cycle scheduler.
//!
//! The sleep primitive only sleeps for one fixed quantum, so longer check
//! intervals are built by counting wakes.  The counter lives in
//! [`WakeScheduler`], owned by the controller; the decision itself is the
//! pair of pure functions [`is_check_due`] and [`advance`].
//!
//! ```text
//!  wake ─▶ count + 1 ─▶ >= interval? ──yes──▶ count = 0, check soil
//!                             │
//!                             no ──▶ count = count + 1
//! ```
//!
//! Only comparisons are used, so an interval of 0 or 1 simply makes every
//! wake a check wake.

use log::debug;

/// Whether `wakes` counted wakes satisfy `interval`.
pub const fn is_check_due(wakes: u16, interval: u16) -> bool {
    wakes >= interval
}

/// Count one wake on top of `count`.
///
/// Returns the counter to store and whether this wake is a check wake.
/// When a check is due the counter resets to 0 in the same step.
pub const fn advance(count: u16, interval: u16) -> (u16, bool) {
    let wakes = count.saturating_add(1);
    if is_check_due(wakes, interval) {
        (0, true)
    } else {
        (wakes, false)
    }
}

/// Wake counter with a fixed check interval.
#[derive(Debug, Clone)]
pub struct WakeScheduler {
    interval: u16,
    count: u16,
}

impl WakeScheduler {
    pub const fn new(interval: u16) -> Self {
        Self { interval, count: 0 }
    }

    /// Register one wake.  Returns `true` when the soil should be checked.
    pub fn on_wake(&mut self) -> bool {
        let (next, due) = advance(self.count, self.interval);
        self.count = next;
        if !due {
            debug!("Scheduler: wake {}/{}", self.count, self.interval);
        }
        due
    }

    /// Wakes counted since the last check.
    pub fn count(&self) -> u16 {
        self.count
    }

    pub fn interval(&self) -> u16 {
        self.interval
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════
