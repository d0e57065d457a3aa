//! Port traits: the boundary between the control cycle and the board.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ Controller (domain)
//! ```
//!
//! The board adapter implements [`PinPort`] together with
//! [`embedded_hal::delay::DelayNs`], so one `&mut` handle carries both the
//! lines and the clock into every component.  Tests substitute a mock that
//! advances simulated time instead of blocking.

use core::time::Duration;

use embedded_hal::digital::PinState;

use crate::error::{PinError, SleepError};
use crate::pins::Line;

// ───────────────────────────────────────────────────────────────
// Pin port (domain → GPIO)
// ───────────────────────────────────────────────────────────────

/// Runtime control of the five signal lines.
///
/// A line is either a driven output or a floating input.  Every line a
/// component drives must be floated again before the component returns.
pub trait PinPort {
    /// Configure `line` as a push-pull output.
    fn set_output(&mut self, line: Line) -> Result<(), PinError>;

    /// Drive an output line to `level`.
    fn set_level(&mut self, line: Line, level: PinState) -> Result<(), PinError>;

    /// Configure `line` as an input with no pull resistors (sleep-safe).
    fn set_floating(&mut self, line: Line) -> Result<(), PinError>;

    /// Sample the digital level of an input line.
    fn is_high(&mut self, line: Line) -> Result<bool, PinError>;

    /// Float every line.  Attempts all of them and returns the first error.
    fn release_all(&mut self) -> Result<(), PinError> {
        let mut first = Ok(());
        for line in Line::ALL {
            let res = self.set_floating(line);
            if first.is_ok() {
                first = res;
            }
        }
        first
    }
}

// ───────────────────────────────────────────────────────────────
// Sleep port (domain → low-power primitive)
// ───────────────────────────────────────────────────────────────

/// Arguments for one low-power sleep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SleepRequest {
    /// Sleep length; always the platform's [`SleepPort::quantum`].
    pub quantum: Duration,
    /// Power down the ADC while asleep.
    pub analog_off: bool,
    /// Disable the brown-out detector while asleep.  Adapters that cannot
    /// keep the detector running reject `false`.
    pub brown_out_off: bool,
}

/// The platform's deep/light sleep primitive.
///
/// The quantum belongs to the platform.  Longer intervals are built by
/// counting wakes, never by asking for a longer sleep.
pub trait SleepPort {
    /// The fixed sleep length this platform supports per call.
    fn quantum(&self) -> Duration;

    /// Block in the lowest-power state for about one quantum, then return.
    fn enter_low_power_sleep(&mut self, request: SleepRequest) -> Result<(), SleepError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (domain → logging)
// ───────────────────────────────────────────────────────────────

/// The controller reports what each cycle did through this port.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
