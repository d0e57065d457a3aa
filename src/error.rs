//! Error types for the irrigator firmware.
//!
//! The control cycle is open-loop, so the only failures it can observe are
//! the platform refusing a pin or sleep call.  Each component wraps the
//! failing [`PinError`] in its own [`Error`] variant so the log says which
//! operation was cut short.  All variants are `Copy`.

use core::fmt;

use crate::pins::Line;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The moisture sample protocol failed.
    Sensor(PinError),
    /// The pump drive protocol failed.
    Pump(PinError),
    /// The heartbeat pulse failed.
    Heartbeat(PinError),
    /// Floating all lines before sleep failed.
    Release(PinError),
    /// The low-power sleep primitive refused to sleep.
    Sleep(SleepError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Pump(e) => write!(f, "pump: {e}"),
            Self::Heartbeat(e) => write!(f, "heartbeat: {e}"),
            Self::Release(e) => write!(f, "release: {e}"),
            Self::Sleep(e) => write!(f, "sleep: {e}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<SleepError> for Error {
    fn from(e: SleepError) -> Self {
        Self::Sleep(e)
    }
}

// ---------------------------------------------------------------------------
// Pin errors
// ---------------------------------------------------------------------------

/// The pin primitive that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinOp {
    ConfigureOutput,
    ConfigureInput,
    Write,
    /// Only from ports whose reads can fail; ESP-IDF GPIO reads cannot.
    Read,
}

impl fmt::Display for PinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigureOutput => write!(f, "configure output"),
            Self::ConfigureInput => write!(f, "configure input"),
            Self::Write => write!(f, "write"),
            Self::Read => write!(f, "read"),
        }
    }
}

/// A pin call rejected by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinError {
    pub line: Line,
    pub op: PinOp,
    /// Raw platform return code (`esp_err_t` on ESP-IDF).
    pub code: i32,
}

impl PinError {
    pub const fn new(line: Line, op: PinOp, code: i32) -> Self {
        Self { line, op, code }
    }
}

impl fmt::Display for PinError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} failed on {:?} (GPIO {}, rc={})",
            self.op,
            self.line,
            self.line.gpio(),
            self.code
        )
    }
}

// ---------------------------------------------------------------------------
// Sleep errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SleepError {
    /// Arming the wake-up timer failed.
    WakeupConfigFailed(i32),
    /// The sleep call returned without sleeping.
    Rejected(i32),
    /// The request asked to keep brown-out detection on, but this build
    /// has no detector to keep on.
    BrownOutDetectorUnavailable,
}

impl fmt::Display for SleepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WakeupConfigFailed(rc) => write!(f, "timer wakeup config failed (rc={rc})"),
            Self::Rejected(rc) => write!(f, "sleep rejected (rc={rc})"),
            Self::BrownOutDetectorUnavailable => {
                write!(f, "brown-out detector is disabled in this build")
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
