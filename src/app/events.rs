//! Outbound application events.
//!
//! The [`Controller`](super::service::Controller) emits these through the
//! [`EventSink`](super::ports::EventSink) port.

use crate::error::Error;
use crate::sensors::moisture::SoilReading;

/// Structured events emitted by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// The power-up sequence finished; the wake cycle starts next.
    Started,

    /// A scheduled soil check produced a reading.
    SoilChecked(SoilReading),

    /// The pump ran for `secs` seconds.
    Watered { secs: u16 },

    /// An operation failed and was abandoned for this cycle.
    Fault(Error),
}
