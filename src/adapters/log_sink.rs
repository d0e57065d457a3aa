//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing controller events to the ESP-IDF
//! logger (UART / USB-CDC).

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started => info!("START | cycle running"),
            AppEvent::SoilChecked(reading) => info!("SOIL  | {:?}", reading),
            AppEvent::Watered { secs } => info!("PUMP  | ran {}s", secs),
            AppEvent::Fault(e) => warn!("FAULT | {}", e),
        }
    }
}
