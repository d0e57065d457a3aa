//! Board adapter: GPIO lines and the blocking clock behind the domain ports.
//!
//! This is the only module that touches GPIO.  On non-espidf targets the
//! `hw_init` helpers run against an in-memory pin model and delays use
//! `std::thread::sleep`.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::PinState;

use crate::app::ports::PinPort;
use crate::drivers::hw_init;
use crate::error::{PinError, PinOp};
use crate::pins::Line;

/// Concrete adapter for the irrigator board.
pub struct BoardAdapter {
    _private: (),
}

impl BoardAdapter {
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl Default for BoardAdapter {
    fn default() -> Self {
        Self::new()
    }
}

// ── PinPort implementation ────────────────────────────────────

impl PinPort for BoardAdapter {
    fn set_output(&mut self, line: Line) -> Result<(), PinError> {
        hw_init::gpio_make_output(line.gpio())
            .map_err(|rc| PinError::new(line, PinOp::ConfigureOutput, rc))
    }

    fn set_level(&mut self, line: Line, level: PinState) -> Result<(), PinError> {
        hw_init::gpio_write(line.gpio(), level == PinState::High)
            .map_err(|rc| PinError::new(line, PinOp::Write, rc))
    }

    fn set_floating(&mut self, line: Line) -> Result<(), PinError> {
        hw_init::gpio_make_floating(line.gpio())
            .map_err(|rc| PinError::new(line, PinOp::ConfigureInput, rc))
    }

    /// `gpio_get_level` has no error return, so reads never fail here.
    fn is_high(&mut self, line: Line) -> Result<bool, PinError> {
        Ok(hw_init::gpio_read(line.gpio()))
    }
}

// ── DelayNs implementation ────────────────────────────────────

#[cfg(target_os = "espidf")]
impl DelayNs for BoardAdapter {
    fn delay_ns(&mut self, ns: u32) {
        esp_idf_hal::delay::Ets::delay_us(ns.div_ceil(1_000));
    }

    fn delay_us(&mut self, us: u32) {
        esp_idf_hal::delay::Ets::delay_us(us);
    }

    fn delay_ms(&mut self, ms: u32) {
        // Yields to FreeRTOS instead of spinning.
        esp_idf_hal::delay::FreeRtos::delay_ms(ms);
    }
}

#[cfg(not(target_os = "espidf"))]
impl DelayNs for BoardAdapter {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(std::time::Duration::from_nanos(u64::from(ns)));
    }

    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(std::time::Duration::from_millis(u64::from(ms)));
    }
}
