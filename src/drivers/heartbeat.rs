//! Heartbeat LED.
//!
//! A short flash on every wake says "alive", nothing more.  A long flash
//! marks power-up.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::PinState;

use crate::app::ports::PinPort;
use crate::error::{Error, PinError, Result};
use crate::pins::Line;

pub struct HeartbeatIndicator;

impl HeartbeatIndicator {
    pub fn new() -> Self {
        Self
    }

    /// Light the LED for `ms` milliseconds, then float its line.
    pub fn pulse(&self, hw: &mut (impl PinPort + DelayNs), ms: u32) -> Result<()> {
        let lit = Self::light(hw, ms);
        let off = hw.set_level(Line::Heartbeat, PinState::Low);
        let released = hw.set_floating(Line::Heartbeat);

        lit.and(off).and(released).map_err(Error::Heartbeat)
    }

    fn light(hw: &mut (impl PinPort + DelayNs), ms: u32) -> core::result::Result<(), PinError> {
        hw.set_output(Line::Heartbeat)?;
        hw.set_level(Line::Heartbeat, PinState::High)?;
        hw.delay_ms(ms);
        Ok(())
    }
}

impl Default for HeartbeatIndicator {
    fn default() -> Self {
        Self::new()
    }
}
