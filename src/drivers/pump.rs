//! Water pump driver (relay).
//!
//! The pump is switched by a relay on [`Line::Relay`].  Two wirings are in
//! the field, see [`RelayPolarity`]:
//!
//! - relay module input straight on the GPIO (active LOW; the module's
//!   own pull-up keeps it off while the line floats),
//! - relay coil behind an NPN transistor (active HIGH; the base resistor
//!   pulls it off while the line floats).
//!
//! ## Safety contract
//!
//! A run always ends with the off level written and the line floated, even
//! if a pin call failed part way.  There is no feedback from the relay or
//! the pump; a run that reports `Ok` only means the GPIO did what it was
//! told.

use embedded_hal::delay::DelayNs;

use crate::app::ports::PinPort;
use crate::config::RelayPolarity;
use crate::error::{Error, PinError, Result};
use crate::pins::Line;

pub struct PumpActuator {
    polarity: RelayPolarity,
}

impl PumpActuator {
    pub fn new(polarity: RelayPolarity) -> Self {
        Self { polarity }
    }

    /// Run the pump for `secs` seconds, blocking the caller throughout.
    pub fn run(&self, hw: &mut (impl PinPort + DelayNs), secs: u16) -> Result<()> {
        let driven = self.drive(hw, secs);
        let stopped = self.stop(hw);

        driven.map_err(Error::Pump)?;
        stopped.map_err(Error::Pump)
    }

    fn drive(&self, hw: &mut (impl PinPort + DelayNs), secs: u16) -> core::result::Result<(), PinError> {
        hw.set_output(Line::Relay)?;
        hw.set_level(Line::Relay, self.polarity.on_level())?;
        hw.delay_ms(u32::from(secs) * 1_000);
        Ok(())
    }

    fn stop(&self, hw: &mut impl PinPort) -> core::result::Result<(), PinError> {
        let off = hw.set_level(Line::Relay, self.polarity.off_level());
        let released = hw.set_floating(Line::Relay);
        off.and(released)
    }
}
