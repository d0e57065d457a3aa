//! Resistive soil-moisture probe with a comparator (digital) output.
//!
//! The probe is powered from two GPIOs and only for the few seconds it
//! takes to sample.  Powered continuously it corrodes its electrodes and
//! draws ~7 mA against ~7 µA for the whole board asleep.
//!
//! ## Sample protocol
//!
//! 1. Power and ground lines → outputs.
//! 2. Ground LOW, power HIGH.
//! 3. Wait the settle delay; the output is noisy while the probe's
//!    capacitance charges.
//! 4. Data line → input, then read it.
//! 5. Power LOW, then float power and ground.
//!
//! A disconnected probe reads as a fixed level and cannot be told apart
//! from a real reading.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::PinState;

use crate::app::ports::PinPort;
use crate::config::ControllerConfig;
use crate::error::{Error, PinError, Result};
use crate::pins::Line;

/// One probe reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoilReading {
    /// Below the comparator threshold: needs water.
    Dry,
    Wet,
}

impl SoilReading {
    /// Interpret the data-line level.
    pub const fn from_level(high: bool, dry_when_high: bool) -> Self {
        if high == dry_when_high {
            Self::Dry
        } else {
            Self::Wet
        }
    }

    pub const fn is_dry(self) -> bool {
        matches!(self, Self::Dry)
    }
}

pub struct MoistureSensor {
    settle_ms: u32,
    dry_when_high: bool,
}

impl MoistureSensor {
    pub fn new(settle_ms: u32, dry_when_high: bool) -> Self {
        Self {
            settle_ms,
            dry_when_high,
        }
    }

    pub fn from_config(config: &ControllerConfig) -> Self {
        Self::new(config.sensor_settle_ms, config.sensor_dry_when_high)
    }

    /// Power the probe, let it settle, read it, and power it down again.
    ///
    /// Power and ground are floated on every path, including when an
    /// earlier step failed.  No state is kept between calls.
    pub fn sample(&self, hw: &mut (impl PinPort + DelayNs)) -> Result<SoilReading> {
        let reading = self.powered_read(hw);
        let released = Self::power_down(hw);

        let reading = reading.map_err(Error::Sensor)?;
        released.map_err(Error::Sensor)?;
        Ok(reading)
    }

    fn powered_read(&self, hw: &mut (impl PinPort + DelayNs)) -> core::result::Result<SoilReading, PinError> {
        hw.set_output(Line::SensorPower)?;
        hw.set_output(Line::SensorGround)?;
        hw.set_level(Line::SensorGround, PinState::Low)?;
        hw.set_level(Line::SensorPower, PinState::High)?;

        hw.delay_ms(self.settle_ms);

        hw.set_floating(Line::SensorData)?;
        let high = hw.is_high(Line::SensorData)?;
        Ok(SoilReading::from_level(high, self.dry_when_high))
    }

    fn power_down(hw: &mut impl PinPort) -> core::result::Result<(), PinError> {
        let off = hw.set_level(Line::SensorPower, PinState::Low);
        let power = hw.set_floating(Line::SensorPower);
        let ground = hw.set_floating(Line::SensorGround);
        off.and(power).and(ground)
    }
}
