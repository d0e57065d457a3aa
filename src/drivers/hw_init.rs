//! Raw GPIO helpers and one-shot boot configuration.
//!
//! Thin wrappers over the ESP-IDF `gpio_*` calls, returning the raw
//! `esp_err_t` on failure.  On the host the same functions drive an
//! in-memory model of the pins so adapters and tests run unchanged.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

use log::info;

use crate::pins::Line;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    GpioConfigFailed { gpio: i32, rc: i32 },
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::GpioConfigFailed { gpio, rc } => {
                write!(f, "GPIO {} config failed (rc={})", gpio, rc)
            }
        }
    }
}

impl std::error::Error for HwInitError {}

/// Put every controller line into the floating-input state.
///
/// Reset defaults differ per pin (some boot with pull-ups enabled), so
/// this runs once before the controller starts.
pub fn init_peripherals() -> Result<(), HwInitError> {
    for line in Line::ALL {
        let gpio = line.gpio();
        gpio_make_floating(gpio).map_err(|rc| HwInitError::GpioConfigFailed { gpio, rc })?;
    }
    info!("hw_init: {} lines floated", Line::ALL.len());
    Ok(())
}

// ── GPIO (ESP-IDF) ────────────────────────────────────────────

#[cfg(target_os = "espidf")]
fn check(ret: esp_err_t) -> Result<(), i32> {
    if ret == ESP_OK as i32 { Ok(()) } else { Err(ret) }
}

#[cfg(target_os = "espidf")]
pub fn gpio_make_output(pin: i32) -> Result<(), i32> {
    // SAFETY: direction change on a pin owned by this firmware; main task only.
    check(unsafe { gpio_set_direction(pin, gpio_mode_t_GPIO_MODE_OUTPUT) })
}

#[cfg(target_os = "espidf")]
pub fn gpio_make_floating(pin: i32) -> Result<(), i32> {
    // SAFETY: as above.  Input with both pulls disabled draws no current.
    unsafe {
        check(gpio_set_direction(pin, gpio_mode_t_GPIO_MODE_INPUT))?;
        check(gpio_set_pull_mode(pin, gpio_pull_mode_t_GPIO_FLOATING))
    }
}

#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) -> Result<(), i32> {
    // SAFETY: gpio_set_level only touches the output latch of `pin`.
    check(unsafe { gpio_set_level(pin, u32::from(high)) })
}

#[cfg(target_os = "espidf")]
pub fn gpio_read(pin: i32) -> bool {
    // SAFETY: read-only register access.
    (unsafe { gpio_get_level(pin) }) != 0
}

// ── GPIO (host simulation) ────────────────────────────────────

#[cfg(not(target_os = "espidf"))]
mod sim {
    use core::sync::atomic::{AtomicU64, Ordering};

    /// Bit per GPIO: set = output.
    static OUTPUTS: AtomicU64 = AtomicU64::new(0);
    /// Bit per GPIO: driven latch for outputs, external level for inputs.
    static LEVELS: AtomicU64 = AtomicU64::new(0);

    fn bit(pin: i32) -> u64 {
        1u64 << pin
    }

    pub fn set_output(pin: i32, output: bool) {
        if output {
            OUTPUTS.fetch_or(bit(pin), Ordering::Relaxed);
        } else {
            OUTPUTS.fetch_and(!bit(pin), Ordering::Relaxed);
        }
    }

    pub fn set_level(pin: i32, high: bool) {
        if high {
            LEVELS.fetch_or(bit(pin), Ordering::Relaxed);
        } else {
            LEVELS.fetch_and(!bit(pin), Ordering::Relaxed);
        }
    }

    pub fn is_output(pin: i32) -> bool {
        OUTPUTS.load(Ordering::Relaxed) & bit(pin) != 0
    }

    pub fn level(pin: i32) -> bool {
        LEVELS.load(Ordering::Relaxed) & bit(pin) != 0
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_make_output(pin: i32) -> Result<(), i32> {
    sim::set_output(pin, true);
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_make_floating(pin: i32) -> Result<(), i32> {
    sim::set_output(pin, false);
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(pin: i32, high: bool) -> Result<(), i32> {
    // The latch is written even on inputs, as on the real chip.
    sim::set_level(pin, high);
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_read(pin: i32) -> bool {
    sim::level(pin)
}

/// Drive the simulated external level of an input pin.
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_input_level(pin: i32, high: bool) {
    sim::set_level(pin, high);
}

/// Whether a simulated pin is currently configured as an output.
#[cfg(not(target_os = "espidf"))]
pub fn sim_is_output(pin: i32) -> bool {
    sim::is_output(pin)
}
