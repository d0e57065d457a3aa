//! Controller configuration.
//!
//! Everything here is fixed at build time; there is no runtime
//! configuration source and nothing is persisted.  [`ControllerConfig`]
//! bundles the constants so the controller can be exercised with other
//! values on the host.

use embedded_hal::digital::PinState;
use serde::Serialize;

// --- Schedule ---

/// Wake cycles between soil checks.  With the 8 s sleep quantum, 450
/// wakes is one hour.
pub const CHECK_INTERVAL_WAKES: u16 = 450;

// --- Pump ---

/// Seconds the pump runs when the soil reads dry.
pub const PUMP_RUN_SECS: u16 = 15;
/// Seconds the pump runs once at power-up (priming / self-test).
pub const PRIME_RUN_SECS: u16 = 2;
/// Relay wiring on this build.
pub const RELAY_POLARITY: RelayPolarity = RelayPolarity::ActiveHigh;

// --- Moisture probe ---

/// Time the probe needs after power-up before its output is stable.
pub const SENSOR_SETTLE_MS: u32 = 2_000;
/// Comparator output is HIGH when the soil is dry.
pub const SENSOR_DRY_WHEN_HIGH: bool = true;

// --- Heartbeat ---

/// Indicator flash on every wake.
pub const HEARTBEAT_PULSE_MS: u32 = 30;
/// Indicator flash once at power-up.
pub const STARTUP_PULSE_MS: u32 = 1_000;

// --- Sleep ---

/// Power down the analog peripherals (ADC) during sleep.
pub const SLEEP_ANALOG_OFF: bool = true;

const _: () = assert!(PUMP_RUN_SECS > 0, "pump run must be non-zero");
const _: () = assert!(PRIME_RUN_SECS <= PUMP_RUN_SECS, "prime run longer than a watering");
const _: () = assert!(SENSOR_SETTLE_MS > 0, "probe needs a settle delay");
const _: () = assert!(HEARTBEAT_PULSE_MS < STARTUP_PULSE_MS);

/// Logic level that switches the relay on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RelayPolarity {
    /// Relay module input wired straight to the GPIO; LOW energises the coil.
    ActiveLow,
    /// Relay coil switched by an NPN transistor; HIGH energises the coil.
    ActiveHigh,
}

impl RelayPolarity {
    /// Level that turns the pump on.
    pub const fn on_level(self) -> PinState {
        match self {
            Self::ActiveLow => PinState::Low,
            Self::ActiveHigh => PinState::High,
        }
    }

    /// Level that turns the pump off.
    pub const fn off_level(self) -> PinState {
        match self {
            Self::ActiveLow => PinState::High,
            Self::ActiveHigh => PinState::Low,
        }
    }
}

/// Controller parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ControllerConfig {
    /// Wake cycles between soil checks (0 and 1 both mean every wake).
    pub check_interval_wakes: u16,
    /// Pump run per dry reading, in seconds.
    pub pump_run_secs: u16,
    /// Pump run at power-up, in seconds.
    pub prime_run_secs: u16,
    pub relay_polarity: RelayPolarity,
    /// Probe settle delay, in milliseconds.
    pub sensor_settle_ms: u32,
    /// Whether a HIGH data line means dry soil.
    pub sensor_dry_when_high: bool,
    /// Heartbeat flash per wake, in milliseconds.
    pub heartbeat_pulse_ms: u32,
    /// Heartbeat flash at power-up, in milliseconds.
    pub startup_pulse_ms: u32,
    pub sleep_analog_off: bool,
}

impl ControllerConfig {
    /// The build-time configuration.
    pub const DEFAULT: Self = Self {
        check_interval_wakes: CHECK_INTERVAL_WAKES,
        pump_run_secs: PUMP_RUN_SECS,
        prime_run_secs: PRIME_RUN_SECS,
        relay_polarity: RELAY_POLARITY,
        sensor_settle_ms: SENSOR_SETTLE_MS,
        sensor_dry_when_high: SENSOR_DRY_WHEN_HIGH,
        heartbeat_pulse_ms: HEARTBEAT_PULSE_MS,
        startup_pulse_ms: STARTUP_PULSE_MS,
        sleep_analog_off: SLEEP_ANALOG_OFF,
    };
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
