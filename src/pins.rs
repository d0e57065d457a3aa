//! GPIO assignments for the irrigator board.
//!
//! Single source of truth: every component refers to a [`Line`] and this
//! module maps it to a physical GPIO.  No two lines share a GPIO.

// ---------------------------------------------------------------------------
// Pump relay
// ---------------------------------------------------------------------------

/// Digital output driving the relay (directly or through a transistor).
/// Active level depends on [`RELAY_POLARITY`](crate::config::RELAY_POLARITY).
pub const RELAY_GPIO: i32 = 4;

// ---------------------------------------------------------------------------
// Moisture probe
// ---------------------------------------------------------------------------

/// Digital output from the probe's comparator board.
pub const SENSOR_DATA_GPIO: i32 = 5;
/// Probe VCC, sourced from a GPIO so the probe is only powered while sampling.
pub const SENSOR_POWER_GPIO: i32 = 7;
/// Probe GND, sunk through a GPIO for the same reason.
pub const SENSOR_GROUND_GPIO: i32 = 8;

// ---------------------------------------------------------------------------
// Heartbeat LED
// ---------------------------------------------------------------------------

/// Discrete indicator LED, active HIGH.
pub const HEARTBEAT_LED_GPIO: i32 = 6;

/// Logical signal lines used by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Line {
    Relay,
    SensorData,
    Heartbeat,
    SensorPower,
    SensorGround,
}

impl Line {
    /// Every line, in a fixed order.
    pub const ALL: [Line; 5] = [
        Line::Relay,
        Line::SensorData,
        Line::Heartbeat,
        Line::SensorPower,
        Line::SensorGround,
    ];

    /// Physical GPIO number for this line.
    pub const fn gpio(self) -> i32 {
        match self {
            Line::Relay => RELAY_GPIO,
            Line::SensorData => SENSOR_DATA_GPIO,
            Line::Heartbeat => HEARTBEAT_LED_GPIO,
            Line::SensorPower => SENSOR_POWER_GPIO,
            Line::SensorGround => SENSOR_GROUND_GPIO,
        }
    }

    /// Position of this line in [`Line::ALL`].
    pub const fn index(self) -> usize {
        self as usize
    }
}
