//! Application core: the wake/check/water/sleep cycle.
//!
//! All interaction with hardware happens through the **port traits** in
//! [`ports`], keeping this layer fully testable without real peripherals.

pub mod events;
pub mod ports;
pub mod service;
