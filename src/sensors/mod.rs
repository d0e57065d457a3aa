//! Sensor drivers.

pub mod moisture;
