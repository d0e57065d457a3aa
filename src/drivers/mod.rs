//! Actuator drivers and raw GPIO helpers.

pub mod heartbeat;
pub mod hw_init;
pub mod pump;
