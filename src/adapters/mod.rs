//! Adapters: concrete implementations of the port traits.
//!
//! | Adapter     | Implements        | Connects to                 |
//! |-------------|-------------------|-----------------------------|
//! | `hardware`  | PinPort, DelayNs  | ESP32 GPIO, FreeRTOS delay  |
//! | `log_sink`  | EventSink         | Serial log output           |
//! | `sleep`     | SleepPort         | ESP32 timer-woken sleep     |

pub mod hardware;
pub mod log_sink;
pub mod sleep;
