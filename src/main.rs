//! Irrigator firmware entry point.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  Adapters (outer ring)                   │
//! │                                                          │
//! │  BoardAdapter        LightSleepAdapter    LogEventSink   │
//! │  (PinPort+DelayNs)   (SleepPort)          (EventSink)    │
//! │                                                          │
//! │  ─────────────── Port Trait Boundary ────────────────    │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────────┐  │
//! │  │  Controller: WakeScheduler · MoistureSensor ·      │  │
//! │  │              PumpActuator · HeartbeatIndicator     │  │
//! │  └────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::{Context, Result};
use log::info;

use irrigator::adapters::hardware::BoardAdapter;
use irrigator::adapters::log_sink::LogEventSink;
use irrigator::adapters::sleep::LightSleepAdapter;
use irrigator::app::ports::SleepPort;
use irrigator::app::service::Controller;
use irrigator::config::ControllerConfig;
use irrigator::drivers::hw_init;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("Irrigator v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Pins to the sleep-safe state ───────────────────────
    hw_init::init_peripherals().context("floating controller lines")?;

    // ── 3. Configuration (build-time only) ────────────────────
    let config = ControllerConfig::DEFAULT;
    info!("Config: {}", serde_json::to_string(&config)?);

    // ── 4. Adapters ───────────────────────────────────────────
    let mut board = BoardAdapter::new();
    let mut sleeper = LightSleepAdapter::new();
    let mut sink = LogEventSink::new();
    info!(
        "Sleep quantum {:?}, soil check every {:?}",
        sleeper.quantum(),
        sleeper.quantum() * u32::from(config.check_interval_wakes.max(1))
    );

    // ── 5. Power-up sequence, then cycle forever ──────────────
    let mut controller = Controller::new(config);
    controller.start(&mut board, &mut sink);
    controller.run(&mut board, &mut sleeper, &mut sink)
}
