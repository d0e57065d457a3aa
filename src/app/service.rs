//! The controller, one wake cycle at a time.
//!
//! ```text
//!  power-up ─▶ long flash ─▶ float data line ─▶ prime pump
//!                                                   │
//!        ┌──────────────────────────────────────────┘
//!        ▼
//!  ┌─▶ short flash ─▶ check due? ──yes──▶ sample ──dry──▶ water
//!  │                     │                  │wet            │
//!  │                     no                 ▼               ▼
//!  └──────────── sleep one quantum ◀────────────────────────┘
//! ```
//!
//! Everything runs on the caller's thread.  The only suspension point is
//! the sleep at the end of [`Controller::cycle`]; every other wait is a
//! blocking delay on the injected clock.

use embedded_hal::delay::DelayNs;
use log::{debug, info, warn};

use crate::config::ControllerConfig;
use crate::drivers::heartbeat::HeartbeatIndicator;
use crate::drivers::pump::PumpActuator;
use crate::error::Error;
use crate::pins::Line;
use crate::scheduler::WakeScheduler;
use crate::sensors::moisture::{MoistureSensor, SoilReading};

use super::events::AppEvent;
use super::ports::{EventSink, PinPort, SleepPort, SleepRequest};

/// What one wake did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleReport {
    /// Wake counter after this wake (0 on a check wake).
    pub wake_count: u16,
    /// Set when the soil was checked and the sample succeeded.
    pub reading: Option<SoilReading>,
    /// The pump ran to completion.
    pub watered: bool,
}

/// Owns the wake counter and the three components.
pub struct Controller {
    config: ControllerConfig,
    scheduler: WakeScheduler,
    sensor: MoistureSensor,
    pump: PumpActuator,
    heartbeat: HeartbeatIndicator,
}

impl Controller {
    pub fn new(config: ControllerConfig) -> Self {
        Self {
            scheduler: WakeScheduler::new(config.check_interval_wakes),
            sensor: MoistureSensor::from_config(&config),
            pump: PumpActuator::new(config.relay_polarity),
            heartbeat: HeartbeatIndicator::new(),
            config,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Power-up sequence: long flash, data line to input, prime the pump.
    ///
    /// The prime run happens on every power-up regardless of the soil;
    /// the probe is not read here.
    pub fn start(&mut self, hw: &mut (impl PinPort + DelayNs), sink: &mut impl EventSink) {
        info!(
            "Controller: starting (check every {} wakes, water {}s, {:?})",
            self.config.check_interval_wakes, self.config.pump_run_secs, self.config.relay_polarity
        );

        if let Err(e) = self.heartbeat.pulse(hw, self.config.startup_pulse_ms) {
            Self::absorb(e, hw, sink);
        }

        if let Err(e) = hw.set_floating(Line::SensorData) {
            Self::absorb(Error::Sensor(e), hw, sink);
        }

        info!("Controller: priming pump for {}s", self.config.prime_run_secs);
        if let Err(e) = self.pump.run(hw, self.config.prime_run_secs) {
            Self::absorb(e, hw, sink);
        }

        sink.emit(&AppEvent::Started);
    }

    // ── Per-wake orchestration ────────────────────────────────

    /// Steps 1–4 of a wake: flash, count, and check/water when due.
    ///
    /// Failures are logged, reported as [`AppEvent::Fault`] and absorbed;
    /// the counter advances regardless.
    pub fn on_wake(
        &mut self,
        hw: &mut (impl PinPort + DelayNs),
        sink: &mut impl EventSink,
    ) -> CycleReport {
        if let Err(e) = self.heartbeat.pulse(hw, self.config.heartbeat_pulse_ms) {
            Self::absorb(e, hw, sink);
        }

        let mut report = CycleReport {
            wake_count: 0,
            reading: None,
            watered: false,
        };

        if self.scheduler.on_wake() {
            match self.sensor.sample(hw) {
                Ok(reading) => {
                    info!("Controller: soil {:?}", reading);
                    sink.emit(&AppEvent::SoilChecked(reading));
                    report.reading = Some(reading);

                    if reading.is_dry() {
                        report.watered = self.water(hw, sink);
                    }
                }
                Err(e) => Self::absorb(e, hw, sink),
            }
        }

        report.wake_count = self.scheduler.count();
        report
    }

    /// One full wake cycle: [`on_wake`](Self::on_wake), then sleep one quantum.
    pub fn cycle(
        &mut self,
        hw: &mut (impl PinPort + DelayNs),
        sleeper: &mut impl SleepPort,
        sink: &mut impl EventSink,
    ) -> CycleReport {
        let report = self.on_wake(hw, sink);
        self.sleep(hw, sleeper, sink);
        report
    }

    /// Cycle forever.  Only a reset or power loss leaves this loop.
    pub fn run(
        &mut self,
        hw: &mut (impl PinPort + DelayNs),
        sleeper: &mut impl SleepPort,
        sink: &mut impl EventSink,
    ) -> ! {
        loop {
            self.cycle(hw, sleeper, sink);
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Wakes counted since the last soil check.
    pub fn wake_count(&self) -> u16 {
        self.scheduler.count()
    }

    // ── Internal ──────────────────────────────────────────────

    fn water(&self, hw: &mut (impl PinPort + DelayNs), sink: &mut impl EventSink) -> bool {
        let secs = self.config.pump_run_secs;
        info!("Controller: watering for {}s", secs);
        match self.pump.run(hw, secs) {
            Ok(()) => {
                sink.emit(&AppEvent::Watered { secs });
                true
            }
            Err(e) => {
                Self::absorb(e, hw, sink);
                false
            }
        }
    }

    fn sleep(
        &self,
        hw: &mut (impl PinPort + DelayNs),
        sleeper: &mut impl SleepPort,
        sink: &mut impl EventSink,
    ) {
        let request = SleepRequest {
            quantum: sleeper.quantum(),
            analog_off: self.config.sleep_analog_off,
            // The detector is compiled out (sdkconfig.defaults).
            brown_out_off: true,
        };
        debug!("Controller: sleeping {:?}", request.quantum);

        if let Err(e) = sleeper.enter_low_power_sleep(request) {
            let err = Error::from(e);
            warn!("Controller: {}, waiting out the quantum awake", err);
            sink.emit(&AppEvent::Fault(err));
            hw.delay_ms(request.quantum.as_millis() as u32);
        }
    }

    /// Report a failed operation and make sure nothing is left driven.
    fn absorb(err: Error, hw: &mut impl PinPort, sink: &mut impl EventSink) {
        warn!("Controller: {}, skipped this cycle", err);
        sink.emit(&AppEvent::Fault(err));

        if let Err(e) = hw.release_all() {
            let err = Error::Release(e);
            warn!("Controller: {}", err);
            sink.emit(&AppEvent::Fault(err));
        }
    }
}
