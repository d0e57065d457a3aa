//! Low-power sleep adapter.
//!
//! Timer-woken light sleep: RAM and the call stack survive, so execution
//! simply continues after [`SleepPort::enter_low_power_sleep`] returns.
//! Deep sleep would restart the firmware and lose the wake counter.
//!
//! - **`target_os = "espidf"`**: `esp_light_sleep_start()` with an RTC
//!   timer wakeup.
//! - **`not(target_os = "espidf")`**: `std::thread::sleep` for host runs.
//!
//! Brown-out detection is compiled out in `sdkconfig.defaults`
//! (`CONFIG_ESP_BROWNOUT_DET=n`), so it is off while asleep and awake
//! alike.  A request with `brown_out_off == false` cannot be honoured and is
//! rejected before any sleep configuration is touched.

use core::time::Duration;

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;
use log::debug;

use crate::app::ports::{SleepPort, SleepRequest};
use crate::error::SleepError;

/// Platform sleep quantum: the longest single sleep the wake timing is
/// built around.
pub const SLEEP_QUANTUM: Duration = Duration::from_secs(8);

pub struct LightSleepAdapter {
    analog_domain_off: Option<bool>,
}

impl LightSleepAdapter {
    pub fn new() -> Self {
        Self {
            analog_domain_off: None,
        }
    }

    fn check_request(request: &SleepRequest) -> Result<(), SleepError> {
        if request.brown_out_off {
            Ok(())
        } else {
            Err(SleepError::BrownOutDetectorUnavailable)
        }
    }

    #[cfg(target_os = "espidf")]
    fn configure_analog(&mut self, off: bool) -> Result<(), SleepError> {
        if self.analog_domain_off == Some(off) {
            return Ok(());
        }
        let option = if off {
            esp_sleep_pd_option_t_ESP_PD_OPTION_OFF
        } else {
            esp_sleep_pd_option_t_ESP_PD_OPTION_AUTO
        };
        // SAFETY: plain configuration call, main task only.
        let ret = unsafe { esp_sleep_pd_config(esp_sleep_pd_domain_t_ESP_PD_DOMAIN_RTC_PERIPH, option) };
        if ret != ESP_OK as i32 {
            return Err(SleepError::WakeupConfigFailed(ret));
        }
        self.analog_domain_off = Some(off);
        Ok(())
    }

    #[cfg(not(target_os = "espidf"))]
    fn configure_analog(&mut self, off: bool) -> Result<(), SleepError> {
        self.analog_domain_off = Some(off);
        Ok(())
    }
}

impl Default for LightSleepAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl SleepPort for LightSleepAdapter {
    fn quantum(&self) -> Duration {
        SLEEP_QUANTUM
    }

    #[cfg(target_os = "espidf")]
    fn enter_low_power_sleep(&mut self, request: SleepRequest) -> Result<(), SleepError> {
        Self::check_request(&request)?;
        self.configure_analog(request.analog_off)?;

        // SAFETY: timer wakeup and light sleep are called from the single
        // main task; no other task holds peripherals across the sleep.
        unsafe {
            let ret = esp_sleep_enable_timer_wakeup(request.quantum.as_micros() as u64);
            if ret != ESP_OK as i32 {
                return Err(SleepError::WakeupConfigFailed(ret));
            }
            debug!(
                "Sleep: light sleep for {:?} (analog_off={})",
                request.quantum, request.analog_off
            );
            let ret = esp_light_sleep_start();
            if ret != ESP_OK as i32 {
                return Err(SleepError::Rejected(ret));
            }
        }
        Ok(())
    }

    #[cfg(not(target_os = "espidf"))]
    fn enter_low_power_sleep(&mut self, request: SleepRequest) -> Result<(), SleepError> {
        Self::check_request(&request)?;
        self.configure_analog(request.analog_off)?;
        debug!("Sleep(sim): {:?}", request.quantum);
        std::thread::sleep(request.quantum);
        Ok(())
    }
}
