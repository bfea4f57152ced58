// Pump clock over the esp-hal timebase.
//
// now_ms truncates the 64-bit microsecond uptime to 32-bit
// milliseconds; the pump saturates across the ~49 day wrap.

use esp_hal::delay::Delay;
use esp_hal::time::Instant;
use glance_ui::pump::Clock;

pub struct HalClock {
    delay: Delay,
}

impl HalClock {
    pub fn new() -> Self {
        Self {
            delay: Delay::new(),
        }
    }
}

impl Default for HalClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for HalClock {
    fn now_ms(&self) -> u32 {
        Instant::now().duration_since_epoch().as_millis() as u32
    }

    fn sleep_ms(&mut self, ms: u32) {
        self.delay.delay_millis(ms);
    }
}
