//! PWM LED driver.
//!
//! Drives the main LED through the LEDC channel configured in `hw_init`.
//! Duty is 8-bit, applied directly — brightness policy lives in the
//! control layer, not here.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: writes the real LEDC duty register via hw_init.
//! On host/test: tracks the last level in-memory only.

use crate::drivers::hw_init;

pub struct PwmLed {
    level: u8,
}

impl Default for PwmLed {
    fn default() -> Self {
        Self::new()
    }
}

impl PwmLed {
    pub fn new() -> Self {
        Self { level: 0 }
    }

    /// Push a brightness level (0–255) to the LED.
    pub fn set(&mut self, level: u8) {
        hw_init::ledc_set(hw_init::LEDC_CH_LED, level);
        self.level = level;
    }

    /// Last level pushed to the hardware.
    pub fn level(&self) -> u8 {
        self.level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_last_level() {
        let mut led = PwmLed::new();
        assert_eq!(led.level(), 0);
        led.set(128);
        assert_eq!(led.level(), 128);
        led.set(0);
        assert_eq!(led.level(), 0);
    }
}
