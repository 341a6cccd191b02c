//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns the light sensor and LED driver, exposing them through
//! [`SensorPort`] and [`LedPort`].  This is the only module in the
//! system that touches actual lamp hardware.  On non-espidf targets,
//! the underlying drivers use cfg-gated simulation stubs.

use log::warn;

use crate::app::ports::{LedPort, SensorPort};
use crate::drivers::led::PwmLed;
use crate::sensors::light::LightSensor;

/// Concrete adapter that combines the lamp hardware behind port traits.
pub struct HardwareAdapter {
    light: LightSensor,
    led: PwmLed,
}

impl HardwareAdapter {
    pub fn new(light: LightSensor, led: PwmLed) -> Self {
        Self { light, led }
    }

    /// Last brightness level pushed to the LED.
    pub fn led_level(&self) -> u8 {
        self.led.level()
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl SensorPort for HardwareAdapter {
    fn read_light(&mut self) -> u16 {
        // A faulty ADC reads as the darkest room, so the lamp fails
        // toward light rather than darkness.
        match self.light.read() {
            Ok(raw) => raw,
            Err(e) => {
                warn!("light sensor: {} — reading as 0", e);
                0
            }
        }
    }
}

// ── LedPort implementation ────────────────────────────────────

impl LedPort for HardwareAdapter {
    fn set_brightness(&mut self, level: u8) {
        self.led.set(level);
    }
}
