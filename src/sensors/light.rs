//! Ambient light sensor driver (photoresistor divider).
//!
//! Reads the divider voltage through an ESP32 ADC channel.  Readings are
//! raw 12-bit counts (0–4095); interpretation lives in the control layer.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads ADC1_CH0 via the oneshot API (initialised by hw_init).
//! On host/test: reads instance-held injected values.

use crate::error::SensorError;

pub struct LightSensor {
    _adc_gpio: i32,
    #[cfg(not(target_os = "espidf"))]
    sim_raw: u16,
    #[cfg(not(target_os = "espidf"))]
    sim_fault: bool,
}

impl LightSensor {
    pub fn new(adc_gpio: i32) -> Self {
        Self {
            _adc_gpio: adc_gpio,
            #[cfg(not(target_os = "espidf"))]
            sim_raw: 0,
            #[cfg(not(target_os = "espidf"))]
            sim_fault: false,
        }
    }

    /// Latest ambient light level, clamped to the 12-bit range.
    pub fn read(&mut self) -> Result<u16, SensorError> {
        Ok(self.read_adc()?.min(4095))
    }

    #[cfg(target_os = "espidf")]
    fn read_adc(&self) -> Result<u16, SensorError> {
        crate::drivers::hw_init::adc1_read(crate::drivers::hw_init::ADC1_CH_LIGHT)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_adc(&self) -> Result<u16, SensorError> {
        if self.sim_fault {
            return Err(SensorError::AdcReadFailed);
        }
        Ok(self.sim_raw)
    }

    // ── Simulation hooks (host tests) ─────────────────────────

    #[cfg(not(target_os = "espidf"))]
    pub fn sim_set_raw(&mut self, raw: u16) {
        self.sim_raw = raw;
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn sim_set_fault(&mut self, fault: bool) {
        self.sim_fault = fault;
    }
}
