//! GPIO / peripheral pin assignments for the AdaptiLight lamp board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Ambient light sensor (photoresistor divider)
// ---------------------------------------------------------------------------

/// LDR voltage divider — analog input. ADC1 channel 0 (GPIO 36 on ESP32).
pub const LIGHT_ADC_GPIO: i32 = 36;

// ---------------------------------------------------------------------------
// LED output
// ---------------------------------------------------------------------------

/// Main LED — LEDC PWM output.
pub const LED_GPIO: i32 = 21;

// ---------------------------------------------------------------------------
// Capacitive touch input
// ---------------------------------------------------------------------------

/// Touch pad 0 (GPIO 4 on ESP32) — mode-cycle input.
pub const TOUCH_PAD_NUM: u32 = 0;

// ---------------------------------------------------------------------------
// PWM configuration
// ---------------------------------------------------------------------------

/// LEDC base frequency for the LED (5 kHz — flicker-free, 8-bit duty).
pub const LED_PWM_FREQ_HZ: u32 = 5_000;
