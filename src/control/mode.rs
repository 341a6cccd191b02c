//! Operating modes and brightness derivation.
//!
//! The mode decides how the ambient light reading maps to LED brightness:
//! `Adaptive` inverts the 12-bit reading onto the 8-bit duty range, the
//! fixed modes ignore the reading entirely, and `Off` pins the output at
//! zero.  All functions here are pure — the controller holds only the
//! current mode.

/// ADC full scale (12-bit).
const READING_MAX: u32 = 4095;
/// LED duty full scale (8-bit).
const BRIGHTNESS_MAX: u32 = 255;

const BRIGHTNESS_DIM: u8 = 50;
const BRIGHTNESS_READ: u8 = 150;
const BRIGHTNESS_FULL: u8 = 255;

/// The lamp's operating mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatingMode {
    /// Brightness tracks ambient light inversely (dark room = bright LED).
    Adaptive,
    /// Fixed low brightness.
    Dim,
    /// Fixed reading brightness.
    Read,
    /// Fixed maximum brightness.
    Full,
    /// LED off.  Reachable only via remote command, never by touch.
    Off,
}

impl OperatingMode {
    /// Wire token for this mode (remote commands and status reports).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Adaptive => "adaptive",
            Self::Dim => "dim",
            Self::Read => "read",
            Self::Full => "full",
            Self::Off => "off",
        }
    }

    /// Parse a remote-command token.  Unknown tokens yield `None`.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "adaptive" => Some(Self::Adaptive),
            "dim" => Some(Self::Dim),
            "read" => Some(Self::Read),
            "full" => Some(Self::Full),
            "off" => Some(Self::Off),
            _ => None,
        }
    }

    /// The mode a touch advances to.  `Off` is excluded from the cycle;
    /// cycling out of it lands on `Adaptive`.
    pub fn next_in_cycle(self) -> Self {
        match self {
            Self::Adaptive => Self::Dim,
            Self::Dim => Self::Read,
            Self::Read => Self::Full,
            Self::Full | Self::Off => Self::Adaptive,
        }
    }
}

/// Holds the current mode and derives brightness from it.
pub struct ModeController {
    mode: OperatingMode,
}

impl Default for ModeController {
    fn default() -> Self {
        Self::new()
    }
}

impl ModeController {
    /// Boot state is `Adaptive`.
    pub fn new() -> Self {
        Self {
            mode: OperatingMode::Adaptive,
        }
    }

    pub fn mode(&self) -> OperatingMode {
        self.mode
    }

    /// Advance to the next mode in the touch cycle and return it.
    pub fn cycle_mode(&mut self) -> OperatingMode {
        self.mode = self.mode.next_in_cycle();
        self.mode
    }

    /// Apply a remote command token.  Returns `true` if the token was
    /// recognised; unknown tokens leave the mode untouched.
    pub fn apply_remote_command(&mut self, token: &str) -> bool {
        match OperatingMode::from_token(token) {
            Some(mode) => {
                self.mode = mode;
                true
            }
            None => {
                log::debug!("ignoring unrecognised command '{}'", token);
                false
            }
        }
    }

    /// Brightness for the current mode given the latest ambient reading.
    ///
    /// Adaptive mode maps [0, 4095] onto [255, 0]; readings above full
    /// scale are clamped.
    pub fn compute_brightness(&self, reading: u16) -> u8 {
        match self.mode {
            OperatingMode::Adaptive => {
                let r = u32::from(reading).min(READING_MAX);
                (BRIGHTNESS_MAX - r * BRIGHTNESS_MAX / READING_MAX) as u8
            }
            OperatingMode::Dim => BRIGHTNESS_DIM,
            OperatingMode::Read => BRIGHTNESS_READ,
            OperatingMode::Full => BRIGHTNESS_FULL,
            OperatingMode::Off => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adaptive_endpoints_and_midpoint() {
        let c = ModeController::new();
        assert_eq!(c.compute_brightness(0), 255);
        assert_eq!(c.compute_brightness(4095), 0);
        assert_eq!(c.compute_brightness(2048), 128);
    }

    #[test]
    fn adaptive_clamps_out_of_range_readings() {
        let c = ModeController::new();
        assert_eq!(c.compute_brightness(u16::MAX), 0);
        assert_eq!(c.compute_brightness(4096), 0);
    }

    #[test]
    fn fixed_modes_ignore_reading() {
        let mut c = ModeController::new();
        for (token, expected) in [("dim", 50), ("read", 150), ("full", 255), ("off", 0)] {
            assert!(c.apply_remote_command(token));
            for reading in [0, 1000, 4095] {
                assert_eq!(c.compute_brightness(reading), expected);
            }
        }
    }

    #[test]
    fn touch_cycle_order() {
        let mut c = ModeController::new();
        assert_eq!(c.cycle_mode(), OperatingMode::Dim);
        assert_eq!(c.cycle_mode(), OperatingMode::Read);
        assert_eq!(c.cycle_mode(), OperatingMode::Full);
        assert_eq!(c.cycle_mode(), OperatingMode::Adaptive);
    }

    #[test]
    fn cycling_out_of_off_lands_on_adaptive() {
        let mut c = ModeController::new();
        assert!(c.apply_remote_command("off"));
        assert_eq!(c.cycle_mode(), OperatingMode::Adaptive);
    }

    #[test]
    fn off_command_forces_zero_brightness() {
        let mut c = ModeController::new();
        c.apply_remote_command("full");
        assert_eq!(c.compute_brightness(0), 255);
        c.apply_remote_command("off");
        assert_eq!(c.compute_brightness(0), 0);
    }

    #[test]
    fn unknown_command_is_a_no_op() {
        let mut c = ModeController::new();
        c.apply_remote_command("read");
        assert!(!c.apply_remote_command("bogus"));
        assert_eq!(c.mode(), OperatingMode::Read);
        assert_eq!(c.compute_brightness(0), 150);
    }

    #[test]
    fn command_sequence_last_writer_wins() {
        let mut c = ModeController::new();
        for token in ["read", "off", "dim"] {
            c.apply_remote_command(token);
        }
        assert_eq!(c.mode(), OperatingMode::Dim);
        assert_eq!(c.compute_brightness(2048), 50);
    }
}
