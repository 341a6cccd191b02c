//! Outbound application events.
//!
//! The [`LightService`](super::service::LightService) emits these through
//! the [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them — today they go to the serial log.

use serde::{Deserialize, Serialize};

use crate::control::OperatingMode;
use crate::error::CommsError;

/// Structured events emitted by the application core.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// The service has started (carries the boot mode).
    Started(OperatingMode),

    /// The operating mode changed.
    ModeChanged {
        from: OperatingMode,
        to: OperatingMode,
        source: ModeChangeSource,
    },

    /// One loop iteration completed; carries the values that were pushed
    /// to the LED and reported upstream.
    Iteration(StatusRecord),

    /// The status report for this iteration was not delivered.
    ReportFailed(CommsError),
}

/// What triggered a mode change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeChangeSource {
    Touch,
    Remote,
}

/// The JSON status record POSTed to the collector each iteration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRecord {
    /// Raw ambient light reading (0–4095).
    pub light_value: u16,
    /// Brightness pushed to the LED this iteration (0–255).
    pub led_brightness: u8,
    /// Current mode token ("adaptive", "dim", "read", "full", "off").
    pub mode: heapless::String<8>,
}

impl StatusRecord {
    pub fn new(light_value: u16, led_brightness: u8, mode: OperatingMode) -> Self {
        let mut token = heapless::String::new();
        // Mode tokens are at most 8 bytes.
        let _ = token.push_str(mode.as_str());
        Self {
            light_value,
            led_brightness,
            mode: token,
        }
    }
}
