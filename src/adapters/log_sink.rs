//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (which goes to UART / USB-CDC in production).
//! A future display or network sink would implement the same trait.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Iteration(r) => {
                info!(
                    "STATUS | light={} | led={} | mode={}",
                    r.light_value, r.led_brightness, r.mode
                );
            }
            AppEvent::ModeChanged { from, to, source } => {
                info!("MODE | {:?} -> {:?} ({:?})", from, to, source);
            }
            AppEvent::ReportFailed(e) => {
                warn!("REPORT | dropped: {}", e);
            }
            AppEvent::Started(mode) => {
                info!("START | initial_mode={:?}", mode);
            }
        }
    }
}
