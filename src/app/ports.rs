//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ LightService (domain)
//! ```
//!
//! Driven adapters (sensor, LED, broker session, reporter, event sinks)
//! implement these traits.  The [`LightService`](super::service::LightService)
//! consumes them via generics, so the domain core never touches hardware
//! or sockets directly.

use crate::error::CommsError;

use super::events::StatusRecord;

/// Longest accepted inbound command payload.
pub const MAX_COMMAND_LEN: usize = 64;

/// An inbound remote-command token, forwarded verbatim from the wire.
pub type CommandToken = heapless::String<MAX_COMMAND_LEN>;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this to obtain the ambient light level.
pub trait SensorPort {
    /// Latest ambient light reading, 12-bit (0–4095).
    fn read_light(&mut self) -> u16;
}

// ───────────────────────────────────────────────────────────────
// LED port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to command the LED.
pub trait LedPort {
    /// Push an 8-bit brightness level to the LED.
    fn set_brightness(&mut self, level: u8);
}

// ───────────────────────────────────────────────────────────────
// Broker session port (driven adapter: domain ↔ MQTT broker)
// ───────────────────────────────────────────────────────────────

/// Command channel to the remote broker.
///
/// `ensure_connected` makes at most one handshake attempt and one
/// fixed-delay wait per call.  The loop calls it every iteration, so a
/// dead broker is retried without ceiling but never stops the loop.
pub trait SessionPort {
    /// Advance the session toward connected; bounded wait per call.
    fn ensure_connected(&mut self);

    /// Wait up to `timeout_ms` for one inbound command token.
    /// Returns `None` when the window closes without a message.
    fn poll_inbound(&mut self, timeout_ms: u32) -> Option<CommandToken>;
}

// ───────────────────────────────────────────────────────────────
// Reporter port (driven adapter: domain → HTTP collector)
// ───────────────────────────────────────────────────────────────

/// Fire-and-forget status reporting.
///
/// A failed send is returned to the caller, which logs and discards it —
/// there is no retry and no queue; the next iteration's report supersedes.
pub trait ReportPort {
    /// POST one status record to the collector.
    fn send(&mut self, record: &StatusRecord) -> Result<(), CommsError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go (serial log today;
/// a display or network sink would implement the same trait).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
