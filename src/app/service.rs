//! Application service — the hexagonal core.
//!
//! [`LightService`] owns the mode controller and runs one loop iteration
//! at a time.  All I/O flows through port traits injected at call sites,
//! making the entire service testable with mock adapters.
//!
//! ```text
//!  SessionPort ──▶ ┌────────────────────────┐ ──▶ LedPort
//!  SensorPort  ──▶ │      LightService      │ ──▶ ReportPort
//!                  │     ModeController     │ ──▶ EventSink
//!                  └────────────────────────┘
//! ```

use log::{info, warn};

use crate::config::SystemConfig;
use crate::control::{ModeController, OperatingMode};

use super::events::{AppEvent, ModeChangeSource, StatusRecord};
use super::ports::{EventSink, LedPort, ReportPort, SensorPort, SessionPort};

// ───────────────────────────────────────────────────────────────
// LightService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct LightService {
    controller: ModeController,
    poll_timeout_ms: u32,
    max_drain_per_tick: u8,
    tick_count: u64,
}

impl LightService {
    /// Construct the service from configuration.  Boot mode is `Adaptive`.
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            controller: ModeController::new(),
            poll_timeout_ms: config.mqtt_poll_timeout_ms,
            max_drain_per_tick: config.max_drain_per_tick,
            tick_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Announce the boot mode through the sink.
    pub fn start(&mut self, sink: &mut impl EventSink) {
        sink.emit(&AppEvent::Started(self.controller.mode()));
        info!("LightService started in {:?}", self.controller.mode());
    }

    // ── Touch handling ────────────────────────────────────────

    /// Apply one accepted (already debounced) touch: advance the mode cycle.
    pub fn handle_touch(&mut self, sink: &mut impl EventSink) {
        let from = self.controller.mode();
        let to = self.controller.cycle_mode();
        sink.emit(&AppEvent::ModeChanged {
            from,
            to,
            source: ModeChangeSource::Touch,
        });
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one full loop iteration:
    /// ensure session → drain commands → read light → compute → push →
    /// report → emit observation.
    ///
    /// The `hw` parameter satisfies **both** [`SensorPort`] and
    /// [`LedPort`] — this avoids a double mutable borrow while keeping
    /// the port boundary explicit.
    pub fn tick(
        &mut self,
        session: &mut impl SessionPort,
        hw: &mut (impl SensorPort + LedPort),
        reporter: &mut impl ReportPort,
        sink: &mut impl EventSink,
    ) {
        self.tick_count += 1;

        // 1. Broker session — at most one bounded reconnect wait here.
        session.ensure_connected();

        // 2. Drain inbound commands so a remote mode change lands in this
        //    iteration's output.  Capped so a burst cannot stall the loop.
        self.drain_commands(session, sink);

        // 3–5. Read, derive, push.  Brightness is always recomputed from
        // the mode current at this instant.
        let reading = hw.read_light();
        let brightness = self.controller.compute_brightness(reading);
        hw.set_brightness(brightness);

        // 6. Fire-and-forget status report.
        let record = StatusRecord::new(reading, brightness, self.controller.mode());
        if let Err(e) = reporter.send(&record) {
            warn!("status report dropped: {}", e);
            sink.emit(&AppEvent::ReportFailed(e));
        }

        // 7. One observation line per iteration.
        sink.emit(&AppEvent::Iteration(record));
    }

    fn drain_commands(&mut self, session: &mut impl SessionPort, sink: &mut impl EventSink) {
        for _ in 0..self.max_drain_per_tick {
            let Some(token) = session.poll_inbound(self.poll_timeout_ms) else {
                break;
            };
            let from = self.controller.mode();
            if self.controller.apply_remote_command(&token) {
                let to = self.controller.mode();
                if to != from {
                    sink.emit(&AppEvent::ModeChanged {
                        from,
                        to,
                        source: ModeChangeSource::Remote,
                    });
                }
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Current operating mode.
    pub fn mode(&self) -> OperatingMode {
        self.controller.mode()
    }

    /// Total loop iterations executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}
