//! Integration tests: LightService → ports → mock adapters.

use adaptilight::app::events::{AppEvent, StatusRecord};
use adaptilight::app::ports::{
    CommandToken, EventSink, LedPort, ReportPort, SensorPort, SessionPort,
};
use adaptilight::app::service::LightService;
use adaptilight::config::SystemConfig;
use adaptilight::control::OperatingMode;
use adaptilight::CommsError;
use std::collections::VecDeque;

// ── Mock implementations ──────────────────────────────────────

struct MockHw {
    reading: u16,
    led_levels: Vec<u8>,
}
impl MockHw {
    fn new(reading: u16) -> Self {
        Self {
            reading,
            led_levels: Vec::new(),
        }
    }
    fn last_level(&self) -> Option<u8> {
        self.led_levels.last().copied()
    }
}
impl SensorPort for MockHw {
    fn read_light(&mut self) -> u16 {
        self.reading
    }
}
impl LedPort for MockHw {
    fn set_brightness(&mut self, level: u8) {
        self.led_levels.push(level);
    }
}

struct MockSession {
    inbound: VecDeque<&'static str>,
    ensure_calls: u32,
    polls: u32,
}
impl MockSession {
    fn new(tokens: &[&'static str]) -> Self {
        Self {
            inbound: tokens.iter().copied().collect(),
            ensure_calls: 0,
            polls: 0,
        }
    }
}
impl SessionPort for MockSession {
    fn ensure_connected(&mut self) {
        self.ensure_calls += 1;
    }
    fn poll_inbound(&mut self, _timeout_ms: u32) -> Option<CommandToken> {
        self.polls += 1;
        self.inbound.pop_front().map(|s| {
            let mut t = CommandToken::new();
            t.push_str(s).unwrap();
            t
        })
    }
}

struct MockReporter {
    sent: Vec<StatusRecord>,
    fail_with: Option<CommsError>,
}
impl MockReporter {
    fn new() -> Self {
        Self {
            sent: Vec::new(),
            fail_with: None,
        }
    }
}
impl ReportPort for MockReporter {
    fn send(&mut self, record: &StatusRecord) -> Result<(), CommsError> {
        if let Some(e) = self.fail_with {
            return Err(e);
        }
        self.sent.push(record.clone());
        Ok(())
    }
}

struct RecordingSink {
    events: Vec<AppEvent>,
}
impl RecordingSink {
    fn new() -> Self {
        Self { events: Vec::new() }
    }
}
impl EventSink for RecordingSink {
    fn emit(&mut self, e: &AppEvent) {
        self.events.push(e.clone());
    }
}

fn make_service() -> (LightService, MockReporter, RecordingSink) {
    let mut svc = LightService::new(&SystemConfig::default());
    let mut sink = RecordingSink::new();
    svc.start(&mut sink);
    (svc, MockReporter::new(), sink)
}

// ── Iteration ordering ────────────────────────────────────────

#[test]
fn remote_command_lands_in_same_iteration_output() {
    let (mut svc, mut reporter, mut sink) = make_service();
    let mut hw = MockHw::new(2048);
    let mut session = MockSession::new(&["dim"]);

    svc.tick(&mut session, &mut hw, &mut reporter, &mut sink);

    assert_eq!(session.ensure_calls, 1);
    assert_eq!(svc.mode(), OperatingMode::Dim);
    // Commands are drained before brightness is computed and pushed.
    assert_eq!(hw.last_level(), Some(50));
    assert_eq!(reporter.sent[0].mode.as_str(), "dim");
    assert_eq!(reporter.sent[0].led_brightness, 50);
}

#[test]
fn adaptive_iteration_reports_what_it_pushed() {
    let (mut svc, mut reporter, mut sink) = make_service();
    let mut hw = MockHw::new(2048);
    let mut session = MockSession::new(&[]);

    svc.tick(&mut session, &mut hw, &mut reporter, &mut sink);

    assert_eq!(hw.last_level(), Some(128));
    assert_eq!(
        reporter.sent[0],
        StatusRecord::new(2048, 128, OperatingMode::Adaptive)
    );
    // The observation event carries the same record.
    assert!(sink
        .events
        .iter()
        .any(|e| matches!(e, AppEvent::Iteration(r) if r.led_brightness == 128)));
}

// ── Command draining ──────────────────────────────────────────

#[test]
fn drains_all_queued_commands_last_writer_wins() {
    let (mut svc, mut reporter, mut sink) = make_service();
    let mut hw = MockHw::new(0);
    let mut session = MockSession::new(&["read", "off", "dim"]);

    svc.tick(&mut session, &mut hw, &mut reporter, &mut sink);

    assert_eq!(svc.mode(), OperatingMode::Dim);
    assert_eq!(hw.last_level(), Some(50));
}

#[test]
fn drain_is_capped_per_iteration() {
    let cfg = SystemConfig::default();
    let cap = u32::from(cfg.max_drain_per_tick);
    let (mut svc, mut reporter, mut sink) = make_service();
    let mut hw = MockHw::new(0);

    // Queue more commands than the cap; the overflow stays queued.
    let tokens: Vec<&'static str> = std::iter::repeat("full").take(20).collect();
    let mut session = MockSession::new(&tokens);

    svc.tick(&mut session, &mut hw, &mut reporter, &mut sink);
    assert_eq!(session.polls, cap);
    assert_eq!(session.inbound.len(), 20 - cap as usize);

    // The next iteration picks up where the last one stopped.
    svc.tick(&mut session, &mut hw, &mut reporter, &mut sink);
    assert_eq!(session.inbound.len(), 20 - 2 * cap as usize);
}

#[test]
fn unrecognized_command_is_silently_dropped() {
    let (mut svc, mut reporter, mut sink) = make_service();
    let mut hw = MockHw::new(4095);
    let mut session = MockSession::new(&["bogus"]);

    svc.tick(&mut session, &mut hw, &mut reporter, &mut sink);

    assert_eq!(svc.mode(), OperatingMode::Adaptive);
    assert!(!sink
        .events
        .iter()
        .any(|e| matches!(e, AppEvent::ModeChanged { .. })));
}

// ── Off semantics ─────────────────────────────────────────────

#[test]
fn off_command_forces_dark_led_immediately() {
    let (mut svc, mut reporter, mut sink) = make_service();
    let mut hw = MockHw::new(0); // darkest room = brightest adaptive output
    let mut session = MockSession::new(&["off"]);

    svc.tick(&mut session, &mut hw, &mut reporter, &mut sink);

    assert_eq!(svc.mode(), OperatingMode::Off);
    assert_eq!(hw.last_level(), Some(0));
    assert_eq!(reporter.sent[0].led_brightness, 0);
}

// ── Touch handling ────────────────────────────────────────────

#[test]
fn four_touches_cycle_back_to_adaptive() {
    let (mut svc, _reporter, mut sink) = make_service();
    for _ in 0..4 {
        svc.handle_touch(&mut sink);
    }
    assert_eq!(svc.mode(), OperatingMode::Adaptive);
    // Off never appears in the touch cycle.
    assert!(!sink.events.iter().any(
        |e| matches!(e, AppEvent::ModeChanged { to, .. } if *to == OperatingMode::Off)
    ));
}

#[test]
fn touch_applied_before_tick_is_reflected_in_output() {
    let (mut svc, mut reporter, mut sink) = make_service();
    let mut hw = MockHw::new(1000);
    let mut session = MockSession::new(&[]);

    svc.handle_touch(&mut sink); // Adaptive -> Dim
    svc.tick(&mut session, &mut hw, &mut reporter, &mut sink);

    assert_eq!(hw.last_level(), Some(50));
}

// ── Report failure isolation ──────────────────────────────────

#[test]
fn report_failure_does_not_affect_led_output() {
    let (mut svc, mut reporter, mut sink) = make_service();
    reporter.fail_with = Some(CommsError::HttpRequestFailed);
    let mut hw = MockHw::new(2048);
    let mut session = MockSession::new(&[]);

    svc.tick(&mut session, &mut hw, &mut reporter, &mut sink);

    assert_eq!(hw.last_level(), Some(128));
    assert!(sink
        .events
        .iter()
        .any(|e| matches!(e, AppEvent::ReportFailed(CommsError::HttpRequestFailed))));
}

#[test]
fn link_down_skip_is_an_observation_not_a_retry() {
    let (mut svc, mut reporter, mut sink) = make_service();
    reporter.fail_with = Some(CommsError::LinkDown);
    let mut hw = MockHw::new(100);
    let mut session = MockSession::new(&[]);

    svc.tick(&mut session, &mut hw, &mut reporter, &mut sink);
    svc.tick(&mut session, &mut hw, &mut reporter, &mut sink);

    // Nothing is queued for later delivery.
    assert!(reporter.sent.is_empty());
    let skips = sink
        .events
        .iter()
        .filter(|e| matches!(e, AppEvent::ReportFailed(CommsError::LinkDown)))
        .count();
    assert_eq!(skips, 2);
}
