//! AdaptiLight Firmware — Main Entry Point
//!
//! Hexagonal architecture around a fixed-rate control loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter   LogEventSink   Esp32TimeAdapter             │
//! │  (Sensor+Led)      (EventSink)    (monotonic time)             │
//! │  WifiAdapter       MqttSession    HttpReporter                 │
//! │  (Connectivity)    (SessionPort)  (ReportPort)                 │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              LightService (pure logic)                 │    │
//! │  │  ModeController · brightness derivation                │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

// ── Module declarations ───────────────────────────────────────
pub mod config;
mod error;
mod pins;

pub mod app;
mod adapters;
mod control;
mod drivers;
mod sensors;

// ── Imports ───────────────────────────────────────────────────
use anyhow::Result;
use log::{info, warn};

use adapters::hardware::HardwareAdapter;
use adapters::log_sink::LogEventSink;
use adapters::mqtt::MqttSession;
use adapters::report::HttpReporter;
use adapters::time::Esp32TimeAdapter;
use adapters::wifi::{ConnectivityPort, WifiAdapter};
use app::service::LightService;
use config::SystemConfig;
use drivers::led::PwmLed;
use drivers::touch::TouchSensor;
use sensors::light::LightSensor;

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  AdaptiLight v{}                     ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration (compile-time credential overlay) ────
    let config = SystemConfig::from_env();

    // ── 3. Initialise hardware peripherals ────────────────────
    if let Err(e) = drivers::hw_init::init_peripherals(config.touch_threshold) {
        // Peripheral init failure is critical — log and halt.
        log::error!("HAL init failed: {} — halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }
    if let Err(e) = drivers::hw_init::init_isr_service() {
        log::error!("touch ISR init failed: {} — continuing without touch input", e);
    }

    // ── 4. WiFi station bring-up ──────────────────────────────
    let mut wifi = WifiAdapter::new();
    if let Err(e) = wifi.set_credentials(config.wifi_ssid.as_str(), config.wifi_password.as_str())
    {
        warn!("WiFi credentials rejected ({}), network features disabled", e);
    } else if let Err(e) = wifi.connect() {
        // poll() keeps retrying with backoff from inside the loop.
        warn!("WiFi connect failed at boot ({}), will retry", e);
    }

    // ── 5. Construct adapters ─────────────────────────────────
    let mut hw = HardwareAdapter::new(LightSensor::new(pins::LIGHT_ADC_GPIO), PwmLed::new());
    let mut session = MqttSession::new(&config);
    let mut reporter = HttpReporter::new(&config.report_url);
    let mut sink = LogEventSink::new();
    let mut touch = TouchSensor::new(config.debounce_interval_ms);
    let time = Esp32TimeAdapter::new();

    // ── 6. Construct app service ──────────────────────────────
    let mut service = LightService::new(&config);
    service.start(&mut sink);

    info!("System ready after {} ms. Entering control loop.", time.uptime_ms());

    // ── 7. Control loop ───────────────────────────────────────
    loop {
        // Accepted touches land before this iteration's mode is read.
        if touch.poll() {
            service.handle_touch(&mut sink);
        }

        // WiFi repair runs before the session/report adapters consult
        // the link, so recovery is never starved by a broker outage.
        wifi.poll();
        let link_up = wifi.is_connected();
        session.set_link_up(link_up);
        reporter.set_link_up(link_up);

        service.tick(&mut session, &mut hw, &mut reporter, &mut sink);

        std::thread::sleep(std::time::Duration::from_millis(u64::from(
            config.control_loop_interval_ms,
        )));
    }
}
