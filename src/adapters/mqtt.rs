//! MQTT broker session adapter.
//!
//! Implements [`SessionPort`].  The broker carries the remote
//! mode-command topic; payloads are forwarded verbatim as opaque tokens.
//!
//! ## cfg gating
//!
//! - **`target_os = "espidf"`**: `esp_idf_svc::mqtt::client::EspMqttClient`
//!   with a dedicated receiver thread feeding an `mpsc` channel.  The
//!   main loop polls that channel with a bounded wait.
//! - **all other targets**: an in-memory inbound queue for host tests.
//!
//! ## Reconnection policy
//!
//! `ensure_connected` makes at most one handshake attempt and one
//! fixed-delay wait per call; the main loop calls it every iteration,
//! so the retry continues with no attempt ceiling while the loop (and
//! with it WiFi recovery and touch handling) stays live.  While the
//! WiFi link is down the attempt is skipped entirely — the broker is
//! unreachable by definition, and sleeping on it would starve the
//! link repair in `WifiAdapter::poll`.

use log::{info, warn};

use crate::app::ports::{CommandToken, SessionPort, MAX_COMMAND_LEN};
use crate::config::SystemConfig;
use crate::error::CommsError;

#[cfg(target_os = "espidf")]
use std::sync::{
    atomic::{AtomicBool, Ordering},
    mpsc, Arc, Mutex,
};

#[cfg(target_os = "espidf")]
use esp_idf_svc::mqtt::client::{EspMqttClient, EspMqttConnection, MqttClientConfiguration};

// ───────────────────────────────────────────────────────────────
// Session state
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Disconnected,
    Connected,
}

// ───────────────────────────────────────────────────────────────
// MQTT session
// ───────────────────────────────────────────────────────────────

pub struct MqttSession {
    state: SessionState,
    broker_url: String,
    username: heapless::String<32>,
    key: heapless::String<64>,
    command_topic: heapless::String<64>,
    reconnect_delay_ms: u32,
    /// WiFi link state, pushed in by the main loop each iteration.
    /// Assumed up until told otherwise.
    link_up: bool,

    #[cfg(target_os = "espidf")]
    client: Option<Arc<Mutex<EspMqttClient<'static>>>>,
    #[cfg(target_os = "espidf")]
    connected: Arc<AtomicBool>,
    #[cfg(target_os = "espidf")]
    rx: Option<mpsc::Receiver<CommandToken>>,

    /// Simulation: queued inbound tokens and scripted connect failures.
    #[cfg(not(target_os = "espidf"))]
    sim_inbound: std::collections::VecDeque<CommandToken>,
    #[cfg(not(target_os = "espidf"))]
    sim_fail_connects: u32,
    #[cfg(not(target_os = "espidf"))]
    sim_connect_attempts: u32,
}

impl MqttSession {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            state: SessionState::Disconnected,
            broker_url: format!("mqtt://{}:{}", config.broker_host, config.broker_port),
            username: config.mqtt_username.clone(),
            key: config.mqtt_key.clone(),
            command_topic: config.command_topic.clone(),
            reconnect_delay_ms: config.reconnect_delay_ms,
            link_up: true,

            #[cfg(target_os = "espidf")]
            client: None,
            #[cfg(target_os = "espidf")]
            connected: Arc::new(AtomicBool::new(false)),
            #[cfg(target_os = "espidf")]
            rx: None,

            #[cfg(not(target_os = "espidf"))]
            sim_inbound: std::collections::VecDeque::new(),
            #[cfg(not(target_os = "espidf"))]
            sim_fail_connects: 0,
            #[cfg(not(target_os = "espidf"))]
            sim_connect_attempts: 0,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Called by the main loop each iteration with the WiFi link state.
    /// While the link is down, connection attempts are deferred.
    pub fn set_link_up(&mut self, up: bool) {
        self.link_up = up;
    }

    // ── Platform-specific ─────────────────────────────────────

    #[cfg(target_os = "espidf")]
    fn platform_connect(&mut self) -> Result<(), CommsError> {
        let conf = MqttClientConfiguration {
            client_id: Some("adaptilight"),
            username: if self.username.is_empty() {
                None
            } else {
                Some(self.username.as_str())
            },
            password: if self.key.is_empty() {
                None
            } else {
                Some(self.key.as_str())
            },
            ..Default::default()
        };

        let (client, conn) = EspMqttClient::new(self.broker_url.as_str(), &conf)
            .map_err(|_| CommsError::BrokerUnreachable)?;
        let client = Arc::new(Mutex::new(client));

        let (tx, rx) = mpsc::channel();
        spawn_receiver(
            conn,
            tx,
            self.connected.clone(),
            client.clone(),
            self.command_topic.clone(),
        );

        self.client = Some(client);
        self.rx = Some(rx);
        info!("MQTT: client created for {}", self.broker_url);
        Ok(())
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_connect(&mut self) -> Result<(), CommsError> {
        self.sim_connect_attempts += 1;
        if self.sim_fail_connects > 0 {
            self.sim_fail_connects -= 1;
            return Err(CommsError::BrokerUnreachable);
        }
        Ok(())
    }

    // ── Simulation hooks (host tests) ─────────────────────────

    #[cfg(not(target_os = "espidf"))]
    pub fn sim_push_inbound(&mut self, token: &str) {
        let mut t = CommandToken::new();
        if t.push_str(token).is_ok() {
            self.sim_inbound.push_back(t);
        }
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn sim_fail_next_connects(&mut self, n: u32) {
        self.sim_fail_connects = n;
        self.state = SessionState::Disconnected;
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn sim_connect_attempts(&self) -> u32 {
        self.sim_connect_attempts
    }
}

// ───────────────────────────────────────────────────────────────
// SessionPort
// ───────────────────────────────────────────────────────────────

impl SessionPort for MqttSession {
    fn ensure_connected(&mut self) {
        // No link, no broker: defer until WiFi recovery brings it back.
        if !self.link_up {
            self.state = SessionState::Disconnected;
            return;
        }

        #[cfg(target_os = "espidf")]
        {
            if self.client.is_some() && self.connected.load(Ordering::Relaxed) {
                self.state = SessionState::Connected;
                return;
            }
            self.state = SessionState::Disconnected;

            if self.client.is_none() {
                if let Err(e) = self.platform_connect() {
                    warn!(
                        "MQTT: {} — next attempt in {} ms",
                        e, self.reconnect_delay_ms
                    );
                    std::thread::sleep(std::time::Duration::from_millis(u64::from(
                        self.reconnect_delay_ms,
                    )));
                    return;
                }
            }

            // Client exists; give the broker handshake one delay window
            // to land, then hand control back to the loop.
            std::thread::sleep(std::time::Duration::from_millis(u64::from(
                self.reconnect_delay_ms,
            )));
            if self.connected.load(Ordering::Relaxed) {
                self.state = SessionState::Connected;
            }
        }

        #[cfg(not(target_os = "espidf"))]
        {
            if self.state == SessionState::Connected {
                return;
            }
            match self.platform_connect() {
                Ok(()) => {
                    self.state = SessionState::Connected;
                    info!("MQTT(sim): connected to {}", self.broker_url);
                }
                Err(e) => {
                    warn!(
                        "MQTT(sim): {} — next attempt in {} ms",
                        e, self.reconnect_delay_ms
                    );
                    std::thread::sleep(std::time::Duration::from_millis(u64::from(
                        self.reconnect_delay_ms,
                    )));
                }
            }
        }
    }

    fn poll_inbound(&mut self, timeout_ms: u32) -> Option<CommandToken> {
        #[cfg(target_os = "espidf")]
        {
            // Nothing can arrive while the session is down; waiting the
            // full timeout would only slow the loop.
            if !self.connected.load(Ordering::Relaxed) {
                return None;
            }
            let rx = self.rx.as_ref()?;
            rx.recv_timeout(std::time::Duration::from_millis(u64::from(timeout_ms)))
                .ok()
        }

        #[cfg(not(target_os = "espidf"))]
        {
            let _ = timeout_ms;
            if self.state != SessionState::Connected {
                return None;
            }
            self.sim_inbound.pop_front()
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Receiver thread (espidf)
// ───────────────────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
fn spawn_receiver(
    mut conn: EspMqttConnection,
    tx: mpsc::Sender<CommandToken>,
    connected: Arc<AtomicBool>,
    client: Arc<Mutex<EspMqttClient<'static>>>,
    topic: heapless::String<64>,
) {
    use embedded_svc::mqtt::client::{Details, EventPayload, QoS};

    std::thread::Builder::new()
        .name("mqtt-rx".into())
        .stack_size(8 * 1024)
        .spawn(move || loop {
            match conn.next() {
                Ok(event) => match event.payload() {
                    EventPayload::Connected(_) => {
                        info!("MQTT: connected, subscribing to '{}'", topic);
                        let result = client
                            .lock()
                            .unwrap()
                            .subscribe(topic.as_str(), QoS::AtMostOnce);
                        match result {
                            Ok(_) => connected.store(true, Ordering::Relaxed),
                            Err(e) => {
                                warn!("MQTT: {}: {:?}", CommsError::SubscribeFailed, e);
                            }
                        }
                    }
                    EventPayload::Disconnected => {
                        warn!("MQTT: disconnected");
                        connected.store(false, Ordering::Relaxed);
                    }
                    EventPayload::Received { data, details, .. } => {
                        // Only complete payloads become command tokens.
                        if !matches!(details, Details::Complete) {
                            continue;
                        }
                        if data.len() > MAX_COMMAND_LEN {
                            warn!("MQTT: dropping oversized payload ({} bytes)", data.len());
                            continue;
                        }
                        if let Ok(text) = core::str::from_utf8(data) {
                            let mut token = CommandToken::new();
                            if token.push_str(text.trim()).is_ok() {
                                let _ = tx.send(token);
                            }
                        }
                    }
                    _ => {}
                },
                Err(e) => {
                    connected.store(false, Ordering::Relaxed);
                    warn!("MQTT: receive loop error: {:?}", e);
                    std::thread::sleep(std::time::Duration::from_secs(2));
                }
            }
        })
        .expect("failed to spawn mqtt receiver thread");
}

// ───────────────────────────────────────────────────────────────
// Tests
// ───────────────────────────────────────────────────────────────
