//! System configuration parameters
//!
//! All tunable parameters for the AdaptiLight lamp.  Credentials and
//! endpoints can be baked in at compile time via environment variables
//! (see [`SystemConfig::from_env`]); everything else ships with the
//! firmware defaults and is fixed for the lifetime of the process.

use serde::{Deserialize, Serialize};

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- WiFi ---
    /// Station SSID.
    pub wifi_ssid: heapless::String<32>,
    /// Station password (empty = open network).
    pub wifi_password: heapless::String<64>,

    // --- MQTT broker ---
    /// Broker hostname or IP.
    pub broker_host: heapless::String<64>,
    /// Broker TCP port.
    pub broker_port: u16,
    /// Broker username (empty = anonymous).
    pub mqtt_username: heapless::String<32>,
    /// Broker key / password.
    pub mqtt_key: heapless::String<64>,
    /// Topic carrying remote mode commands.
    pub command_topic: heapless::String<64>,

    // --- Status reporting ---
    /// HTTP endpoint receiving the JSON status record.
    pub report_url: heapless::String<128>,

    // --- Touch ---
    /// Touch pad trigger threshold (raw counts below this fire the ISR).
    pub touch_threshold: u16,
    /// Minimum interval between accepted touches (milliseconds).
    pub debounce_interval_ms: u32,

    // --- Timing ---
    /// Bounded wait per inbound-command poll (milliseconds).
    pub mqtt_poll_timeout_ms: u32,
    /// Fixed delay between broker reconnect attempts (milliseconds).
    pub reconnect_delay_ms: u32,
    /// Control loop interval (milliseconds).
    pub control_loop_interval_ms: u32,
    /// Ceiling on inbound commands drained per loop iteration.
    pub max_drain_per_tick: u8,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // WiFi
            wifi_ssid: heapless::String::new(),
            wifi_password: heapless::String::new(),

            // MQTT
            broker_host: str_to("io.adafruit.com"),
            broker_port: 1883,
            mqtt_username: heapless::String::new(),
            mqtt_key: heapless::String::new(),
            command_topic: str_to("adaptilight/feeds/led-mode"),

            // Reporting
            report_url: str_to("http://192.168.0.10:5000/update_sensor"),

            // Touch
            touch_threshold: 40,
            debounce_interval_ms: 500,

            // Timing
            mqtt_poll_timeout_ms: 5_000,
            reconnect_delay_ms: 5_000,
            control_loop_interval_ms: 1_000, // 1 Hz
            max_drain_per_tick: 8,
        }
    }
}

impl SystemConfig {
    /// Defaults overlaid with compile-time credentials.
    ///
    /// Each `option_env!` variable replaces its field only when set at
    /// build time, so a bench build without credentials still compiles.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        overlay(&mut cfg.wifi_ssid, option_env!("WIFI_SSID"));
        overlay(&mut cfg.wifi_password, option_env!("WIFI_PASS"));
        overlay(&mut cfg.broker_host, option_env!("MQTT_HOST"));
        overlay(&mut cfg.mqtt_username, option_env!("MQTT_USER"));
        overlay(&mut cfg.mqtt_key, option_env!("MQTT_KEY"));
        overlay(&mut cfg.command_topic, option_env!("MQTT_COMMAND_TOPIC"));
        overlay(&mut cfg.report_url, option_env!("REPORT_URL"));
        cfg
    }
}

fn str_to<const N: usize>(s: &str) -> heapless::String<N> {
    let mut out = heapless::String::new();
    // Callers pass literals that fit; truncation would be a programming error.
    let _ = out.push_str(s);
    out
}

fn overlay<const N: usize>(dst: &mut heapless::String<N>, value: Option<&str>) {
    if let Some(v) = value {
        dst.clear();
        if dst.push_str(v).is_err() {
            log::warn!("config: env value too long for field (cap {})", N);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_sane() {
        let c = SystemConfig::default();
        assert!(c.touch_threshold > 0);
        assert!(c.debounce_interval_ms > 0);
        assert!(c.control_loop_interval_ms > 0);
        assert!(c.reconnect_delay_ms > 0);
        assert!(c.max_drain_per_tick > 0);
        assert!(c.broker_port > 0);
        // The collector route the original server exposes.
        assert!(c.report_url.ends_with("/update_sensor"));
    }

    #[test]
    fn serde_roundtrip() {
        let c = SystemConfig::default();
        let json = serde_json::to_string(&c).unwrap();
        let c2: SystemConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(c.broker_host, c2.broker_host);
        assert_eq!(c.touch_threshold, c2.touch_threshold);
        assert_eq!(c.debounce_interval_ms, c2.debounce_interval_ms);
        assert_eq!(c.max_drain_per_tick, c2.max_drain_per_tick);
    }

    #[test]
    fn timing_ratios_make_sense() {
        let c = SystemConfig::default();
        assert!(
            c.debounce_interval_ms < c.mqtt_poll_timeout_ms,
            "touch debounce should be shorter than a command poll window"
        );
        assert!(
            c.control_loop_interval_ms <= c.reconnect_delay_ms,
            "reconnect delay should not be shorter than the loop period"
        );
    }

    #[test]
    fn env_overlay_preserves_defaults_when_unset() {
        // Built without the env vars set, from_env() must equal defaults.
        let c = SystemConfig::from_env();
        let d = SystemConfig::default();
        assert_eq!(c.touch_threshold, d.touch_threshold);
        assert_eq!(c.control_loop_interval_ms, d.control_loop_interval_ms);
    }
}
