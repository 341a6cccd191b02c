//! HTTP status reporter adapter.
//!
//! Implements [`ReportPort`]: one fire-and-forget JSON POST per loop
//! iteration.  A failed send is returned to the caller for logging and
//! then forgotten — no retry, no queue; the next iteration's report
//! supersedes it.
//!
//! The main loop tells the reporter whether the WiFi link is up; while
//! it is down the exchange is skipped entirely instead of timing out.
//!
//! ## cfg gating
//!
//! - **`target_os = "espidf"`**: `esp_idf_svc::http::client::EspHttpConnection`
//!   wrapped in the `embedded_svc` HTTP client.
//! - **all other targets**: records sent payloads in-memory for tests.

use log::info;

use crate::app::ports::ReportPort;
use crate::app::events::StatusRecord;
use crate::error::CommsError;

pub struct HttpReporter {
    url: heapless::String<128>,
    link_up: bool,

    /// Simulation: delivered records and a scripted failure switch.
    #[cfg(not(target_os = "espidf"))]
    sim_sent: Vec<StatusRecord>,
    #[cfg(not(target_os = "espidf"))]
    sim_fail_sends: bool,
}

impl HttpReporter {
    pub fn new(url: &heapless::String<128>) -> Self {
        Self {
            url: url.clone(),
            link_up: false,

            #[cfg(not(target_os = "espidf"))]
            sim_sent: Vec::new(),
            #[cfg(not(target_os = "espidf"))]
            sim_fail_sends: false,
        }
    }

    /// Called by the main loop each iteration with the WiFi link state.
    pub fn set_link_up(&mut self, up: bool) {
        self.link_up = up;
    }

    // ── Platform-specific ─────────────────────────────────────

    #[cfg(target_os = "espidf")]
    fn platform_send(&mut self, body: &[u8]) -> Result<u16, CommsError> {
        use embedded_svc::http::client::Client as HttpClient;
        use embedded_svc::http::{Method, Status};
        use embedded_svc::io::Write;
        use esp_idf_svc::http::client::{Configuration as HttpClientConfiguration, EspHttpConnection};

        let http_conf = HttpClientConfiguration {
            timeout: Some(std::time::Duration::from_secs(10)),
            ..Default::default()
        };
        let conn =
            EspHttpConnection::new(&http_conf).map_err(|_| CommsError::HttpRequestFailed)?;
        let mut client = HttpClient::wrap(conn);

        let len = body.len().to_string();
        let headers = [
            ("Content-Type", "application/json"),
            ("Content-Length", len.as_str()),
        ];
        let mut request = client
            .request(Method::Post, self.url.as_str(), &headers)
            .map_err(|_| CommsError::HttpRequestFailed)?;
        request
            .write_all(body)
            .map_err(|_| CommsError::HttpRequestFailed)?;
        let response = request.submit().map_err(|_| CommsError::HttpRequestFailed)?;
        Ok(response.status())
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_send(&mut self, _body: &[u8]) -> Result<u16, CommsError> {
        if self.sim_fail_sends {
            return Err(CommsError::HttpRequestFailed);
        }
        Ok(200)
    }

    // ── Simulation hooks (host tests) ─────────────────────────

    #[cfg(not(target_os = "espidf"))]
    pub fn sim_fail_sends(&mut self, fail: bool) {
        self.sim_fail_sends = fail;
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn sim_sent(&self) -> &[StatusRecord] {
        &self.sim_sent
    }
}

// ───────────────────────────────────────────────────────────────
// ReportPort
// ───────────────────────────────────────────────────────────────

impl ReportPort for HttpReporter {
    fn send(&mut self, record: &StatusRecord) -> Result<(), CommsError> {
        if !self.link_up {
            return Err(CommsError::LinkDown);
        }

        let body = serde_json::to_vec(record).map_err(|_| CommsError::HttpRequestFailed)?;
        let status = self.platform_send(&body)?;
        if !(200..300).contains(&status) {
            return Err(CommsError::HttpStatus(status));
        }

        info!("report: delivered (HTTP {})", status);
        #[cfg(not(target_os = "espidf"))]
        self.sim_sent.push(record.clone());
        Ok(())
    }
}

// ───────────────────────────────────────────────────────────────
// Tests
// ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SystemConfig;
    use crate::control::OperatingMode;

    fn reporter() -> HttpReporter {
        HttpReporter::new(&SystemConfig::default().report_url)
    }

    #[test]
    fn skips_when_link_down() {
        let mut r = reporter();
        let rec = StatusRecord::new(100, 200, OperatingMode::Adaptive);
        assert_eq!(r.send(&rec), Err(CommsError::LinkDown));
        assert!(r.sim_sent().is_empty());
    }

    #[test]
    fn delivers_when_link_up() {
        let mut r = reporter();
        r.set_link_up(true);
        let rec = StatusRecord::new(100, 193, OperatingMode::Adaptive);
        assert!(r.send(&rec).is_ok());
        assert_eq!(r.sim_sent(), &[rec]);
    }

    #[test]
    fn send_failure_is_typed_not_queued() {
        let mut r = reporter();
        r.set_link_up(true);
        r.sim_fail_sends(true);
        let rec = StatusRecord::new(0, 255, OperatingMode::Full);
        assert_eq!(r.send(&rec), Err(CommsError::HttpRequestFailed));
        // Nothing is retained for retry.
        assert!(r.sim_sent().is_empty());
    }
}
