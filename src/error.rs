//! Typed error enums for the AdaptiLight firmware.
//!
//! All variants are `Copy` so they can be cheaply passed through the
//! control loop without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// ADC read returned an error or timed out.
    AdcReadFailed,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AdcReadFailed => write!(f, "ADC read failed"),
        }
    }
}

// ---------------------------------------------------------------------------
// Communications errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommsError {
    /// WiFi station link is down; network exchanges are skipped.
    LinkDown,
    /// Broker session handshake failed.
    BrokerUnreachable,
    /// Command-topic subscription was rejected.
    SubscribeFailed,
    /// Status report request could not be sent.
    HttpRequestFailed,
    /// Status report was answered with a non-2xx status.
    HttpStatus(u16),
}

impl fmt::Display for CommsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LinkDown => write!(f, "network link down"),
            Self::BrokerUnreachable => write!(f, "broker unreachable"),
            Self::SubscribeFailed => write!(f, "subscribe failed"),
            Self::HttpRequestFailed => write!(f, "HTTP request failed"),
            Self::HttpStatus(code) => write!(f, "HTTP status {code}"),
        }
    }
}
