//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements         | Connects to               |
//! |------------|--------------------|---------------------------|
//! | `hardware` | SensorPort         | ESP32 ADC                 |
//! |            | LedPort            | ESP32 LEDC PWM            |
//! | `log_sink` | EventSink          | Serial log output         |
//! | `mqtt`     | SessionPort        | MQTT broker (commands)    |
//! | `report`   | ReportPort         | HTTP status collector     |
//! | `time`     | —                  | ESP32 system timer        |
//! | `wifi`     | ConnectivityPort   | ESP-IDF WiFi STA          |

pub mod hardware;
pub mod log_sink;
pub mod mqtt;
pub mod report;
pub mod time;
pub mod wifi;
