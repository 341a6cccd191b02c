//! Control logic — pure functions from sensor input and mode to LED output.

pub mod mode;

pub use mode::{ModeController, OperatingMode};
