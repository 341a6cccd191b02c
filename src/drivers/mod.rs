//! Output drivers, hardware initialisation, and peripheral helpers.

pub mod hw_init;
pub mod led;
pub mod touch;
