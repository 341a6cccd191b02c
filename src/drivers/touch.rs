//! ISR-debounced capacitive touch driver.
//!
//! ## Hardware
//!
//! ESP32 touch pad peripheral.  The touch ISR records the event timestamp
//! into an atomic, and `poll()` (called from the main loop each iteration)
//! applies the debounce guard.  The critical section is a single lock-free
//! word store.
//!
//! ## Debounce
//!
//! A touch is accepted when more than the configured interval has elapsed
//! since the last accepted touch.  Timestamps are `u32` milliseconds with
//! wrapping subtraction — a wrapped difference reads as elapsed, so one
//! spurious accept is possible at the ~49.7-day wrap boundary.

use core::sync::atomic::{AtomicU32, Ordering};

/// Raw ISR timestamp (milliseconds since boot, truncated to u32).
/// Written by the ISR, read by the main loop.
static TOUCH_ISR_TIMESTAMP: AtomicU32 = AtomicU32::new(0);

/// Pure debounce guard: accept iff strictly more than `min_interval_ms`
/// has elapsed since the last accepted event.
pub fn debounce_accept(now_ms: u32, last_accepted_ms: u32, min_interval_ms: u32) -> bool {
    now_ms.wrapping_sub(last_accepted_ms) > min_interval_ms
}

pub struct TouchSensor {
    min_interval_ms: u32,
    last_isr_ms: u32,
    last_accepted_ms: u32,
}

impl TouchSensor {
    pub fn new(min_interval_ms: u32) -> Self {
        Self {
            min_interval_ms,
            last_isr_ms: 0,
            last_accepted_ms: 0,
        }
    }

    /// Call from the main loop each iteration.  Returns `true` when a new
    /// touch event passed the debounce guard since the last call.
    ///
    /// The guard runs against the ISR timestamp itself, so acceptance does
    /// not depend on how promptly the loop polls.
    pub fn poll(&mut self) -> bool {
        let isr_ms = TOUCH_ISR_TIMESTAMP.load(Ordering::Acquire);
        if isr_ms == self.last_isr_ms || isr_ms == 0 {
            return false;
        }
        self.last_isr_ms = isr_ms;

        if debounce_accept(isr_ms, self.last_accepted_ms, self.min_interval_ms) {
            self.last_accepted_ms = isr_ms;
            true
        } else {
            false
        }
    }
}

/// ISR handler — register this on the touch pad interrupt.
/// Safe to call from interrupt context (lock-free atomic store).
#[allow(unused)]
pub fn touch_isr_handler(now_ms: u32) {
    TOUCH_ISR_TIMESTAMP.store(now_ms, Ordering::Release);
}
