//! Time-based throttle for outbound cursor messages.
//!
//! The host passes a monotonic millisecond clock reading on every call
//! (`performance.now()` in the browser, `Instant` elsewhere), so the throttle
//! itself never reads a clock.

#[cfg(test)]
#[path = "throttle_test.rs"]
mod throttle_test;

use crate::consts::CURSOR_SEND_INTERVAL_MS;

#[derive(Debug, Clone)]
pub struct CursorThrottle {
    interval_ms: f64,
    last_sent_ms: Option<f64>,
}

impl Default for CursorThrottle {
    fn default() -> Self {
        Self::new(CURSOR_SEND_INTERVAL_MS)
    }
}

impl CursorThrottle {
    #[must_use]
    pub fn new(interval_ms: f64) -> Self {
        Self { interval_ms, last_sent_ms: None }
    }

    /// Whether a message may go out at `now_ms`. A `true` answer records
    /// `now_ms` as the last send.
    ///
    /// The first call always passes; afterwards strictly more than the
    /// interval must have elapsed.
    pub fn ready(&mut self, now_ms: f64) -> bool {
        let due = self.last_sent_ms.is_none_or(|last| now_ms - last > self.interval_ms);
        if due {
            self.last_sent_ms = Some(now_ms);
        }
        due
    }

    /// Forget the last send so the next call passes.
    pub fn reset(&mut self) {
        self.last_sent_ms = None;
    }

    #[must_use]
    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }
}
