//! Wall-clock source for petition timestamps.
//!
//! Services take a `Clock` so tests can pin or step time deterministically.

use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of Unix epoch milliseconds.
pub trait Clock: Send + Sync {
    fn now_ms(&self) -> i64;
}

/// Reads the host system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
            .unwrap_or(0)
    }
}

/// Manually driven clock: returns the current value, then advances by `step`.
#[derive(Debug)]
pub struct ManualClock {
    next: AtomicI64,
    step: i64,
}

impl ManualClock {
    /// Clock that always returns `at_ms`.
    pub fn fixed(at_ms: i64) -> Self {
        Self::stepping(at_ms, 0)
    }

    /// Clock starting at `start_ms` that moves forward `step_ms` per read.
    pub fn stepping(start_ms: i64, step_ms: i64) -> Self {
        Self {
            next: AtomicI64::new(start_ms),
            step: step_ms,
        }
    }

    /// Overrides the next returned value.
    pub fn set(&self, at_ms: i64) {
        self.next.store(at_ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> i64 {
        self.next.fetch_add(self.step, Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::{Clock, ManualClock, SystemClock};

    #[test]
    fn stepping_clock_advances_per_read() {
        let clock = ManualClock::stepping(100, 10);
        assert_eq!(clock.now_ms(), 100);
        assert_eq!(clock.now_ms(), 110);
        clock.set(5);
        assert_eq!(clock.now_ms(), 5);
    }

    #[test]
    fn system_clock_is_after_epoch() {
        assert!(SystemClock.now_ms() > 0);
    }
}
