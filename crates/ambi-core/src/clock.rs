//! Monotonic time sources for the playback transport.

use crate::lockfree::AtomicDouble;
use std::sync::Arc;
use std::time::Instant;

/// Monotonic clock reporting seconds since an arbitrary origin.
pub trait Clock: Send + Sync {
    fn now(&self) -> f64;
}

/// Wall clock backed by [`Instant`]; the origin is construction time.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Externally driven clock.
///
/// Clones share the same time, so a host (or a test) can keep one handle and
/// advance it while the transport reads another.
///
/// ```
/// use ambi_core::{Clock, ManualClock};
///
/// let clock = ManualClock::new();
/// let shared = clock.clone();
/// clock.advance(1.5);
/// assert_eq!(shared.now(), 1.5);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicDouble>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::starting_at(0.0)
    }

    pub fn starting_at(seconds: f64) -> Self {
        Self {
            now: Arc::new(AtomicDouble::new(seconds)),
        }
    }

    /// Jump to an absolute time. Moving backwards is ignored.
    pub fn set(&self, seconds: f64) {
        if seconds >= self.now.get() {
            self.now.set(seconds);
        }
    }

    /// Move forward by `seconds` (negative deltas are ignored).
    pub fn advance(&self, seconds: f64) {
        if seconds > 0.0 {
            self.now.fetch_add(seconds);
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.now.get()
    }
}
