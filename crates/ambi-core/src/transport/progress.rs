//! Playback progress values and the periodic progress timer.

use serde::{Deserialize, Serialize};

/// Position within the loaded buffer, as reported to observers.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PlaybackProgress {
    /// Seconds into the buffer.
    pub position: f64,
    /// Buffer length in seconds.
    pub duration: f64,
}

impl PlaybackProgress {
    #[inline]
    pub const fn new(position: f64, duration: f64) -> Self {
        Self { position, duration }
    }

    /// Progress in `[0, 1]`; 0 for an empty buffer.
    pub fn fraction(&self) -> f64 {
        if self.duration > 0.0 {
            (self.position / self.duration).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

/// Format seconds as `m:ss` (e.g. `83.4` → `"1:23"`).
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}

/// Fixed-period deadline checked by the transport's event-loop pump.
///
/// Disarming is synchronous: after [`disarm`](Self::disarm) no further tick
/// is reported.
#[derive(Debug, Clone)]
pub(crate) struct ProgressTimer {
    interval: f64,
    next_due: Option<f64>,
}

impl ProgressTimer {
    pub fn new(interval: f64) -> Self {
        Self {
            interval,
            next_due: None,
        }
    }

    pub fn arm(&mut self, now: f64) {
        self.next_due = Some(now + self.interval);
    }

    pub fn disarm(&mut self) {
        self.next_due = None;
    }

    #[cfg(test)]
    pub fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    /// Returns the most recent due instant at or before `now`, if any.
    ///
    /// Ticks missed by a late pump collapse into that one instant.
    pub fn take_due(&mut self, now: f64) -> Option<f64> {
        let due = self.next_due?;
        if now < due {
            return None;
        }

        let missed = ((now - due) / self.interval).floor();
        let latest = due + missed * self.interval;
        self.next_due = Some(latest + self.interval);
        Some(latest)
    }
}
