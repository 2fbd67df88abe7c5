//! Transport configuration.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Default interval between progress notifications (10 Hz).
pub const DEFAULT_PROGRESS_INTERVAL: f64 = 0.1;

/// Configuration for the playback transport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    /// Seconds between progress notifications while playing.
    pub progress_interval: f64,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }
}

impl TransportConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.progress_interval.is_finite()
            || self.progress_interval <= 0.0
            || self.progress_interval > 10.0
        {
            return Err(Error::InvalidConfig(format!(
                "progress_interval {} out of range (0-10 s)",
                self.progress_interval
            )));
        }
        Ok(())
    }
}
