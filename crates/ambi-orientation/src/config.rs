//! Tracker configuration.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Default weight of the previous orientation when smoothing.
pub const DEFAULT_SMOOTHING_FACTOR: f64 = 0.8;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Weight of the previous value, `0` (raw) to `1` (frozen).
    pub smoothing_factor: f64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            smoothing_factor: DEFAULT_SMOOTHING_FACTOR,
        }
    }
}

impl TrackerConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.smoothing_factor) {
            return Err(Error::InvalidConfig(format!(
                "smoothing_factor {} out of range (0-1)",
                self.smoothing_factor
            )));
        }
        Ok(())
    }
}
