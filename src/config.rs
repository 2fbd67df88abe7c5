//! Engine configuration, loadable from TOML.
//!
//! ```toml
//! volume = 0.8
//! load_strategy = "on_first_gesture"
//!
//! [tracker]
//! smoothing_factor = 0.6
//!
//! [mapper]
//! gain_modulation = true
//! distance = { model = "orbit", base = 4.0, depth = 0.25 }
//!
//! [transport]
//! progress_interval = 0.25
//! ```

use std::path::Path;

use ambi_core::TransportConfig;
use ambi_orientation::TrackerConfig;
use ambi_spatial::MapperConfig;
use serde::{Deserialize, Serialize};

use crate::Result;

/// Initial master volume, before the perceptual curve.
pub const DEFAULT_VOLUME: f64 = 0.7;

/// When the configured asset is fetched and decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadStrategy {
    /// While building the engine.
    #[default]
    Eager,
    /// On the first `play()` / `toggle_playback()`.
    OnFirstGesture,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Master volume in `[0, 1]`; the applied gain is `volume²`.
    pub volume: f64,
    pub load_strategy: LoadStrategy,
    pub tracker: TrackerConfig,
    pub mapper: MapperConfig,
    pub transport: TransportConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            volume: DEFAULT_VOLUME,
            load_strategy: LoadStrategy::default(),
            tracker: TrackerConfig::default(),
            mapper: MapperConfig::default(),
            transport: TransportConfig::default(),
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.volume) {
            return Err(ambi_core::Error::InvalidConfig(format!(
                "volume {} out of range (0-1)",
                self.volume
            ))
            .into());
        }
        self.tracker.validate()?;
        self.mapper.validate()?;
        self.transport.validate()?;
        Ok(())
    }

    /// Parse and validate a TOML document. Missing keys take defaults.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }
}
