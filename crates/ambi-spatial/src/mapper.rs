//! Orientation to render target mapping.

use ambi_orientation::SpatialOrientation;
use serde::{Deserialize, Serialize};

use crate::target::{SpatialRenderTarget, Vec3};
use crate::{Error, Result};

/// Source distance used when none is configured.
pub const DEFAULT_DISTANCE: f64 = 5.0;

const GAIN_BASE: f64 = 0.7;
const GAIN_DEPTH: f64 = 0.3;
const GAIN_MIN: f64 = 0.3;
const GAIN_MAX: f64 = 1.0;

/// How far the virtual source sits from the listener.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum DistanceModel {
    /// Constant radius.
    Fixed { radius: f64 },
    /// `base * (1 + depth * cos(azimuth))`: closer behind, further in front.
    Orbit { base: f64, depth: f64 },
}

impl Default for DistanceModel {
    fn default() -> Self {
        Self::Fixed {
            radius: DEFAULT_DISTANCE,
        }
    }
}

impl DistanceModel {
    /// Distance for an azimuth given in radians.
    #[inline]
    pub fn distance(&self, azimuth_rad: f64) -> f64 {
        match *self {
            Self::Fixed { radius } => radius,
            Self::Orbit { base, depth } => base * (1.0 + depth * azimuth_rad.cos()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        match *self {
            Self::Fixed { radius } if !(radius.is_finite() && radius > 0.0) => Err(
                Error::InvalidParameter(format!("radius must be positive, got {radius}")),
            ),
            Self::Orbit { base, .. } if !(base.is_finite() && base > 0.0) => Err(
                Error::InvalidParameter(format!("orbit base must be positive, got {base}")),
            ),
            Self::Orbit { depth, .. } if !(0.0..1.0).contains(&depth) => Err(
                Error::InvalidParameter(format!("orbit depth must be in [0, 1), got {depth}")),
            ),
            _ => Ok(()),
        }
    }
}

/// Mapper configuration.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MapperConfig {
    pub distance: DistanceModel,
    /// Attenuate sources that move away from the front.
    pub gain_modulation: bool,
}

impl MapperConfig {
    pub fn validate(&self) -> Result<()> {
        self.distance.validate()
    }
}

/// Stateless mapping from listener orientation to a render target.
///
/// Same input, same output, bit for bit.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SpatialMapper {
    config: MapperConfig,
}

impl SpatialMapper {
    pub fn new(config: MapperConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    pub fn map(&self, orientation: SpatialOrientation) -> SpatialRenderTarget {
        let az = orientation.azimuth.to_radians();
        let el = orientation.elevation.to_radians();
        let roll = orientation.roll.to_radians();

        let (sin_az, cos_az) = az.sin_cos();
        let (sin_el, cos_el) = el.sin_cos();
        let (sin_roll, cos_roll) = roll.sin_cos();

        let distance = self.config.distance.distance(az);

        let position = vec3(
            distance * sin_az * cos_el,
            distance * sin_el,
            distance * cos_az * cos_el,
        );
        let forward = vec3(sin_az, sin_el, -cos_az * cos_el);
        let up = vec3(sin_roll, cos_roll, 0.0);

        let gain = self
            .config
            .gain_modulation
            .then(|| (GAIN_BASE + GAIN_DEPTH * cos_az * cos_el).clamp(GAIN_MIN, GAIN_MAX) as f32);

        SpatialRenderTarget {
            position,
            forward,
            up,
            gain,
        }
    }
}

#[inline]
fn vec3(x: f64, y: f64, z: f64) -> Vec3 {
    Vec3::new(x as f32, y as f32, z as f32)
}
