//! Raw sensor samples, calibration offsets and smoothed orientation.

use ambi_core::angle::{clamp_angle, normalize_angle};
use serde::{Deserialize, Serialize};

/// One raw device-orientation reading, in degrees.
///
/// - `alpha`: compass heading, `[0, 360)`
/// - `beta`: front/back tilt, `[-180, 180]`
/// - `gamma`: left/right tilt, `[-90, 90]`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct OrientationSample {
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
}

impl OrientationSample {
    /// Build a sample; non-finite axes read as 0.
    pub fn new(alpha: f64, beta: f64, gamma: f64) -> Self {
        Self {
            alpha: finite_or_zero(alpha),
            beta: finite_or_zero(beta),
            gamma: finite_or_zero(gamma),
        }
    }

    /// Build a sample from axes a platform may omit.
    pub fn from_partial(alpha: Option<f64>, beta: Option<f64>, gamma: Option<f64>) -> Self {
        Self::new(
            alpha.unwrap_or(0.0),
            beta.unwrap_or(0.0),
            gamma.unwrap_or(0.0),
        )
    }

    /// Sample with NaN/inf axes replaced by 0.
    pub(crate) fn sanitized(self) -> Self {
        Self::new(self.alpha, self.beta, self.gamma)
    }
}

#[inline]
fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Reference orientation subtracted from every subsequent raw sample.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CalibrationOffset {
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
}

impl CalibrationOffset {
    pub const ZERO: Self = Self {
        alpha: 0.0,
        beta: 0.0,
        gamma: 0.0,
    };

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Per-axis difference `sample - self`.
    pub fn apply(&self, sample: OrientationSample) -> OrientationSample {
        OrientationSample {
            alpha: sample.alpha - self.alpha,
            beta: sample.beta - self.beta,
            gamma: sample.gamma - self.gamma,
        }
    }
}

impl From<OrientationSample> for CalibrationOffset {
    fn from(sample: OrientationSample) -> Self {
        Self {
            alpha: sample.alpha,
            beta: sample.beta,
            gamma: sample.gamma,
        }
    }
}

/// Listener orientation used for rendering, in degrees.
///
/// `azimuth` wraps in `[-180, 180)`; `elevation` and `roll` are clamped to
/// `[-90, 90]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SpatialOrientation {
    pub azimuth: f64,
    pub elevation: f64,
    pub roll: f64,
}

impl SpatialOrientation {
    pub const ZERO: Self = Self {
        azimuth: 0.0,
        elevation: 0.0,
        roll: 0.0,
    };

    /// Build an orientation, wrapping azimuth and clamping the tilt axes.
    ///
    /// Non-finite input is treated as 0.
    pub fn new(azimuth: f64, elevation: f64, roll: f64) -> Self {
        Self {
            azimuth: normalize_angle(finite_or_zero(azimuth), -180.0, 180.0),
            elevation: clamp_angle(finite_or_zero(elevation), -90.0, 90.0),
            roll: clamp_angle(finite_or_zero(roll), -90.0, 90.0),
        }
    }

    /// Device axes to listener axes: azimuth follows alpha, elevation is
    /// inverted beta, roll follows gamma.
    pub fn from_device(sample: OrientationSample) -> Self {
        Self::new(sample.alpha, -sample.beta, sample.gamma)
    }
}

/// Current orientation together with the raw sample it came from.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct OrientationReading {
    pub orientation: SpatialOrientation,
    pub raw: OrientationSample,
}
