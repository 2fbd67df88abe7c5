//! Angle helpers for orientation processing.
//!
//! All angles are in degrees. Azimuth lives on a circle, so blending two
//! headings has to take the short arc across the ±180° seam instead of
//! sweeping through 0°.
//!
//! # Example
//!
//! ```
//! use ambi_core::angle::{normalize_angle, smooth_circular};
//!
//! assert_eq!(normalize_angle(370.0, -180.0, 180.0), 10.0);
//!
//! // 179° and -179° are 2° apart, so the midpoint is the seam, not 0°.
//! let mid = smooth_circular(179.0, -179.0, 0.5);
//! assert!(mid.abs() > 179.0);
//! ```

/// Width of the circular azimuth domain.
pub const FULL_TURN: f64 = 360.0;

/// Half of [`FULL_TURN`]; azimuth is kept in `[-HALF_TURN, HALF_TURN)`.
pub const HALF_TURN: f64 = 180.0;

/// Wrap `angle` into `[min, max)`.
///
/// Works for inputs any number of turns out of range. Non-finite input
/// yields NaN.
#[inline]
pub fn normalize_angle(angle: f64, min: f64, max: f64) -> f64 {
    debug_assert!(max > min, "empty angle range [{min}, {max})");

    if angle >= min && angle < max {
        return angle;
    }

    let range = max - min;
    let wrapped = (angle - min).rem_euclid(range);

    // rem_euclid rounds up to `range` for offsets a hair below zero
    if wrapped >= range {
        min
    } else {
        min + wrapped
    }
}

/// Hard clamp into `[min, max]` without wrapping.
#[inline]
pub fn clamp_angle(angle: f64, min: f64, max: f64) -> f64 {
    angle.max(min).min(max)
}

/// Exponential smoothing: `previous * factor + next * (1 - factor)`.
///
/// `factor` is clamped to `[0, 1]`; 1 freezes the value, 0 follows `next`.
#[inline]
pub fn smooth_exponential(previous: f64, next: f64, factor: f64) -> f64 {
    let factor = factor.clamp(0.0, 1.0);
    previous * factor + next * (1.0 - factor)
}

/// Exponential smoothing on the 360° circle.
///
/// When the two headings are more than half a turn apart, the smaller one is
/// lifted by a full turn before blending so the interpolation crosses the
/// ±180° seam. The result is wrapped back into `[-180, 180)`.
#[inline]
pub fn smooth_circular(previous: f64, next: f64, factor: f64) -> f64 {
    let (mut previous, mut next) = (previous, next);

    if (next - previous).abs() > HALF_TURN {
        if next > previous {
            previous += FULL_TURN;
        } else {
            next += FULL_TURN;
        }
    }

    normalize_angle(
        smooth_exponential(previous, next, factor),
        -HALF_TURN,
        HALF_TURN,
    )
}

/// Signed shortest arc from `from` to `to`, in `[-180, 180)`.
#[inline]
pub fn circular_distance(from: f64, to: f64) -> f64 {
    normalize_angle(to - from, -HALF_TURN, HALF_TURN)
}
