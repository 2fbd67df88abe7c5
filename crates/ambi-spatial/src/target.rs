//! Render target produced by the mapper and the sink that consumes it.

use serde::{Deserialize, Serialize};

/// Cartesian vector in listener space (x right, y up, z front).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[f32; 3]> for Vec3 {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self::new(x, y, z)
    }
}

/// Source position, listener basis and optional gain for one frame.
///
/// `forward` and `up` are passed to the renderer as computed; they are not
/// normalized against each other.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpatialRenderTarget {
    pub position: Vec3,
    pub forward: Vec3,
    pub up: Vec3,
    /// Direction-dependent gain, `None` when modulation is off.
    pub gain: Option<f32>,
}

impl SpatialRenderTarget {
    /// Push this target into `sink`.
    ///
    /// The sink gain is `master_gain` scaled by the modulation gain, if any.
    pub fn apply_to(&self, sink: &mut dyn SpatialRenderSink, master_gain: f32) {
        sink.set_position(self.position);
        sink.set_listener_basis(self.forward, self.up);
        sink.set_gain(master_gain * self.gain.unwrap_or(1.0));
    }
}

/// The acoustic renderer (panner + listener) driven by the engine.
pub trait SpatialRenderSink: Send {
    fn set_position(&mut self, position: Vec3);

    fn set_listener_basis(&mut self, forward: Vec3, up: Vec3);

    fn set_gain(&mut self, gain: f32);
}

/// Sink that discards everything; for headless use.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl SpatialRenderSink for NullSink {
    fn set_position(&mut self, _position: Vec3) {}

    fn set_listener_basis(&mut self, _forward: Vec3, _up: Vec3) {}

    fn set_gain(&mut self, _gain: f32) {}
}
