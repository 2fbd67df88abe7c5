//! # Ambi - orientation-steered ambisonic playback
//!
//! Plays an ambisonic recording and lets the listener steer the sound field
//! by tilting a device or with manual controls.
//!
//! ## Architecture
//!
//! Ambi is an umbrella crate that coordinates:
//! - **ambi-core** - Angle math, playback transport, clocks, observers
//! - **ambi-orientation** - Device orientation tracking (permission, calibration, smoothing)
//! - **ambi-spatial** - Orientation to render target mapping
//!
//! Data flows from the orientation source through the tracker and mapper
//! into the render sink once per frame. The transport runs alongside and
//! reports playback progress.
//!
//! ## Quick Start
//!
//! ```ignore
//! use ambi::prelude::*;
//!
//! let mut engine = Engine::builder()
//!     .audio_backend(backend)
//!     .orientation_source(source)
//!     .render_sink(panner)
//!     .build()?;
//!
//! engine.load_audio(&bytes)?;
//! engine.play()?;
//! engine.enable_orientation().await?;
//!
//! // Once per animation frame
//! let frame = engine.frame();
//! ```

/// Re-export of ambi-core for direct access
pub use ambi_core as core;
/// Re-export of ambi-orientation for direct access
pub use ambi_orientation as orientation;
/// Re-export of ambi-spatial for direct access
pub use ambi_spatial as spatial;

pub use ambi_core::{
    format_time, AudioBackend, BufferInfo, Clock, ManualClock, PlaybackHandle, PlaybackProgress,
    SubscriptionId, SystemClock, TransportController, TransportEvent, TransportState,
    SPECTRUM_BINS,
};
pub use ambi_orientation::{
    CalibrationOffset, DeviceOrientationSource, FeedSource, OrientationEvent, OrientationReading,
    OrientationSample, OrientationTracker, PermissionState, SampleFeed, SpatialOrientation,
    TrackerState, TrackerStatus, UnsupportedSource,
};
pub use ambi_spatial::{
    DistanceModel, NullSink, SpatialMapper, SpatialRenderSink, SpatialRenderTarget, Vec3,
};

mod error;
pub use error::{Error, Result};

mod config;
pub use config::{EngineConfig, LoadStrategy, DEFAULT_VOLUME};

mod fetch;
pub use fetch::{AssetFetcher, FileFetcher};

mod engine;
pub use engine::{Engine, EngineEvent, FrameSnapshot};

mod builder;
pub use builder::EngineBuilder;

/// Convenient imports for common usage
pub mod prelude {
    pub use crate::{
        AssetFetcher, AudioBackend, BufferInfo, DeviceOrientationSource, Engine, EngineConfig,
        EngineEvent, Error, FeedSource, FileFetcher, FrameSnapshot, LoadStrategy,
        OrientationEvent, OrientationSample, PlaybackHandle, Result, SpatialOrientation,
        SpatialRenderSink, SpatialRenderTarget, TrackerState, TransportEvent, TransportState,
        Vec3,
    };
}
