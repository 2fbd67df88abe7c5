//! Device orientation tracking for the ambisonic engine.
//!
//! Turns raw device-orientation samples (compass heading plus two tilts)
//! into a smoothed listener orientation, handling the consent prompt,
//! calibration and manual override.
//!
//! # Example
//!
//! ```ignore
//! use ambi_orientation::{FeedSource, OrientationSample, OrientationTracker};
//!
//! let source = FeedSource::new();
//! let feed = source.feed();
//! let mut tracker = OrientationTracker::new(Box::new(source));
//! tracker.enable().await?;
//!
//! // From the platform sensor callback:
//! feed.push(OrientationSample::new(alpha, beta, gamma));
//!
//! // From the event loop:
//! tracker.process_pending();
//! let o = tracker.orientation();
//! ```

pub mod error;
pub use error::{Error, Result};

mod config;
pub use config::{TrackerConfig, DEFAULT_SMOOTHING_FACTOR};

mod sample;
pub use sample::{CalibrationOffset, OrientationReading, OrientationSample, SpatialOrientation};

mod source;
pub use source::{
    DeviceOrientationSource, FeedSource, PermissionFuture, PermissionState, SampleFeed,
    UnsupportedSource,
};

mod tracker;
pub use tracker::{OrientationEvent, OrientationTracker, TrackerState, TrackerStatus};
