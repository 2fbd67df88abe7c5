//! Spatial mapping for the ambi engine.
//!
//! [`SpatialMapper`] turns a listener orientation into a
//! [`SpatialRenderTarget`]: a source position on a sphere around the
//! listener, the listener's forward/up basis and an optional
//! direction-dependent gain. A [`SpatialRenderSink`] is whatever acoustic
//! renderer consumes it.
//!
//! ```
//! use ambi_orientation::SpatialOrientation;
//! use ambi_spatial::{SpatialMapper, Vec3};
//!
//! let target = SpatialMapper::default().map(SpatialOrientation::ZERO);
//! assert_eq!(target.position, Vec3::new(0.0, 0.0, 5.0));
//! ```

pub mod error;
pub use error::{Error, Result};

mod mapper;
pub use mapper::{DistanceModel, MapperConfig, SpatialMapper, DEFAULT_DISTANCE};

mod target;
pub use target::{NullSink, SpatialRenderSink, SpatialRenderTarget, Vec3};
