//! Core runtime for the ambisonic orientation engine.
//!
//! # Primary API
//!
//! - [`angle`]: wrap, clamp and circular smoothing of angles in degrees
//! - [`TransportController`]: play/pause/stop over one loaded buffer
//! - [`Observers`]: multi-subscriber event lists with deterministic unsubscribe
//! - [`Clock`]: monotonic time source ([`SystemClock`], [`ManualClock`])
//!
//! # Example
//!
//! ```ignore
//! use ambi_core::{ManualClock, TransportController};
//! use std::sync::Arc;
//!
//! let clock = ManualClock::new();
//! let mut transport = TransportController::new(backend, Arc::new(clock.clone()));
//! transport.load(&bytes)?;
//! transport.play()?;
//! clock.advance(0.1);
//! transport.poll();
//! ```

pub mod angle;

pub mod error;
pub use error::{Error, Result};

pub mod clock;
pub use clock::{Clock, ManualClock, SystemClock};

mod config;
pub use config::{TransportConfig, DEFAULT_PROGRESS_INTERVAL};

mod lockfree;
pub use lockfree::AtomicDouble;

mod observer;
pub use observer::{Observers, SubscriptionId};

pub mod transport;
pub use transport::{
    format_time, AudioBackend, BufferInfo, PlaybackHandle, PlaybackProgress,
    TransportController, TransportEvent, TransportState, SPECTRUM_BINS,
};
