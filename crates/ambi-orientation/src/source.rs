//! Abstraction for platform orientation sensors.
//!
//! The tracker never talks to a sensor API directly. A platform implements
//! [`DeviceOrientationSource`] and pushes samples into the channel the
//! tracker hands it on [`start`](DeviceOrientationSource::start).

use crate::{OrientationSample, Result};
use crossbeam_channel::Sender;
use parking_lot::Mutex;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Answer to a consent prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionState {
    Granted,
    Denied,
}

impl PermissionState {
    pub fn is_granted(self) -> bool {
        self == Self::Granted
    }
}

/// Future returned by [`DeviceOrientationSource::request_permission`].
pub type PermissionFuture<'a> = Pin<Box<dyn Future<Output = Result<PermissionState>> + Send + 'a>>;

/// Platform device-orientation sensor.
pub trait DeviceOrientationSource: Send {
    /// Whether the platform exposes orientation events at all.
    fn is_supported(&self) -> bool;

    /// Whether an explicit consent prompt must be answered before `start`.
    fn requires_permission(&self) -> bool {
        false
    }

    /// Show the consent prompt and resolve with the user's answer.
    ///
    /// A request the platform refuses to even show should resolve to
    /// `Err(Error::PermissionDenied)`. Only called when
    /// [`requires_permission`](Self::requires_permission) is true.
    fn request_permission(&mut self) -> PermissionFuture<'_> {
        Box::pin(async { Ok(PermissionState::Granted) })
    }

    /// Begin delivering samples into `sink`, in arrival order.
    fn start(&mut self, sink: Sender<OrientationSample>) -> Result<()>;

    /// Stop delivering samples. After this returns the sender handed to
    /// `start` must have been dropped.
    fn stop(&mut self);
}

/// Source for platforms without an orientation sensor.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnsupportedSource;

impl DeviceOrientationSource for UnsupportedSource {
    fn is_supported(&self) -> bool {
        false
    }

    fn start(&mut self, _sink: Sender<OrientationSample>) -> Result<()> {
        Err(crate::Error::Unsupported)
    }

    fn stop(&mut self) {}
}

/// Push-based source for hosts whose sensor API is callback driven.
///
/// The host keeps a [`SampleFeed`] and calls [`SampleFeed::push`] from its
/// sensor callback; pushes while the source is stopped are dropped.
#[derive(Debug, Clone, Default)]
pub struct FeedSource {
    sender: Arc<Mutex<Option<Sender<OrientationSample>>>>,
    consent: Option<PermissionState>,
}

/// Host-side handle of a [`FeedSource`].
#[derive(Debug, Clone)]
pub struct SampleFeed {
    sender: Arc<Mutex<Option<Sender<OrientationSample>>>>,
}

impl FeedSource {
    /// A source that needs no consent prompt.
    pub fn new() -> Self {
        Self::default()
    }

    /// A source gated on a consent prompt the host has already answered.
    pub fn with_consent(answer: PermissionState) -> Self {
        Self {
            consent: Some(answer),
            ..Self::default()
        }
    }

    pub fn feed(&self) -> SampleFeed {
        SampleFeed {
            sender: Arc::clone(&self.sender),
        }
    }
}

impl SampleFeed {
    /// Deliver one raw sample. Returns false when nobody is listening.
    pub fn push(&self, sample: OrientationSample) -> bool {
        match self.sender.lock().as_ref() {
            Some(tx) => tx.send(sample).is_ok(),
            None => false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.sender.lock().is_some()
    }
}

impl DeviceOrientationSource for FeedSource {
    fn is_supported(&self) -> bool {
        true
    }

    fn requires_permission(&self) -> bool {
        self.consent.is_some()
    }

    fn request_permission(&mut self) -> PermissionFuture<'_> {
        let answer = self.consent.unwrap_or(PermissionState::Granted);
        Box::pin(async move { Ok(answer) })
    }

    fn start(&mut self, sink: Sender<OrientationSample>) -> Result<()> {
        *self.sender.lock() = Some(sink);
        Ok(())
    }

    fn stop(&mut self) {
        self.sender.lock().take();
    }
}
