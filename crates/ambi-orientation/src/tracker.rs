//! Orientation tracker: permission flow, calibration and smoothing.

use ambi_core::angle::{smooth_circular, smooth_exponential};
use ambi_core::{Observers, SubscriptionId};
use crossbeam_channel::{unbounded, Receiver};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::TrackerConfig;
use crate::sample::{CalibrationOffset, OrientationReading, OrientationSample, SpatialOrientation};
use crate::source::DeviceOrientationSource;
use crate::{Error, Result};

/// Lifecycle of the tracker, derived from support, permission and enable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrackerState {
    /// The platform has no orientation sensor. Terminal.
    Unsupported,
    /// Supported, but consent has not been granted (yet).
    NoPermission,
    /// Permission granted, not listening.
    Disabled,
    /// Listening to the sensor.
    Active,
}

/// Snapshot for status displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerStatus {
    pub supported: bool,
    pub has_permission: bool,
    pub enabled: bool,
    /// All three of the above.
    pub working: bool,
}

/// Notifications published by [`OrientationTracker`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OrientationEvent {
    OrientationChanged(SpatialOrientation),
    PermissionChanged(bool),
}

/// Turns raw device samples (or manual input) into a smoothed listener
/// orientation.
///
/// Samples arrive on a channel handed to the source by [`enable`](Self::enable)
/// and are consumed by [`process_pending`](Self::process_pending), which the
/// host calls from its event loop.
pub struct OrientationTracker {
    source: Box<dyn DeviceOrientationSource>,
    supported: bool,
    has_permission: bool,
    receiver: Option<Receiver<OrientationSample>>,
    raw: OrientationSample,
    calibration: CalibrationOffset,
    orientation: SpatialOrientation,
    smoothing_factor: f64,
    observers: Observers<OrientationEvent>,
}

impl OrientationTracker {
    pub fn new(source: Box<dyn DeviceOrientationSource>) -> Self {
        Self::with_config(source, &TrackerConfig::default())
    }

    pub fn with_config(source: Box<dyn DeviceOrientationSource>, config: &TrackerConfig) -> Self {
        let supported = source.is_supported();
        if !supported {
            warn!("device orientation not supported");
        } else if source.requires_permission() {
            debug!("device orientation requires permission");
        }

        Self {
            source,
            supported,
            has_permission: false,
            receiver: None,
            raw: OrientationSample::default(),
            calibration: CalibrationOffset::ZERO,
            orientation: SpatialOrientation::ZERO,
            smoothing_factor: config.smoothing_factor.clamp(0.0, 1.0),
            observers: Observers::new(),
        }
    }

    // ==================== Observers ====================

    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&OrientationEvent) + Send + Sync + 'static,
    {
        self.observers.subscribe(callback)
    }

    pub fn subscribe_channel(
        &self,
    ) -> (SubscriptionId, crossbeam_channel::Receiver<OrientationEvent>) {
        self.observers.subscribe_channel()
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    // ==================== Status ====================

    /// Whether the platform exposes orientation events. Fixed at construction.
    #[inline]
    pub fn query_support(&self) -> bool {
        self.supported
    }

    #[inline]
    pub fn has_permission(&self) -> bool {
        self.has_permission
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.receiver.is_some()
    }

    pub fn is_working(&self) -> bool {
        self.supported && self.has_permission && self.is_enabled()
    }

    pub fn state(&self) -> TrackerState {
        if !self.supported {
            TrackerState::Unsupported
        } else if !self.has_permission {
            TrackerState::NoPermission
        } else if !self.is_enabled() {
            TrackerState::Disabled
        } else {
            TrackerState::Active
        }
    }

    pub fn status(&self) -> TrackerStatus {
        TrackerStatus {
            supported: self.supported,
            has_permission: self.has_permission,
            enabled: self.is_enabled(),
            working: self.is_working(),
        }
    }

    // ==================== Reads ====================

    pub fn orientation(&self) -> SpatialOrientation {
        self.orientation
    }

    /// Current orientation plus the last raw sample.
    pub fn reading(&self) -> OrientationReading {
        OrientationReading {
            orientation: self.orientation,
            raw: self.raw,
        }
    }

    pub fn calibration(&self) -> CalibrationOffset {
        self.calibration
    }

    pub fn smoothing_factor(&self) -> f64 {
        self.smoothing_factor
    }

    /// Set the smoothing weight; clamped into `[0, 1]`.
    pub fn set_smoothing_factor(&mut self, factor: f64) {
        self.smoothing_factor = if factor.is_nan() {
            self.smoothing_factor
        } else {
            factor.clamp(0.0, 1.0)
        };
    }

    // ==================== Permission / lifecycle ====================

    /// Ask for consent to read the sensor.
    ///
    /// Resolves to `Ok(true)` when granted and `Ok(false)` when the user
    /// declines. A request the platform rejects outright fails with
    /// [`Error::PermissionDenied`]. Every outcome is published as
    /// [`OrientationEvent::PermissionChanged`].
    pub async fn request_permission(&mut self) -> Result<bool> {
        if !self.supported {
            return Err(Error::Unsupported);
        }

        let outcome = if self.source.requires_permission() {
            match self.source.request_permission().await {
                Ok(answer) => Ok(answer.is_granted()),
                Err(e) => {
                    warn!(error = %e, "orientation permission request rejected");
                    Err(Error::PermissionDenied)
                }
            }
        } else {
            Ok(true)
        };

        self.has_permission = matches!(outcome, Ok(true));
        if !self.has_permission {
            // Revoked consent also ends an active stream.
            self.disable();
        }
        debug!(granted = self.has_permission, "orientation permission updated");
        self.observers
            .emit(&OrientationEvent::PermissionChanged(self.has_permission));

        outcome
    }

    /// Start listening to the sensor, asking for permission first if needed.
    ///
    /// No-op while already active. On failure the tracker is left in
    /// `NoPermission` or `Disabled` with no subscription held.
    pub async fn enable(&mut self) -> Result<()> {
        if !self.supported {
            warn!("cannot enable orientation tracking: unsupported");
            return Err(Error::Unsupported);
        }

        if !self.has_permission && !self.request_permission().await? {
            return Err(Error::PermissionDenied);
        }

        if self.is_enabled() {
            return Ok(());
        }

        let (tx, rx) = unbounded();
        if let Err(e) = self.source.start(tx) {
            warn!(error = %e, "orientation source failed to start");
            self.source.stop();
            return Err(e);
        }

        self.receiver = Some(rx);
        info!("orientation tracking enabled");
        Ok(())
    }

    /// Stop listening. Idempotent; samples still queued are discarded.
    pub fn disable(&mut self) {
        if self.receiver.take().is_none() {
            return;
        }
        self.source.stop();
        info!("orientation tracking disabled");
    }

    // ==================== Samples ====================

    /// Drain samples delivered by the source, in arrival order.
    ///
    /// Returns how many were applied.
    pub fn process_pending(&mut self) -> usize {
        let pending: Vec<OrientationSample> = match &self.receiver {
            Some(rx) => rx.try_iter().collect(),
            None => return 0,
        };

        pending
            .into_iter()
            .filter(|sample| self.handle_sample(*sample))
            .count()
    }

    /// Apply one raw sample. Ignored (returns false) unless active.
    pub fn handle_sample(&mut self, sample: OrientationSample) -> bool {
        if !self.is_enabled() {
            return false;
        }

        self.raw = sample.sanitized();
        let target = SpatialOrientation::from_device(self.calibration.apply(self.raw));
        let previous = self.orientation;
        let factor = self.smoothing_factor;

        self.orientation = SpatialOrientation {
            azimuth: smooth_circular(previous.azimuth, target.azimuth, factor),
            elevation: smooth_exponential(previous.elevation, target.elevation, factor),
            roll: smooth_exponential(previous.roll, target.roll, factor),
        };

        self.observers
            .emit(&OrientationEvent::OrientationChanged(self.orientation));
        true
    }

    /// Set the orientation directly, bypassing smoothing.
    ///
    /// Azimuth is wrapped and elevation/roll clamped, as for sensor input.
    pub fn set_manual_orientation(&mut self, azimuth: f64, elevation: f64, roll: f64) {
        self.orientation = SpatialOrientation::new(azimuth, elevation, roll);
        self.observers
            .emit(&OrientationEvent::OrientationChanged(self.orientation));
    }

    // ==================== Calibration ====================

    /// Treat the current raw pose as straight ahead.
    pub fn calibrate(&mut self) {
        self.calibration = CalibrationOffset::from(self.raw);
        info!(
            alpha = self.calibration.alpha,
            beta = self.calibration.beta,
            gamma = self.calibration.gamma,
            "orientation calibrated"
        );
    }

    pub fn reset_calibration(&mut self) {
        self.calibration = CalibrationOffset::ZERO;
        info!("orientation calibration reset");
    }
}

impl Drop for OrientationTracker {
    fn drop(&mut self) {
        self.disable();
    }
}

impl core::fmt::Debug for OrientationTracker {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("OrientationTracker")
            .field("state", &self.state())
            .field("orientation", &self.orientation)
            .field("calibration", &self.calibration)
            .field("smoothing_factor", &self.smoothing_factor)
            .finish_non_exhaustive()
    }
}
