//! Engine that wires the orientation tracker, spatial mapper and transport.

use ambi_core::{
    format_time, BufferInfo, Observers, SubscriptionId, TransportController, TransportState,
};
use ambi_orientation::{OrientationTracker, SpatialOrientation, TrackerStatus};
use ambi_spatial::{SpatialMapper, SpatialRenderSink, SpatialRenderTarget};
use tracing::{info, warn};

use crate::config::LoadStrategy;
use crate::fetch::AssetFetcher;
use crate::Result;

/// Notifications published by the [`Engine`] itself.
///
/// Transport and orientation notifications are published by the components;
/// subscribe through [`Engine::transport`] and [`Engine::tracker`].
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// An engine operation failed. The same error was returned to the caller.
    Failure(String),
    /// Master volume changed; carries the new volume (before the gain curve).
    VolumeChanged(f64),
}

/// Everything a presentation layer needs to draw one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSnapshot {
    pub orientation: SpatialOrientation,
    pub target: SpatialRenderTarget,
    /// Playback position in seconds.
    pub position: f64,
    /// Buffer length in seconds, 0 before anything is loaded.
    pub duration: f64,
    pub transport: TransportState,
    pub tracker: TrackerStatus,
}

impl FrameSnapshot {
    /// `"m:ss / m:ss"` for the time display.
    pub fn time_label(&self) -> String {
        format!("{} / {}", format_time(self.position), format_time(self.duration))
    }
}

/// Ambisonic playback steered by device orientation.
///
/// Owns one of each component and drives them from the host's event loop:
/// call [`frame`](Self::frame) once per animation frame.
///
/// # Example
///
/// ```ignore
/// use ambi::prelude::*;
///
/// let mut engine = Engine::builder()
///     .audio_backend(backend)
///     .orientation_source(source)
///     .render_sink(panner)
///     .build()?;
///
/// engine.load_audio(&bytes)?;
/// engine.play()?;
///
/// loop {
///     let frame = engine.frame();
///     draw(&frame);
/// }
/// ```
pub struct Engine {
    tracker: OrientationTracker,
    mapper: SpatialMapper,
    transport: TransportController,
    sink: Box<dyn SpatialRenderSink>,
    fetcher: Option<Box<dyn AssetFetcher>>,
    load_strategy: LoadStrategy,
    volume: f64,
    last_target: SpatialRenderTarget,
    observers: Observers<EngineEvent>,
}

impl Engine {
    pub fn builder() -> crate::EngineBuilder {
        crate::EngineBuilder::default()
    }

    pub(crate) fn from_parts(
        tracker: OrientationTracker,
        mapper: SpatialMapper,
        transport: TransportController,
        mut sink: Box<dyn SpatialRenderSink>,
        fetcher: Option<Box<dyn AssetFetcher>>,
        load_strategy: LoadStrategy,
        volume: f64,
    ) -> Self {
        let last_target = mapper.map(tracker.orientation());
        last_target.apply_to(sink.as_mut(), master_gain(volume));

        Self {
            tracker,
            mapper,
            transport,
            sink,
            fetcher,
            load_strategy,
            volume,
            last_target,
            observers: Observers::new(),
        }
    }

    // ==================== Components ====================

    pub fn tracker(&self) -> &OrientationTracker {
        &self.tracker
    }

    pub fn tracker_mut(&mut self) -> &mut OrientationTracker {
        &mut self.tracker
    }

    pub fn transport(&self) -> &TransportController {
        &self.transport
    }

    pub fn mapper(&self) -> &SpatialMapper {
        &self.mapper
    }

    pub fn load_strategy(&self) -> LoadStrategy {
        self.load_strategy
    }

    // ==================== Observers ====================

    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&EngineEvent) + Send + Sync + 'static,
    {
        self.observers.subscribe(callback)
    }

    pub fn subscribe_channel(&self) -> (SubscriptionId, crossbeam_channel::Receiver<EngineEvent>) {
        self.observers.subscribe_channel()
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    // ==================== Playback ====================

    /// Decode `bytes` as the new buffer. Only allowed while stopped.
    pub fn load_audio(&mut self, bytes: &[u8]) -> Result<BufferInfo> {
        let result = self.transport.load(bytes).map_err(Into::into);
        self.report("load", result)
    }

    /// Fetch and decode the configured asset.
    pub(crate) fn load_from_fetcher(&mut self) -> Result<Option<BufferInfo>> {
        let Some(fetcher) = self.fetcher.as_mut() else {
            return Ok(None);
        };
        let result = fetcher
            .fetch()
            .and_then(|bytes| self.transport.load(&bytes).map_err(Into::into))
            .map(Some);
        self.report("fetch", result)
    }

    pub fn play(&mut self) -> Result<()> {
        if self.load_strategy == LoadStrategy::OnFirstGesture && !self.transport.has_buffer() {
            self.load_from_fetcher()?;
        }
        let result = self.transport.play().map_err(Into::into);
        self.report("play", result)
    }

    pub fn pause(&mut self) {
        self.transport.pause();
    }

    pub fn stop(&mut self) {
        self.transport.stop();
    }

    /// Pause when playing, play otherwise.
    pub fn toggle_playback(&mut self) -> Result<()> {
        if self.transport.is_playing() {
            self.pause();
            Ok(())
        } else {
            self.play()
        }
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    /// Gain sent to the renderer before direction-dependent modulation.
    pub fn master_gain(&self) -> f32 {
        master_gain(self.volume)
    }

    /// Set the master volume, clamped to `[0, 1]`. NaN is ignored.
    pub fn set_volume(&mut self, volume: f64) {
        if volume.is_nan() {
            return;
        }
        self.volume = volume.clamp(0.0, 1.0);
        self.sink
            .set_gain(self.master_gain() * self.last_target.gain.unwrap_or(1.0));
        self.observers.emit(&EngineEvent::VolumeChanged(self.volume));
    }

    /// Copy the output spectrum into `out` for the visualizer.
    ///
    /// Returns false, leaving `out` untouched, when the audio backend has no
    /// analyser. Size `out` with [`SPECTRUM_BINS`](ambi_core::SPECTRUM_BINS).
    pub fn frequency_data(&self, out: &mut [u8]) -> bool {
        self.transport.frequency_data(out)
    }

    // ==================== Orientation ====================

    pub async fn enable_orientation(&mut self) -> Result<()> {
        let result = self.tracker.enable().await.map_err(Into::into);
        self.report("enable orientation", result)
    }

    pub fn disable_orientation(&mut self) {
        self.tracker.disable();
    }

    /// Disable when active, enable otherwise. Returns whether tracking is on.
    pub async fn toggle_orientation(&mut self) -> Result<bool> {
        if self.tracker.is_enabled() {
            self.disable_orientation();
        } else {
            self.enable_orientation().await?;
        }
        Ok(self.tracker.is_enabled())
    }

    pub fn calibrate(&mut self) {
        self.tracker.calibrate();
    }

    pub fn reset_calibration(&mut self) {
        self.tracker.reset_calibration();
    }

    pub fn set_manual_orientation(&mut self, azimuth: f64, elevation: f64, roll: f64) {
        self.tracker.set_manual_orientation(azimuth, elevation, roll);
    }

    // ==================== Frame ====================

    /// Advance one animation frame.
    ///
    /// Applies pending sensor samples, pushes the mapped target to the
    /// renderer and pumps the transport (progress ticks, end of buffer).
    pub fn frame(&mut self) -> FrameSnapshot {
        self.tracker.process_pending();

        let orientation = self.tracker.orientation();
        let target = self.mapper.map(orientation);
        let gain = self.master_gain();
        target.apply_to(self.sink.as_mut(), gain);
        self.last_target = target;

        self.transport.poll();

        FrameSnapshot {
            orientation,
            target,
            position: self.transport.current_position(),
            duration: self.transport.duration(),
            transport: self.transport.state(),
            tracker: self.tracker.status(),
        }
    }

    /// Stop playback and release the sensor.
    pub fn dispose(&mut self) {
        self.transport.stop();
        self.tracker.disable();
        info!("engine disposed");
    }

    fn report<T>(&self, operation: &str, result: Result<T>) -> Result<T> {
        if let Err(e) = &result {
            warn!(operation, error = %e, "engine operation failed");
            self.observers
                .emit(&EngineEvent::Failure(format!("{operation}: {e}")));
        }
        result
    }
}

#[inline]
fn master_gain(volume: f64) -> f32 {
    (volume * volume) as f32
}

impl core::fmt::Debug for Engine {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Engine")
            .field("tracker", &self.tracker)
            .field("transport", &self.transport)
            .field("mapper", &self.mapper)
            .field("load_strategy", &self.load_strategy)
            .field("volume", &self.volume)
            .finish_non_exhaustive()
    }
}
