//! Play/pause/stop transport over a single loaded buffer.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::backend::{AudioBackend, BufferInfo, PlaybackHandle};
use super::fsm::{TransitionResult, TransportCommand, TransportFsm, TransportState};
use super::progress::{PlaybackProgress, ProgressTimer};
use crate::clock::Clock;
use crate::config::TransportConfig;
use crate::observer::{Observers, SubscriptionId};
use crate::{Error, Result};

/// Notifications published by [`TransportController`].
#[derive(Debug, Clone, PartialEq)]
pub enum TransportEvent {
    /// A new buffer was decoded and attached.
    Loaded(BufferInfo),
    /// The transport moved to a new state.
    StateChanged(TransportState),
    /// Periodic position update while playing, plus one reset on stop.
    Progress(PlaybackProgress),
    /// Playback ran off the end of the buffer (as opposed to a user stop).
    Ended,
}

/// Transport controller - owns the playback state machine, the position
/// clock and the progress timer for one audio buffer.
///
/// Position is derived from the clock rather than accumulated: while playing
/// it is `now - epoch`, otherwise the offset captured by the last pause.
///
/// The host drives it from its event loop by calling [`poll`](Self::poll);
/// that is where progress ticks and natural end-of-buffer are detected.
pub struct TransportController {
    fsm: TransportFsm,
    backend: Box<dyn AudioBackend>,
    clock: Arc<dyn Clock>,
    buffer: Option<BufferInfo>,
    playback: Option<Box<dyn PlaybackHandle>>,
    epoch: f64,
    paused_offset: f64,
    timer: ProgressTimer,
    observers: Observers<TransportEvent>,
}

impl TransportController {
    pub fn new(backend: Box<dyn AudioBackend>, clock: Arc<dyn Clock>) -> Self {
        Self::with_config(backend, clock, &TransportConfig::default())
    }

    pub fn with_config(
        backend: Box<dyn AudioBackend>,
        clock: Arc<dyn Clock>,
        config: &TransportConfig,
    ) -> Self {
        Self {
            fsm: TransportFsm::new(),
            backend,
            clock,
            buffer: None,
            playback: None,
            epoch: 0.0,
            paused_offset: 0.0,
            timer: ProgressTimer::new(config.progress_interval),
            observers: Observers::new(),
        }
    }

    // ==================== Observers ====================

    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&TransportEvent) + Send + Sync + 'static,
    {
        self.observers.subscribe(callback)
    }

    pub fn subscribe_channel(&self) -> (SubscriptionId, crossbeam_channel::Receiver<TransportEvent>) {
        self.observers.subscribe_channel()
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    // ==================== Queries ====================

    #[inline]
    pub fn state(&self) -> TransportState {
        self.fsm.state()
    }

    pub fn is_playing(&self) -> bool {
        self.state() == TransportState::Playing
    }

    pub fn buffer_info(&self) -> Option<BufferInfo> {
        self.buffer
    }

    pub fn has_buffer(&self) -> bool {
        self.buffer.is_some()
    }

    /// Buffer length in seconds, 0 when nothing is loaded.
    pub fn duration(&self) -> f64 {
        self.buffer.map_or(0.0, |b| b.duration)
    }

    /// Seconds into the buffer, always within `[0, duration]`.
    pub fn current_position(&self) -> f64 {
        self.position_at(self.clock.now())
    }

    pub fn progress(&self) -> PlaybackProgress {
        PlaybackProgress::new(self.current_position(), self.duration())
    }

    fn position_at(&self, now: f64) -> f64 {
        let raw = match self.state() {
            TransportState::Playing => now - self.epoch,
            TransportState::Paused | TransportState::Stopped => self.paused_offset,
        };
        raw.clamp(0.0, self.duration())
    }

    // ==================== Commands ====================

    /// Decode and attach a new buffer. Only allowed while stopped.
    pub fn load(&mut self, bytes: &[u8]) -> Result<BufferInfo> {
        let state = self.state();
        if state != TransportState::Stopped {
            warn!(?state, "rejecting buffer load while transport is active");
            return Err(Error::TransportBusy(state));
        }

        let info = self.backend.load(bytes)?;
        info!(
            channels = info.channel_count,
            sample_rate = info.sample_rate,
            duration = info.duration,
            ambisonic = info.is_ambisonic(),
            "audio buffer loaded"
        );

        self.buffer = Some(info);
        self.paused_offset = 0.0;
        self.epoch = 0.0;
        self.observers.emit(&TransportEvent::Loaded(info));
        Ok(info)
    }

    /// Start or resume playback.
    ///
    /// No-op while already playing. On failure nothing changes: the state,
    /// epoch and paused offset are exactly as before the call.
    pub fn play(&mut self) -> Result<()> {
        if self.buffer.is_none() {
            warn!("play requested with no buffer loaded");
            return Err(Error::NoBufferLoaded);
        }
        if self.is_playing() {
            return Ok(());
        }

        let offset = self.paused_offset;
        let mut handle = self.backend.create_playback(offset)?;
        if let Err(e) = handle.start() {
            warn!(error = %e, offset, "playback source failed to start");
            handle.stop();
            return Err(e);
        }

        let now = self.clock.now();
        self.epoch = now - offset;
        self.playback = Some(handle);
        self.apply(TransportCommand::Play);
        self.timer.arm(now);
        Ok(())
    }

    /// Pause and remember the position. No-op unless playing.
    pub fn pause(&mut self) {
        if !self.is_playing() {
            return;
        }

        let now = self.clock.now();
        self.paused_offset = self.position_at(now);
        self.timer.disarm();
        self.release_playback();
        self.apply(TransportCommand::Pause);
    }

    /// Stop from any state and rewind to the start.
    ///
    /// Always emits one `Progress` at position 0 so observers can reset.
    pub fn stop(&mut self) {
        self.halt(TransportCommand::Stop);
    }

    /// Called when the playback source ran off the end of the buffer.
    ///
    /// Equivalent to [`stop`](Self::stop) followed by an [`TransportEvent::Ended`]
    /// notification. Ignored unless playing, since a source that was already
    /// torn down by pause/stop can still report its end late.
    pub fn on_buffer_end(&mut self) {
        if !self.is_playing() {
            debug!(state = ?self.state(), "ignoring stale end-of-buffer");
            return;
        }

        // The source finished by itself; there is nothing to stop.
        self.playback = None;
        self.halt(TransportCommand::BufferEnded);
        self.observers.emit(&TransportEvent::Ended);
    }

    /// Current output spectrum from the backend analyser.
    ///
    /// See [`AudioBackend::frequency_data`]. Available in every state; a
    /// paused or stopped backend reports silence.
    pub fn frequency_data(&self, out: &mut [u8]) -> bool {
        self.backend.frequency_data(out)
    }

    /// Event-loop pump: emits a due progress tick and detects natural end.
    pub fn poll(&mut self) {
        if !self.is_playing() {
            return;
        }

        if let Some(due) = self.timer.take_due(self.clock.now()) {
            let progress = PlaybackProgress::new(self.position_at(due), self.duration());
            self.observers.emit(&TransportEvent::Progress(progress));
        }

        if self.playback.as_ref().is_some_and(|h| h.has_ended()) {
            self.on_buffer_end();
        }
    }

    fn halt(&mut self, command: TransportCommand) {
        self.timer.disarm();
        self.release_playback();
        self.paused_offset = 0.0;
        self.epoch = 0.0;
        self.apply(command);

        let reset = PlaybackProgress::new(0.0, self.duration());
        self.observers.emit(&TransportEvent::Progress(reset));
    }

    fn release_playback(&mut self) {
        if let Some(mut handle) = self.playback.take() {
            handle.stop();
        }
    }

    fn apply(&mut self, command: TransportCommand) {
        if let TransitionResult::StateChanged { from, to } = self.fsm.transition(command) {
            debug!(?from, ?to, ?command, "transport state changed");
            self.observers.emit(&TransportEvent::StateChanged(to));
        }
    }
}

impl core::fmt::Debug for TransportController {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TransportController")
            .field("state", &self.state())
            .field("buffer", &self.buffer)
            .field("paused_offset", &self.paused_offset)
            .field("epoch", &self.epoch)
            .finish_non_exhaustive()
    }
}
