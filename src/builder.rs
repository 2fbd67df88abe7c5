//! Builder for configuring and constructing an `Engine`.

use std::path::PathBuf;
use std::sync::Arc;

use ambi_core::{AudioBackend, Clock, SystemClock, TransportController};
use ambi_orientation::{DeviceOrientationSource, OrientationTracker, UnsupportedSource};
use ambi_spatial::{NullSink, SpatialMapper, SpatialRenderSink};
use tracing::debug;

use crate::config::{EngineConfig, LoadStrategy};
use crate::fetch::{AssetFetcher, FileFetcher};
use crate::{Engine, Result};

/// Only the audio backend is required. Without an orientation source the
/// engine behaves as on a platform without sensors (manual orientation
/// only); without a render sink the mapped targets are discarded.
///
/// # Example
///
/// ```ignore
/// use ambi::prelude::*;
///
/// let engine = Engine::builder()
///     .config(EngineConfig::from_file("ambi.toml")?)
///     .audio_backend(backend)
///     .orientation_source(FeedSource::new())
///     .asset_path("assets/forest.wav")
///     .load_strategy(LoadStrategy::OnFirstGesture)
///     .build()?;
/// ```
#[derive(Default)]
pub struct EngineBuilder {
    config: EngineConfig,
    clock: Option<Arc<dyn Clock>>,
    backend: Option<Box<dyn AudioBackend>>,
    source: Option<Box<dyn DeviceOrientationSource>>,
    sink: Option<Box<dyn SpatialRenderSink>>,
    fetcher: Option<Box<dyn AssetFetcher>>,
}

impl EngineBuilder {
    /// Replace the whole configuration.
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Default: 0.7
    pub fn volume(mut self, volume: f64) -> Self {
        self.config.volume = volume;
        self
    }

    /// Default: [`LoadStrategy::Eager`]
    pub fn load_strategy(mut self, strategy: LoadStrategy) -> Self {
        self.config.load_strategy = strategy;
        self
    }

    /// Default: 0.8
    pub fn smoothing_factor(mut self, factor: f64) -> Self {
        self.config.tracker.smoothing_factor = factor;
        self
    }

    /// Default: [`SystemClock`]
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn audio_backend(mut self, backend: impl AudioBackend + 'static) -> Self {
        self.backend = Some(Box::new(backend));
        self
    }

    pub fn orientation_source(mut self, source: impl DeviceOrientationSource + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn render_sink(mut self, sink: impl SpatialRenderSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    pub fn fetcher(mut self, fetcher: impl AssetFetcher + 'static) -> Self {
        self.fetcher = Some(Box::new(fetcher));
        self
    }

    /// Shorthand for a [`FileFetcher`].
    pub fn asset_path(self, path: impl Into<PathBuf>) -> Self {
        self.fetcher(FileFetcher::new(path))
    }

    pub fn build(self) -> Result<Engine> {
        let config = self.config;
        config.validate()?;

        let backend = self.backend.ok_or_else(|| {
            ambi_core::Error::InvalidConfig("an audio backend is required".into())
        })?;
        let clock = self
            .clock
            .unwrap_or_else(|| Arc::new(SystemClock::new()));
        let source = self
            .source
            .unwrap_or_else(|| Box::new(UnsupportedSource));
        let sink = self.sink.unwrap_or_else(|| Box::new(NullSink));

        let tracker = OrientationTracker::with_config(source, &config.tracker);
        let mapper = SpatialMapper::new(config.mapper)?;
        let transport = TransportController::with_config(backend, clock, &config.transport);

        debug!(
            strategy = ?config.load_strategy,
            volume = config.volume,
            has_fetcher = self.fetcher.is_some(),
            "building engine"
        );

        let mut engine = Engine::from_parts(
            tracker,
            mapper,
            transport,
            sink,
            self.fetcher,
            config.load_strategy,
            config.volume,
        );

        if config.load_strategy == LoadStrategy::Eager {
            engine.load_from_fetcher()?;
        }

        Ok(engine)
    }
}
