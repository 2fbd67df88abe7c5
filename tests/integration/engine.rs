//! Engine lifecycle integration tests
//!
//! Building, load strategies, volume, frame output and disposal.

use std::sync::Arc;

use ambi::core::Error as CoreError;
use ambi::prelude::*;
use ambi::{DistanceModel, ManualClock, TrackerStatus, SPECTRUM_BINS};
use approx::assert_abs_diff_eq;

use crate::helpers::tolerances::VECTOR_EPSILON;
use crate::helpers::*;

fn builder_with_fakes() -> (ambi::EngineBuilder, Arc<BackendProbe>, RecordingSink) {
    let (backend, probe) = MockBackend::new(TEST_DURATION, 4);
    let sink = RecordingSink::new();
    let builder = Engine::builder()
        .clock(Arc::new(ManualClock::new()))
        .audio_backend(backend)
        .render_sink(sink.clone());
    (builder, probe, sink)
}

#[test]
fn test_backend_is_required() {
    let result = Engine::builder().build();
    assert!(matches!(
        result,
        Err(Error::Core(CoreError::InvalidConfig(_)))
    ));
}

#[test]
fn test_invalid_config_rejected() {
    let (builder, _, _) = builder_with_fakes();
    assert!(builder.volume(2.0).build().is_err());

    let (builder, _, _) = builder_with_fakes();
    assert!(matches!(
        builder.smoothing_factor(-0.5).build(),
        Err(Error::Orientation(_))
    ));
}

#[test]
fn test_defaults_without_source() {
    let (builder, _, sink) = builder_with_fakes();
    let mut engine = builder.build().unwrap();

    let frame = engine.frame();
    assert_eq!(frame.transport, TransportState::Stopped);
    assert_eq!(frame.duration, 0.0);
    assert_eq!(
        frame.tracker,
        TrackerStatus {
            supported: false,
            has_permission: false,
            enabled: false,
            working: false,
        }
    );
    assert_eq!(engine.tracker().state(), TrackerState::Unsupported);
    assert_eq!(engine.volume(), 0.7);
    assert_abs_diff_eq!(sink.state().gain.unwrap(), 0.49, epsilon = VECTOR_EPSILON);
}

#[test]
fn test_renderer_initialized_facing_front() {
    let (builder, _, sink) = builder_with_fakes();
    let _engine = builder.build().unwrap();

    let state = sink.state();
    assert_eq!(state.position, Some(Vec3::new(0.0, 0.0, 5.0)));
    assert_eq!(state.forward, Some(Vec3::new(0.0, 0.0, -1.0)));
    assert_eq!(state.up, Some(Vec3::new(0.0, 1.0, 0.0)));
}

#[test]
fn test_eager_strategy_loads_during_build() {
    let fetcher = StaticFetcher::new(b"ambisonic bytes");
    let (builder, probe, _) = builder_with_fakes();

    let engine = builder
        .fetcher(fetcher.clone())
        .load_strategy(LoadStrategy::Eager)
        .build()
        .unwrap();

    assert_eq!(fetcher.calls(), 1);
    assert_eq!(probe.loads.load(std::sync::atomic::Ordering::SeqCst), 1);
    assert_eq!(engine.transport().duration(), TEST_DURATION);
}

#[test]
fn test_first_gesture_strategy_defers_load() {
    let fetcher = StaticFetcher::new(b"ambisonic bytes");
    let (builder, _, _) = builder_with_fakes();

    let mut engine = builder
        .fetcher(fetcher.clone())
        .load_strategy(LoadStrategy::OnFirstGesture)
        .build()
        .unwrap();
    assert_eq!(fetcher.calls(), 0);
    assert!(!engine.transport().has_buffer());

    engine.toggle_playback().unwrap();
    assert_eq!(fetcher.calls(), 1);
    assert_eq!(engine.transport().state(), TransportState::Playing);

    // Later gestures reuse the buffer
    engine.stop();
    engine.play().unwrap();
    assert_eq!(fetcher.calls(), 1);
}

#[test]
fn test_fetch_timeout_reported() {
    let (builder, _, _) = builder_with_fakes();
    let mut engine = builder
        .fetcher(StaticFetcher::timing_out())
        .load_strategy(LoadStrategy::OnFirstGesture)
        .build()
        .unwrap();
    let (_id, events) = engine.subscribe_channel();

    assert!(matches!(
        engine.play(),
        Err(Error::Core(CoreError::Timeout(_)))
    ));
    assert_eq!(engine.transport().state(), TransportState::Stopped);
    assert!(matches!(
        events.try_recv(),
        Ok(EngineEvent::Failure(msg)) if msg.starts_with("fetch")
    ));
}

#[test]
fn test_eager_fetch_failure_fails_build() {
    let (builder, _, _) = builder_with_fakes();
    let result = builder
        .fetcher(StaticFetcher::timing_out())
        .load_strategy(LoadStrategy::Eager)
        .build();
    assert!(matches!(result, Err(Error::Core(CoreError::Timeout(_)))));
}

#[test]
fn test_volume_uses_square_curve() {
    let mut fx = Fixture::new();
    let (_id, events) = fx.engine.subscribe_channel();

    fx.engine.set_volume(0.5);
    assert_eq!(fx.engine.volume(), 0.5);
    assert_eq!(fx.sink.state().gain, Some(0.25));
    assert_eq!(events.try_recv(), Ok(EngineEvent::VolumeChanged(0.5)));

    fx.engine.set_volume(3.0);
    assert_eq!(fx.engine.volume(), 1.0);
    fx.engine.set_volume(f64::NAN);
    assert_eq!(fx.engine.volume(), 1.0);

    fx.engine.frame();
    assert_eq!(fx.sink.state().gain, Some(1.0));
}

#[test]
fn test_gain_modulation_scales_master() {
    let config = EngineConfig {
        volume: 1.0,
        mapper: ambi::spatial::MapperConfig {
            distance: DistanceModel::default(),
            gain_modulation: true,
        },
        ..EngineConfig::default()
    };
    let mut fx = Fixture::with(config, ScriptedSource::new(Consent::NotRequired));

    fx.engine.set_manual_orientation(-180.0, 0.0, 0.0);
    let frame = fx.engine.frame();

    assert_abs_diff_eq!(frame.target.gain.unwrap(), 0.4, epsilon = VECTOR_EPSILON);
    assert_abs_diff_eq!(fx.sink.state().gain.unwrap(), 0.4, epsilon = VECTOR_EPSILON);
    assert_abs_diff_eq!(
        fx.sink.state().position.unwrap().z,
        -5.0,
        epsilon = VECTOR_EPSILON
    );
}

#[test]
fn test_frame_pushes_mapped_target() {
    let mut fx = Fixture::new();
    let updates_before = fx.sink.state().updates;

    fx.engine.set_manual_orientation(90.0, 0.0, 0.0);
    let frame = fx.engine.frame();

    let state = fx.sink.state();
    assert_eq!(state.updates, updates_before + 1);
    assert_eq!(state.position, Some(frame.target.position));
    assert_abs_diff_eq!(frame.target.position.x, 5.0, epsilon = VECTOR_EPSILON);
    assert_abs_diff_eq!(frame.target.position.z, 0.0, epsilon = VECTOR_EPSILON);
}

#[test]
fn test_frame_time_label() {
    let mut fx = Fixture::loaded();
    fx.engine.play().unwrap();
    fx.clock.set(3.2);
    assert_eq!(fx.engine.frame().time_label(), "0:03 / 0:10");
}

#[test]
fn test_spectrum_passthrough() {
    let (builder, probe, _) = builder_with_fakes();
    let engine = builder.build().unwrap();
    let mut bins = [0u8; SPECTRUM_BINS];

    assert!(!engine.frequency_data(&mut bins));

    let ramp: Vec<u8> = (0..SPECTRUM_BINS).map(|i| (i * 2) as u8).collect();
    probe.set_spectrum(ramp.clone());
    assert!(engine.frequency_data(&mut bins));
    assert_eq!(bins.as_slice(), ramp.as_slice());

    // A shorter destination only receives the low bins
    let mut low = [0u8; 4];
    assert!(engine.frequency_data(&mut low));
    assert_eq!(low, [0, 2, 4, 6]);
}

#[tokio::test]
async fn test_dispose_stops_everything() {
    let mut fx = Fixture::loaded();
    fx.engine.enable_orientation().await.unwrap();
    fx.engine.play().unwrap();
    fx.clock.set(4.0);

    fx.engine.dispose();

    assert_eq!(fx.engine.transport().state(), TransportState::Stopped);
    assert_eq!(fx.engine.transport().current_position(), 0.0);
    assert_eq!(fx.engine.tracker().state(), TrackerState::Disabled);
    assert!(!fx.source.is_listening());

    // Idempotent
    fx.engine.dispose();
}

#[test]
fn test_config_from_toml_drives_build() {
    let config = EngineConfig::from_toml_str(
        r#"
        volume = 0.5
        load_strategy = "on_first_gesture"

        [mapper]
        distance = { model = "fixed", radius = 2.0 }
        "#,
    )
    .unwrap();

    let fetcher = StaticFetcher::new(b"bytes");
    let (builder, _, sink) = builder_with_fakes();
    let mut engine = builder
        .config(config)
        .fetcher(fetcher.clone())
        .build()
        .unwrap();

    assert_eq!(engine.load_strategy(), LoadStrategy::OnFirstGesture);
    assert_eq!(fetcher.calls(), 0);

    engine.frame();
    assert_eq!(sink.state().position, Some(Vec3::new(0.0, 0.0, 2.0)));
    assert_eq!(sink.state().gain, Some(0.25));
}
