//! Transport integration tests
//!
//! Drives play/pause/stop through the engine with a manual clock and checks
//! positions, progress ticks and end-of-buffer handling.

use std::sync::atomic::Ordering;

use ambi::core::Error as CoreError;
use ambi::prelude::*;
use ambi::PlaybackProgress;
use approx::assert_abs_diff_eq;

use crate::helpers::tolerances::TIME_EPSILON;
use crate::helpers::*;

/// 10 s buffer: play at 0, pause at 3, resume at 5, check at 6.
#[test]
fn test_pause_resume_timeline() {
    let mut fx = Fixture::loaded();

    fx.engine.play().unwrap();
    fx.clock.set(3.0);
    let frame = fx.engine.frame();
    assert_eq!(frame.transport, TransportState::Playing);
    assert_abs_diff_eq!(frame.position, 3.0, epsilon = TIME_EPSILON);

    fx.engine.pause();
    for t in [3.5, 4.0, 5.0] {
        fx.clock.set(t);
        assert_eq!(fx.engine.frame().position, 3.0);
    }

    fx.engine.play().unwrap();
    assert_eq!(fx.backend.last_offset(), Some(3.0));

    fx.clock.set(6.0);
    let frame = fx.engine.frame();
    assert_abs_diff_eq!(frame.position, 4.0, epsilon = TIME_EPSILON);
    assert_eq!(frame.duration, TEST_DURATION);
}

#[test]
fn test_play_without_buffer_reports_failure() {
    let mut fx = Fixture::new();
    let (_id, failures) = fx.engine.subscribe_channel();

    let result = fx.engine.play();

    assert!(matches!(result, Err(Error::Core(CoreError::NoBufferLoaded))));
    assert_eq!(fx.engine.transport().state(), TransportState::Stopped);
    assert!(matches!(failures.try_recv(), Ok(EngineEvent::Failure(msg)) if msg.starts_with("play")));
    assert_eq!(fx.backend.starts.load(Ordering::SeqCst), 0);
}

#[test]
fn test_backend_failure_leaves_transport_stopped() {
    let mut fx = Fixture::loaded();
    fx.backend.fail_playback.store(true, Ordering::SeqCst);

    assert!(matches!(
        fx.engine.play(),
        Err(Error::Core(CoreError::Backend(_)))
    ));
    assert_eq!(fx.engine.transport().state(), TransportState::Stopped);

    fx.backend.fail_playback.store(false, Ordering::SeqCst);
    fx.engine.play().unwrap();
    assert_eq!(fx.backend.last_offset(), Some(0.0));
}

#[test]
fn test_progress_ticks_while_playing() {
    let mut fx = Fixture::loaded();
    let log = record_transport(&fx.engine);

    fx.engine.play().unwrap();
    for k in 1..=5 {
        fx.clock.set(k as f64 * 0.1 + 0.01);
        fx.engine.frame();
    }

    let ticks = progress_positions(&log.lock().unwrap());
    assert_eq!(ticks.len(), 5);
    for (k, position) in ticks.iter().enumerate() {
        assert_abs_diff_eq!(*position, (k + 1) as f64 * 0.1, epsilon = TIME_EPSILON);
    }
}

#[test]
fn test_no_ticks_after_pause() {
    let mut fx = Fixture::loaded();
    fx.engine.play().unwrap();
    fx.clock.set(0.05);
    fx.engine.pause();

    let log = record_transport(&fx.engine);
    for k in 1..=10 {
        fx.clock.set(k as f64);
        fx.engine.frame();
    }

    assert!(log.lock().unwrap().is_empty());
}

#[test]
fn test_late_frame_coalesces_ticks() {
    let mut fx = Fixture::loaded();
    let log = record_transport(&fx.engine);

    fx.engine.play().unwrap();
    fx.clock.set(0.75);
    fx.engine.frame();

    let ticks = progress_positions(&log.lock().unwrap());
    assert_eq!(ticks.len(), 1);
    assert_abs_diff_eq!(ticks[0], 0.7, epsilon = TIME_EPSILON);
}

#[test]
fn test_stop_resets_position_and_notifies() {
    let mut fx = Fixture::loaded();
    fx.engine.play().unwrap();
    fx.clock.set(2.0);

    let log = record_transport(&fx.engine);
    fx.engine.stop();

    assert_eq!(fx.engine.transport().current_position(), 0.0);
    assert_eq!(
        *log.lock().unwrap(),
        vec![
            TransportEvent::StateChanged(TransportState::Stopped),
            TransportEvent::Progress(PlaybackProgress::new(0.0, TEST_DURATION)),
        ]
    );

    // Play after stop starts from the top
    fx.engine.play().unwrap();
    assert_eq!(fx.backend.last_offset(), Some(0.0));
}

#[test]
fn test_natural_end_of_buffer() {
    let mut fx = Fixture::loaded();
    let log = record_transport(&fx.engine);

    fx.engine.play().unwrap();
    fx.clock.set(TEST_DURATION);
    fx.backend.finish();
    let frame = fx.engine.frame();

    assert_eq!(frame.transport, TransportState::Stopped);
    assert_eq!(frame.position, 0.0);

    let log = log.lock().unwrap();
    assert_eq!(log.last(), Some(&TransportEvent::Ended));
    assert!(log.contains(&TransportEvent::Progress(PlaybackProgress::new(
        0.0,
        TEST_DURATION
    ))));
    assert_eq!(fx.backend.stops.load(Ordering::SeqCst), 0);
}

#[test]
fn test_toggle_playback() {
    let mut fx = Fixture::loaded();

    fx.engine.toggle_playback().unwrap();
    assert_eq!(fx.engine.transport().state(), TransportState::Playing);

    fx.clock.set(1.5);
    fx.engine.toggle_playback().unwrap();
    assert_eq!(fx.engine.transport().state(), TransportState::Paused);

    fx.clock.set(8.0);
    fx.engine.toggle_playback().unwrap();
    assert_eq!(fx.engine.transport().state(), TransportState::Playing);
    assert_eq!(fx.backend.last_offset(), Some(1.5));
    assert_eq!(fx.backend.starts.load(Ordering::SeqCst), 2);
}

#[test]
fn test_position_never_exceeds_duration() {
    let mut fx = Fixture::loaded();
    fx.engine.play().unwrap();

    fx.clock.set(TEST_DURATION + 4.0);
    let frame = fx.engine.frame();
    assert_eq!(frame.position, TEST_DURATION);
}

#[test]
fn test_load_rejected_while_playing() {
    let mut fx = Fixture::loaded();
    fx.engine.play().unwrap();

    assert!(matches!(
        fx.engine.load_audio(b"another"),
        Err(Error::Core(CoreError::TransportBusy(TransportState::Playing)))
    ));

    fx.engine.stop();
    let info = fx.engine.load_audio(b"another").unwrap();
    assert!(info.is_ambisonic());
}

#[test]
fn test_decode_failure_propagates() {
    let mut fx = Fixture::new();
    assert!(matches!(
        fx.engine.load_audio(&[]),
        Err(Error::Core(CoreError::DecodeFailure(_)))
    ));
    assert!(fx.engine.transport().buffer_info().is_none());
}
