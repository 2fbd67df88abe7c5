//! # 01 - Headless Session
//!
//! Simulate a listening session without audio hardware or sensors: a silent
//! backend, a simulated clock and a scripted head turn.
//!
//! **Concepts:** Engine setup, feed-driven orientation, frame loop, transport events
//!
//! ```bash
//! cargo run --example 01_headless_session
//! ```

use std::sync::Arc;

use ambi::prelude::*;
use ambi::ManualClock;

/// Pretends every input is a 6 second first-order ambisonic file.
struct SilentBackend;

struct SilentPlayback;

impl AudioBackend for SilentBackend {
    fn load(&mut self, _bytes: &[u8]) -> ambi::core::Result<BufferInfo> {
        Ok(BufferInfo::new(6.0, 48000, 4))
    }

    fn create_playback(&mut self, _offset: f64) -> ambi::core::Result<Box<dyn PlaybackHandle>> {
        Ok(Box::new(SilentPlayback))
    }
}

impl PlaybackHandle for SilentPlayback {
    fn start(&mut self) -> ambi::core::Result<()> {
        Ok(())
    }

    fn stop(&mut self) {}

    fn has_ended(&self) -> bool {
        false
    }
}

/// Prints what a real panner would receive.
struct PrintSink;

impl SpatialRenderSink for PrintSink {
    fn set_position(&mut self, p: Vec3) {
        println!("  source at ({:+.2}, {:+.2}, {:+.2})", p.x, p.y, p.z);
    }

    fn set_listener_basis(&mut self, _forward: Vec3, _up: Vec3) {}

    fn set_gain(&mut self, _gain: f32) {}
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ambi::Result<()> {
    tracing_subscriber::fmt::init();

    let clock = ManualClock::new();
    let source = FeedSource::new();
    let feed = source.feed();

    let mut engine = Engine::builder()
        .clock(Arc::new(clock.clone()))
        .audio_backend(SilentBackend)
        .orientation_source(source)
        .render_sink(PrintSink)
        .build()?;

    engine.transport().subscribe(|event| {
        if let TransportEvent::Ended = event {
            println!("playback ended");
        }
    });

    engine.load_audio(b"fake")?;
    engine.enable_orientation().await?;
    engine.play()?;

    // Turn the head from north through east, 15 degrees per frame
    for step in 0..8 {
        feed.push(OrientationSample::new(step as f64 * 15.0, 0.0, 0.0));
        clock.advance(0.5);
        let frame = engine.frame();
        println!(
            "{}  azimuth {:+.1}",
            frame.time_label(),
            frame.orientation.azimuth
        );
    }

    engine.dispose();
    Ok(())
}
