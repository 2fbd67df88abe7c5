//! Integration test modules for ambi
//!
//! - engine: Builder, load strategies, volume, frame snapshots, disposal
//! - transport: Playback state and clock through the engine
//! - orientation: Permission flow and sensor-driven orientation

pub mod engine;
pub mod transport;
