//! Contracts for the audio decoding/playback collaborator.

use crate::Result;
use serde::{Deserialize, Serialize};

/// Minimum channel count treated as first-order ambisonics (W, X, Y, Z).
pub const B_FORMAT_CHANNELS: u16 = 4;

/// Frequency bins in a spectrum snapshot (half of a 256-point FFT).
pub const SPECTRUM_BINS: usize = 128;

/// Properties of a decoded audio buffer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BufferInfo {
    /// Length in seconds.
    pub duration: f64,
    pub sample_rate: u32,
    pub channel_count: u16,
}

impl BufferInfo {
    pub fn new(duration: f64, sample_rate: u32, channel_count: u16) -> Self {
        Self {
            duration,
            sample_rate,
            channel_count,
        }
    }

    /// Four or more channels are played as a B-format sound field.
    pub fn is_ambisonic(&self) -> bool {
        self.channel_count >= B_FORMAT_CHANNELS
    }
}

/// Decodes audio and creates playback sources for it.
///
/// The backend owns the decoded samples and the actual audio clock; the
/// transport only tracks where playback should be.
pub trait AudioBackend: Send {
    /// Decode `bytes` and keep the result as the current buffer.
    ///
    /// Decode errors should be reported as [`Error::DecodeFailure`](crate::Error::DecodeFailure).
    fn load(&mut self, bytes: &[u8]) -> Result<BufferInfo>;

    /// Create a source for the current buffer starting `offset` seconds in.
    fn create_playback(&mut self, offset: f64) -> Result<Box<dyn PlaybackHandle>>;

    /// Copy the current output spectrum into `out`, one byte per bin from
    /// low to high frequency (0..=255, 0 is silence).
    ///
    /// Fills at most `out.len()` bins, normally [`SPECTRUM_BINS`]. Returns
    /// false when the backend has no analyser, leaving `out` untouched.
    fn frequency_data(&self, out: &mut [u8]) -> bool {
        let _ = out;
        false
    }
}

/// A single playback source. One-shot: once stopped it is discarded.
pub trait PlaybackHandle: Send {
    fn start(&mut self) -> Result<()>;

    fn stop(&mut self);

    /// True once playback ran off the end of the buffer on its own.
    fn has_ended(&self) -> bool;
}
