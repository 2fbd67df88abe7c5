//! Error types for ambi-core.

use crate::transport::TransportState;
use thiserror::Error;

/// Error type for ambi-core operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("No audio buffer loaded")]
    NoBufferLoaded,

    #[error("Transport is {0:?}; a new buffer can only be loaded while stopped")]
    TransportBusy(TransportState),

    #[error("Failed to decode audio: {0}")]
    DecodeFailure(String),

    #[error("Timed out: {0}")]
    Timeout(String),

    #[error("Audio backend error: {0}")]
    Backend(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

/// Result type alias.
pub type Result<T> = core::result::Result<T, Error>;
