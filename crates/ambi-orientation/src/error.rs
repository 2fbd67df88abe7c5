//! Error types for ambi-orientation.

use thiserror::Error;

/// Error type for orientation tracking.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Device orientation is not supported on this platform")]
    Unsupported,

    #[error("Device orientation permission denied")]
    PermissionDenied,

    #[error("Orientation source error: {0}")]
    Source(String),

    #[error("Invalid tracker config: {0}")]
    InvalidConfig(String),
}

/// Result type alias.
pub type Result<T> = core::result::Result<T, Error>;
