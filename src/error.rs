//! Centralized error type for the ambi umbrella crate.
//!
//! Wraps all subsystem errors so `?` propagates naturally across crate boundaries.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] ambi_core::Error),

    #[error("Orientation: {0}")]
    Orientation(#[from] ambi_orientation::Error),

    #[error("Spatial: {0}")]
    Spatial(#[from] ambi_spatial::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Config: {0}")]
    Config(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
