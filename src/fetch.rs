//! Asset fetching for engines that load a fixed file.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::Result;

/// Produces the encoded bytes of the audio asset.
///
/// Slow transports should give up with
/// [`ambi_core::Error::Timeout`] rather than block indefinitely.
pub trait AssetFetcher: Send {
    fn fetch(&mut self) -> Result<Vec<u8>>;
}

/// Reads the asset from the local filesystem.
#[derive(Debug, Clone)]
pub struct FileFetcher {
    path: PathBuf,
}

impl FileFetcher {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AssetFetcher for FileFetcher {
    fn fetch(&mut self) -> Result<Vec<u8>> {
        debug!(path = %self.path.display(), "fetching audio asset");
        Ok(std::fs::read(&self.path)?)
    }
}
