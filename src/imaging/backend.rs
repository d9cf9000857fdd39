//! Dimension probe trait and shared types.
//!
//! Scanning only needs one thing from an image file: its pixel size. The
//! [`DimensionProbe`] trait keeps that behind a seam so scan tests can run
//! without real images.

use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to read dimensions of {path}: {reason}")]
    Unreadable { path: String, reason: String },
}

/// Pixel size of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Reads an image's pixel size.
///
/// Implementations must be `Sync`: scanning probes files from a rayon pool.
pub trait DimensionProbe: Sync {
    fn dimensions(&self, path: &Path) -> Result<Dimensions, ProbeError>;
}
