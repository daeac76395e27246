//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the one operation the generator needs:
//! decode a source and write its thumbnail. The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), built on the `image`
//! crate. Tests swap in a recording mock.

use super::params::ThumbnailParams;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("decode failed: {0}")]
    Decode(String),
    #[error("JPEG encode failed: {0}")]
    Encode(String),
}

/// Coarse classification of a per-file failure, carried into the run report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Io,
    Decode,
    Encode,
    /// Another source in the same run already wrote this output name.
    Collision,
}

impl BackendError {
    pub fn kind(&self) -> FailureKind {
        match self {
            BackendError::Io(_) => FailureKind::Io,
            BackendError::Decode(_) => FailureKind::Decode,
            BackendError::Encode(_) => FailureKind::Encode,
        }
    }
}

/// Pixel size of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn as_tuple(self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// What a thumbnail operation produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThumbnailOutcome {
    pub source: Dimensions,
    pub output: Dimensions,
}

/// Trait for image processing backends.
pub trait ImageBackend {
    /// Decode, flatten onto white, bound-resize and write a JPEG thumbnail.
    fn thumbnail(&self, params: &ThumbnailParams) -> Result<ThumbnailOutcome, BackendError>;
}
