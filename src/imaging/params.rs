//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how*. They sit between
//! [`operations`](super::operations), which decides the output path and bound,
//! and the [`backend`](super::backend), which does the pixel work. A mock
//! backend can record them without touching a single pixel.
//!
//! - [`Quality`]: JPEG quality (1-100, default 85), clamped on construction.
//! - [`ThumbnailParams`]: source, output path, bounding edge, quality.

use std::path::PathBuf;

/// JPEG encoding quality (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(u8);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(85)
    }
}

/// Parameters for one thumbnail: decode `source`, flatten, fit inside a
/// `max_edge` square, encode to `output`.
#[derive(Debug, Clone, PartialEq)]
pub struct ThumbnailParams {
    pub source: PathBuf,
    pub output: PathBuf,
    /// Upper bound for both width and height.
    pub max_edge: u32,
    pub quality: Quality,
}
