//! Shared test utilities for the thumbgen test suite.
//!
//! Provides synthetic image writers and a project-root fixture laid out the
//! way the CLI expects (`images/fulls`, `images/thumbs`).
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let project = ProjectFixture::new();
//! write_jpeg(&project.fulls().join("dawn.jpg"), 1200, 800);
//! std::fs::write(project.fulls().join("notes.txt"), "skip me").unwrap();
//!
//! assert_eq!(project.thumb_names(), Vec::<String>::new());
//! ```

use image::{ExtendedColorType, ImageEncoder, Rgba, RgbaImage};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// =========================================================================
// Synthetic images
// =========================================================================

/// Write a gradient JPEG with the given dimensions.
pub fn write_jpeg(path: &Path, width: u32, height: u32) {
    let img = image::RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    let file = std::fs::File::create(path).unwrap();
    let writer = std::io::BufWriter::new(file);
    image::codecs::jpeg::JpegEncoder::new(writer)
        .write_image(img.as_raw(), width, height, ExtendedColorType::Rgb8)
        .unwrap();
}

/// Write an RGBA PNG: left half fully transparent red, right half opaque blue.
pub fn write_split_alpha_png(path: &Path, width: u32, height: u32) {
    let img = RgbaImage::from_fn(width, height, |x, _| {
        if x < width / 2 {
            Rgba([255, 0, 0, 0])
        } else {
            Rgba([0, 0, 255, 255])
        }
    });
    img.save(path).unwrap();
}

/// Write bytes that carry a JPEG signature but no decodable image.
pub fn write_corrupt_jpeg(path: &Path) {
    std::fs::write(path, b"\xFF\xD8\xFF\xE0\x00\x10JFIF truncated").unwrap();
}

// =========================================================================
// Project layout
// =========================================================================

/// A temporary project root with an existing `images/fulls` directory.
pub struct ProjectFixture {
    pub root: TempDir,
}

impl ProjectFixture {
    pub fn new() -> Self {
        let root = TempDir::new().unwrap();
        std::fs::create_dir_all(root.path().join("images/fulls")).unwrap();
        Self { root }
    }

    /// A project root with no `images/` directory at all.
    pub fn empty() -> Self {
        Self {
            root: TempDir::new().unwrap(),
        }
    }

    pub fn fulls(&self) -> PathBuf {
        self.root.path().join("images/fulls")
    }

    pub fn thumbs(&self) -> PathBuf {
        self.root.path().join("images/thumbs")
    }

    /// Sorted file names currently present in `images/thumbs`.
    pub fn thumb_names(&self) -> Vec<String> {
        let Ok(entries) = std::fs::read_dir(self.thumbs()) else {
            return Vec::new();
        };
        let mut names: Vec<String> = entries
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    /// Decoded dimensions of a thumbnail. Panics if missing or undecodable.
    pub fn thumb_dimensions(&self, name: &str) -> (u32, u32) {
        let path = self.thumbs().join(name);
        image::ImageReader::open(&path)
            .and_then(|r| r.with_guessed_format())
            .unwrap_or_else(|e| panic!("thumbnail '{name}' not readable: {e}"))
            .into_dimensions()
            .unwrap_or_else(|e| panic!("thumbnail '{name}' not decodable: {e}"))
    }
}
