//! Source directory scanning.
//!
//! Lists the direct entries of the source directory and splits them into
//! images the generator will process and entries it skips. Subdirectories are
//! not descended into.
//!
//! An entry is an image when its extension, compared case-insensitively, is
//! one of `jpg`, `jpeg`, `png`, `gif`, `webp`. The extension alone decides:
//! a directory called `album.jpg` or a dangling `photo.jpg` link is still
//! handed to the backend, which reports it as a per-file failure. Other
//! entries are skipped.
//!
//! Both lists are sorted by file name so reports are reproducible regardless
//! of the order the filesystem returns entries in.

use crate::imaging::is_supported_extension;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("{} directory not found", .0.display())]
    SourceNotFound(PathBuf),
    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),
    #[error("cannot list {}: {source}", .path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// An image file discovered in the source directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceImage {
    /// File name including extension, e.g. `001-dawn.JPG`.
    pub filename: String,
    pub path: PathBuf,
}

/// Why an entry was not picked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Directory,
    UnsupportedExtension,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    pub filename: String,
    pub reason: SkipReason,
}

/// Result of scanning a source directory.
#[derive(Debug, Default)]
pub struct ScanResult {
    pub images: Vec<SourceImage>,
    pub skipped: Vec<SkippedEntry>,
}

/// Check that `dir` exists and is a directory.
pub fn ensure_source_dir(dir: &Path) -> Result<(), ScanError> {
    if !dir.exists() {
        return Err(ScanError::SourceNotFound(dir.to_path_buf()));
    }
    if !dir.is_dir() {
        return Err(ScanError::NotADirectory(dir.to_path_buf()));
    }
    Ok(())
}

fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(is_supported_extension)
}

/// Scan the direct entries of `dir`.
pub fn scan(dir: &Path) -> Result<ScanResult, ScanError> {
    ensure_source_dir(dir)?;

    let mut result = ScanResult::default();
    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name();

    for entry in walker {
        let entry = entry.map_err(|source| ScanError::Walk {
            path: dir.to_path_buf(),
            source,
        })?;
        let filename = entry.file_name().to_string_lossy().into_owned();
        let path = entry.path();

        if has_supported_extension(path) {
            result.images.push(SourceImage {
                filename,
                path: entry.into_path(),
            });
        } else if path.is_dir() {
            result.skipped.push(SkippedEntry {
                filename,
                reason: SkipReason::Directory,
            });
        } else {
            result.skipped.push(SkippedEntry {
                filename,
                reason: SkipReason::UnsupportedExtension,
            });
        }
    }

    Ok(result)
}
