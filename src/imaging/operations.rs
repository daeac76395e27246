//! High-level image operations.
//!
//! These functions decide output naming and parameters, then call the backend.

use super::backend::{BackendError, ImageBackend, ThumbnailOutcome};
use super::params::{Quality, ThumbnailParams};
use std::path::{Path, PathBuf};

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Configuration for thumbnail generation.
#[derive(Debug, Clone, PartialEq)]
pub struct ThumbnailConfig {
    /// Bound on both width and height.
    pub max_edge: u32,
    pub quality: Quality,
    /// Keep the source filename verbatim (`photo.png` stays `photo.png`
    /// although it holds JPEG data). When false, the extension becomes `.jpg`.
    pub keep_source_extension: bool,
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self {
            max_edge: 300,
            quality: Quality::default(),
            keep_source_extension: true,
        }
    }
}

/// File name the thumbnail for `source_name` is written under.
pub fn thumbnail_file_name(source_name: &str, keep_source_extension: bool) -> String {
    if keep_source_extension {
        return source_name.to_string();
    }
    let stem = Path::new(source_name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| source_name.to_string());
    format!("{stem}.jpg")
}

/// True when a file with this name would not be recognized as JPEG by its
/// extension alone.
pub fn is_extension_mismatch(output_name: &str) -> bool {
    !Path::new(output_name)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("jpg") || e.eq_ignore_ascii_case("jpeg"))
}

/// Plan a thumbnail operation without executing it.
pub fn plan_thumbnail(
    source: &Path,
    output_dir: &Path,
    config: &ThumbnailConfig,
) -> ThumbnailParams {
    let source_name = source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let output: PathBuf =
        output_dir.join(thumbnail_file_name(&source_name, config.keep_source_extension));

    ThumbnailParams {
        source: source.to_path_buf(),
        output,
        max_edge: config.max_edge,
        quality: config.quality,
    }
}

/// Create a thumbnail for `source` inside `output_dir`.
///
/// Returns the output path together with source and thumbnail dimensions.
pub fn create_thumbnail(
    backend: &impl ImageBackend,
    source: &Path,
    output_dir: &Path,
    config: &ThumbnailConfig,
) -> Result<(PathBuf, ThumbnailOutcome)> {
    let params = plan_thumbnail(source, output_dir, config);
    let outcome = backend.thumbnail(&params)?;
    Ok((params.output, outcome))
}
