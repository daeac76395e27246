//! Thumbnail generation for a whole source directory.
//!
//! Takes the source and destination directories (already resolved against
//! the project root) and writes one JPEG thumbnail per supported image.
//!
//! ## Flow
//!
//! ```text
//! fulls/ exists?  ── no ──▶ ProcessError::Scan (nothing written, thumbs/ untouched)
//!      │ yes
//! create thumbs/  ── fails ─▶ ProcessError::CreateOutputDir
//!      │
//! scan fulls/ (sorted, non-recursive)
//!      │
//! for each image: output name free? → decode → flatten → resize → encode → write
//!      ├── ok    ─▶ RunResult::generated
//!      └── error ─▶ RunResult::failures (batch continues)
//! ```
//!
//! With `keep_source_extension = false`, `a.jpg` and `a.png` both map to
//! `a.jpg`. The first one in file-name order wins; later ones are recorded as
//! [`FailureKind::Collision`] and never overwrite it.
//!
//! Errors come in two tiers. [`ProcessError`] aborts the run before any image
//! is touched. Per-file problems are captured as [`Failure`] values so one
//! corrupt file never stops the rest of the batch; the run as a whole only
//! counts as successful when [`RunResult::failures`] is empty.
//!
//! ## Sequential Processing
//!
//! Images are handled one at a time in file-name order. Progress is streamed
//! as [`ProcessEvent`]s on an optional channel so the CLI can print while the
//! batch runs.

use crate::imaging::{
    BackendError, Dimensions, FailureKind, ImageBackend, RustBackend, ThumbnailConfig,
    create_thumbnail, thumbnail_file_name,
};
use crate::scan::{self, ScanError, SourceImage};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error("cannot create {}: {source}", .path.display())]
    CreateOutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A thumbnail that was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    /// Source file name.
    pub filename: String,
    /// File name inside the destination directory.
    pub output_name: String,
    pub source: Dimensions,
    pub output: Dimensions,
}

/// A source image that could not be turned into a thumbnail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub filename: String,
    pub kind: FailureKind,
    pub message: String,
}

impl Failure {
    fn from_backend(filename: &str, err: &BackendError) -> Self {
        Self {
            filename: filename.to_string(),
            kind: err.kind(),
            message: err.to_string(),
        }
    }

    fn collision(filename: &str, output_name: &str, first: &str) -> Self {
        Self {
            filename: filename.to_string(),
            kind: FailureKind::Collision,
            message: format!("output name {output_name} already produced by {first}"),
        }
    }
}

/// Outcome of a whole run, in processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunResult {
    pub generated: Vec<Generated>,
    pub failures: Vec<Failure>,
}

impl RunResult {
    /// True when no image failed. A run with zero images is successful.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Source file names of the thumbnails that were written.
    pub fn generated_names(&self) -> Vec<&str> {
        self.generated.iter().map(|g| g.filename.as_str()).collect()
    }
}

/// Progress notifications sent while a run is in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessEvent {
    Started {
        image_count: usize,
        output_dir: PathBuf,
    },
    Generated {
        index: usize,
        item: Generated,
    },
    Failed {
        index: usize,
        failure: Failure,
    },
}

fn emit(events: &Option<Sender<ProcessEvent>>, event: ProcessEvent) {
    if let Some(tx) = events {
        // A closed receiver only means nobody is printing.
        tx.send(event).ok();
    }
}

/// Generate thumbnails for every supported image in `fulls_dir`.
pub fn generate_thumbnails(
    fulls_dir: &Path,
    thumbs_dir: &Path,
    config: &ThumbnailConfig,
    events: Option<Sender<ProcessEvent>>,
) -> Result<RunResult, ProcessError> {
    let backend = RustBackend::new();
    generate_with_backend(&backend, fulls_dir, thumbs_dir, config, events)
}

/// Generate thumbnails using a specific backend (allows testing with mock).
pub fn generate_with_backend(
    backend: &impl ImageBackend,
    fulls_dir: &Path,
    thumbs_dir: &Path,
    config: &ThumbnailConfig,
    events: Option<Sender<ProcessEvent>>,
) -> Result<RunResult, ProcessError> {
    scan::ensure_source_dir(fulls_dir)?;

    std::fs::create_dir_all(thumbs_dir).map_err(|source| ProcessError::CreateOutputDir {
        path: thumbs_dir.to_path_buf(),
        source,
    })?;

    let scanned = scan::scan(fulls_dir)?;
    emit(
        &events,
        ProcessEvent::Started {
            image_count: scanned.images.len(),
            output_dir: thumbs_dir.to_path_buf(),
        },
    );

    let mut result = RunResult::default();
    // Output name → source that produced it
    let mut written: HashMap<String, String> = HashMap::new();
    for (i, image) in scanned.images.iter().enumerate() {
        let index = i + 1;
        let output_name = thumbnail_file_name(&image.filename, config.keep_source_extension);
        let outcome = match written.get(&output_name) {
            Some(first) => Err(Failure::collision(&image.filename, &output_name, first)),
            None => process_image(backend, image, thumbs_dir, config),
        };
        match outcome {
            Ok(item) => {
                written.insert(item.output_name.clone(), item.filename.clone());
                emit(
                    &events,
                    ProcessEvent::Generated {
                        index,
                        item: item.clone(),
                    },
                );
                result.generated.push(item);
            }
            Err(failure) => {
                emit(
                    &events,
                    ProcessEvent::Failed {
                        index,
                        failure: failure.clone(),
                    },
                );
                result.failures.push(failure);
            }
        }
    }

    Ok(result)
}

fn process_image(
    backend: &impl ImageBackend,
    image: &SourceImage,
    thumbs_dir: &Path,
    config: &ThumbnailConfig,
) -> Result<Generated, Failure> {
    let (output_path, outcome) = create_thumbnail(backend, &image.path, thumbs_dir, config)
        .map_err(|e| Failure::from_backend(&image.filename, &e))?;

    let output_name = output_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| image.filename.clone());

    Ok(Generated {
        filename: image.filename.clone(),
        output_name,
        source: outcome.source,
        output: outcome.output,
    })
}
