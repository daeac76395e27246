//! CLI output formatting.
//!
//! # Output Format
//!
//! ## Generate
//!
//! Progress lines stream while the batch runs, then a summary follows:
//!
//! ```text
//! Thumbnails → images/thumbs (3 images)
//!     001 dawn.jpg 4000x3000 → 300x225
//!     002 logo.png 512x512 → 300x300 (stored as JPEG)
//!     003 broken.jpg failed: decode failed: ...
//!
//! Generated 2 thumbnail(s):
//!   ✓ dawn.jpg
//!   ✓ logo.png
//!
//! Errors (1):
//!   ✗ broken.jpg: decode failed: ...
//! ```
//!
//! ## Check
//!
//! ```text
//! Source: images/fulls
//!     001 dawn.jpg
//!     002 logo.png
//! Skipped
//!     notes.txt (unsupported extension)
//!     archive/ (directory)
//! 2 image(s) would be processed
//! ```
//!
//! # Architecture
//!
//! Each view has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure:
//! no I/O, no side effects.

use crate::imaging::{Dimensions, is_extension_mismatch};
use crate::process::{ProcessEvent, RunResult};
use crate::scan::{ScanResult, SkipReason};
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn format_dimensions(dims: Dimensions) -> String {
    format!("{}x{}", dims.width, dims.height)
}

// ============================================================================
// Generate: progress events
// ============================================================================

/// Format one progress event as console lines.
pub fn format_process_event(event: &ProcessEvent) -> Vec<String> {
    match event {
        ProcessEvent::Started {
            image_count,
            output_dir,
        } => vec![format!(
            "Thumbnails → {} ({} images)",
            output_dir.display(),
            image_count
        )],
        ProcessEvent::Generated { index, item } => {
            let mut line = format!(
                "{}{} {} {} → {}",
                indent(1),
                format_index(*index),
                item.filename,
                format_dimensions(item.source),
                format_dimensions(item.output)
            );
            if is_extension_mismatch(&item.output_name) {
                line.push_str(" (stored as JPEG)");
            }
            vec![line]
        }
        ProcessEvent::Failed { index, failure } => vec![format!(
            "{}{} {} failed: {}",
            indent(1),
            format_index(*index),
            failure.filename,
            failure.message
        )],
    }
}

// ============================================================================
// Generate: run summary
// ============================================================================

/// Format the end-of-run report: successes first, then errors.
///
/// Nothing is printed for an empty section, so a run over an empty source
/// directory produces no lines at all.
pub fn format_run_summary(result: &RunResult) -> Vec<String> {
    let mut lines = Vec::new();

    if !result.generated.is_empty() {
        lines.push(format!("Generated {} thumbnail(s):", result.generated.len()));
        for item in &result.generated {
            lines.push(format!("  ✓ {}", item.filename));
        }
    }

    if !result.failures.is_empty() {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push(format!("Errors ({}):", result.failures.len()));
        for failure in &result.failures {
            lines.push(format!("  ✗ {}: {}", failure.filename, failure.message));
        }
    }

    lines
}

/// Print the end-of-run report to stdout.
pub fn print_run_summary(result: &RunResult) {
    for line in format_run_summary(result) {
        println!("{}", line);
    }
}

// ============================================================================
// Check
// ============================================================================

/// Format a dry-run listing of what a generate run would pick up.
pub fn format_check_output(scan: &ScanResult, source_dir: &Path) -> Vec<String> {
    let mut lines = vec![format!("Source: {}", source_dir.display())];

    for (i, image) in scan.images.iter().enumerate() {
        lines.push(format!(
            "{}{} {}",
            indent(1),
            format_index(i + 1),
            image.filename
        ));
    }

    if !scan.skipped.is_empty() {
        lines.push("Skipped".to_string());
        for entry in &scan.skipped {
            let line = match entry.reason {
                SkipReason::Directory => format!("{}{}/ (directory)", indent(1), entry.filename),
                SkipReason::UnsupportedExtension => {
                    format!("{}{} (unsupported extension)", indent(1), entry.filename)
                }
            };
            lines.push(line);
        }
    }

    lines.push(format!("{} image(s) would be processed", scan.images.len()));
    lines
}

/// Print the dry-run listing to stdout.
pub fn print_check_output(scan: &ScanResult, source_dir: &Path) {
    for line in format_check_output(scan, source_dir) {
        println!("{}", line);
    }
}
