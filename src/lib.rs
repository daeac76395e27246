//! # thumbgen
//!
//! Batch thumbnail generator for static photo sites. Every image directly
//! inside a source directory (`images/fulls` by default) gets a JPEG
//! thumbnail with the same file name in a destination directory
//! (`images/thumbs`), bounded to a maximum edge length.
//!
//! ```text
//! images/fulls/dawn.jpg   4000x3000  ──▶  images/thumbs/dawn.jpg   300x225
//! images/fulls/logo.png    512x512 α ──▶  images/thumbs/logo.png   300x300 (JPEG, on white)
//! images/fulls/notes.txt             ──▶  (skipped)
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `thumbs.toml` loading, merging with CLI overrides, validation |
//! | [`scan`] | Non-recursive listing of the source directory and extension filtering |
//! | [`process`] | The batch: fail-fast checks, per-file thumbnails, [`process::RunResult`] |
//! | [`imaging`] | Pure-Rust image operations: decode, flatten alpha, Lanczos3 resize, JPEG |
//! | [`output`] | CLI output formatting for progress, summary, and dry runs |
//!
//! # Design Decisions
//!
//! ## Explicit Paths, No Working-Directory Changes
//!
//! Every function takes the directories it works on as arguments. The CLI
//! resolves them against a project root once, up front, so the library never
//! depends on the process working directory.
//!
//! ## Per-File Failures Are Data
//!
//! A corrupt image is an entry in [`process::RunResult::failures`], not an
//! early return. Only conditions that would affect every file (missing source
//! directory, unwritable destination) abort the run.
//!
//! ## JPEG Content, Source File Names
//!
//! Thumbnails are always JPEG, but by default keep the source file name, so
//! `logo.png` becomes a JPEG stored as `thumbs/logo.png`. Pages that link
//! thumbnails by their original name keep working; browsers sniff the
//! content. The mismatch is flagged in the progress output, and
//! `keep_source_extension = false` switches to `.jpg` names.

pub mod config;
pub mod imaging;
pub mod output;
pub mod process;
pub mod scan;

#[cfg(test)]
pub(crate) mod test_helpers;
