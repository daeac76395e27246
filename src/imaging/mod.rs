//! Image processing in pure Rust.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** | `image::ImageReader` with content sniffing |
//! | **Flatten** | alpha composite onto white → RGB8 |
//! | **Thumbnail** | Lanczos3 bound-resize + JPEG encoder |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions combining parameters + backend

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, FailureKind, ImageBackend, ThumbnailOutcome};
pub use calculations::calculate_fit_dimensions;
pub use operations::{
    ThumbnailConfig, create_thumbnail, is_extension_mismatch, thumbnail_file_name,
};
pub use params::{Quality, ThumbnailParams};
pub use rust_backend::{RustBackend, is_supported_extension};
