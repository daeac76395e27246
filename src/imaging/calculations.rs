//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

/// Calculate the size of an image scaled down to fit inside a square box.
///
/// The longer edge becomes `max_edge` and the shorter edge is scaled by the
/// same ratio, rounded to the nearest pixel and never below 1. Images that
/// already fit are returned unchanged; this never upscales.
///
/// # Arguments
/// * `original` - Source image dimensions (width, height)
/// * `max_edge` - Bound applied to both width and height
///
/// # Examples
/// ```
/// # use thumbgen::imaging::calculate_fit_dimensions;
/// // Landscape 1200x800 into a 300px box → 300x200
/// assert_eq!(calculate_fit_dimensions((1200, 800), 300), (300, 200));
///
/// // Portrait 600x1800 into a 300px box → 100x300
/// assert_eq!(calculate_fit_dimensions((600, 1800), 300), (100, 300));
///
/// // Already small enough → unchanged
/// assert_eq!(calculate_fit_dimensions((120, 90), 300), (120, 90));
/// ```
pub fn calculate_fit_dimensions(original: (u32, u32), max_edge: u32) -> (u32, u32) {
    let (orig_w, orig_h) = original;
    let longer_edge = orig_w.max(orig_h);

    if longer_edge <= max_edge || max_edge == 0 {
        return original;
    }

    let scale = |edge: u32| -> u32 {
        ((edge as f64 * max_edge as f64 / longer_edge as f64).round() as u32).max(1)
    };

    if orig_w >= orig_h {
        (max_edge, scale(orig_h))
    } else {
        (scale(orig_w), max_edge)
    }
}
