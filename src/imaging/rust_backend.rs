//! Pure Rust image processing backend.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, GIF, WebP) | `image::ImageReader` with content sniffing |
//! | Flatten alpha | custom composite onto opaque white |
//! | Resize | `image::imageops::resize` with `Lanczos3` filter |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` |
//!
//! JPEG has no alpha channel, so every decoded image is normalized to RGB8
//! before resizing. Palette images (PNG `PLTE`, GIF) are already expanded to
//! RGBA by their decoders and take the same flattening path as true RGBA.

use super::backend::{BackendError, Dimensions, ImageBackend, ThumbnailOutcome};
use super::calculations::calculate_fit_dimensions;
use super::params::{Quality, ThumbnailParams};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ExtendedColorType, ImageEncoder, ImageReader, Rgb, RgbImage};
use std::path::Path;

/// Source file extensions picked up by the generator, lower-case.
const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// Case-insensitive check against the extensions the generator picks up.
pub fn is_supported_extension(ext: &str) -> bool {
    SUPPORTED_EXTENSIONS
        .iter()
        .any(|known| known.eq_ignore_ascii_case(ext))
}

/// Pure Rust backend using the `image` crate ecosystem.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn decode_error(err: image::ImageError) -> BackendError {
    BackendError::Decode(err.to_string())
}

/// Load and decode an image from disk, sniffing the real format from the
/// leading bytes.
///
/// The extension only decides whether a file is picked up; a `.png` that
/// actually holds JPEG data still decodes.
fn load_image(path: &Path) -> Result<DynamicImage, BackendError> {
    ImageReader::open(path)?
        .with_guessed_format()?
        .decode()
        .map_err(decode_error)
}

/// Convert to RGB8, compositing any alpha channel over opaque white.
fn flatten_onto_white(img: DynamicImage) -> RgbImage {
    if !img.color().has_alpha() {
        return img.into_rgb8();
    }

    let rgba = img.into_rgba8();
    RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        let alpha = a as u16;
        // out = c * a + 255 * (1 - a), in 8-bit fixed point with rounding
        let over_white = |c: u8| ((c as u16 * alpha + 255 * (255 - alpha) + 127) / 255) as u8;
        Rgb([over_white(r), over_white(g), over_white(b)])
    })
}

/// Encode an RGB image as baseline JPEG into memory.
fn encode_jpeg(img: &RgbImage, quality: Quality) -> Result<Vec<u8>, BackendError> {
    let mut bytes = Vec::new();
    JpegEncoder::new_with_quality(&mut bytes, quality.value())
        .write_image(
            img.as_raw(),
            img.width(),
            img.height(),
            ExtendedColorType::Rgb8,
        )
        .map_err(|e| BackendError::Encode(e.to_string()))?;
    Ok(bytes)
}

impl ImageBackend for RustBackend {
    fn thumbnail(&self, params: &ThumbnailParams) -> Result<ThumbnailOutcome, BackendError> {
        let img = load_image(&params.source)?;
        let source = Dimensions {
            width: img.width(),
            height: img.height(),
        };

        let flat = flatten_onto_white(img);
        let (width, height) = calculate_fit_dimensions(source.as_tuple(), params.max_edge);
        let thumb = if (width, height) == source.as_tuple() {
            flat
        } else {
            image::imageops::resize(&flat, width, height, FilterType::Lanczos3)
        };

        // Encode fully before touching the destination so a failed encode
        // never leaves a truncated thumbnail behind.
        let bytes = encode_jpeg(&thumb, params.quality)?;
        std::fs::write(&params.output, bytes)?;

        Ok(ThumbnailOutcome {
            source,
            output: Dimensions { width, height },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::backend::FailureKind;
    use crate::test_helpers::{write_jpeg, write_split_alpha_png};
    use image::{ColorType, LumaA, Rgba, RgbaImage};

    fn params(source: &Path, output: &Path, max_edge: u32) -> ThumbnailParams {
        ThumbnailParams {
            source: source.to_path_buf(),
            output: output.to_path_buf(),
            max_edge,
            quality: Quality::default(),
        }
    }

    fn decode(path: &Path) -> DynamicImage {
        ImageReader::open(path)
            .unwrap()
            .with_guessed_format()
            .unwrap()
            .decode()
            .unwrap()
    }

    #[test]
    fn supported_extensions_are_case_insensitive() {
        for ext in ["jpg", "JPG", "Jpeg", "png", "GIF", "webp", "WebP"] {
            assert!(is_supported_extension(ext), "{ext} should be supported");
        }
        for ext in ["bmp", "tiff", "avif", "txt", ""] {
            assert!(!is_supported_extension(ext), "{ext} should be skipped");
        }
    }

    #[test]
    fn thumbnail_missing_source_is_io_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let output = tmp.path().join("thumb.jpg");

        let err = RustBackend::new()
            .thumbnail(&params(Path::new("/nonexistent/image.jpg"), &output, 300))
            .unwrap_err();
        assert_eq!(err.kind(), FailureKind::Io);
        assert!(!output.exists());
    }

    #[test]
    fn thumbnail_into_directory_path_is_io_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("a.jpg");
        let output = tmp.path().join("taken.jpg");
        write_jpeg(&source, 50, 50);
        std::fs::create_dir(&output).unwrap();

        let err = RustBackend::new()
            .thumbnail(&params(&source, &output, 300))
            .unwrap_err();
        assert_eq!(err.kind(), FailureKind::Io);
    }

    #[test]
    fn thumbnail_landscape_bounded_by_width() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("wide.jpg");
        let output = tmp.path().join("thumb.jpg");
        write_jpeg(&source, 1200, 800);

        let outcome = RustBackend::new()
            .thumbnail(&params(&source, &output, 300))
            .unwrap();

        assert_eq!(outcome.source.as_tuple(), (1200, 800));
        assert_eq!(outcome.output.as_tuple(), (300, 200));
        let thumb = decode(&output);
        assert_eq!((thumb.width(), thumb.height()), (300, 200));
    }

    #[test]
    fn thumbnail_portrait_bounded_by_height() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("tall.jpg");
        let output = tmp.path().join("thumb.jpg");
        write_jpeg(&source, 600, 1800);

        RustBackend::new()
            .thumbnail(&params(&source, &output, 300))
            .unwrap();

        let thumb = decode(&output);
        assert_eq!((thumb.width(), thumb.height()), (100, 300));
    }

    #[test]
    fn thumbnail_never_upscales() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("small.jpg");
        let output = tmp.path().join("thumb.jpg");
        write_jpeg(&source, 120, 80);

        let outcome = RustBackend::new()
            .thumbnail(&params(&source, &output, 300))
            .unwrap();

        assert_eq!(outcome.output.as_tuple(), (120, 80));
        let thumb = decode(&output);
        assert_eq!((thumb.width(), thumb.height()), (120, 80));
    }

    #[test]
    fn thumbnail_flattens_alpha_onto_white() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("logo.png");
        let output = tmp.path().join("logo-thumb.png");
        write_split_alpha_png(&source, 400, 200);

        RustBackend::new()
            .thumbnail(&params(&source, &output, 300))
            .unwrap();

        // Output holds JPEG bytes regardless of the .png name
        let bytes = std::fs::read(&output).unwrap();
        assert_eq!(&bytes[..3], &[0xFF, 0xD8, 0xFF]);

        let thumb = decode(&output);
        assert_eq!(thumb.color(), ColorType::Rgb8);
        let rgb = thumb.to_rgb8();
        assert_eq!(rgb.dimensions(), (300, 150));

        // Left half was fully transparent red
        let Rgb([r, g, b]) = *rgb.get_pixel(20, 75);
        assert!(r > 240 && g > 240 && b > 240, "expected white, got {r},{g},{b}");

        // Right half was opaque blue
        let Rgb([r, _, b]) = *rgb.get_pixel(280, 75);
        assert!(b > 200 && r < 60, "expected blue, got r={r} b={b}");
    }

    #[test]
    fn flatten_blends_partial_alpha() {
        let img = RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 128]));
        let flat = flatten_onto_white(DynamicImage::ImageRgba8(img));
        let Rgb([r, g, b]) = *flat.get_pixel(0, 0);
        assert_eq!((r, g, b), (127, 127, 127));
    }

    #[test]
    fn flatten_keeps_opaque_rgb_untouched() {
        let img = RgbImage::from_pixel(2, 2, Rgb([10, 20, 30]));
        let flat = flatten_onto_white(DynamicImage::ImageRgb8(img.clone()));
        assert_eq!(flat, img);
    }

    #[test]
    fn flatten_expands_grayscale_to_rgb() {
        let img = image::GrayImage::from_pixel(1, 1, image::Luma([90]));
        let flat = flatten_onto_white(DynamicImage::ImageLuma8(img));
        assert_eq!(*flat.get_pixel(0, 0), Rgb([90, 90, 90]));
    }

    #[test]
    fn thumbnail_flattens_gray_alpha_png() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("mask.png");
        let output = tmp.path().join("mask-thumb.png");
        image::GrayAlphaImage::from_fn(40, 20, |x, _| {
            if x < 20 {
                LumaA([0, 0])
            } else {
                LumaA([0, 255])
            }
        })
        .save(&source)
        .unwrap();
        assert_eq!(decode(&source).color(), ColorType::La8);

        RustBackend::new()
            .thumbnail(&params(&source, &output, 300))
            .unwrap();

        let thumb = decode(&output);
        assert_eq!(thumb.color(), ColorType::Rgb8);
        let rgb = thumb.to_rgb8();
        let Rgb([r, g, b]) = *rgb.get_pixel(4, 10);
        assert!(r > 240 && g > 240 && b > 240, "expected white, got {r},{g},{b}");
        let Rgb([r, g, b]) = *rgb.get_pixel(35, 10);
        assert!(r < 20 && g < 20 && b < 20, "expected black, got {r},{g},{b}");
    }

    #[test]
    fn thumbnail_flattens_palette_png_with_trns() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("sprite.png");
        let output = tmp.path().join("sprite-thumb.png");
        let (width, height) = (16u32, 8u32);
        // Index 0 is transparent red, index 1 opaque green
        let indices: Vec<u8> = (0..height)
            .flat_map(|_| (0..width).map(move |x| u8::from(x >= width / 2)))
            .collect();
        {
            let file = std::fs::File::create(&source).unwrap();
            let mut encoder = png::Encoder::new(std::io::BufWriter::new(file), width, height);
            encoder.set_color(png::ColorType::Indexed);
            encoder.set_depth(png::BitDepth::Eight);
            encoder.set_palette(vec![255, 0, 0, 0, 160, 0]);
            encoder.set_trns(vec![0, 255]);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(&indices).unwrap();
            writer.finish().unwrap();
        }
        assert!(decode(&source).color().has_alpha());

        RustBackend::new()
            .thumbnail(&params(&source, &output, 300))
            .unwrap();

        let rgb = decode(&output).to_rgb8();
        assert_eq!(rgb.dimensions(), (16, 8));
        let Rgb([r, g, b]) = *rgb.get_pixel(1, 4);
        assert!(r > 230 && g > 230 && b > 230, "expected white, got {r},{g},{b}");
        let Rgb([r, g, b]) = *rgb.get_pixel(14, 4);
        assert!(g > 120 && r < 80 && b < 80, "expected green, got {r},{g},{b}");
    }

    #[test]
    fn thumbnail_decodes_gif_with_transparency() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("anim.gif");
        let output = tmp.path().join("anim-thumb.gif");
        let img = RgbaImage::from_fn(64, 32, |x, _| {
            if x < 32 {
                Rgba([0, 0, 0, 0])
            } else {
                Rgba([0, 200, 0, 255])
            }
        });
        DynamicImage::ImageRgba8(img).save(&source).unwrap();

        let outcome = RustBackend::new()
            .thumbnail(&params(&source, &output, 300))
            .unwrap();
        assert_eq!(outcome.output.as_tuple(), (64, 32));

        let rgb = decode(&output).to_rgb8();
        let Rgb([r, g, b]) = *rgb.get_pixel(4, 16);
        assert!(r > 230 && g > 230 && b > 230, "expected white, got {r},{g},{b}");
    }

    #[test]
    fn thumbnail_decodes_webp() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("photo.webp");
        let output = tmp.path().join("photo-thumb.webp");
        let img = RgbaImage::from_pixel(600, 300, Rgba([200, 100, 50, 255]));
        DynamicImage::ImageRgba8(img).save(&source).unwrap();

        let outcome = RustBackend::new()
            .thumbnail(&params(&source, &output, 300))
            .unwrap();
        assert_eq!(outcome.output.as_tuple(), (300, 150));
    }

    #[test]
    fn thumbnail_corrupt_file_is_decode_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("broken.jpg");
        let output = tmp.path().join("broken-thumb.jpg");
        std::fs::write(&source, b"\xFF\xD8\xFF\xE0 truncated").unwrap();

        let err = RustBackend::new()
            .thumbnail(&params(&source, &output, 300))
            .unwrap_err();

        assert_eq!(err.kind(), FailureKind::Decode);
        assert!(!err.to_string().is_empty());
        assert!(!output.exists());
    }

    #[test]
    fn thumbnail_sniffs_content_over_extension() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("mislabeled.png");
        let output = tmp.path().join("out.png");
        write_jpeg(&source, 400, 400);

        let outcome = RustBackend::new()
            .thumbnail(&params(&source, &output, 300))
            .unwrap();
        assert_eq!(outcome.output.as_tuple(), (300, 300));
    }

    #[test]
    fn thumbnail_rerun_overwrites_with_same_result() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("a.jpg");
        let output = tmp.path().join("a-thumb.jpg");
        write_jpeg(&source, 900, 600);

        let backend = RustBackend::new();
        backend.thumbnail(&params(&source, &output, 300)).unwrap();
        let first = std::fs::read(&output).unwrap();
        backend.thumbnail(&params(&source, &output, 300)).unwrap();
        let second = std::fs::read(&output).unwrap();

        assert_eq!(first, second);
    }
}
