//! Program image pipeline: type and size checks, cover-crop to a fixed
//! canvas, and progressive JPEG re-encoding.
//!
//! Everything here is synchronous and CPU-bound; callers on an async runtime
//! should run [`process_program_image`] on a blocking thread.

use std::path::Path;

use image::imageops::FilterType;
use image::ImageFormat;
use jpeg_encoder::{ColorType, Encoder};

use crate::error::CoreError;

/// Output canvas width in pixels.
pub const PROGRAM_IMAGE_WIDTH: u32 = 800;

/// Output canvas height in pixels.
pub const PROGRAM_IMAGE_HEIGHT: u32 = 450;

/// JPEG quality used for re-encoding.
pub const JPEG_QUALITY: u8 = 85;

/// Maximum accepted upload size, before processing (10 MiB).
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Declared content types accepted by the upload endpoint.
pub const ALLOWED_IMAGE_MIME_TYPES: &[&str] = &[
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/webp",
];

const INVALID_TYPE_MESSAGE: &str =
    "Invalid file type. Only JPEG, PNG, GIF, and WebP images are allowed.";

/// Reject uploads whose declared content type is not an accepted image type.
pub fn validate_content_type(content_type: Option<&str>) -> Result<(), CoreError> {
    let mime = content_type
        .map(|ct| ct.split(';').next().unwrap_or("").trim().to_ascii_lowercase())
        .unwrap_or_default();
    if ALLOWED_IMAGE_MIME_TYPES.contains(&mime.as_str()) {
        Ok(())
    } else {
        Err(CoreError::invalid_field("image", INVALID_TYPE_MESSAGE))
    }
}

/// Reject uploads larger than [`MAX_UPLOAD_BYTES`].
pub fn ensure_within_limit(len: usize) -> Result<(), CoreError> {
    if len > MAX_UPLOAD_BYTES {
        return Err(CoreError::TooLarge(format!(
            "Image exceeds the {} MB upload limit",
            MAX_UPLOAD_BYTES / (1024 * 1024)
        )));
    }
    Ok(())
}

/// Decode `bytes`, cover-crop them to 800x450 around the centre, and
/// re-encode as a quality-85 progressive JPEG.
pub fn process_program_image(bytes: &[u8]) -> Result<Vec<u8>, CoreError> {
    ensure_within_limit(bytes.len())?;

    let format = image::guess_format(bytes)
        .map_err(|_| CoreError::invalid_field("image", INVALID_TYPE_MESSAGE))?;
    if !matches!(
        format,
        ImageFormat::Jpeg | ImageFormat::Png | ImageFormat::Gif | ImageFormat::WebP
    ) {
        return Err(CoreError::invalid_field("image", INVALID_TYPE_MESSAGE));
    }

    let decoded = image::load_from_memory_with_format(bytes, format).map_err(|e| {
        CoreError::invalid_field("image", format!("Could not decode image: {e}"))
    })?;

    let resized = decoded
        .resize_to_fill(
            PROGRAM_IMAGE_WIDTH,
            PROGRAM_IMAGE_HEIGHT,
            FilterType::Lanczos3,
        )
        .to_rgb8();

    let mut out = Vec::new();
    let mut encoder = Encoder::new(&mut out, JPEG_QUALITY);
    encoder.set_progressive(true);
    encoder
        .encode(
            resized.as_raw(),
            PROGRAM_IMAGE_WIDTH as u16,
            PROGRAM_IMAGE_HEIGHT as u16,
            ColorType::Rgb,
        )
        .map_err(|e| CoreError::Internal(format!("JPEG encoding failed: {e}")))?;
    Ok(out)
}

/// Build a collision-resistant `.jpg` filename from the uploaded name.
///
/// The stem is lowercased with every non-alphanumeric character replaced by
/// `-`; `millis` and `nonce` make the name unique.
pub fn unique_image_filename(original_name: &str, millis: i64, nonce: u32) -> String {
    let stem = Path::new(original_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("");
    let mut sanitized: String = stem
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect();
    if sanitized.is_empty() {
        sanitized.push_str("image");
    }
    format!("{sanitized}-{millis}-{nonce}.jpg")
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use assert_matches::assert_matches;
    use image::{DynamicImage, GenericImageView, Rgb, RgbImage};

    use super::*;

    fn encoded(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
        let img = RgbImage::from_pixel(width, height, Rgb([30, 120, 80]));
        let mut buf = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(img)
            .write_to(&mut buf, format)
            .expect("encoding test image should succeed");
        buf.into_inner()
    }

    #[test]
    fn portrait_png_is_cropped_to_landscape_jpeg() {
        let output = process_program_image(&encoded(600, 900, ImageFormat::Png)).unwrap();

        assert_eq!(image::guess_format(&output).unwrap(), ImageFormat::Jpeg);
        let decoded = image::load_from_memory(&output).unwrap();
        assert_eq!(decoded.dimensions(), (PROGRAM_IMAGE_WIDTH, PROGRAM_IMAGE_HEIGHT));
    }

    /// Position of the first frame header with the given SOF marker byte.
    fn find_marker(jpeg: &[u8], marker: u8) -> Option<usize> {
        jpeg.windows(2).position(|w| w == [0xFF, marker])
    }

    #[test]
    fn output_is_progressive_jpeg() {
        let output = process_program_image(&encoded(1000, 700, ImageFormat::Png)).unwrap();

        assert!(find_marker(&output, 0xC2).is_some(), "missing SOF2 frame header");
        assert!(find_marker(&output, 0xC0).is_none(), "unexpected baseline SOF0 header");
    }

    #[test]
    fn small_image_is_scaled_up_to_canvas() {
        let output = process_program_image(&encoded(160, 90, ImageFormat::Jpeg)).unwrap();
        let decoded = image::load_from_memory(&output).unwrap();
        assert_eq!(decoded.dimensions(), (800, 450));
    }

    #[test]
    fn non_image_bytes_are_rejected() {
        assert_matches!(
            process_program_image(b"%PDF-1.7 definitely not an image"),
            Err(CoreError::InvalidField { field, .. }) if field == "image"
        );
    }

    #[test]
    fn oversize_payload_is_rejected() {
        assert_matches!(
            ensure_within_limit(MAX_UPLOAD_BYTES + 1),
            Err(CoreError::TooLarge(_))
        );
        assert!(ensure_within_limit(MAX_UPLOAD_BYTES).is_ok());
    }

    #[test]
    fn content_type_whitelist() {
        assert!(validate_content_type(Some("image/png")).is_ok());
        assert!(validate_content_type(Some("IMAGE/JPEG")).is_ok());
        assert!(validate_content_type(Some("application/pdf")).is_err());
        assert!(validate_content_type(None).is_err());
    }

    #[test]
    fn filenames_are_sanitized() {
        assert_eq!(
            unique_image_filename("My Course Banner!.PNG", 1700000000000, 42),
            "my-course-banner--1700000000000-42.jpg"
        );
        assert_eq!(unique_image_filename(".png", 1, 2), "-png-1-2.jpg");
        assert_eq!(unique_image_filename("", 1, 2), "image-1-2.jpg");
    }
}
