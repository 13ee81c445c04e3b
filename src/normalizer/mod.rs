//! Image normalization for upload to the identification model
//!
//! Arbitrary user images (camera photos are often 12+ megapixels) are shrunk to fit within
//! 1024x1024, flattened to RGB and re-encoded as JPEG at quality 70, then wrapped in a `data:`
//! URI ([`EmbeddedImage`]).
//!
//! # Error Handling Strategy
//!
//! - **Non-image input**: detected by magic-byte inspection before decoding.
//!   [`normalize_file`] drops it silently (`Ok(None)`, logged at debug level);
//!   [`normalize`] reports it as [`NormalizeError::UnsupportedSource`].
//! - **Oversized files**: [`normalize_file`] refuses sources above [`MAX_SOURCE_BYTES`] before
//!   reading them ([`NormalizeError::TooLarge`]).
//! - **Decode/encode failures**: always returned as an error. Every call completes with a
//!   result; there is no path on which a payload is silently never produced.

pub mod dimensions;
pub mod payload;

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};
use thiserror::Error;

pub use dimensions::{MAX_DIMENSION, target_dimensions};
pub use payload::EmbeddedImage;

/// JPEG quality used for re-encoding (0.7 on a 0-1 scale)
pub const JPEG_QUALITY: u8 = 70;

/// MIME type of every normalized payload
pub const OUTPUT_MIME_TYPE: &str = "image/jpeg";

/// Largest source file [`normalize_file`] will read: 50MB
pub const MAX_SOURCE_BYTES: u64 = 50 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("input is not a recognized image format")]
    UnsupportedSource,

    #[error("failed to decode {format:?} image: {source}")]
    Decode {
        format: ImageFormat,
        #[source]
        source: image::ImageError,
    },

    #[error("image has zero width or height")]
    EmptyImage,

    #[error("failed to encode JPEG: {0}")]
    Encode(#[source] image::ImageError),

    #[error("image file is too large ({size} bytes, max {max} bytes)")]
    TooLarge { size: u64, max: u64 },

    #[error("invalid image payload: {0}")]
    InvalidPayload(String),

    #[error("failed to read image file: {0}")]
    Io(#[from] io::Error),
}

/// Result of normalizing one image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedImage {
    pub payload: EmbeddedImage,
    pub source_format: ImageFormat,
    pub source_dimensions: (u32, u32),
    pub dimensions: (u32, u32),
    /// Size of the encoded JPEG before base64 wrapping
    pub encoded_bytes: usize,
}

/// Inspect the leading bytes of a source and report its image format, if any
pub fn inspect_source(bytes: &[u8]) -> Option<ImageFormat> {
    image::guess_format(bytes).ok()
}

/// Decode, downscale and re-encode an image held in memory.
///
/// # Errors
///
/// Returns an error if:
/// - The bytes are not a recognized image format ([`NormalizeError::UnsupportedSource`])
/// - The image cannot be decoded
/// - The decoded image has a zero dimension
/// - JPEG encoding fails
pub fn normalize(bytes: &[u8]) -> Result<NormalizedImage, NormalizeError> {
    let format = inspect_source(bytes).ok_or(NormalizeError::UnsupportedSource)?;

    let img = image::load_from_memory_with_format(bytes, format)
        .map_err(|source| NormalizeError::Decode { format, source })?;

    let source_dimensions = (img.width(), img.height());
    if source_dimensions.0 == 0 || source_dimensions.1 == 0 {
        return Err(NormalizeError::EmptyImage);
    }

    let (width, height) = target_dimensions(source_dimensions.0, source_dimensions.1);
    let resized = if (width, height) == source_dimensions {
        img
    } else {
        img.resize_exact(width, height, FilterType::Triangle)
    };

    let jpeg = encode_jpeg(&resized)?;
    let payload = EmbeddedImage::from_bytes(OUTPUT_MIME_TYPE, &jpeg);

    log::debug!(
        "IMAGE_NORMALIZED format={:?} source={}x{} output={}x{} jpeg_bytes={} payload_bytes={}",
        format,
        source_dimensions.0,
        source_dimensions.1,
        width,
        height,
        jpeg.len(),
        payload.encoded_len()
    );

    Ok(NormalizedImage {
        payload,
        source_format: format,
        source_dimensions,
        dimensions: (width, height),
        encoded_bytes: jpeg.len(),
    })
}

/// Normalize an image file selected by the user.
///
/// Returns `Ok(None)` when the file is not an image; such input is dropped without analysis.
///
/// # Errors
///
/// Returns [`NormalizeError::TooLarge`] for files over [`MAX_SOURCE_BYTES`], an I/O error if the
/// file cannot be read, and any decode or encode failure from [`normalize`].
pub fn normalize_file(path: &Path) -> Result<Option<NormalizedImage>, NormalizeError> {
    let bytes = read_source(path)?;

    match normalize(&bytes) {
        Ok(normalized) => Ok(Some(normalized)),
        Err(NormalizeError::UnsupportedSource) => {
            log::debug!("IMAGE_SKIPPED_NOT_AN_IMAGE path={}", path.display());
            Ok(None)
        }
        Err(e) => {
            log::warn!("IMAGE_NORMALIZE_FAILED path={} error={}", path.display(), e);
            Err(e)
        }
    }
}

/// The size is checked on the open handle, and the read is capped, so a file that grows after
/// the check is still refused.
fn read_source(path: &Path) -> Result<Vec<u8>, NormalizeError> {
    let file = File::open(path)?;
    let size = file.metadata()?.len();
    if size > MAX_SOURCE_BYTES {
        log::warn!(
            "IMAGE_TOO_LARGE path={} bytes={} max={}",
            path.display(),
            size,
            MAX_SOURCE_BYTES
        );
        return Err(NormalizeError::TooLarge { size, max: MAX_SOURCE_BYTES });
    }

    let mut bytes = Vec::with_capacity(size as usize);
    file.take(MAX_SOURCE_BYTES + 1).read_to_end(&mut bytes)?;
    if bytes.len() as u64 > MAX_SOURCE_BYTES {
        return Err(NormalizeError::TooLarge { size: bytes.len() as u64, max: MAX_SOURCE_BYTES });
    }
    Ok(bytes)
}

/// JPEG has no alpha channel, so the image is flattened to RGB first
fn encode_jpeg(img: &DynamicImage) -> Result<Vec<u8>, NormalizeError> {
    let rgb = img.to_rgb8();
    let mut buf = Vec::new();
    JpegEncoder::new_with_quality(&mut buf, JPEG_QUALITY)
        .encode_image(&rgb)
        .map_err(NormalizeError::Encode)?;
    Ok(buf)
}
