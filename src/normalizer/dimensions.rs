/// Largest width or height a normalized image may have
pub const MAX_DIMENSION: u32 = 1024;

/// Compute output dimensions that fit within [`MAX_DIMENSION`] while preserving aspect ratio.
///
/// The longer side (width when the image is square) is clamped to the bound and the other side
/// is scaled proportionally, rounded to the nearest pixel. Images already within the bound are
/// returned unchanged; images are never upscaled. A non-zero side never rounds down to zero.
///
/// # Examples
///
/// ```
/// use botanix::normalizer::target_dimensions;
///
/// assert_eq!(target_dimensions(2000, 1000), (1024, 512));
/// assert_eq!(target_dimensions(500, 800), (500, 800));
/// ```
pub fn target_dimensions(width: u32, height: u32) -> (u32, u32) {
    if width >= height {
        if width <= MAX_DIMENSION {
            return (width, height);
        }
        (MAX_DIMENSION, scale_side(height, MAX_DIMENSION, width))
    } else {
        if height <= MAX_DIMENSION {
            return (width, height);
        }
        (scale_side(width, MAX_DIMENSION, height), MAX_DIMENSION)
    }
}

/// `side * bound / long_side`, rounded half away from zero, at least 1
fn scale_side(side: u32, bound: u32, long_side: u32) -> u32 {
    let scaled = (side as u64 * bound as u64 * 2 + long_side as u64) / (long_side as u64 * 2);
    scaled.max(1) as u32
}
