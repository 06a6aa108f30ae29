use image::DynamicImage;
use tracing::{debug, warn};

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::encode::{RasterWriter, TargetFormat};

/// Quality decrement between size-targeting attempts.
pub const QUALITY_STEP: u8 = 5;

/// Lowest quality the size-targeting loop will encode at.
pub const QUALITY_FLOOR: u8 = 20;

/// Re-encodes at decreasing quality until the payload is at most `max_bytes`
/// or the floor is reached. Returns the last payload and its quality; missing
/// the target at the floor is not an error.
pub(crate) fn shrink_to_target<W: RasterWriter>(
    writer: &W,
    raster: &DynamicImage,
    format: TargetFormat,
    mut encoded: Vec<u8>,
    initial_quality: u8,
    max_bytes: usize,
) -> Result<(Vec<u8>, u8)> {
    let mut quality = initial_quality;

    while encoded.len() > max_bytes && quality > QUALITY_FLOOR {
        quality = quality.saturating_sub(QUALITY_STEP).max(QUALITY_FLOOR);
        encoded = writer.write_raster(raster, format, quality)?;
        debug!(quality, size = encoded.len(), max_bytes, "Re-encoded for size target");
    }

    if encoded.len() > max_bytes {
        warn!(
            size = encoded.len(),
            max_bytes,
            quality,
            "Size target not reached, keeping best-effort result"
        );
    }

    Ok((encoded, quality))
}
