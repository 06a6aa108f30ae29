use image::DynamicImage;
use image::imageops::FilterType;
use tracing::debug;

/// Target dimensions so that neither side exceeds `max`. The larger side
/// lands exactly on `max`; the other is rounded to nearest, at least 1.
/// Dimensions already within bounds are returned as-is.
pub fn fit_within(width: u32, height: u32, max: u32) -> (u32, u32) {
    if width <= max && height <= max {
        return (width, height);
    }

    let scale = |side: u32, long: u32| -> u32 {
        let (side, long, max) = (side as u64, long as u64, max as u64);
        ((side * max + long / 2) / long).max(1) as u32
    };

    if width >= height {
        (max, scale(height, width))
    } else {
        (scale(width, height), max)
    }
}

/// Lanczos3 downscale to `fit_within` dimensions; never upscales.
pub fn downscale(raster: DynamicImage, max: u32) -> DynamicImage {
    let (width, height) = (raster.width(), raster.height());
    let (target_width, target_height) = fit_within(width, height, max);

    if (target_width, target_height) == (width, height) {
        return raster;
    }

    debug!(
        "Resizing {}x{} -> {}x{} (max {})",
        width, height, target_width, target_height, max
    );
    raster.resize_exact(target_width, target_height, FilterType::Lanczos3)
}
