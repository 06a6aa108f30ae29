use image::{DynamicImage, Rgb, RgbImage};
use tracing::debug;

/// Composites a raster onto opaque white using its alpha channel as the
/// blend weight. Rasters without alpha come back untouched.
pub fn flatten_onto_white(raster: DynamicImage) -> DynamicImage {
    if !raster.color().has_alpha() {
        return raster;
    }

    debug!("Flattening {:?} raster onto white", raster.color());

    let rgba = raster.to_rgba8();
    let flattened = RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        Rgb([blend(r, a), blend(g, a), blend(b, a)])
    });

    DynamicImage::ImageRgb8(flattened)
}

// c·a + 255·(1 − a), rounded, in integer arithmetic.
fn blend(channel: u8, alpha: u8) -> u8 {
    let (c, a) = (channel as u32, alpha as u32);
    ((c * a + 255 * (255 - a) + 127) / 255) as u8
}
