use image::DynamicImage;

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::encode::types::TargetFormat;

pub trait RasterWriter {
    /// `quality` is ignored by formats where `supports_quality()` is false.
    fn write_raster(&self, raster: &DynamicImage, format: TargetFormat, quality: u8) -> Result<Vec<u8>>;
}
