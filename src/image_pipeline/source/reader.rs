use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::source::types::{DecodedImage, SourceImage};

pub trait RasterReader {
    fn read_raster(&self, source: &SourceImage) -> Result<DecodedImage>;
}
