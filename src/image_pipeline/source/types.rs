//! Source image types

use std::path::Path;

use image::{DynamicImage, ImageFormat};

/// An uploaded image as received from the caller
#[derive(Debug, Clone)]
pub struct SourceImage {
    data: Vec<u8>,
    filename: String,
}

impl SourceImage {
    pub fn new(data: impl Into<Vec<u8>>, filename: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            filename: filename.into(),
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Encoding implied by the filename extension, if it names one `image` knows.
    pub fn declared_format(&self) -> Option<ImageFormat> {
        ImageFormat::from_path(Path::new(&self.filename)).ok()
    }
}

/// Decoded raster plus the encoding it was stored in
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub raster: DynamicImage,
    /// Sniffed from content, or taken from the filename when sniffing failed
    pub original_format: Option<ImageFormat>,
}
