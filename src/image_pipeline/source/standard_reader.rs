//! Raster reader backed by the `image` crate decoders.
//!
//! The encoding is sniffed from the payload's magic bytes first. Only when the
//! content is not recognised does the reader trust the extension of the
//! uploaded filename, which covers formats without a reliable signature.

use std::io::Cursor;

use image::ImageReader;
use tracing::debug;

use crate::image_pipeline::common::error::{NormalizationError, Result};
use crate::image_pipeline::source::reader::RasterReader;
use crate::image_pipeline::source::types::{DecodedImage, SourceImage};

pub struct StandardRasterReader;

impl RasterReader for StandardRasterReader {
    fn read_raster(&self, source: &SourceImage) -> Result<DecodedImage> {
        let data = source.data();
        debug!("Decoding source image {:?}, {} bytes", source.filename(), data.len());

        if data.is_empty() {
            return Err(NormalizationError::DecodeError(format!(
                "{}: empty payload",
                source.filename()
            )));
        }

        let mut reader = ImageReader::new(Cursor::new(data))
            .with_guessed_format()
            .map_err(|e| NormalizationError::DecodeError(e.to_string()))?;

        if reader.format().is_none() {
            match source.declared_format() {
                Some(declared) => {
                    debug!("Content sniffing failed, using declared format {:?}", declared);
                    reader.set_format(declared);
                }
                None => {
                    return Err(NormalizationError::DecodeError(format!(
                        "{}: unrecognised image format",
                        source.filename()
                    )));
                }
            }
        }

        let original_format = reader.format();
        let raster = reader
            .decode()
            .map_err(|e| NormalizationError::DecodeError(format!("{}: {}", source.filename(), e)))?;

        debug!(
            "Decoded image: {}x{} {:?} ({:?})",
            raster.width(),
            raster.height(),
            raster.color(),
            original_format
        );

        Ok(DecodedImage {
            raster,
            original_format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat, RgbImage};

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(RgbImage::new(width, height))
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_sniffs_format_from_content() {
        // Extension lies; magic bytes win.
        let source = SourceImage::new(png_bytes(8, 4), "avatar.jpg");
        let decoded = StandardRasterReader.read_raster(&source).unwrap();

        assert_eq!(decoded.original_format, Some(ImageFormat::Png));
        assert_eq!((decoded.raster.width(), decoded.raster.height()), (8, 4));
    }

    #[test]
    fn test_empty_payload_is_decode_error() {
        let source = SourceImage::new(Vec::new(), "empty.png");
        let result = StandardRasterReader.read_raster(&source);

        assert!(matches!(result, Err(NormalizationError::DecodeError(_))));
    }

    #[test]
    fn test_garbage_without_extension_is_decode_error() {
        let source = SourceImage::new(b"definitely not an image".to_vec(), "upload");
        let result = StandardRasterReader.read_raster(&source);

        assert!(matches!(result, Err(NormalizationError::DecodeError(_))));
    }

    #[test]
    fn test_garbage_with_image_extension_is_decode_error() {
        let source = SourceImage::new(b"definitely not an image".to_vec(), "upload.png");
        let result = StandardRasterReader.read_raster(&source);

        assert!(matches!(result, Err(NormalizationError::DecodeError(_))));
    }

    #[test]
    fn test_declared_format_from_extension() {
        assert_eq!(SourceImage::new(vec![], "a.JPG").declared_format(), Some(ImageFormat::Jpeg));
        assert_eq!(SourceImage::new(vec![], "b.webp").declared_format(), Some(ImageFormat::WebP));
        assert_eq!(SourceImage::new(vec![], "c").declared_format(), None);
    }
}
