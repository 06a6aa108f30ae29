use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType as PngFilter, PngEncoder};
use image::{DynamicImage, ImageEncoder};
use tracing::debug;

use crate::image_pipeline::common::error::{NormalizationError, Result};
use crate::image_pipeline::encode::types::TargetFormat;
use crate::image_pipeline::encode::writer::RasterWriter;

pub struct StandardRasterWriter;

impl RasterWriter for StandardRasterWriter {
    fn write_raster(&self, raster: &DynamicImage, format: TargetFormat, quality: u8) -> Result<Vec<u8>> {
        debug!(
            "Encoding {} image: {}x{} at quality {}",
            format,
            raster.width(),
            raster.height(),
            quality
        );

        let prepared = encodable_raster(raster, format);
        let pixels = prepared.as_ref().unwrap_or(raster);
        let encode_err =
            |e: image::ImageError| NormalizationError::EncodeError(format!("{}: {}", format, e));

        let bytes = match format {
            TargetFormat::Jpeg => {
                let mut output = Vec::new();
                JpegEncoder::new_with_quality(&mut output, quality)
                    .write_image(
                        pixels.as_bytes(),
                        pixels.width(),
                        pixels.height(),
                        pixels.color().into(),
                    )
                    .map_err(encode_err)?;
                output
            }
            TargetFormat::Png => {
                let mut output = Vec::new();
                PngEncoder::new_with_quality(&mut output, CompressionType::Best, PngFilter::Adaptive)
                    .write_image(
                        pixels.as_bytes(),
                        pixels.width(),
                        pixels.height(),
                        pixels.color().into(),
                    )
                    .map_err(encode_err)?;
                output
            }
            TargetFormat::WebP => encode_webp(pixels, quality)?,
        };

        debug!("{} encoding complete: {} bytes", format, bytes.len());
        Ok(bytes)
    }
}

/// Lossy WebP through libwebp; the `image` crate only writes lossless WebP.
fn encode_webp(pixels: &DynamicImage, quality: u8) -> Result<Vec<u8>> {
    let encoder = webp::Encoder::from_image(pixels)
        .map_err(|e| NormalizationError::EncodeError(format!("WEBP: {}", e)))?;
    let memory = encoder
        .encode_simple(false, quality as f32)
        .map_err(|e| NormalizationError::EncodeError(format!("WEBP: {:?}", e)))?;

    Ok(memory.to_vec())
}

/// Converts the raster to a colour type the target codec accepts, or `None`
/// when it already is one.
fn encodable_raster(raster: &DynamicImage, format: TargetFormat) -> Option<DynamicImage> {
    match (format, raster) {
        (TargetFormat::Jpeg, DynamicImage::ImageLuma8(_) | DynamicImage::ImageRgb8(_)) => None,
        (TargetFormat::Jpeg, DynamicImage::ImageLuma16(_) | DynamicImage::ImageLumaA8(_) | DynamicImage::ImageLumaA16(_)) => {
            Some(DynamicImage::ImageLuma8(raster.to_luma8()))
        }
        (TargetFormat::Jpeg, _) => Some(DynamicImage::ImageRgb8(raster.to_rgb8())),

        (
            TargetFormat::Png,
            DynamicImage::ImageLuma8(_)
            | DynamicImage::ImageLumaA8(_)
            | DynamicImage::ImageRgb8(_)
            | DynamicImage::ImageRgba8(_)
            | DynamicImage::ImageLuma16(_)
            | DynamicImage::ImageLumaA16(_)
            | DynamicImage::ImageRgb16(_)
            | DynamicImage::ImageRgba16(_),
        ) => None,

        (TargetFormat::WebP, DynamicImage::ImageRgb8(_) | DynamicImage::ImageRgba8(_)) => None,

        (_, other) if other.color().has_alpha() => Some(DynamicImage::ImageRgba8(other.to_rgba8())),
        (_, other) => Some(DynamicImage::ImageRgb8(other.to_rgb8())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, ImageFormat, Rgb32FImage, RgbImage, RgbaImage};

    fn gradient(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x * 7 % 256) as u8, (y * 5 % 256) as u8, ((x + y) % 256) as u8])
        }))
    }

    #[test]
    fn test_jpeg_output_is_jpeg() {
        let bytes = StandardRasterWriter
            .write_raster(&gradient(64, 32), TargetFormat::Jpeg, 80)
            .unwrap();

        assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::Jpeg);
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (64, 32));
    }

    #[test]
    fn test_lower_jpeg_quality_is_smaller() {
        let raster = gradient(128, 128);
        let high = StandardRasterWriter.write_raster(&raster, TargetFormat::Jpeg, 95).unwrap();
        let low = StandardRasterWriter.write_raster(&raster, TargetFormat::Jpeg, 20).unwrap();

        assert!(low.len() < high.len());
    }

    #[test]
    fn test_png_keeps_alpha() {
        let raster = DynamicImage::ImageRgba8(RgbaImage::from_pixel(4, 4, image::Rgba([1, 2, 3, 4])));
        let bytes = StandardRasterWriter.write_raster(&raster, TargetFormat::Png, 80).unwrap();

        let decoded = image::load_from_memory(&bytes).unwrap();
        assert!(decoded.color().has_alpha());
        assert_eq!(decoded.to_rgba8().get_pixel(0, 0).0, [1, 2, 3, 4]);
    }

    #[test]
    fn test_webp_is_lossy_and_honours_quality() {
        let raster = gradient(128, 128);
        let high = StandardRasterWriter.write_raster(&raster, TargetFormat::WebP, 95).unwrap();
        let low = StandardRasterWriter.write_raster(&raster, TargetFormat::WebP, 20).unwrap();

        assert_eq!(image::guess_format(&low).unwrap(), ImageFormat::WebP);
        assert!(low.len() < high.len());
        let decoded = image::load_from_memory(&low).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (128, 128));
    }

    #[test]
    fn test_grayscale_webp_expanded_to_rgb() {
        let raster = DynamicImage::ImageLuma8(GrayImage::from_pixel(8, 8, image::Luma([128])));
        let prepared = encodable_raster(&raster, TargetFormat::WebP).unwrap();

        assert!(matches!(prepared, DynamicImage::ImageRgb8(_)));
        assert!(!StandardRasterWriter.write_raster(&raster, TargetFormat::WebP, 80).unwrap().is_empty());
    }

    #[test]
    fn test_grayscale_jpeg_stays_single_channel() {
        let raster = DynamicImage::ImageLuma8(GrayImage::from_pixel(8, 8, image::Luma([128])));
        assert!(encodable_raster(&raster, TargetFormat::Jpeg).is_none());
        let bytes = StandardRasterWriter.write_raster(&raster, TargetFormat::Jpeg, 80).unwrap();
        assert!(!bytes.is_empty());
    }

    #[test]
    fn test_float_raster_converted_for_webp() {
        let raster = DynamicImage::ImageRgb32F(Rgb32FImage::from_pixel(4, 4, image::Rgb([0.5, 0.5, 0.5])));
        let prepared = encodable_raster(&raster, TargetFormat::WebP).unwrap();
        assert!(matches!(prepared, DynamicImage::ImageRgb8(_)));
    }
}
