use std::io::Write;
use std::path::Path;

use image::ImageFormat;
use tempfile::NamedTempFile;
use tracing::{debug, info, instrument};

use crate::image_pipeline::{
    common::error::{NormalizationError, Result},
    config::NormalizationConfig,
    conversions::size_target::shrink_to_target,
    encode::{NormalizedImage, RasterWriter, StandardRasterWriter, TargetFormat},
    source::{RasterReader, SourceImage, StandardRasterReader},
    transform::{downscale, flatten_onto_white},
};

pub struct ImageNormalizer<R: RasterReader, W: RasterWriter> {
    reader: R,
    writer: W,
    config: NormalizationConfig,
}

impl ImageNormalizer<StandardRasterReader, StandardRasterWriter> {
    pub fn new(config: NormalizationConfig) -> Self {
        Self {
            reader: StandardRasterReader,
            writer: StandardRasterWriter,
            config,
        }
    }
}

impl<R: RasterReader, W: RasterWriter> ImageNormalizer<R, W> {
    pub fn with_custom(reader: R, writer: W, config: NormalizationConfig) -> Self {
        Self {
            reader,
            writer,
            config,
        }
    }

    fn resolve_format(&self, original: Option<ImageFormat>) -> TargetFormat {
        if let Some(forced) = self.config.target_format {
            return forced;
        }

        if self.config.preserve_original_format {
            if let Some(kept) = original.and_then(TargetFormat::from_image_format) {
                return kept;
            }
        }

        TargetFormat::Jpeg
    }

    #[instrument(skip(self, source), fields(filename = source.filename(), input_size = source.data().len()))]
    pub fn normalize(&self, source: &SourceImage) -> Result<NormalizedImage> {
        self.config.validate()?;

        let decoded = {
            let _span = tracing::info_span!("decode").entered();
            self.reader.read_raster(source)?
        };
        let (source_width, source_height) = (decoded.raster.width(), decoded.raster.height());

        let format = self.resolve_format(decoded.original_format);
        let same_encoding = decoded
            .original_format
            .and_then(TargetFormat::from_image_format)
            == Some(format);
        let flattened = !format.supports_alpha() && decoded.raster.color().has_alpha();

        let raster = if format.supports_alpha() {
            decoded.raster
        } else {
            let _span = tracing::info_span!("flatten").entered();
            flatten_onto_white(decoded.raster)
        };

        let raster = {
            let _span = tracing::info_span!("resize",
                width = source_width,
                height = source_height,
                max = self.config.max_dimension
            ).entered();
            downscale(raster, self.config.max_dimension)
        };
        let resized = (raster.width(), raster.height()) != (source_width, source_height);

        let encoded = {
            let _span = tracing::info_span!("encode", format = %format, quality = self.config.quality).entered();
            self.writer.write_raster(&raster, format, self.config.quality)?
        };

        let (data, quality) = match self.config.max_output_bytes() {
            Some(max_bytes) if format.supports_quality() => {
                let _span = tracing::info_span!("size_target", max_bytes).entered();
                let (data, quality) =
                    shrink_to_target(&self.writer, &raster, format, encoded, self.config.quality, max_bytes)?;
                (data, Some(quality))
            }
            _ => (encoded, format.supports_quality().then_some(self.config.quality)),
        };

        // Pixels and encoding unchanged: never hand back more bytes than the
        // caller gave us. A smaller source also fits any size target the
        // re-encode fits.
        let (data, quality) = if same_encoding
            && !flattened
            && !resized
            && source.data().len() < data.len()
        {
            debug!(
                reencoded = data.len(),
                source = source.data().len(),
                "Re-encode larger than source, keeping source payload"
            );
            (source.data().to_vec(), None)
        } else {
            (data, quality)
        };

        let normalized = NormalizedImage::new(
            data,
            format,
            output_filename(source.filename(), format),
            (raster.width(), raster.height()),
            quality,
        );

        info!(
            filename = normalized.filename(),
            format = %format,
            width = raster.width(),
            height = raster.height(),
            quality = ?normalized.quality(),
            output_size = normalized.byte_len(),
            "Normalization complete"
        );
        Ok(normalized)
    }

    /// Normalizes `input_path` and writes the result into `output_dir` under
    /// the derived filename. Refuses to replace the input itself; the payload
    /// is staged in `output_dir` and renamed into place, so a failed write
    /// never leaves a truncated file behind.
    #[instrument(skip(self, input_path, output_dir))]
    pub fn normalize_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_dir: Q,
    ) -> Result<NormalizedImage> {
        let input_path = input_path.as_ref();
        let output_dir = output_dir.as_ref();

        self.config.validate()?;

        info!(
            input = %input_path.display(),
            output_dir = %output_dir.display(),
            "Normalizing file"
        );

        let data = {
            let _span = tracing::info_span!("read_input_file").entered();
            std::fs::read(input_path).map_err(|e| {
                NormalizationError::InputReadError(format!("{}: {}", input_path.display(), e))
            })?
        };

        let filename = input_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let normalized = self.normalize(&SourceImage::new(data, filename))?;

        let output_path = output_dir.join(normalized.filename());
        if same_file(input_path, &output_path) {
            return Err(NormalizationError::OutputWriteError(format!(
                "{}: output would overwrite the input file",
                output_path.display()
            )));
        }

        {
            let _span = tracing::info_span!("write_output_file").entered();
            let write_err = |e: std::io::Error| {
                NormalizationError::OutputWriteError(format!("{}: {}", output_path.display(), e))
            };

            let mut staged = NamedTempFile::new_in(output_dir).map_err(write_err)?;
            staged.write_all(normalized.data()).map_err(write_err)?;
            staged.persist(&output_path).map_err(|e| write_err(e.error))?;
        }

        Ok(normalized)
    }

    pub fn config(&self) -> &NormalizationConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: NormalizationConfig) {
        self.config = config;
    }
}

/// One-shot normalization with the standard codecs.
pub fn normalize(source: &SourceImage, config: &NormalizationConfig) -> Result<NormalizedImage> {
    ImageNormalizer::new(config.clone()).normalize(source)
}

// Both must exist to compare equal; a missing output cannot be the input.
fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Source filename with its last extension replaced by the target's.
pub fn output_filename(source_name: &str, format: TargetFormat) -> String {
    let stem = match source_name.rfind('.') {
        Some(dot) => &source_name[..dot],
        None => source_name,
    };
    format!("{}.{}", stem, format.extension())
}
