use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::Parser;
use image_normalizer::image_pipeline::{ImageNormalizer, NormalizationConfig, TargetFormat, UploadPreset};
use image_normalizer::logger::{self, LogOptions};

use tracing::{error, info};

/// Resize and re-encode uploaded images for storage.
#[derive(Parser, Debug)]
#[command(name = "image_normalizer", version)]
struct Cli {
    /// Images to normalize
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Directory the normalized images are written to
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Start from an upload preset (game-thumbnail, art-thumbnail, post-image)
    #[arg(long)]
    preset: Option<UploadPreset>,

    /// Largest allowed width or height in pixels
    #[arg(long)]
    max_dimension: Option<u32>,

    /// Encoder quality for lossy formats (1-100)
    #[arg(short, long)]
    quality: Option<u8>,

    /// Force an output format (jpeg, jpg, png, webp)
    #[arg(short, long)]
    format: Option<TargetFormat>,

    /// Do not keep the source encoding; fall back to JPEG unless --format is given
    #[arg(long)]
    no_preserve_format: bool,

    /// Advisory output size ceiling in KB
    #[arg(long)]
    max_size_kb: Option<u32>,

    /// Log how long each pipeline stage took
    #[arg(long)]
    timings: bool,
}

impl Cli {
    fn config(&self) -> NormalizationConfig {
        let mut config = self.preset.map(UploadPreset::config).unwrap_or_default();

        if let Some(max) = self.max_dimension {
            config.max_dimension = max;
        }
        if let Some(quality) = self.quality {
            config.quality = quality;
        }
        if self.format.is_some() {
            config.target_format = self.format;
        }
        if self.no_preserve_format {
            config.preserve_original_format = false;
        }
        if self.max_size_kb.is_some() {
            config.max_output_size_kb = self.max_size_kb;
        }
        config
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logger::init(LogOptions {
        stage_timings: cli.timings,
    });

    let config = cli.config();
    config.validate().context("invalid options")?;

    info!(
        max_dimension = config.max_dimension,
        quality = config.quality,
        format = ?config.target_format,
        preserve = config.preserve_original_format,
        max_size_kb = ?config.max_output_size_kb,
        "Starting image_normalizer"
    );

    let normalizer = ImageNormalizer::new(config);
    let mut failures = 0usize;

    for input in &cli.inputs {
        match normalizer.normalize_file(input, &cli.output_dir) {
            Ok(image) => {
                let (width, height) = image.dimensions();
                let key = match cli.preset {
                    Some(preset) => image.storage_key(preset.upload_prefix()),
                    None => image.filename().to_string(),
                };
                info!(
                    input = %input.display(),
                    output = %key,
                    mime = image.mime_type(),
                    width,
                    height,
                    bytes = image.byte_len(),
                    "Normalized"
                );
            }
            Err(e) => {
                failures += 1;
                error!(input = %input.display(), "Normalization failed: {}", e);
            }
        }
    }

    if failures > 0 {
        bail!("{} of {} inputs failed", failures, cli.inputs.len());
    }
    Ok(())
}
