//! Normalization configuration types

use crate::image_pipeline::common::error::{NormalizationError, Result};
use crate::image_pipeline::encode::types::TargetFormat;

/// Constraints applied to one upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizationConfig {
    /// Largest allowed width or height in pixels
    pub max_dimension: u32,
    /// Encoder quality for lossy formats, 1-100
    pub quality: u8,
    /// Forced output encoding; `None` infers one from the source
    pub target_format: Option<TargetFormat>,
    /// Keep the source encoding when no target is forced and it is supported
    pub preserve_original_format: bool,
    /// Advisory payload ceiling; quality is stepped down until it fits or the floor is hit
    pub max_output_size_kb: Option<u32>,
}

impl Default for NormalizationConfig {
    fn default() -> Self {
        Self {
            max_dimension: 1200,
            quality: 80,
            target_format: None,
            preserve_original_format: true,
            max_output_size_kb: None,
        }
    }
}

impl NormalizationConfig {
    pub fn builder() -> NormalizationConfigBuilder {
        NormalizationConfigBuilder::default()
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_dimension == 0 {
            return Err(NormalizationError::InvalidConfig(
                "max_dimension must be greater than 0".to_string(),
            ));
        }

        if !(1..=100).contains(&self.quality) {
            return Err(NormalizationError::InvalidConfig(format!(
                "quality must be within 1..=100, got {}",
                self.quality
            )));
        }

        if self.max_output_size_kb == Some(0) {
            return Err(NormalizationError::InvalidConfig(
                "max_output_size_kb must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Size target in bytes, if one is set.
    pub fn max_output_bytes(&self) -> Option<usize> {
        self.max_output_size_kb.map(|kb| kb as usize * 1024)
    }
}

/// Builder for NormalizationConfig
#[derive(Default)]
pub struct NormalizationConfigBuilder {
    max_dimension: Option<u32>,
    quality: Option<u8>,
    target_format: Option<Option<TargetFormat>>,
    preserve_original_format: Option<bool>,
    max_output_size_kb: Option<Option<u32>>,
}

impl NormalizationConfigBuilder {
    pub fn max_dimension(mut self, max: u32) -> Self {
        self.max_dimension = Some(max);
        self
    }

    pub fn quality(mut self, quality: u8) -> Self {
        self.quality = Some(quality);
        self
    }

    pub fn target_format(mut self, format: Option<TargetFormat>) -> Self {
        self.target_format = Some(format);
        self
    }

    pub fn preserve_original_format(mut self, preserve: bool) -> Self {
        self.preserve_original_format = Some(preserve);
        self
    }

    pub fn max_output_size_kb(mut self, kb: Option<u32>) -> Self {
        self.max_output_size_kb = Some(kb);
        self
    }

    pub fn build(self) -> NormalizationConfig {
        let default = NormalizationConfig::default();
        NormalizationConfig {
            max_dimension: self.max_dimension.unwrap_or(default.max_dimension),
            quality: self.quality.unwrap_or(default.quality),
            target_format: self.target_format.unwrap_or(default.target_format),
            preserve_original_format: self
                .preserve_original_format
                .unwrap_or(default.preserve_original_format),
            max_output_size_kb: self.max_output_size_kb.unwrap_or(default.max_output_size_kb),
        }
    }
}
