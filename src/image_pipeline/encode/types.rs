//! Output encoding types

use std::fmt;
use std::str::FromStr;

use image::ImageFormat;

use crate::image_pipeline::common::error::NormalizationError;

/// Encodings the normalizer can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetFormat {
    /// Lossy baseline JPEG, the default when nothing else applies
    Jpeg,
    /// Lossless PNG with maximum deflate effort
    Png,
    /// Lossy WebP; keeps alpha
    WebP,
}

impl TargetFormat {
    pub fn mime_type(self) -> &'static str {
        match self {
            TargetFormat::Jpeg => "image/jpeg",
            TargetFormat::Png => "image/png",
            TargetFormat::WebP => "image/webp",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            TargetFormat::Jpeg => "jpg",
            TargetFormat::Png => "png",
            TargetFormat::WebP => "webp",
        }
    }

    pub fn supports_alpha(self) -> bool {
        !matches!(self, TargetFormat::Jpeg)
    }

    /// Whether re-encoding at a lower quality shrinks the payload.
    pub fn supports_quality(self) -> bool {
        matches!(self, TargetFormat::Jpeg | TargetFormat::WebP)
    }

    pub fn from_image_format(format: ImageFormat) -> Option<Self> {
        match format {
            ImageFormat::Jpeg => Some(TargetFormat::Jpeg),
            ImageFormat::Png => Some(TargetFormat::Png),
            ImageFormat::WebP => Some(TargetFormat::WebP),
            _ => None,
        }
    }
}

impl FromStr for TargetFormat {
    type Err = NormalizationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "jpeg" | "jpg" => Ok(TargetFormat::Jpeg),
            "png" => Ok(TargetFormat::Png),
            "webp" => Ok(TargetFormat::WebP),
            other => Err(NormalizationError::InvalidConfig(format!(
                "unsupported target format: {other}"
            ))),
        }
    }
}

impl fmt::Display for TargetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TargetFormat::Jpeg => "JPEG",
            TargetFormat::Png => "PNG",
            TargetFormat::WebP => "WEBP",
        };
        f.write_str(name)
    }
}

/// Re-encoded image handed back to the caller for storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedImage {
    data: Vec<u8>,
    format: TargetFormat,
    filename: String,
    width: u32,
    height: u32,
    quality: Option<u8>,
}

impl NormalizedImage {
    pub(crate) fn new(
        data: Vec<u8>,
        format: TargetFormat,
        filename: String,
        (width, height): (u32, u32),
        quality: Option<u8>,
    ) -> Self {
        Self {
            data,
            format,
            filename,
            width,
            height,
            quality,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Always the length of the wrapped payload.
    pub fn byte_len(&self) -> usize {
        self.data.len()
    }

    pub fn format(&self) -> TargetFormat {
        self.format
    }

    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Quality of the final encode; `None` for lossless formats or when the
    /// source payload was returned unchanged.
    pub fn quality(&self) -> Option<u8> {
        self.quality
    }

    /// Object key under an upload prefix such as `post_images/`.
    pub fn storage_key(&self, prefix: &str) -> String {
        if prefix.is_empty() || prefix.ends_with('/') {
            format!("{}{}", prefix, self.filename)
        } else {
            format!("{}/{}", prefix, self.filename)
        }
    }
}
