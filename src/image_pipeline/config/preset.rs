use std::fmt;
use std::str::FromStr;

use crate::image_pipeline::common::error::NormalizationError;
use crate::image_pipeline::config::types::NormalizationConfig;

/// Upload slots that run images through the normalizer before storage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadPreset {
    GameThumbnail,
    ArtThumbnail,
    PostImage,
}

impl UploadPreset {
    pub const ALL: [UploadPreset; 3] = [
        UploadPreset::GameThumbnail,
        UploadPreset::ArtThumbnail,
        UploadPreset::PostImage,
    ];

    /// All slots currently share one policy: 1200px, quality 80, keep the
    /// source encoding, aim for 500 KB.
    pub fn config(self) -> NormalizationConfig {
        NormalizationConfig::builder()
            .max_dimension(1200)
            .quality(80)
            .preserve_original_format(true)
            .max_output_size_kb(Some(500))
            .build()
    }

    pub fn upload_prefix(self) -> &'static str {
        match self {
            UploadPreset::GameThumbnail => "games/thumbnails/",
            UploadPreset::ArtThumbnail => "art_thumbnails/",
            UploadPreset::PostImage => "post_images/",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            UploadPreset::GameThumbnail => "game-thumbnail",
            UploadPreset::ArtThumbnail => "art-thumbnail",
            UploadPreset::PostImage => "post-image",
        }
    }
}

impl FromStr for UploadPreset {
    type Err = NormalizationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        UploadPreset::ALL
            .into_iter()
            .find(|preset| preset.name() == wanted)
            .ok_or_else(|| NormalizationError::InvalidConfig(format!("unknown upload preset: {s}")))
    }
}

impl fmt::Display for UploadPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
