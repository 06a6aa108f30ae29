//! Upload image normalization pipeline
//!
//! Decodes an uploaded image, flattens transparency when the output encoding
//! cannot carry it, downscales to a maximum dimension, re-encodes, and
//! optionally steps quality down until the payload fits a size target.

pub mod common;
pub mod source;
pub mod config;
pub mod encode;
pub mod transform;
pub mod conversions;

pub use common::{
    NormalizationError,
    Result,
};

pub use source::{
    DecodedImage,
    RasterReader,
    SourceImage,
    StandardRasterReader,
};

pub use config::{
    NormalizationConfig,
    NormalizationConfigBuilder,
    UploadPreset,
};

pub use encode::{
    NormalizedImage,
    RasterWriter,
    StandardRasterWriter,
    TargetFormat,
};

pub use conversions::{
    ImageNormalizer,
    QUALITY_FLOOR,
    QUALITY_STEP,
    normalize,
    output_filename,
};
