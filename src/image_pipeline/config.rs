//! Normalization configuration module
//!
//! Caller constraints for one normalization call, and the named presets the
//! upload endpoints use.

pub mod types;
mod preset;

pub use types::{NormalizationConfig, NormalizationConfigBuilder};
pub use preset::UploadPreset;
