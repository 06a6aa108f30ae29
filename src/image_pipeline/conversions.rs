//! Pipeline orchestration module
//!
//! Wires reader, transforms and writer together into the normalization call.

mod normalizer;
mod size_target;


pub use normalizer::{ImageNormalizer, normalize, output_filename};
pub use size_target::{QUALITY_FLOOR, QUALITY_STEP};
