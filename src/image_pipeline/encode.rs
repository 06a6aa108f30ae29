//! Output encoding module
//!
//! Target formats, the normalized output value, and the codec-backed writer.

mod writer;
mod standard_writer;
pub mod types;

pub use writer::RasterWriter;
pub use standard_writer::StandardRasterWriter;
pub use types::{NormalizedImage, TargetFormat};
