//! Source image module
//!
//! Upload payloads and the format-sniffing decoder that turns them into rasters.

mod reader;
mod standard_reader;
pub mod types;

pub use reader::RasterReader;
pub use standard_reader::StandardRasterReader;
pub use types::{DecodedImage, SourceImage};
