//! Raster transforms applied between decode and encode

mod flatten;
mod resize;

pub use flatten::flatten_onto_white;
pub use resize::{downscale, fit_within};
