//! Common utilities module
//!
//! Error type shared by every stage of the normalization pipeline.

pub mod error;

pub use error::{NormalizationError, Result};
