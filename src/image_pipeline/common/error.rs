use thiserror::Error;

#[derive(Error, Debug)]
pub enum NormalizationError {
    #[error("Invalid normalization config: {0}")]
    InvalidConfig(String),

    #[error("Failed to decode source image: {0}")]
    DecodeError(String),

    #[error("Failed to encode output image: {0}")]
    EncodeError(String),

    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),
}

impl NormalizationError {
    /// Rejected inputs (bad config, undecodable upload) as opposed to
    /// internal failures of the codec or filesystem.
    pub fn is_rejected_input(&self) -> bool {
        matches!(self, Self::InvalidConfig(_) | Self::DecodeError(_))
    }
}

pub type Result<T> = std::result::Result<T, NormalizationError>;
