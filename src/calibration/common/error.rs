use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("Failed to parse calibration document: {0}")]
    ParseError(String),

    /// The key is absent, or present but not holding a well-formed matrix.
    #[error("Missing field `{key}`: {reason}")]
    MissingField { key: String, reason: String },

    #[error("Failed to encode output document: {0}")]
    EncodeError(String),
}

impl ConversionError {
    pub fn missing_field(key: &str, reason: impl Into<String>) -> Self {
        ConversionError::MissingField {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ConversionError>;
