use thiserror::Error;

/// Result type for parser operations
pub type ParserResult<T> = Result<T, ParserError>;

/// Errors that can occur while decoding a Harmony stream
#[derive(Debug, Error)]
pub enum ParserError {
    #[error("Harmony encoding unavailable: {0}")]
    EncodingLoad(String),

    #[error("Failed to encode text: {0}")]
    EncodeFailed(String),

    #[error("Failed to decode tokens: {0}")]
    DecodeFailed(String),
}
