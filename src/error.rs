//! Error types for email scraping

use thiserror::Error;

/// Errors that can occur while scraping a page
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// An `atob(...)` payload is not valid base64
    #[error("Failed to decode inline base64 payload {payload:?}: {source}")]
    InvalidBase64 {
        payload: String,
        source: base64::DecodeError,
    },

    /// An `atob(...)` payload decoded to bytes that are not UTF-8 text
    #[error("Inline base64 payload {payload:?} is not valid UTF-8: {source}")]
    InvalidUtf8 {
        payload: String,
        source: std::string::FromUtf8Error,
    },

    /// Input rejected by the configured size limit
    #[error("Input of {len} bytes exceeds the limit of {limit} bytes")]
    InputTooLarge { len: usize, limit: usize },
}

/// Result type for scraping operations
pub type Result<T> = std::result::Result<T, ScrapeError>;
