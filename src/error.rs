//! Unified error types for flatanim.
//!
//! The codec crates report precise, typed failures; this module folds them
//! into one error with two document categories plus the I/O concerns of the
//! facade helpers.

use flatanim_wire::{DecodeError, EncodeError};
use thiserror::Error;

/// All flatanim errors.
#[derive(Debug, Error)]
pub enum Error {
    /// The input bytes are not a well-formed document
    #[error("malformed document: {0}")]
    MalformedDocument(#[from] DecodeError),

    /// The in-memory document violates an invariant and cannot be encoded
    #[error("invalid document: {0}")]
    InvalidDocument(#[from] EncodeError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON conversion error
    #[error("JSON error: {0}")]
    Json(String),
}

/// Result type for flatanim operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if the input bytes were rejected by the decoder.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Error::MalformedDocument(_))
    }

    /// Check if the document was rejected by the encoder.
    pub fn is_invalid(&self) -> bool {
        matches!(self, Error::InvalidDocument(_))
    }

    /// Check if this is an I/O error.
    pub fn is_io(&self) -> bool {
        matches!(self, Error::Io(_))
    }
}

// Document validation failures surface as encoder errors
impl From<flatanim_core::ValidationError> for Error {
    fn from(e: flatanim_core::ValidationError) -> Self {
        Error::InvalidDocument(e.into())
    }
}

// Convert from serde_json errors
impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Json(e.to_string())
    }
}
