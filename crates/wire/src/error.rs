//! Error types for the binary codec
//!
//! - [`DecodeError`]: the buffer is not a well-formed document (malformed)
//! - [`EncodeError`]: the in-memory document cannot be encoded (invalid)

use flatanim_core::{LineSequence, ValidationError};
use thiserror::Error;

/// A buffer that is not a well-formed document
///
/// Every variant is fatal to the decode call; no partial document is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Read past the end of the buffer
    #[error("Buffer truncated: need {needed} bytes at offset {offset}, buffer has {len}")]
    Truncated {
        /// Start of the read
        offset: usize,
        /// Bytes required
        needed: usize,
        /// Buffer length
        len: usize,
    },

    /// An offset resolves outside the buffer
    #[error("Offset {offset} outside buffer of {len} bytes")]
    OffsetOutOfBounds {
        /// Resolved position
        offset: usize,
        /// Buffer length
        len: usize,
    },

    /// A declared length overflows when converted to bytes
    #[error("Length overflow: {count} elements of {elem_size} bytes")]
    LengthOverflow {
        /// Declared element count
        count: usize,
        /// Bytes per element
        elem_size: usize,
    },

    /// A table's vtable is inconsistent
    #[error("Invalid vtable for table at {table}: {reason}")]
    InvalidVTable {
        /// Table position
        table: usize,
        /// What was wrong
        reason: &'static str,
    },

    /// A string is not UTF-8
    #[error("Invalid UTF-8 in string at offset {offset}")]
    InvalidUtf8 {
        /// String position
        offset: usize,
    },

    /// A line's per-sample vectors have different lengths
    #[error("Line vector {sequence} has {actual} elements, expected {expected}")]
    ParallelLengthMismatch {
        /// The vector that disagreed with `points`
        sequence: LineSequence,
        /// Length of `points`
        expected: usize,
        /// Length of the offending vector
        actual: usize,
    },

    /// A symbol's child order does not match its child vectors
    #[error("Invalid child order: {reason}")]
    InvalidChildOrder {
        /// What was wrong
        reason: &'static str,
    },

    /// Two offsets name the same table, vector or string
    ///
    /// A document is a strict tree, so every object has exactly one parent.
    #[error("Object at offset {offset} is referenced more than once")]
    SharedOffset {
        /// Position of the shared object
        offset: usize,
    },

    /// Symbols nest deeper than the configured limit
    #[error("Symbol nesting exceeds depth limit {limit}")]
    DepthLimitExceeded {
        /// Configured limit
        limit: usize,
    },

    /// More tables than the configured budget
    #[error("Document references more than {limit} tables")]
    TableLimitExceeded {
        /// Configured limit
        limit: usize,
    },
}

/// An in-memory document that cannot be encoded
///
/// Every variant is fatal to the encode call; no partial buffer is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// A line's per-sample sequences have different lengths
    #[error("Line sequence {sequence} has {actual} samples, expected {expected}")]
    ParallelLengthMismatch {
        /// The sequence that disagreed with `points`
        sequence: LineSequence,
        /// Length of `points`
        expected: usize,
        /// Length of the offending sequence
        actual: usize,
    },

    /// Symbols nest deeper than the configured limit
    #[error("Symbol nesting exceeds depth limit {limit}")]
    DepthLimitExceeded {
        /// Configured limit
        limit: usize,
    },

    /// A string, vector, table or the whole buffer exceeds the format's offset range
    #[error("{what} too large for the wire format: {size} bytes")]
    TooLarge {
        /// What overflowed
        what: &'static str,
        /// Requested size
        size: usize,
    },
}

impl From<ValidationError> for EncodeError {
    fn from(e: ValidationError) -> Self {
        match e {
            ValidationError::ParallelLengthMismatch {
                sequence,
                expected,
                actual,
            } => EncodeError::ParallelLengthMismatch {
                sequence,
                expected,
                actual,
            },
        }
    }
}

/// Result type for decode operations
pub type DecodeResult<T> = std::result::Result<T, DecodeError>;

/// Result type for encode operations
pub type EncodeResult<T> = std::result::Result<T, EncodeError>;
