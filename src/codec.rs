//! Configured codec entry point.
//!
//! [`Codec`] bundles a set of [`CodecLimits`] with the encode/decode and file
//! operations, so callers that need non-default limits configure them once.

use std::path::Path;

use flatanim_core::{CodecLimits, Stage, Symbol};

use crate::error::Result;
use crate::io;

/// A codec with fixed limits.
///
/// # Example
///
/// ```
/// use flatanim::prelude::*;
///
/// let codec = Codec::builder().max_depth(64).lenient().build();
/// let bytes = codec.encode(&Stage::new())?;
/// assert_eq!(codec.decode(&bytes)?, Stage::new());
/// # Ok::<(), flatanim::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Codec {
    limits: CodecLimits,
}

impl Codec {
    /// Codec with default limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Codec with explicit limits.
    pub fn with_limits(limits: CodecLimits) -> Self {
        Self { limits }
    }

    /// Create a builder for codec configuration.
    pub fn builder() -> CodecBuilder {
        CodecBuilder::new()
    }

    /// The limits applied to every call.
    pub fn limits(&self) -> &CodecLimits {
        &self.limits
    }

    /// Decode a buffer.
    pub fn decode(&self, bytes: &[u8]) -> Result<Stage> {
        Ok(flatanim_wire::decode_with(bytes, &self.limits)?)
    }

    /// Encode a document.
    pub fn encode(&self, stage: &Stage) -> Result<Vec<u8>> {
        Ok(flatanim_wire::encode_with(stage, &self.limits)?)
    }

    /// Read and decode a document file.
    pub fn read_stage(&self, path: impl AsRef<Path>) -> Result<Stage> {
        io::read_stage_with(path.as_ref(), &self.limits)
    }

    /// Encode a document and write it to a file.
    ///
    /// Returns the number of bytes written.
    pub fn write_stage(&self, path: impl AsRef<Path>, stage: &Stage) -> Result<usize> {
        io::write_stage_with(path.as_ref(), stage, &self.limits)
    }

    /// Read a document file as one root symbol named after the file stem.
    pub fn import_symbol(&self, path: impl AsRef<Path>) -> Result<Symbol> {
        io::import_symbol_with(path.as_ref(), &self.limits)
    }
}

/// Builder for codec configuration.
///
/// # Example
///
/// ```
/// use flatanim::Codec;
///
/// // Shallow documents only, reject anything suspicious
/// let strict = Codec::builder().max_depth(16).max_tables(10_000).build();
///
/// // Accept files whose per-sample vectors disagree in length
/// let lenient = Codec::builder().lenient().build();
/// assert!(lenient.limits().truncate_parallel_vectors);
/// # let _ = strict;
/// ```
#[derive(Debug, Clone, Default)]
pub struct CodecBuilder {
    limits: CodecLimits,
}

impl CodecBuilder {
    /// Create a new builder with default limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum symbol nesting depth.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.limits = self.limits.with_max_depth(max_depth);
        self
    }

    /// Set the maximum number of tables a decode may visit.
    pub fn max_tables(mut self, max_tables: usize) -> Self {
        self.limits = self.limits.with_max_tables(max_tables);
        self
    }

    /// Truncate mismatched per-sample vectors to the shortest on decode.
    pub fn lenient(mut self) -> Self {
        self.limits = self.limits.lenient();
        self
    }

    /// Reject mismatched per-sample vectors on decode (default).
    pub fn strict(mut self) -> Self {
        self.limits.truncate_parallel_vectors = false;
        self
    }

    /// Build the codec.
    pub fn build(self) -> Codec {
        Codec {
            limits: self.limits,
        }
    }
}
