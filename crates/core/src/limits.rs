//! Resource limits shared by the encoder and decoder.

use serde::{Deserialize, Serialize};

/// Default maximum Symbol nesting depth.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Default maximum number of tables a single decode may visit.
pub const DEFAULT_MAX_TABLES: usize = 1 << 24;

/// Limits applied to one encode or decode call.
///
/// Recursion in both directions is bounded by `max_depth` so that corrupt or
/// pathological documents fail with an error instead of exhausting the stack.
///
/// Fields missing from a serialized config take their default values.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecLimits {
    /// Maximum Symbol nesting depth. The stage's top-level symbols are depth 1.
    pub max_depth: usize,

    /// Maximum tables resolved during one decode.
    pub max_tables: usize,

    /// Decode lines with unequal per-sample vectors by truncating to the
    /// shortest instead of failing.
    pub truncate_parallel_vectors: bool,
}

impl CodecLimits {
    /// Set the maximum nesting depth
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the decode table budget
    pub fn with_max_tables(mut self, max_tables: usize) -> Self {
        self.max_tables = max_tables;
        self
    }

    /// Truncate mismatched line vectors on decode instead of rejecting them
    pub fn lenient(mut self) -> Self {
        self.truncate_parallel_vectors = true;
        self
    }
}

impl Default for CodecLimits {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_tables: DEFAULT_MAX_TABLES,
            truncate_parallel_vectors: false,
        }
    }
}
