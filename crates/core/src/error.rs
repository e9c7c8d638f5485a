//! Validation errors for in-memory documents

use thiserror::Error;

/// Names of the per-sample sequences carried by a [`Line`](crate::Line)
///
/// Used in error messages to say which sequence disagreed with `points`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineSequence {
    /// Sample positions
    Points,
    /// Per-sample widths
    Widths,
    /// Per-sample colors
    Colors,
    /// Per-sample light intensity
    Lights,
    /// Per-sample rotations
    Rotations,
    /// Per-sample camera-facing orientations
    CamOrientations,
}

impl LineSequence {
    /// Field name as it appears in the schema
    pub fn name(self) -> &'static str {
        match self {
            LineSequence::Points => "points",
            LineSequence::Widths => "widths",
            LineSequence::Colors => "colors",
            LineSequence::Lights => "lights",
            LineSequence::Rotations => "rotations",
            LineSequence::CamOrientations => "cam_orientations",
        }
    }
}

impl std::fmt::Display for LineSequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A document that violates a model invariant
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A line's per-sample sequences have different lengths
    #[error("line sequence {sequence} has {actual} samples, expected {expected} (points)")]
    ParallelLengthMismatch {
        /// The sequence that disagreed
        sequence: LineSequence,
        /// Length of `points`
        expected: usize,
        /// Length of the offending sequence
        actual: usize,
    },
}
