//! Core types for flatanim
//!
//! This crate defines the in-memory animation document that the wire codec
//! reads and writes:
//! - [`Stage`]: document root holding top-level [`Symbol`]s
//! - [`Symbol`] / [`Timeline`]: playables sharing a [`PlayableBase`]
//! - [`Frame`] and [`Line`]: the drawable stroke data
//! - [`CodecLimits`]: depth and work limits for one encode/decode call
//!
//! The model has no I/O and no knowledge of the binary layout.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod brush;
pub mod document;
pub mod error;
pub mod limits;
pub mod types;

pub use brush::{BrushMode, BrushStyle, BrushType};
pub use document::{
    Child, DocumentStats, Frame, Line, PlayableBase, Stage, Symbol, Timeline,
    DEFAULT_DISPLAY_NAME, DEFAULT_OPACITY,
};
pub use error::{LineSequence, ValidationError};
pub use limits::{CodecLimits, DEFAULT_MAX_DEPTH, DEFAULT_MAX_TABLES};
pub use types::{Color, Quaternion, Transform, Vec3};
