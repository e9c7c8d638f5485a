//! # flatanim
//!
//! Binary scene-graph codec for layered stroke animation documents.
//!
//! A document is a tree: a [`Stage`] holds [`Symbol`]s, symbols nest other
//! symbols and [`Timeline`]s, timelines hold [`Frame`]s and frames hold
//! [`Line`] strokes. flatanim converts that tree to and from a compact
//! table/vtable binary buffer.
//!
//! ## Quick Start
//!
//! ```
//! use flatanim::prelude::*;
//!
//! let mut line = Line::default();
//! line.push_sample(
//!     Vec3::new(0.0, 1.0, 0.0),
//!     0.01,
//!     Color::WHITE,
//!     1.0,
//!     Quaternion::IDENTITY,
//!     Quaternion::IDENTITY,
//! );
//!
//! let stage = Stage::new().with_symbol(
//!     Symbol::named("character")
//!         .with_child(Timeline::named("walk").with_frame(Frame::default().with_line(line))),
//! );
//!
//! let bytes = encode(&stage)?;
//! assert_eq!(decode(&bytes)?, stage);
//! # Ok::<(), flatanim::Error>(())
//! ```
//!
//! ## Errors
//!
//! Every failure is an [`Error`]:
//!
//! - [`Error::MalformedDocument`]: the bytes are not a well-formed document
//! - [`Error::InvalidDocument`]: the tree breaks an invariant (for example a
//!   [`Line`] whose per-sample vectors differ in length)
//! - [`Error::Io`] / [`Error::Json`]: file and JSON helpers
//!
//! ## Limits
//!
//! Use [`Codec::builder`] to change the nesting depth limit, the decode
//! table budget or the parallel-vector policy.

#![warn(missing_docs)]

mod codec;
mod error;

pub mod io;
pub mod prelude;

pub use codec::{Codec, CodecBuilder};
pub use error::{Error, Result};

// Re-export the document model
pub use flatanim_core::{
    BrushMode, BrushStyle, BrushType, Child, CodecLimits, Color, DocumentStats, Frame, Line,
    LineSequence, PlayableBase, Quaternion, Stage, Symbol, Timeline, Transform, ValidationError,
    Vec3, DEFAULT_DISPLAY_NAME, DEFAULT_MAX_DEPTH, DEFAULT_MAX_TABLES, DEFAULT_OPACITY,
};
pub use flatanim_wire::{schema, DecodeError, EncodeError};

/// Decode a buffer with default limits.
pub fn decode(bytes: &[u8]) -> Result<Stage> {
    Ok(flatanim_wire::decode(bytes)?)
}

/// Encode a document with default limits.
pub fn encode(stage: &Stage) -> Result<Vec<u8>> {
    Ok(flatanim_wire::encode(stage)?)
}
