//! Convenient imports for flatanim.
//!
//! This module re-exports the most commonly used types so you can get started
//! with a single import:
//!
//! ```
//! use flatanim::prelude::*;
//!
//! let stage = Stage::new().with_symbol(Symbol::named("layer"));
//! let bytes = encode(&stage)?;
//! assert_eq!(decode(&bytes)?, stage);
//! # Ok::<(), flatanim::Error>(())
//! ```

// Entry points
pub use crate::codec::{Codec, CodecBuilder};
pub use crate::{decode, encode};

// Error handling
pub use crate::error::{Error, Result};

// File helpers
pub use crate::io::{import_symbol, read_stage, write_stage};

// Document model
pub use flatanim_core::{
    BrushMode, BrushStyle, BrushType, Child, CodecLimits, Color, Frame, Line, PlayableBase,
    Quaternion, Stage, Symbol, Timeline, Transform, Vec3,
};
