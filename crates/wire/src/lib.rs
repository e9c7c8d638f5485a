//! Binary wire format for flatanim documents
//!
//! This crate converts between an in-memory [`Stage`](flatanim_core::Stage)
//! and a compact table/vtable binary buffer:
//!
//! - [`builder`]: backward-growing buffer builder
//! - [`reader`]: bounds-checked buffer views
//! - [`schema`]: table slots, defaults and inline struct layouts
//! - [`encode`] / [`decode`]: document-level conversion
//!
//! ## Layout
//!
//! | Item | Encoding |
//! |------|----------|
//! | Root | `u32` offset to the Stage table at byte 0 |
//! | Table | `i32` soffset to its vtable (`vtable = table - soffset`), then fields |
//! | Vtable | `u16` vtable length, `u16` table length, one `u16` field offset per slot (0 = absent) |
//! | Offset | `u32` relative to its own position, always pointing forward |
//! | Vector | `u32` count, then packed elements |
//! | String | `u32` byte length, UTF-8 bytes, NUL |
//!
//! All integers and floats are little-endian.
//!
//! ## Examples
//!
//! ```
//! use flatanim_core::{Stage, Symbol, Timeline};
//! use flatanim_wire::{decode, encode};
//!
//! let stage = Stage::new().with_symbol(Symbol::named("layer").with_child(Timeline::named("anim")));
//! let bytes = encode(&stage).unwrap();
//! assert_eq!(decode(&bytes).unwrap(), stage);
//! ```
//!
//! Both directions are pure: no I/O, no logging, no global state.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod builder;
pub mod decode;
pub mod encode;
pub mod error;
pub mod reader;
pub mod scalar;
pub mod schema;

pub use builder::{Builder, Offset, MAX_BUFFER_SIZE};
pub use decode::{decode, decode_with};
pub use encode::{encode, encode_with};
pub use error::{DecodeError, DecodeResult, EncodeError, EncodeResult};
pub use reader::{Buffer, Table, Vector};
pub use scalar::Scalar;
pub use schema::WireStruct;
