//! Backward-growing buffer builder
//!
//! The builder writes the buffer from the end towards the front. Data lives
//! in `buf[head..]` and `head` moves down as bytes are added, doubling the
//! allocation when it reaches zero. An [`Offset`] is a position measured from
//! the end of the buffer, so it stays valid when the allocation grows.
//!
//! Because children are written before their parents, a parent's offset
//! fields always point forward (towards the end) in the finished buffer.
//!
//! ```text
//!   finished buffer
//!   ┌──────┬─────────────────────────────┬───────────────────────────┐
//!   │ root │ ... tables written last ... │ ... first-written leaves  │
//!   └──────┴─────────────────────────────┴───────────────────────────┘
//!     0     ◄──────────── head moved this way while building ────────
//! ```
//!
//! Tables: [`start_table`](Builder::start_table), `add_*` per field (fields
//! equal to their default are skipped), then [`end_table`](Builder::end_table)
//! writes the table's back-offset placeholder and its vtable and patches the
//! placeholder. Vectors are written element by element in reverse index order
//! and closed with their element count. Neither strings nor vtables are
//! de-duplicated.

use byteorder::{ByteOrder, LittleEndian};

use crate::error::{EncodeError, EncodeResult};
use crate::scalar::Scalar;
use crate::schema::WireStruct;

/// Largest buffer the builder will produce (offsets are 32-bit, soffsets signed)
pub const MAX_BUFFER_SIZE: usize = i32::MAX as usize;

const MIN_ALLOCATION: usize = 64;
const UOFFSET_SIZE: usize = 4;
const SOFFSET_SIZE: usize = 4;
const VOFFSET_SIZE: usize = 2;

/// Position of a finished object, measured from the end of the buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Offset(u32);

/// A field written into the table under construction
#[derive(Debug, Clone, Copy)]
struct FieldLoc {
    /// Used space right after the field was written
    off: usize,
    slot: u16,
}

/// Backward-growing byte arena for one document
#[derive(Debug)]
pub struct Builder {
    buf: Vec<u8>,
    head: usize,
    max_size: usize,
    min_align: usize,
    field_locs: Vec<FieldLoc>,
    table_start: usize,
    nested: bool,
}

impl Builder {
    /// Create a builder with the default initial allocation
    pub fn new() -> Self {
        Self::with_capacity(1024)
    }

    /// Create a builder with room for `capacity` bytes before the first growth
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.clamp(MIN_ALLOCATION, MAX_BUFFER_SIZE);
        Builder {
            buf: vec![0; capacity],
            head: capacity,
            max_size: MAX_BUFFER_SIZE,
            min_align: 1,
            field_locs: Vec::new(),
            table_start: 0,
            nested: false,
        }
    }

    /// Lower the maximum buffer size
    pub fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = max_size.min(MAX_BUFFER_SIZE);
        self
    }

    /// Bytes written so far
    pub fn used_space(&self) -> usize {
        self.buf.len() - self.head
    }

    // ------------------------------------------------------------------
    // Raw space management
    // ------------------------------------------------------------------

    fn ensure_capacity(&mut self, want: usize) -> EncodeResult<()> {
        if self.head >= want {
            return Ok(());
        }
        let used = self.used_space();
        let required = used
            .checked_add(want)
            .filter(|r| *r <= self.max_size)
            .ok_or(EncodeError::TooLarge {
                what: "buffer",
                size: used.saturating_add(want),
            })?;

        let mut new_len = self.buf.len().max(MIN_ALLOCATION);
        while new_len < required {
            new_len = new_len.saturating_mul(2).min(self.max_size);
        }

        let mut grown = vec![0u8; new_len];
        grown[new_len - used..].copy_from_slice(&self.buf[self.head..]);
        self.head = new_len - used;
        self.buf = grown;
        Ok(())
    }

    /// Reserve `want` bytes at the front and return their start index
    fn make_space(&mut self, want: usize) -> EncodeResult<usize> {
        self.ensure_capacity(want)?;
        self.head -= want;
        Ok(self.head)
    }

    fn track_min_align(&mut self, alignment: usize) {
        self.min_align = self.min_align.max(alignment);
    }

    /// Pad so that after writing `len` more bytes the used space is a
    /// multiple of `alignment`
    fn align(&mut self, len: usize, alignment: usize) -> EncodeResult<()> {
        self.track_min_align(alignment);
        let pad = padding_bytes(self.used_space() + len, alignment);
        let start = self.make_space(pad)?;
        self.buf[start..start + pad].fill(0);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Primitive pushes
    // ------------------------------------------------------------------

    /// Push an aligned scalar
    pub fn push<T: Scalar>(&mut self, value: T) -> EncodeResult<Offset> {
        self.align(T::SIZE, T::SIZE)?;
        let start = self.make_space(T::SIZE)?;
        value.write_le(&mut self.buf[start..start + T::SIZE]);
        Ok(self.current_offset())
    }

    /// Push an inline struct
    pub fn push_struct<S: WireStruct>(&mut self, value: &S) -> EncodeResult<Offset> {
        self.align(S::SIZE, S::ALIGN)?;
        let start = self.make_space(S::SIZE)?;
        value.write_to(&mut self.buf[start..start + S::SIZE]);
        Ok(self.current_offset())
    }

    /// Push a uoffset referring to an object written earlier
    ///
    /// The stored value is relative to the uoffset's own position, so it
    /// always points forward in the finished buffer.
    pub fn push_uoffset(&mut self, target: Offset) -> EncodeResult<Offset> {
        self.align(UOFFSET_SIZE, UOFFSET_SIZE)?;
        let target = target.0 as usize;
        debug_assert!(target <= self.used_space(), "uoffset must refer backwards");
        let rel = self.used_space() + UOFFSET_SIZE - target;
        self.push(rel as u32)
    }

    fn current_offset(&self) -> Offset {
        Offset(self.used_space() as u32)
    }

    // ------------------------------------------------------------------
    // Tables
    // ------------------------------------------------------------------

    /// Begin a table; every child object must already be finished
    pub fn start_table(&mut self) {
        debug_assert!(!self.nested, "start_table while another object is open");
        self.nested = true;
        self.field_locs.clear();
        self.table_start = self.used_space();
    }

    /// Add a scalar field unless it equals `default`
    pub fn add_scalar<T: Scalar>(&mut self, slot: u16, value: T, default: T) -> EncodeResult<()> {
        if value.same_bits(default) {
            return Ok(());
        }
        let off = self.push(value)?;
        self.track_field(slot, off);
        Ok(())
    }

    /// Add an inline struct field unless it encodes identically to `default`
    pub fn add_struct<S: WireStruct>(&mut self, slot: u16, value: &S, default: &S) -> EncodeResult<()> {
        if struct_bytes(value) == struct_bytes(default) {
            return Ok(());
        }
        let off = self.push_struct(value)?;
        self.track_field(slot, off);
        Ok(())
    }

    /// Add a field referring to a finished table, vector or string
    pub fn add_offset(&mut self, slot: u16, target: Offset) -> EncodeResult<()> {
        let off = self.push_uoffset(target)?;
        self.track_field(slot, off);
        Ok(())
    }

    /// Add an offset field only when `target` is present
    pub fn add_optional_offset(&mut self, slot: u16, target: Option<Offset>) -> EncodeResult<()> {
        match target {
            Some(t) => self.add_offset(slot, t),
            None => Ok(()),
        }
    }

    fn track_field(&mut self, slot: u16, off: Offset) {
        self.field_locs.push(FieldLoc {
            off: off.0 as usize,
            slot,
        });
    }

    /// Finish the open table: write its vtable and patch the back-offset
    pub fn end_table(&mut self) -> EncodeResult<Offset> {
        debug_assert!(self.nested, "end_table without start_table");

        // Placeholder for the table's soffset to its vtable.
        let object_offset = self.push(0i32)?.0 as usize;

        let table_size = object_offset - self.table_start;
        if table_size > u16::MAX as usize {
            return Err(EncodeError::TooLarge {
                what: "table",
                size: table_size,
            });
        }

        let num_slots = self
            .field_locs
            .iter()
            .map(|f| f.slot as usize + 1)
            .max()
            .unwrap_or(0);
        let mut vtable = vec![0u16; 2 + num_slots];
        vtable[0] = ((2 + num_slots) * VOFFSET_SIZE) as u16;
        vtable[1] = table_size as u16;
        for loc in &self.field_locs {
            vtable[2 + loc.slot as usize] = (object_offset - loc.off) as u16;
        }

        for entry in vtable.iter().rev() {
            self.push(*entry)?;
        }
        let vtable_offset = self.used_space();

        // The vtable precedes the table, so table - vtable is positive.
        let table_index = self.buf.len() - object_offset;
        LittleEndian::write_i32(
            &mut self.buf[table_index..table_index + SOFFSET_SIZE],
            (vtable_offset - object_offset) as i32,
        );

        self.field_locs.clear();
        self.nested = false;
        Ok(Offset(object_offset as u32))
    }

    // ------------------------------------------------------------------
    // Vectors and strings
    // ------------------------------------------------------------------

    /// Begin a vector of `len` elements of `elem_size` bytes
    ///
    /// Elements must then be pushed in reverse index order, followed by
    /// [`end_vector`](Builder::end_vector).
    pub fn start_vector(&mut self, elem_size: usize, len: usize, alignment: usize) -> EncodeResult<()> {
        debug_assert!(!self.nested, "start_vector while another object is open");
        self.nested = true;
        let bytes = elem_size.checked_mul(len).ok_or(EncodeError::TooLarge {
            what: "vector",
            size: usize::MAX,
        })?;
        self.align(bytes, UOFFSET_SIZE)?;
        self.align(bytes, alignment)
    }

    /// Close a vector by writing its element count
    pub fn end_vector(&mut self, len: usize) -> EncodeResult<Offset> {
        debug_assert!(self.nested, "end_vector without start_vector");
        self.nested = false;
        let count = u32::try_from(len).map_err(|_| EncodeError::TooLarge {
            what: "vector",
            size: len,
        })?;
        self.push(count)
    }

    /// Write a vector of scalars
    pub fn create_scalar_vector<T: Scalar>(&mut self, items: &[T]) -> EncodeResult<Offset> {
        self.start_vector(T::SIZE, items.len(), T::SIZE)?;
        for item in items.iter().rev() {
            self.push(*item)?;
        }
        self.end_vector(items.len())
    }

    /// Write a vector of inline structs
    pub fn create_struct_vector<S: WireStruct>(&mut self, items: &[S]) -> EncodeResult<Offset> {
        self.start_vector(S::SIZE, items.len(), S::ALIGN)?;
        for item in items.iter().rev() {
            self.push_struct(item)?;
        }
        self.end_vector(items.len())
    }

    /// Write a vector of offsets to finished tables
    pub fn create_offset_vector(&mut self, items: &[Offset]) -> EncodeResult<Offset> {
        self.start_vector(UOFFSET_SIZE, items.len(), UOFFSET_SIZE)?;
        for item in items.iter().rev() {
            self.push_uoffset(*item)?;
        }
        self.end_vector(items.len())
    }

    /// Write a length-prefixed, NUL-terminated UTF-8 string
    pub fn create_string(&mut self, s: &str) -> EncodeResult<Offset> {
        debug_assert!(!self.nested, "create_string while another object is open");
        if u32::try_from(s.len()).is_err() {
            return Err(EncodeError::TooLarge {
                what: "string",
                size: s.len(),
            });
        }
        self.align(s.len() + 1, UOFFSET_SIZE)?;
        self.push(0u8)?;
        let start = self.make_space(s.len())?;
        self.buf[start..start + s.len()].copy_from_slice(s.as_bytes());
        self.push(s.len() as u32)
    }

    // ------------------------------------------------------------------
    // Finishing
    // ------------------------------------------------------------------

    /// Write the 4-byte root offset header and return the finished bytes
    pub fn finish(mut self, root: Offset) -> EncodeResult<Vec<u8>> {
        debug_assert!(!self.nested, "finish while an object is open");
        let min_align = self.min_align;
        self.align(UOFFSET_SIZE, min_align)?;
        self.push_uoffset(root)?;
        self.buf.drain(..self.head);
        Ok(self.buf)
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

fn padding_bytes(buf_size: usize, alignment: usize) -> usize {
    (!buf_size).wrapping_add(1) & (alignment - 1)
}

fn struct_bytes<S: WireStruct>(value: &S) -> Vec<u8> {
    let mut bytes = vec![0u8; S::SIZE];
    value.write_to(&mut bytes);
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;
    use flatanim_core::Vec3;

    fn read_u32(buf: &[u8], at: usize) -> u32 {
        LittleEndian::read_u32(&buf[at..at + 4])
    }

    #[test]
    fn test_padding_bytes() {
        assert_eq!(padding_bytes(0, 4), 0);
        assert_eq!(padding_bytes(1, 4), 3);
        assert_eq!(padding_bytes(6, 4), 2);
        assert_eq!(padding_bytes(7, 1), 0);
    }

    #[test]
    fn test_scalar_vector_reverse_written_forward_read() {
        let mut b = Builder::new();
        let v = b.create_scalar_vector(&[10u32, 20, 30]).unwrap();
        let bytes = b.finish(v).unwrap();

        let pos = read_u32(&bytes, 0) as usize;
        assert_eq!(read_u32(&bytes, pos), 3);
        assert_eq!(read_u32(&bytes, pos + 4), 10);
        assert_eq!(read_u32(&bytes, pos + 8), 20);
        assert_eq!(read_u32(&bytes, pos + 12), 30);
    }

    #[test]
    fn test_string_layout() {
        let mut b = Builder::new();
        let s = b.create_string("abc").unwrap();
        let bytes = b.finish(s).unwrap();

        let pos = read_u32(&bytes, 0) as usize;
        assert_eq!(read_u32(&bytes, pos), 3);
        assert_eq!(&bytes[pos + 4..pos + 7], b"abc");
        assert_eq!(bytes[pos + 7], 0);
    }

    #[test]
    fn test_table_vtable_and_default_omission() {
        let mut b = Builder::new();
        b.start_table();
        b.add_scalar(0, 5u32, 0).unwrap();
        b.add_scalar(1, 1.0f32, 1.0).unwrap(); // default, omitted
        b.add_scalar(2, true, false).unwrap();
        let t = b.end_table().unwrap();
        let bytes = b.finish(t).unwrap();

        let table = read_u32(&bytes, 0) as usize;
        let soffset = LittleEndian::read_i32(&bytes[table..table + 4]);
        let vtable = (table as i64 - soffset as i64) as usize;
        let vt_len = LittleEndian::read_u16(&bytes[vtable..vtable + 2]);
        assert_eq!(vt_len, 4 + 3 * 2);

        let slot0 = LittleEndian::read_u16(&bytes[vtable + 4..vtable + 6]) as usize;
        let slot1 = LittleEndian::read_u16(&bytes[vtable + 6..vtable + 8]);
        let slot2 = LittleEndian::read_u16(&bytes[vtable + 8..vtable + 10]) as usize;
        assert_eq!(read_u32(&bytes, table + slot0), 5);
        assert_eq!(slot1, 0);
        assert_eq!(bytes[table + slot2], 1);
    }

    #[test]
    fn test_empty_table_has_minimal_vtable() {
        let mut b = Builder::new();
        b.start_table();
        let t = b.end_table().unwrap();
        let bytes = b.finish(t).unwrap();

        let table = read_u32(&bytes, 0) as usize;
        let soffset = LittleEndian::read_i32(&bytes[table..table + 4]);
        assert_eq!(soffset, 4);
        let vtable = table - 4;
        assert_eq!(LittleEndian::read_u16(&bytes[vtable..vtable + 2]), 4);
        assert_eq!(LittleEndian::read_u16(&bytes[vtable + 2..vtable + 4]), 4);
    }

    #[test]
    fn test_offsets_survive_growth() {
        let mut b = Builder::with_capacity(0);
        let first = b.create_string("first").unwrap();
        let filler: Vec<Vec3> = (0..500).map(|i| Vec3::new(i as f32, 0.0, 0.0)).collect();
        b.create_struct_vector(&filler).unwrap();
        let v = b.create_offset_vector(&[first]).unwrap();
        let bytes = b.finish(v).unwrap();

        let vec_pos = read_u32(&bytes, 0) as usize;
        assert_eq!(read_u32(&bytes, vec_pos), 1);
        let elem = vec_pos + 4;
        let s = elem + read_u32(&bytes, elem) as usize;
        assert_eq!(read_u32(&bytes, s), 5);
        assert_eq!(&bytes[s + 4..s + 9], b"first");
    }

    #[test]
    fn test_finished_length_is_aligned() {
        let mut b = Builder::new();
        let s = b.create_string("odd").unwrap();
        let bytes = b.finish(s).unwrap();
        assert_eq!(bytes.len() % 4, 0);
    }

    #[test]
    fn test_max_size_enforced() {
        let mut b = Builder::with_capacity(64).with_max_size(128);
        let err = b.create_string(&"x".repeat(200)).unwrap_err();
        assert!(matches!(err, EncodeError::TooLarge { what: "buffer", .. }));
    }
}
