//! Bounds-checked views over an encoded buffer
//!
//! Every access validates offsets and lengths against the buffer before
//! touching bytes, so a hostile or truncated buffer yields a
//! [`DecodeError`] and never a panic. Views borrow the buffer; nothing is
//! copied until a value is materialized.

use crate::error::{DecodeError, DecodeResult};
use crate::scalar::Scalar;
use crate::schema::WireStruct;

const UOFFSET_SIZE: usize = 4;

/// A borrowed encoded buffer
#[derive(Debug, Clone, Copy)]
pub struct Buffer<'a> {
    data: &'a [u8],
}

impl<'a> Buffer<'a> {
    /// Wrap raw bytes
    pub fn new(data: &'a [u8]) -> Self {
        Buffer { data }
    }

    /// Buffer length in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true when the buffer is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Borrow `needed` bytes starting at `offset`
    pub fn slice(&self, offset: usize, needed: usize) -> DecodeResult<&'a [u8]> {
        let end = offset.checked_add(needed).ok_or(DecodeError::Truncated {
            offset,
            needed,
            len: self.data.len(),
        })?;
        self.data.get(offset..end).ok_or(DecodeError::Truncated {
            offset,
            needed,
            len: self.data.len(),
        })
    }

    /// Read a little-endian scalar at `offset`
    pub fn read<T: Scalar>(&self, offset: usize) -> DecodeResult<T> {
        self.slice(offset, T::SIZE).map(T::read_le)
    }

    /// Follow the uoffset stored at `at` to the position it names
    pub fn follow(&self, at: usize) -> DecodeResult<usize> {
        let rel = self.read::<u32>(at)? as usize;
        let target = at.checked_add(rel).ok_or(DecodeError::OffsetOutOfBounds {
            offset: usize::MAX,
            len: self.data.len(),
        })?;
        if target >= self.data.len() {
            return Err(DecodeError::OffsetOutOfBounds {
                offset: target,
                len: self.data.len(),
            });
        }
        Ok(target)
    }

    /// The root table named by the 4-byte header
    pub fn root_table(&self) -> DecodeResult<Table<'a>> {
        let pos = self.follow(0)?;
        Table::at(*self, pos)
    }
}

/// A view over one table
#[derive(Debug, Clone, Copy)]
pub struct Table<'a> {
    buf: Buffer<'a>,
    pos: usize,
    vtable: usize,
    vtable_len: usize,
    table_len: usize,
}

impl<'a> Table<'a> {
    /// Validate the table at `pos` and its vtable
    pub fn at(buf: Buffer<'a>, pos: usize) -> DecodeResult<Self> {
        let soffset = buf.read::<i32>(pos)? as i64;
        let vtable = pos as i64 - soffset;
        if vtable < 0 || vtable as u64 >= buf.len() as u64 {
            return Err(DecodeError::InvalidVTable {
                table: pos,
                reason: "vtable offset outside buffer",
            });
        }
        let vtable = vtable as usize;

        let vtable_len = buf.read::<u16>(vtable)? as usize;
        if vtable_len < 4 || vtable_len % 2 != 0 {
            return Err(DecodeError::InvalidVTable {
                table: pos,
                reason: "bad vtable length",
            });
        }
        buf.slice(vtable, vtable_len)
            .map_err(|_| DecodeError::InvalidVTable {
                table: pos,
                reason: "vtable extends past buffer end",
            })?;

        let table_len = buf.read::<u16>(vtable + 2)? as usize;
        if table_len < 4 {
            return Err(DecodeError::InvalidVTable {
                table: pos,
                reason: "table shorter than its header",
            });
        }
        buf.slice(pos, table_len)
            .map_err(|_| DecodeError::InvalidVTable {
                table: pos,
                reason: "table extends past buffer end",
            })?;

        Ok(Table {
            buf,
            pos,
            vtable,
            vtable_len,
            table_len,
        })
    }

    /// Position of the table in the buffer
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Number of slots the vtable describes
    pub fn slot_count(&self) -> usize {
        (self.vtable_len - 4) / 2
    }

    /// Absolute position of a present field that is `size` bytes wide
    ///
    /// Returns `None` for a slot beyond the vtable or with a zero entry.
    fn field_pos(&self, slot: u16, size: usize) -> DecodeResult<Option<usize>> {
        let entry = 4 + slot as usize * 2;
        if entry + 2 > self.vtable_len {
            return Ok(None);
        }
        let rel = self.buf.read::<u16>(self.vtable + entry)? as usize;
        if rel == 0 {
            return Ok(None);
        }
        if rel < 4 || rel + size > self.table_len {
            return Err(DecodeError::InvalidVTable {
                table: self.pos,
                reason: "field outside table",
            });
        }
        Ok(Some(self.pos + rel))
    }

    /// Returns true when the slot has a value in this table
    pub fn has_field(&self, slot: u16) -> DecodeResult<bool> {
        Ok(self.field_pos(slot, 0)?.is_some())
    }

    /// Position an offset field points at, without reading the target
    pub fn target(&self, slot: u16) -> DecodeResult<Option<usize>> {
        match self.field_pos(slot, UOFFSET_SIZE)? {
            Some(at) => self.buf.follow(at).map(Some),
            None => Ok(None),
        }
    }

    /// Read a scalar field, or `default` when absent
    pub fn scalar<T: Scalar>(&self, slot: u16, default: T) -> DecodeResult<T> {
        match self.field_pos(slot, T::SIZE)? {
            Some(at) => self.buf.read(at),
            None => Ok(default),
        }
    }

    /// Read an inline struct field
    pub fn wire_struct<S: WireStruct>(&self, slot: u16) -> DecodeResult<Option<S>> {
        match self.field_pos(slot, S::SIZE)? {
            Some(at) => Ok(Some(S::read_from(self.buf.slice(at, S::SIZE)?))),
            None => Ok(None),
        }
    }

    /// Follow a sub-table field
    pub fn table(&self, slot: u16) -> DecodeResult<Option<Table<'a>>> {
        match self.field_pos(slot, UOFFSET_SIZE)? {
            Some(at) => {
                let target = self.buf.follow(at)?;
                Table::at(self.buf, target).map(Some)
            }
            None => Ok(None),
        }
    }

    /// Read a string field
    pub fn string(&self, slot: u16) -> DecodeResult<Option<&'a str>> {
        match self.field_pos(slot, UOFFSET_SIZE)? {
            Some(at) => {
                let target = self.buf.follow(at)?;
                let len = self.buf.read::<u32>(target)? as usize;
                let bytes = self.buf.slice(target + UOFFSET_SIZE, len)?;
                std::str::from_utf8(bytes)
                    .map(Some)
                    .map_err(|_| DecodeError::InvalidUtf8 { offset: target })
            }
            None => Ok(None),
        }
    }

    /// Follow a vector field whose elements are `elem_size` bytes
    pub fn vector(&self, slot: u16, elem_size: usize) -> DecodeResult<Option<Vector<'a>>> {
        match self.field_pos(slot, UOFFSET_SIZE)? {
            Some(at) => {
                let target = self.buf.follow(at)?;
                Vector::at(self.buf, target, elem_size).map(Some)
            }
            None => Ok(None),
        }
    }
}

/// A view over one vector
#[derive(Debug, Clone, Copy)]
pub struct Vector<'a> {
    buf: Buffer<'a>,
    start: usize,
    len: usize,
    elem_size: usize,
}

impl<'a> Vector<'a> {
    /// Validate the vector at `pos`: its count and every element must fit
    pub fn at(buf: Buffer<'a>, pos: usize, elem_size: usize) -> DecodeResult<Self> {
        let len = buf.read::<u32>(pos)? as usize;
        let bytes = len.checked_mul(elem_size).ok_or(DecodeError::LengthOverflow {
            count: len,
            elem_size,
        })?;
        let start = pos + UOFFSET_SIZE;
        buf.slice(start, bytes)?;
        Ok(Vector {
            buf,
            start,
            len,
            elem_size,
        })
    }

    /// Position of the vector's length prefix
    pub fn position(&self) -> usize {
        self.start - UOFFSET_SIZE
    }

    /// Element count
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true when the vector has no elements
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn elem_pos(&self, index: usize) -> usize {
        self.start + index * self.elem_size
    }

    /// Read a scalar element
    pub fn scalar<T: Scalar>(&self, index: usize) -> DecodeResult<T> {
        self.buf.read(self.elem_pos(index))
    }

    /// Read a struct element
    pub fn wire_struct<S: WireStruct>(&self, index: usize) -> DecodeResult<S> {
        self.buf.slice(self.elem_pos(index), S::SIZE).map(S::read_from)
    }

    /// Follow a table element
    pub fn table(&self, index: usize) -> DecodeResult<Table<'a>> {
        let target = self.buf.follow(self.elem_pos(index))?;
        Table::at(self.buf, target)
    }

    /// Read the first `count` scalar elements
    pub fn scalars<T: Scalar>(&self, count: usize) -> DecodeResult<Vec<T>> {
        (0..count.min(self.len)).map(|i| self.scalar(i)).collect()
    }

    /// Read the first `count` struct elements
    pub fn wire_structs<S: WireStruct>(&self, count: usize) -> DecodeResult<Vec<S>> {
        (0..count.min(self.len)).map(|i| self.wire_struct(i)).collect()
    }
}
