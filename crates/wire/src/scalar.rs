//! Little-endian scalar encoding shared by the builder and the reader

use byteorder::{ByteOrder, LittleEndian};

/// A fixed-size primitive stored inline in a table or vector
pub trait Scalar: Copy {
    /// Encoded size in bytes; also the scalar's alignment
    const SIZE: usize;

    /// Write `self` into `dst[..SIZE]`
    fn write_le(self, dst: &mut [u8]);

    /// Read a value from `src[..SIZE]`
    fn read_le(src: &[u8]) -> Self;

    /// Bitwise equality, so `-0.0` and NaN payloads are not folded into a default
    fn same_bits(self, other: Self) -> bool;
}

impl Scalar for u8 {
    const SIZE: usize = 1;

    fn write_le(self, dst: &mut [u8]) {
        dst[0] = self;
    }

    fn read_le(src: &[u8]) -> Self {
        src[0]
    }

    fn same_bits(self, other: Self) -> bool {
        self == other
    }
}

impl Scalar for bool {
    const SIZE: usize = 1;

    fn write_le(self, dst: &mut [u8]) {
        dst[0] = u8::from(self);
    }

    fn read_le(src: &[u8]) -> Self {
        src[0] != 0
    }

    fn same_bits(self, other: Self) -> bool {
        self == other
    }
}

impl Scalar for u16 {
    const SIZE: usize = 2;

    fn write_le(self, dst: &mut [u8]) {
        LittleEndian::write_u16(dst, self);
    }

    fn read_le(src: &[u8]) -> Self {
        LittleEndian::read_u16(src)
    }

    fn same_bits(self, other: Self) -> bool {
        self == other
    }
}

impl Scalar for i32 {
    const SIZE: usize = 4;

    fn write_le(self, dst: &mut [u8]) {
        LittleEndian::write_i32(dst, self);
    }

    fn read_le(src: &[u8]) -> Self {
        LittleEndian::read_i32(src)
    }

    fn same_bits(self, other: Self) -> bool {
        self == other
    }
}

impl Scalar for u32 {
    const SIZE: usize = 4;

    fn write_le(self, dst: &mut [u8]) {
        LittleEndian::write_u32(dst, self);
    }

    fn read_le(src: &[u8]) -> Self {
        LittleEndian::read_u32(src)
    }

    fn same_bits(self, other: Self) -> bool {
        self == other
    }
}

impl Scalar for f32 {
    const SIZE: usize = 4;

    fn write_le(self, dst: &mut [u8]) {
        LittleEndian::write_f32(dst, self);
    }

    fn read_le(src: &[u8]) -> Self {
        LittleEndian::read_f32(src)
    }

    fn same_bits(self, other: Self) -> bool {
        self.to_bits() == other.to_bits()
    }
}
