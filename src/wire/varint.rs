//! LEB128 variable-length integers.
//!
//! Each byte carries seven payload bits, least significant group first, and
//! a continuation bit. Signed values are zig-zag mapped onto the unsigned
//! form, so small magnitudes of either sign stay short.

use super::{Cursor, GroupByte};
use crate::Error;

/// The longest encoding of a `u64`.
const MAX_LEN: usize = 10;

/// Decode an unsigned varint from the start of a slice.
///
/// Returns the value and the number of bytes consumed, or `None` if the slice
/// ends before the varint does, or the value overflows 64 bits.
pub fn decode_unsigned(r: &[u8]) -> Option<(u64, usize)> {
    let mut value = 0u64;

    for (i, &b) in r.iter().enumerate().take(MAX_LEN) {
        let group = GroupByte(b);
        let payload = u64::from(group.payload());

        if !group.has_more() {
            // The tenth byte may only hold the single remaining bit.
            if i == MAX_LEN - 1 && payload > 1 {
                return None;
            }

            return Some((value | (payload << (7 * i)), i + 1));
        }

        value |= payload << (7 * i);
    }

    None
}

/// Decode a zig-zag signed varint from the start of a slice.
pub fn decode_signed(r: &[u8]) -> Option<(i64, usize)> {
    let (value, len) = decode_unsigned(r)?;
    Some((unzigzag(value), len))
}

fn unzigzag(value: u64) -> i64 {
    ((value >> 1) as i64) ^ -((value & 1) as i64)
}

impl Cursor<'_> {
    /// Read an unsigned LEB128 varint.
    pub fn read_uvarint64(&mut self) -> Result<u64, Error> {
        let (value, len) = decode_unsigned(self.tail()).ok_or(Error::InvalidVarint)?;
        self.skip(len)?;

        tracing::trace!(value, "read uvarint64");
        Ok(value)
    }

    /// Read a signed (zig-zag) LEB128 varint.
    pub fn read_varint64(&mut self) -> Result<i64, Error> {
        let (value, len) = decode_signed(self.tail()).ok_or(Error::InvalidVarint)?;
        self.skip(len)?;

        tracing::trace!(value, "read varint64");
        Ok(value)
    }

    /// Read an unsigned varint, truncated to 32 bits.
    pub fn read_uvarint32(&mut self) -> Result<u32, Error> {
        Ok(self.read_uvarint64()? as u32)
    }

    /// Read a signed varint, truncated to 32 bits.
    pub fn read_varint32(&mut self) -> Result<i32, Error> {
        Ok(self.read_varint64()? as i32)
    }

    /// Read an unsigned varint, truncated to 16 bits.
    pub fn read_uvarint16(&mut self) -> Result<u16, Error> {
        Ok(self.read_uvarint64()? as u16)
    }

    /// Read a signed varint, truncated to 16 bits.
    pub fn read_varint16(&mut self) -> Result<i16, Error> {
        Ok(self.read_varint64()? as i16)
    }
}
