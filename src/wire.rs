//! Bounds-checked primitive reads over a byte buffer.
//!
//! A [`Cursor`] pairs a borrowed buffer with a read position. Every read
//! checks the remaining length before touching the position, so a failed read
//! never moves the cursor. Reads here are independent of the wire encoding;
//! see [`crate::Decoder`] for those that depend on it (length prefixes,
//! strings and floats).

pub mod compact;
pub mod fixed;
pub mod varint;

use tartan_bitfield::bitfield;

use crate::Error;

bitfield! {
    // One byte of a LEB128 or compact-u16 encoding.
    struct GroupByte(u8) {
        [0..7] payload: u8,
        [7] has_more,
    }
}

/// Byte order of a fixed-width value.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ByteOrder {
    Big,
    #[default]
    Little,
}

/// A byte buffer with a read position.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Create a cursor at the start of a buffer.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// The whole underlying buffer.
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// The current read position.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Move the read position, which may not lie beyond the end of the buffer.
    pub fn set_position(&mut self, position: usize) -> Result<(), Error> {
        if position > self.data.len() {
            Err(Error::PositionOutOfBounds {
                position,
                len: self.data.len(),
            })?;
        }

        self.pos = position;
        Ok(())
    }

    /// The number of unread bytes.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn has_remaining(&self) -> bool {
        self.remaining() > 0
    }

    /// The unread tail of the buffer.
    pub(crate) fn tail(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    /// Fail unless at least `required` bytes remain.
    pub(crate) fn require(&self, required: usize) -> Result<(), Error> {
        let remaining = self.remaining();

        if remaining < required {
            Err(Error::TruncatedInput {
                required,
                remaining,
            })?;
        }

        Ok(())
    }

    /// Borrow the next `n` bytes without consuming them.
    pub fn peek(&self, n: usize) -> Result<&'a [u8], Error> {
        self.require(n)?;
        Ok(&self.data[self.pos..self.pos + n])
    }

    /// Consume `n` bytes without reading them.
    pub fn skip(&mut self, n: usize) -> Result<(), Error> {
        self.require(n)?;
        self.pos += n;
        Ok(())
    }

    /// Borrow and consume the next `n` bytes.
    pub fn read_n_bytes(&mut self, n: usize) -> Result<&'a [u8], Error> {
        let bytes = self.peek(n)?;
        self.pos += n;
        Ok(bytes)
    }

    /// Take an exact number of bytes, advancing the position.
    pub(crate) fn take<const N: usize>(&mut self) -> Result<[u8; N], Error> {
        self.require(N)?;

        let mut buf = [0; N];
        buf.copy_from_slice(&self.data[self.pos..self.pos + N]);
        self.pos += N;

        Ok(buf)
    }

    pub fn read_u8(&mut self) -> Result<u8, Error> {
        Ok(self.take::<1>()?[0])
    }

    pub fn read_i8(&mut self) -> Result<i8, Error> {
        Ok(self.read_u8()? as i8)
    }

    /// Read a single byte as a boolean, where any non-zero value is `true`.
    pub fn read_bool(&mut self) -> Result<bool, Error> {
        Ok(self.read_u8()? != 0)
    }

    /// Read an 8-byte type discriminator, as prefixed to Anchor accounts and
    /// instructions.
    pub fn read_discriminator(&mut self) -> Result<[u8; 8], Error> {
        self.take()
    }

    /// Read a string in the layout Rust's Borsh implementation uses for
    /// foreign programs: an 8-byte little-endian length, regardless of the
    /// active encoding, followed by the bytes verbatim.
    ///
    /// The bytes are returned unvalidated; convert them as the caller sees
    /// fit.
    pub fn read_rust_string(&mut self) -> Result<&'a [u8], Error> {
        let start = self.pos;
        let length = self.read_u64(ByteOrder::Little)?;

        let length = usize::try_from(length).unwrap_or(usize::MAX);
        let bytes = self.read_n_bytes(length).inspect_err(|_| self.pos = start)?;

        tracing::trace!(length, "read rust string");
        Ok(bytes)
    }

    /// Read a compact-u16 length, regardless of the active encoding.
    pub fn read_compact_u16_length(&mut self) -> Result<usize, Error> {
        let (length, consumed) = compact::decode_length(self.tail())?;
        self.pos += consumed;

        tracing::trace!(length, "read compact-u16 length");
        Ok(length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_reads_never_advance_when_truncated() {
        let data = [0x01, 0x02, 0x03];
        let mut cursor = Cursor::new(&data);
        cursor.skip(1).unwrap();

        let err = cursor.read_u32(ByteOrder::Little).unwrap_err();
        assert!(matches!(
            err,
            Error::TruncatedInput {
                required: 4,
                remaining: 2
            }
        ));
        assert_eq!(cursor.position(), 1);

        assert!(cursor.read_u64(ByteOrder::Big).is_err());
        assert!(cursor.read_i64(ByteOrder::Little).is_err());
        assert!(cursor.read_u128(ByteOrder::Little).is_err());
        assert!(cursor.read_discriminator().is_err());
        assert_eq!(cursor.position(), 1);

        assert_eq!(cursor.read_u16(ByteOrder::Big).unwrap(), 0x0203);
        assert!(matches!(
            cursor.read_u8(),
            Err(Error::TruncatedInput {
                required: 1,
                remaining: 0
            })
        ));
        assert_eq!(cursor.position(), 3);
    }

    #[test]
    fn position_introspection() {
        let data = [0xAA, 0xBB, 0xCC];
        let mut cursor = Cursor::new(&data);

        assert_eq!(cursor.peek(2).unwrap(), &[0xAA, 0xBB]);
        assert_eq!(cursor.position(), 0);

        cursor.skip(2).unwrap();
        assert_eq!(cursor.remaining(), 1);
        assert!(cursor.has_remaining());
        assert!(cursor.skip(2).is_err());
        assert_eq!(cursor.position(), 2);

        cursor.set_position(3).unwrap();
        assert!(!cursor.has_remaining());
        assert!(matches!(
            cursor.set_position(4),
            Err(Error::PositionOutOfBounds {
                position: 4,
                len: 3
            })
        ));

        cursor.set_position(0).unwrap();
        assert_eq!(cursor.read_n_bytes(3).unwrap(), &data);
    }

    #[test]
    fn bool_is_any_non_zero_byte() {
        let data = [0x00, 0x01, 0x7F];
        let mut cursor = Cursor::new(&data);

        assert!(!cursor.read_bool().unwrap());
        assert!(cursor.read_bool().unwrap());
        assert!(cursor.read_bool().unwrap());
    }

    #[test]
    fn rust_string_uses_fixed_length_prefix() {
        let mut data = 3u64.to_le_bytes().to_vec();
        data.extend_from_slice(&[b'a', 0xFF, b'c']);
        let mut cursor = Cursor::new(&data);

        assert_eq!(cursor.read_rust_string().unwrap(), &[b'a', 0xFF, b'c']);
        assert!(!cursor.has_remaining());
    }

    #[test]
    fn rust_string_rewinds_when_truncated() {
        let mut data = 5u64.to_le_bytes().to_vec();
        data.extend_from_slice(b"abc");
        let mut cursor = Cursor::new(&data);

        assert!(matches!(
            cursor.read_rust_string(),
            Err(Error::TruncatedInput {
                required: 5,
                remaining: 3
            })
        ));
        assert_eq!(cursor.position(), 0);
    }
}
