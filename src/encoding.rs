//! The supported wire encodings, and the reads that differ between them.

use core::fmt;

use alloc::string::String;

use crate::{Decoder, Error};

/// A wire encoding, fixed for the lifetime of a [`Decoder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// Native format, with LEB128 length prefixes.
    Bin,
    /// Borsh, with 4-byte little-endian length prefixes and no NaN floats.
    Borsh,
    /// Solana's compact-u16 length prefixes.
    CompactU16,
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Encoding::Bin => "Bin",
            Encoding::Borsh => "Borsh",
            Encoding::CompactU16 => "CompactU16",
        })
    }
}

impl<'a> Decoder<'a> {
    /// Read the length prefix of a byte slice or string, in the shape the
    /// active encoding uses.
    ///
    /// Dynamic sequences of other types do not use this prefix; see
    /// [`Shape::Sequence`](crate::Shape::Sequence).
    pub fn read_length(&mut self) -> Result<usize, Error> {
        let length = match self.encoding() {
            Encoding::Bin => usize::try_from(self.read_uvarint64()?).unwrap_or(usize::MAX),
            Encoding::Borsh => self.read_u32(crate::ByteOrder::Little)? as usize,
            Encoding::CompactU16 => self.read_compact_u16_length()?,
        };

        Ok(length)
    }

    /// Read a length-prefixed byte slice.
    ///
    /// Fails without consuming the length prefix if the bytes are
    /// unavailable.
    pub fn read_byte_slice(&mut self) -> Result<&'a [u8], Error> {
        let start = self.position();
        let length = self.read_length()?;

        let bytes = match self.read_n_bytes(length) {
            Ok(bytes) => bytes,
            Err(err) => {
                self.set_position(start)?;
                Err(err)?
            }
        };

        tracing::trace!(length, "read byte slice");
        Ok(bytes)
    }

    /// Read a length-prefixed string, replacing invalid UTF-8 sequences with
    /// `U+FFFD`.
    pub fn read_string(&mut self) -> Result<String, Error> {
        let bytes = self.read_byte_slice()?;
        let string = String::from_utf8_lossy(bytes).into_owned();

        tracing::trace!(value = %string, "read string");
        Ok(string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_prefix_follows_encoding() {
        let mut bin = Decoder::bin(&[0x05, 1, 2, 3, 4, 5]);
        let mut borsh = Decoder::borsh(&[0x05, 0x00, 0x00, 0x00, 1, 2, 3, 4, 5]);
        let mut compact = Decoder::compact_u16(&[0x05, 1, 2, 3, 4, 5]);

        assert_eq!(bin.read_byte_slice().unwrap(), &[1, 2, 3, 4, 5]);
        assert_eq!(borsh.read_byte_slice().unwrap(), &[1, 2, 3, 4, 5]);
        assert_eq!(compact.read_byte_slice().unwrap(), &[1, 2, 3, 4, 5]);

        assert_eq!(bin.position(), 6);
        assert_eq!(borsh.position(), 9);
        assert_eq!(compact.position(), 6);
    }

    #[test]
    fn compact_u16_length_spans_bytes() {
        let mut data = [0xAB; 130];
        data[0] = 0x80;
        data[1] = 0x01;

        let mut decoder = Decoder::compact_u16(&data);
        assert_eq!(decoder.read_length().unwrap(), 128);
        assert_eq!(decoder.position(), 2);

        decoder.set_position(0).unwrap();
        assert_eq!(decoder.read_byte_slice().unwrap(), &data[2..]);
        assert!(!decoder.has_remaining());
    }

    #[test]
    fn truncated_slice_leaves_cursor() {
        let mut decoder = Decoder::bin(&[0x04, 1, 2]);

        assert!(matches!(
            decoder.read_byte_slice(),
            Err(Error::TruncatedInput {
                required: 4,
                remaining: 2
            })
        ));
        assert_eq!(decoder.position(), 0);
    }

    #[test]
    fn string_replaces_invalid_utf8() {
        let mut decoder = Decoder::bin(&[0x04, b'o', b'k', 0xFF, b'!']);
        assert_eq!(decoder.read_string().unwrap(), "ok\u{FFFD}!");

        let mut decoder = Decoder::borsh(&[0x02, 0x00, 0x00, 0x00, b'h', b'i']);
        assert_eq!(decoder.read_string().unwrap(), "hi");
    }
}
