//! Compact-u16 lengths, as used by Solana transactions.
//!
//! A length in `0..=u16::MAX` is written in one to three bytes of seven
//! payload bits each, least significant group first. Only the shortest form
//! of a value is accepted.

use super::GroupByte;
use crate::{CompactU16Error, Error};

/// The longest encoding of a compact-u16.
const MAX_LEN: usize = 3;

/// Decode a compact-u16 length from the start of a slice.
///
/// Returns the length and the number of bytes consumed.
pub fn decode_length(r: &[u8]) -> Result<(usize, usize), Error> {
    let mut value = 0usize;

    for i in 0..MAX_LEN {
        let Some(&b) = r.get(i) else {
            Err(Error::TruncatedInput {
                required: i + 1,
                remaining: r.len(),
            })?
        };

        if b == 0 && i != 0 {
            Err(CompactU16Error::Alias)?;
        }

        let group = GroupByte(b);

        if i == MAX_LEN - 1 && group.has_more() {
            Err(CompactU16Error::ByteThreeContinues)?;
        }

        value |= usize::from(group.payload()) << (7 * i);

        if !group.has_more() {
            if value > usize::from(u16::MAX) {
                Err(CompactU16Error::Overflow)?;
            }

            return Ok((value, i + 1));
        }
    }

    Err(CompactU16Error::ByteThreeContinues)?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::Cursor;

    #[test]
    fn reference_vectors() {
        let vectors: [(&[u8], usize); 7] = [
            (&[0x00], 0x0000),
            (&[0x7F], 0x007F),
            (&[0x80, 0x01], 0x0080),
            (&[0xFF, 0x01], 0x00FF),
            (&[0x80, 0x02], 0x0100),
            (&[0xFF, 0xFF, 0x01], 0x7FFF),
            (&[0xFF, 0xFF, 0x03], 0xFFFF),
        ];

        for (bytes, expected) in vectors {
            assert_eq!(decode_length(bytes).unwrap(), (expected, bytes.len()));
        }
    }

    #[test]
    fn rejects_aliases() {
        assert!(matches!(
            decode_length(&[0x80, 0x00]),
            Err(Error::CompactU16(CompactU16Error::Alias))
        ));
        assert!(matches!(
            decode_length(&[0xFF, 0x80, 0x00]),
            Err(Error::CompactU16(CompactU16Error::Alias))
        ));
    }

    #[test]
    fn rejects_long_and_large_values() {
        assert!(matches!(
            decode_length(&[0x80, 0x80, 0x80, 0x01]),
            Err(Error::CompactU16(CompactU16Error::ByteThreeContinues))
        ));
        assert!(matches!(
            decode_length(&[0x80, 0x80, 0x04]),
            Err(Error::CompactU16(CompactU16Error::Overflow))
        ));
    }

    #[test]
    fn truncated_input_leaves_cursor() {
        let data = [0x80];
        let mut cursor = Cursor::new(&data);

        assert!(matches!(
            cursor.read_compact_u16_length(),
            Err(Error::TruncatedInput {
                required: 2,
                remaining: 1
            })
        ));
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn cursor_advances_past_length() {
        let data = [0x80, 0x01, 0xAA];
        let mut cursor = Cursor::new(&data);

        assert_eq!(cursor.read_compact_u16_length().unwrap(), 0x80);
        assert_eq!(cursor.position(), 2);
    }
}
