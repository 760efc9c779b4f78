//! Fixed-width integer reads.

use zerocopy::FromBytes;

use super::{ByteOrder, Cursor};
use crate::Error;

macro_rules! read_fixed {
    ($name:ident, $t:ty, $(#[$attr:meta])*) => {
        $(#[$attr])*
        pub fn $name(&mut self, order: ByteOrder) -> Result<$t, Error> {
            let r = self.take::<{ size_of::<$t>() }>()?;

            Ok(match order {
                ByteOrder::Little => <$t>::from_le_bytes(r),
                ByteOrder::Big => <$t>::from_be_bytes(r),
            })
        }
    };
}

/// The two halves of a 128-bit value, in the order they appear on the wire.
#[repr(C)]
#[derive(Debug, FromBytes)]
struct Words {
    first: [u8; 8],
    second: [u8; 8],
}

impl Cursor<'_> {
    read_fixed!(read_u16, u16, /** Read a `u16` in the given byte order. */);
    read_fixed!(read_u32, u32, /** Read a `u32` in the given byte order. */);
    read_fixed!(read_u64, u64, /** Read a `u64` in the given byte order. */);

    read_fixed!(read_i16, i16, /** Read an `i16` in the given byte order. */);
    read_fixed!(read_i32, i32, /** Read an `i32` in the given byte order. */);
    read_fixed!(read_i64, i64, /** Read an `i64` in the given byte order. */);

    /// Read a `u128` as two consecutive 64-bit words.
    ///
    /// In little-endian order the first word is the low half; in big-endian
    /// order it is the high half.
    pub fn read_u128(&mut self, order: ByteOrder) -> Result<u128, Error> {
        let Words { first, second } = zerocopy::transmute!(self.take::<16>()?);

        let (lo, hi) = match order {
            ByteOrder::Little => (u64::from_le_bytes(first), u64::from_le_bytes(second)),
            // Unverified against reference vectors for big-endian writers.
            ByteOrder::Big => (u64::from_be_bytes(second), u64::from_be_bytes(first)),
        };

        let value = (u128::from(hi) << 64) | u128::from(lo);
        tracing::trace!(hi, lo, "read u128");

        Ok(value)
    }

    /// Read an `i128` as two consecutive 64-bit words.
    ///
    /// See [`Cursor::read_u128`] for the word order.
    pub fn read_i128(&mut self, order: ByteOrder) -> Result<i128, Error> {
        Ok(self.read_u128(order)? as i128)
    }
}
