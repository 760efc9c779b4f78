//! Decoding sessions.

use core::ops::{Deref, DerefMut};

use crate::{
    ByteOrder, Category, Decode, Directive, Encoding, Error, decode::engine, wire::Cursor,
};

/// A decoding session over a buffer, in a single wire encoding.
///
/// The session owns the read position; independent buffers should be
/// decoded by independent sessions. All of [`Cursor`]'s encoding-independent
/// reads are available through dereferencing.
#[derive(Debug, Clone)]
pub struct Decoder<'a> {
    cursor: Cursor<'a>,
    encoding: Encoding,
}

impl<'a> Decoder<'a> {
    /// Create a session over a buffer in the given encoding.
    pub fn new(data: &'a [u8], encoding: Encoding) -> Self {
        Self {
            cursor: Cursor::new(data),
            encoding,
        }
    }

    /// Create a session over a buffer in the Bin encoding.
    pub fn bin(data: &'a [u8]) -> Self {
        Self::new(data, Encoding::Bin)
    }

    /// Create a session over a buffer in the Borsh encoding.
    pub fn borsh(data: &'a [u8]) -> Self {
        Self::new(data, Encoding::Borsh)
    }

    /// Create a session over a buffer in the compact-u16 encoding.
    pub fn compact_u16(data: &'a [u8]) -> Self {
        Self::new(data, Encoding::CompactU16)
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    pub fn is_bin(&self) -> bool {
        self.encoding == Encoding::Bin
    }

    pub fn is_borsh(&self) -> bool {
        self.encoding == Encoding::Borsh
    }

    pub fn is_compact_u16(&self) -> bool {
        self.encoding == Encoding::CompactU16
    }

    /// Decode a value into a destination.
    ///
    /// The destination's current contents are overwritten as the value is
    /// decoded. On failure the destination may be partially written.
    pub fn decode<T: Decode>(&mut self, dest: &mut T) -> Result<(), Error> {
        if T::CATEGORY == Category::Opaque {
            Err(Error::InvalidDestination(core::any::type_name::<T>()))?;
        }

        engine::decode_slot(self, dest, &Directive::default())
    }

    /// Decode a value into a destination, following an explicit directive.
    ///
    /// Custom decoders use this to decode their contents with the same
    /// machinery as derived records.
    pub fn decode_with<T: Decode>(
        &mut self,
        dest: &mut T,
        directive: &Directive,
    ) -> Result<(), Error> {
        engine::decode_slot(self, dest, directive)
    }

    /// Read an `f32`, rejecting NaN under Borsh.
    pub fn read_f32(&mut self, order: ByteOrder) -> Result<f32, Error> {
        let value = f32::from_bits(self.read_u32(order)?);

        if self.is_borsh() && value.is_nan() {
            Err(Error::DisallowedNaN)?;
        }

        Ok(value)
    }

    /// Read an `f64`, rejecting NaN under Borsh.
    pub fn read_f64(&mut self, order: ByteOrder) -> Result<f64, Error> {
        let value = f64::from_bits(self.read_u64(order)?);

        if self.is_borsh() && value.is_nan() {
            Err(Error::DisallowedNaN)?;
        }

        Ok(value)
    }
}

impl<'a> Deref for Decoder<'a> {
    type Target = Cursor<'a>;

    fn deref(&self) -> &Self::Target {
        &self.cursor
    }
}

impl DerefMut for Decoder<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.cursor
    }
}

/// Decode a value from a slice in the given encoding.
///
/// Trailing bytes after the value are ignored.
pub fn decode_slice<T: Decode>(r: &[u8], encoding: Encoding) -> Result<T, Error> {
    let mut value = T::zeroed();
    Decoder::new(r, encoding).decode(&mut value)?;
    Ok(value)
}

/// Decode a value from a reader in the given encoding.
///
/// The reader is read to its end before decoding begins.
///
/// _Requires Cargo feature `std`._
#[cfg(feature = "std")]
pub fn decode_reader<T: Decode>(
    r: &mut impl std::io::Read,
    encoding: Encoding,
) -> Result<T, Error> {
    let mut buf = std::vec::Vec::new();
    r.read_to_end(&mut buf)?;
    decode_slice(&buf, encoding)
}
