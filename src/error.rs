//! Errors occurring while decoding.

use thiserror::Error;

/// Errors occurring while decoding from a buffer.
#[derive(Debug, Error)]
pub enum Error {
    /// A read required more bytes than remain in the buffer.
    #[error("Required {required} bytes, but only {remaining} remain.")]
    TruncatedInput { required: usize, remaining: usize },
    /// A LEB128 varint did not terminate within the buffer, or overflowed.
    #[error("Invalid variable-length integer.")]
    InvalidVarint,
    /// A compact-u16 length was malformed.
    #[error("Invalid compact-u16 length: {0}.")]
    CompactU16(#[from] CompactU16Error),
    /// Found a NaN float, which Borsh does not allow.
    #[error("Found NaN, which is not allowed in Borsh floats.")]
    DisallowedNaN,
    /// The destination type has no decoding rule.
    #[error("Unsupported type `{0}`.")]
    UnsupportedType(&'static str),
    /// A record did not hand out a location for one of its fields.
    #[error("Field `{field}` of `{record}` cannot be addressed.")]
    UnaddressableField {
        record: &'static str,
        field: &'static str,
    },
    /// A `sizeof` field did not hold an integer.
    #[error("Field `{field}` of `{record}` is a `sizeof` source but not an integer.")]
    InvalidSizeSource {
        record: &'static str,
        field: &'static str,
    },
    /// The root of a decode cannot receive decoded data.
    #[error("Destination `{0}` cannot receive decoded data.")]
    InvalidDestination(&'static str),
    /// A requested position lies beyond the end of the buffer.
    #[error("Position {position} is beyond the end of the buffer ({len} bytes).")]
    PositionOutOfBounds { position: usize, len: usize },
    /// An error from the supplied reader.
    #[cfg(feature = "std")]
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// An error decoding a compact-u16 length.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CompactU16Error {
    /// A trailing zero byte encodes a value with a shorter form.
    #[error("non-canonical trailing zero byte")]
    Alias,
    /// The third byte has its continuation bit set.
    #[error("third byte continues")]
    ByteThreeContinues,
    /// The value does not fit in a `u16`.
    #[error("value exceeds u16::MAX")]
    Overflow,
}

/// A record declares a regular field after a `binary_extension` field.
///
/// This is a defect in the record's definition rather than in the input, so
/// it is raised as a panic before any bytes are read.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error(
    "TagOrderingViolation: `binary_extension` fields must be packed together at the end of `{record}`, problematic field `{field}`."
)]
pub struct TagOrderingViolation {
    pub record: &'static str,
    pub field: &'static str,
}
