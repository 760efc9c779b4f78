//! Per-field tags and the directives built from them.

use crate::ByteOrder;

/// The declared tag of a record field.
///
/// Tags are usually written as `#[bin(...)]` attributes for the
/// [`Decode`](macro@crate::Decode) derive macro, which expands them into this
/// structure. Hand-written records may use [`FieldTag::parse`] instead.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FieldTag {
    /// Never read from the wire.
    pub skip: bool,
    /// May be missing from the end of the buffer.
    pub binary_extension: bool,
    /// Preceded by a presence byte.
    pub optional: bool,
    /// Byte order of fixed-width values.
    pub order: ByteOrder,
    /// The later field whose element count this field holds.
    pub size_of: Option<&'static str>,
}

impl FieldTag {
    /// The tag of a field without annotations.
    pub const DEFAULT: Self = Self {
        skip: false,
        binary_extension: false,
        optional: false,
        order: ByteOrder::Little,
        size_of: None,
    };

    /// Parse a space-separated tag, such as `"optional big"` or
    /// `"sizeof=Items"`.
    ///
    /// Recognised tokens are `-` (or `skip`, or `borsh_skip`), `optional`,
    /// `binary_extension`, `big`, `little` and `sizeof=<field>`. Unknown
    /// tokens are ignored; where `big` and `little` both appear, the last
    /// wins.
    pub fn parse(tag: &'static str) -> Self {
        let mut parsed = Self::DEFAULT;

        for token in tag.split_ascii_whitespace() {
            match token {
                "-" | "skip" | "borsh_skip" => parsed.skip = true,
                "optional" => parsed.optional = true,
                "binary_extension" => parsed.binary_extension = true,
                "big" => parsed.order = ByteOrder::Big,
                "little" => parsed.order = ByteOrder::Little,
                _ => {
                    if let Some(target) = token.strip_prefix("sizeof=") {
                        parsed.size_of = Some(target);
                    }
                }
            }
        }

        parsed
    }
}

/// Instructions for decoding a single value.
///
/// A directive is built for each record field from its [`FieldTag`], and
/// passed unchanged to every element beneath that field.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Directive {
    pub skip: bool,
    pub binary_extension: bool,
    /// Read a presence byte before the value.
    pub optional: bool,
    /// Byte order of fixed-width values.
    pub order: ByteOrder,
    pub size_of: Option<&'static str>,
    /// Element count of a sequence, from an earlier `sizeof` field.
    pub linked_size: Option<usize>,
}

impl Directive {
    /// Build the directive for a field.
    pub fn for_field(tag: &FieldTag, linked_size: Option<usize>) -> Self {
        Self {
            skip: tag.skip,
            binary_extension: tag.binary_extension,
            optional: tag.optional,
            order: tag.order,
            size_of: tag.size_of,
            linked_size,
        }
    }

    /// A directive for an optional value.
    pub fn optional() -> Self {
        Self {
            optional: true,
            ..Self::default()
        }
    }

    /// This directive with another byte order.
    pub fn with_order(self, order: ByteOrder) -> Self {
        Self { order, ..self }
    }

    /// This directive with a known sequence length.
    pub fn with_linked_size(self, linked_size: usize) -> Self {
        Self {
            linked_size: Some(linked_size),
            ..self
        }
    }
}
