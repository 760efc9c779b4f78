//! Type-driven decoding.
//!
//! Every decodable type publishes its structural [`Shape`] through the
//! [`Decode`] trait. A single recursive engine walks these shapes: it unwraps
//! indirections ([`Option`] and [`Box`]), hands types implementing
//! [`CustomDecode`] their own session, reads scalars directly, and re-enters
//! itself for every array element, sequence element and record field.
//!
//! Records are usually described with the [`Decode`](macro@Decode) derive
//! macro, which produces a table of [`FieldDescriptor`]s from `#[bin(...)]`
//! attributes.
//!
//! # Example
//!
//! ```
//! #[derive(Debug, Decode)]
//! struct Transfer {
//!     #[bin(sizeof = memo)]
//!     memo_len: u32,
//!     memo: Vec<u8>,
//!     #[bin(big)]
//!     amount: u64,
//!     #[bin(optional)]
//!     fee: Option<u64>,
//!     #[bin(binary_extension)]
//!     nonce: u32,
//! }
//!
//! let transfer: Transfer = wirebin::decode_slice(&bytes, Encoding::Bin)?;
//! ```

pub(crate) mod engine;
pub(crate) mod resolve;

mod directive;
mod impls;
mod record;

use alloc::string::String;

pub use directive::{Directive, FieldTag};
pub use record::{FieldDescriptor, Record};

use crate::{Decoder, Error};

/// Derive [`Decode`] for a struct, decoding its fields in declaration order.
///
/// _Requires Cargo feature `derive`._
///
/// Each field type must implement [`Decode`], except for those marked
/// `skip`, which must implement [`Default`]. Fields accept a `#[bin(...)]`
/// attribute holding any of:
///
/// - `skip`: never read from the wire.
/// - `optional`: preceded by a presence byte; `0` leaves the zero value.
/// - `big` or `little`: byte order of fixed-width values (default little).
/// - `sizeof = field`: this integer field holds the element count of the
///   named, later sequence field.
/// - `binary_extension`: may be missing from the end of older buffers. Such
///   fields must come last.
///
/// ```
/// #[derive(Debug, Decode)]
/// struct Header {
///     version: u8,
///     #[bin(sizeof = keys)]
///     key_count: u8,
///     keys: Vec<[u8; 32]>,
///     #[bin(skip)]
///     cache: Option<Summary>,
/// }
/// ```
#[cfg(feature = "derive")]
pub use wirebin_derive::Decode;

/// The structural category of a decodable type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Bool,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    String,
    /// A value with no structure of its own, which consumes no bytes.
    Opaque,
    /// A fixed number of elements.
    Array,
    /// A variable number of elements.
    Sequence,
    Record,
    /// A wrapper around a value, allocated on demand.
    Indirect,
    /// A type decoding itself through [`CustomDecode`].
    Custom,
    /// A type with no decoding rule.
    Unsupported,
}

/// A mutable view of a value, by structural category.
pub enum Shape<'a> {
    Bool(&'a mut bool),
    I8(&'a mut i8),
    I16(&'a mut i16),
    I32(&'a mut i32),
    I64(&'a mut i64),
    U8(&'a mut u8),
    U16(&'a mut u16),
    U32(&'a mut u32),
    U64(&'a mut u64),
    F32(&'a mut f32),
    F64(&'a mut f64),
    String(&'a mut String),
    Opaque,
    Array(&'a mut dyn Elements),
    /// A sequence, whose length is an unsigned LEB128 varint in every
    /// encoding unless supplied by a `sizeof` field.
    Sequence(&'a mut dyn Sequence),
    Record(&'a mut dyn Record),
    Indirect(&'a mut dyn Indirection),
    Custom(&'a mut dyn CustomDecode),
    Unsupported,
}

/// Types decodable by the engine.
///
/// Implementations exist for the primitive integers and floats, `bool`,
/// [`String`], arrays, [`Vec`](alloc::vec::Vec), [`Option`],
/// [`Box`](alloc::boxed::Box), `u128` and `i128`. Records derive this trait;
/// types with their own wire layout implement it with [`Category::Custom`].
pub trait Decode {
    /// The structural category, which must agree with [`Decode::shape`].
    const CATEGORY: Category;

    /// The category of the wrapped type, for indirections.
    const INNER_CATEGORY: Option<Category> = None;

    /// View this value by its structural category.
    fn shape(&mut self) -> Shape<'_>;

    /// The zero value, which absent optional and extension fields keep.
    fn zeroed() -> Self
    where
        Self: Sized;

    /// This value as an element count, if it is an integer.
    fn as_size(&self) -> Option<usize> {
        None
    }
}

/// A location the engine can decode into.
///
/// This is the object-safe face of [`Decode`], implemented for every
/// decodable type.
pub trait Slot {
    fn category(&self) -> Category;
    fn inner_category(&self) -> Option<Category>;
    fn type_name(&self) -> &'static str;
    fn view(&mut self) -> Shape<'_>;
    /// Overwrite this location with its zero value.
    fn reset(&mut self);
    fn linked_size(&self) -> Option<usize>;
}

impl<T: Decode> Slot for T {
    fn category(&self) -> Category {
        T::CATEGORY
    }

    fn inner_category(&self) -> Option<Category> {
        T::INNER_CATEGORY
    }

    fn type_name(&self) -> &'static str {
        core::any::type_name::<T>()
    }

    fn view(&mut self) -> Shape<'_> {
        Decode::shape(self)
    }

    fn reset(&mut self) {
        *self = T::zeroed();
    }

    fn linked_size(&self) -> Option<usize> {
        Decode::as_size(self)
    }
}

/// A fixed number of elements.
pub trait Elements {
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// The element at an index less than [`Elements::len`].
    fn element(&mut self, index: usize) -> &mut dyn Slot;
}

/// A growable sequence of elements.
pub trait Sequence {
    /// The structural category of the elements.
    fn element_category(&self) -> Category;
    /// Remove all elements, reserving room for some.
    fn clear(&mut self, capacity: usize);
    /// Append a zero element, returning it.
    fn push_zeroed(&mut self) -> &mut dyn Slot;
}

/// A wrapper around a single value.
pub trait Indirection {
    /// The wrapped value, allocating its zero value if absent.
    fn resolve(&mut self) -> &mut dyn Slot;
}

/// Decode a type by hand, bypassing structural dispatch.
///
/// Implement this alongside [`Decode`], with [`Category::Custom`] and a
/// shape of [`Shape::Custom`]. The engine delegates to it wherever the type
/// appears, including behind [`Option`] and [`Box`], except when an optional
/// field is absent.
///
/// ```
/// struct Pubkey([u8; 32]);
///
/// impl Decode for Pubkey {
///     const CATEGORY: Category = Category::Custom;
///
///     fn shape(&mut self) -> Shape<'_> {
///         Shape::Custom(self)
///     }
///
///     fn zeroed() -> Self {
///         Self([0; 32])
///     }
/// }
///
/// impl CustomDecode for Pubkey {
///     fn decode_custom(&mut self, d: &mut Decoder<'_>, _: &Directive) -> Result<(), Error> {
///         self.0.copy_from_slice(d.read_n_bytes(32)?);
///         Ok(())
///     }
/// }
/// ```
pub trait CustomDecode {
    /// Decode this value from the session, following the directive in
    /// effect where it appears.
    fn decode_custom(
        &mut self,
        decoder: &mut Decoder<'_>,
        directive: &Directive,
    ) -> Result<(), Error>;
}

/// Integer types usable as `sizeof` sources.
pub trait SizeSource {
    /// This value as an element count, with negative values clamped to zero.
    fn size(&self) -> usize;
}
