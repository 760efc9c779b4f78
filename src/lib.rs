#![no_std]

//! A type-driven deserializer for compact binary wire formats.
//!
//! Wirebin decodes buffers in one of three closely related encodings, chosen
//! per session by [`Encoding`]:
//!
//! - `Bin`: lengths are unsigned LEB128 varints.
//! - `Borsh`: lengths are little-endian `u32`s, and NaN floats are rejected.
//! - `CompactU16`: lengths are Solana's one to three byte compact-u16.
//!
//! Destinations describe themselves through the [`Decode`] trait, which is
//! implemented for primitives, strings, arrays, vectors, options and boxes,
//! and derived for structs with the [`Decode`](macro@Decode) macro. Types
//! with their own wire layout implement [`CustomDecode`] instead. The
//! [`decode`] module describes the model in full.
//!
//! ```
//! #[derive(Debug, Decode)]
//! struct Mint {
//!     decimals: u8,
//!     #[bin(optional)]
//!     authority: Option<[u8; 32]>,
//!     supply: u64,
//! }
//!
//! let mint: Mint = wirebin::decode_slice(&account_data, Encoding::Borsh)?;
//! ```
//!
//! The primitive reads used by the engine are also available directly on
//! [`Decoder`] (and on [`wire::Cursor`]), for hand-written decoders.
//!
//! ## Cargo Features
//!
//! The following crate feature flags are available:
//!
//! - `derive`: enable derive macros (default).
//! - `std`: enable reader-based decoding and [`std::error::Error`] impls
//!   (default).

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod decode;
pub mod wire;

mod decoder;
mod encoding;
mod error;

pub use decode::{
    Category, CustomDecode, Decode, Directive, Elements, FieldDescriptor, FieldTag, Indirection,
    Record, Sequence, Shape, SizeSource, Slot,
};
#[cfg(feature = "std")]
pub use decoder::decode_reader;
pub use decoder::{Decoder, decode_slice};
pub use encoding::Encoding;
pub use error::{CompactU16Error, Error, TagOrderingViolation};
pub use wire::ByteOrder;
