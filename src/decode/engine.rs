//! The recursive decode engine.

use either::Either::{Left, Right};

use super::{Category, Directive, Shape, Slot, record, resolve};
use crate::{Decoder, Error};

/// Decode a single location, following a directive.
///
/// The first error aborts the decode, leaving the location partially
/// written.
pub(crate) fn decode_slot(
    d: &mut Decoder<'_>,
    slot: &mut dyn Slot,
    directive: &Directive,
) -> Result<(), Error> {
    tracing::trace!(
        category = ?slot.category(),
        type_name = slot.type_name(),
        ?directive,
        "decode value"
    );

    if directive.optional {
        let slot = resolve::indirect_tail(slot)?;

        if d.read_u8()? == 0 {
            tracing::trace!(type_name = slot.type_name(), "optional value absent");
            slot.reset();
            return Ok(());
        }
    }

    match resolve::indirect(slot)? {
        Left(custom) => {
            tracing::trace!("delegating to custom decoder");
            custom.decode_custom(d, directive)
        }
        Right(slot) => decode_shape(d, slot, directive),
    }
}

/// Decode a location that is neither an indirection nor custom.
fn decode_shape(
    d: &mut Decoder<'_>,
    slot: &mut dyn Slot,
    directive: &Directive,
) -> Result<(), Error> {
    let order = directive.order;
    let name = slot.type_name();

    match slot.view() {
        Shape::Bool(v) => *v = d.read_bool()?,
        Shape::I8(v) => *v = d.read_i8()?,
        Shape::I16(v) => *v = d.read_i16(order)?,
        Shape::I32(v) => *v = d.read_i32(order)?,
        Shape::I64(v) => *v = d.read_i64(order)?,
        Shape::U8(v) => *v = d.read_u8()?,
        Shape::U16(v) => *v = d.read_u16(order)?,
        Shape::U32(v) => *v = d.read_u32(order)?,
        Shape::U64(v) => *v = d.read_u64(order)?,
        Shape::F32(v) => *v = d.read_f32(order)?,
        Shape::F64(v) => *v = d.read_f64(order)?,
        Shape::String(v) => *v = d.read_string()?,

        Shape::Opaque => {}

        Shape::Array(elements) => {
            let length = elements.len();
            tracing::trace!(length, type_name = name, "decode array");

            for i in 0..length {
                decode_slot(d, elements.element(i), directive)?;
            }
        }

        Shape::Sequence(sequence) => {
            let length = match directive.linked_size {
                Some(length) => length,
                None => usize::try_from(d.read_uvarint64()?).unwrap_or(usize::MAX),
            };
            let remaining = d.remaining();
            tracing::trace!(length, remaining, type_name = name, "decode sequence");

            // Opaque elements consume nothing, so the input cannot vouch for
            // the count.
            if sequence.element_category() == Category::Opaque && length > remaining {
                Err(Error::TruncatedInput {
                    required: length,
                    remaining,
                })?;
            }

            sequence.clear(length.min(remaining));

            for _ in 0..length {
                let start = d.position();
                decode_slot(d, sequence.push_zeroed(), directive)?;

                // Zero-width elements are held to the same bound.
                if d.position() == start && length > remaining {
                    Err(Error::TruncatedInput {
                        required: length,
                        remaining,
                    })?;
                }
            }
        }

        Shape::Record(fields) => record::decode_record(d, fields)?,

        Shape::Indirect(_) | Shape::Custom(_) | Shape::Unsupported => {
            Err(Error::UnsupportedType(name))?
        }
    }

    Ok(())
}
