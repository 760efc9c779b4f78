//! Resolution of indirections down to a decodable location.

use either::Either::{self, Left, Right};

use super::{Category, CustomDecode, Shape, Slot};
use crate::Error;

/// Whether a wrapper handed back itself rather than the value it wraps.
///
/// A wrapped value may share its wrapper's address (as `Option` often does),
/// so the types must match as well.
fn is_itself(inner: &dyn Slot, outer: *const (), name: &'static str) -> bool {
    core::ptr::from_ref(inner).cast::<()>() == outer && inner.type_name() == name
}

/// Walk down a chain of indirections, allocating absent values, until
/// reaching a location that is not an indirection.
///
/// Stops early and returns the override if any level decodes itself, in
/// which case nothing beneath it is visited. A wrapper that hands back
/// itself is [`Error::UnsupportedType`].
pub(crate) fn indirect(
    mut slot: &mut dyn Slot,
) -> Result<Either<&mut dyn CustomDecode, &mut dyn Slot>, Error> {
    loop {
        let name = slot.type_name();

        match slot.category() {
            Category::Custom => {
                let Shape::Custom(custom) = slot.view() else {
                    Err(Error::UnsupportedType(name))?
                };

                return Ok(Left(custom));
            }
            Category::Indirect => {
                let outer = core::ptr::from_ref(&*slot).cast::<()>();

                let Shape::Indirect(wrapper) = slot.view() else {
                    Err(Error::UnsupportedType(name))?
                };

                let inner = wrapper.resolve();

                if is_itself(inner, outer, name) {
                    Err(Error::UnsupportedType(name))?
                }

                slot = inner;
            }
            _ => return Ok(Right(slot)),
        }
    }
}

/// Walk down a chain of indirections, stopping at the last one.
///
/// The returned location is the one an absent optional value resets: the
/// innermost wrapper, or the value itself if it is not wrapped at all. Outer
/// wrappers are allocated on the way.
pub(crate) fn indirect_tail(mut slot: &mut dyn Slot) -> Result<&mut dyn Slot, Error> {
    loop {
        if slot.category() != Category::Indirect
            || slot.inner_category() != Some(Category::Indirect)
        {
            return Ok(slot);
        }

        let name = slot.type_name();
        let outer = core::ptr::from_ref(&*slot).cast::<()>();

        let Shape::Indirect(wrapper) = slot.view() else {
            Err(Error::UnsupportedType(name))?
        };

        let inner = wrapper.resolve();

        if is_itself(inner, outer, name) {
            Err(Error::UnsupportedType(name))?
        }

        slot = inner;
    }
}
