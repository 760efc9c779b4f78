//! [`Decode`] for primitive and standard library types.

use core::marker::PhantomData;

use alloc::{boxed::Box, string::String, vec::Vec};

use super::{
    Category, CustomDecode, Decode, Directive, Elements, Indirection, Sequence, Shape, SizeSource,
    Slot,
};
use crate::{Decoder, Error};

macro_rules! scalar {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(
            impl Decode for $t {
                const CATEGORY: Category = Category::$variant;

                fn shape(&mut self) -> Shape<'_> {
                    Shape::$variant(self)
                }

                fn zeroed() -> Self {
                    Self::default()
                }
            }
        )*
    };
}

scalar! {
    bool => Bool,
    f32 => F32,
    f64 => F64,
    String => String,
}

macro_rules! integer {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(
            impl Decode for $t {
                const CATEGORY: Category = Category::$variant;

                fn shape(&mut self) -> Shape<'_> {
                    Shape::$variant(self)
                }

                fn zeroed() -> Self {
                    0
                }

                fn as_size(&self) -> Option<usize> {
                    Some(self.size())
                }
            }

            impl SizeSource for $t {
                fn size(&self) -> usize {
                    usize::try_from((*self).max(0)).unwrap_or(usize::MAX)
                }
            }
        )*
    };
}

integer! {
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
}

/// 128-bit integers are read as two 64-bit words, ordered by the byte order
/// in effect.
macro_rules! wide {
    ($($t:ty => $read:ident),* $(,)?) => {
        $(
            impl Decode for $t {
                const CATEGORY: Category = Category::Custom;

                fn shape(&mut self) -> Shape<'_> {
                    Shape::Custom(self)
                }

                fn zeroed() -> Self {
                    0
                }

                fn as_size(&self) -> Option<usize> {
                    Some(self.size())
                }
            }

            impl CustomDecode for $t {
                fn decode_custom(
                    &mut self,
                    decoder: &mut Decoder<'_>,
                    directive: &Directive,
                ) -> Result<(), Error> {
                    *self = decoder.$read(directive.order)?;
                    Ok(())
                }
            }

            impl SizeSource for $t {
                fn size(&self) -> usize {
                    usize::try_from((*self).max(0)).unwrap_or(usize::MAX)
                }
            }
        )*
    };
}

wide! {
    u128 => read_u128,
    i128 => read_i128,
}

// Platform-dependent widths have no wire form.
macro_rules! unsupported {
    ($($t:ty),* $(,)?) => {
        $(
            impl Decode for $t {
                const CATEGORY: Category = Category::Unsupported;

                fn shape(&mut self) -> Shape<'_> {
                    Shape::Unsupported
                }

                fn zeroed() -> Self {
                    Self::default()
                }
            }
        )*
    };
}

unsupported!(usize, isize, char);

impl Decode for () {
    const CATEGORY: Category = Category::Opaque;

    fn shape(&mut self) -> Shape<'_> {
        Shape::Opaque
    }

    fn zeroed() -> Self {}
}

impl<T: ?Sized> Decode for PhantomData<T> {
    const CATEGORY: Category = Category::Opaque;

    fn shape(&mut self) -> Shape<'_> {
        Shape::Opaque
    }

    fn zeroed() -> Self {
        PhantomData
    }
}

impl<T: Decode, const N: usize> Decode for [T; N] {
    const CATEGORY: Category = Category::Array;

    fn shape(&mut self) -> Shape<'_> {
        Shape::Array(self)
    }

    fn zeroed() -> Self {
        core::array::from_fn(|_| T::zeroed())
    }
}

impl<T: Decode, const N: usize> Elements for [T; N] {
    fn len(&self) -> usize {
        N
    }

    fn element(&mut self, index: usize) -> &mut dyn Slot {
        &mut self[index]
    }
}

impl<T: Decode> Decode for Vec<T> {
    const CATEGORY: Category = Category::Sequence;

    fn shape(&mut self) -> Shape<'_> {
        Shape::Sequence(self)
    }

    fn zeroed() -> Self {
        Vec::new()
    }
}

impl<T: Decode> Sequence for Vec<T> {
    fn element_category(&self) -> Category {
        T::CATEGORY
    }

    fn clear(&mut self, capacity: usize) {
        Vec::clear(self);
        self.reserve(capacity);
    }

    fn push_zeroed(&mut self) -> &mut dyn Slot {
        self.push(T::zeroed());
        let last = self.len() - 1;
        &mut self[last]
    }
}

impl<T: Decode> Decode for Option<T> {
    const CATEGORY: Category = Category::Indirect;
    const INNER_CATEGORY: Option<Category> = Some(T::CATEGORY);

    fn shape(&mut self) -> Shape<'_> {
        Shape::Indirect(self)
    }

    fn zeroed() -> Self {
        None
    }
}

impl<T: Decode> Indirection for Option<T> {
    fn resolve(&mut self) -> &mut dyn Slot {
        self.get_or_insert_with(T::zeroed)
    }
}

impl<T: Decode> Decode for Box<T> {
    const CATEGORY: Category = Category::Indirect;
    const INNER_CATEGORY: Option<Category> = Some(T::CATEGORY);

    fn shape(&mut self) -> Shape<'_> {
        Shape::Indirect(self)
    }

    fn zeroed() -> Self {
        Box::new(T::zeroed())
    }
}

impl<T: Decode> Indirection for Box<T> {
    fn resolve(&mut self) -> &mut dyn Slot {
        &mut **self
    }
}
