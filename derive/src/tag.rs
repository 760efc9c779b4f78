use proc_macro2::Span;
use syn::{
    Error, Ident, LitInt, Result, Token,
    ext::IdentExt,
    parse::{Parse, ParseStream},
};

/// The contents of a `#[bin(...)]` field attribute.
#[derive(Debug, Default)]
pub(crate) struct FieldTag {
    pub(crate) skip: bool,
    pub(crate) binary_extension: bool,
    pub(crate) optional: bool,
    pub(crate) big: bool,
    pub(crate) size_of: Option<SizeTarget>,
}

/// The field named by `sizeof`.
#[derive(Debug)]
pub(crate) struct SizeTarget {
    pub(crate) name: String,
    pub(crate) span: Span,
}

impl FieldTag {
    pub(crate) fn merge(&mut self, other: Self, span: Span) -> Result<()> {
        self.skip |= other.skip;
        self.binary_extension |= other.binary_extension;
        self.optional |= other.optional;
        self.big |= other.big;

        if let Some(target) = other.size_of {
            if self.size_of.replace(target).is_some() {
                Err(Error::new(span, "Field may only declare one `sizeof` target."))?
            }
        }

        Ok(())
    }
}

impl Parse for FieldTag {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut tag = Self::default();
        let mut little = None;

        while !input.is_empty() {
            let key = input.call(Ident::parse_any)?;

            match key.unraw().to_string().as_str() {
                "skip" => tag.skip = true,
                "optional" => tag.optional = true,
                "binary_extension" => tag.binary_extension = true,
                "big" => tag.big = true,
                "little" => little = Some(key.span()),
                "sizeof" => {
                    input.parse::<Token![=]>()?;

                    let target = if input.peek(LitInt) {
                        let index = input.parse::<LitInt>()?;
                        SizeTarget {
                            name: index.base10_digits().to_owned(),
                            span: index.span(),
                        }
                    } else {
                        let ident = input.call(Ident::parse_any)?;
                        SizeTarget {
                            name: ident.unraw().to_string(),
                            span: ident.span(),
                        }
                    };

                    if tag.size_of.replace(target).is_some() {
                        Err(Error::new_spanned(
                            &key,
                            "Field may only declare one `sizeof` target.",
                        ))?
                    }
                }
                _ => Err(Error::new_spanned(
                    &key,
                    "Unknown tag. Expected `skip`, `optional`, `binary_extension`, `big`, `little` or `sizeof = field`.",
                ))?,
            }

            if !input.is_empty() {
                input.parse::<Token![,]>()?;
            }
        }

        if let (true, Some(span)) = (tag.big, little) {
            Err(Error::new(span, "`big` and `little` are mutually exclusive."))?
        }

        Ok(tag)
    }
}
