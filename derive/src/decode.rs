use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{
    Data, DeriveInput, Error, Field, Index, Member, Result, Type, ext::IdentExt, parse_quote,
    spanned::Spanned,
};

use crate::tag::FieldTag;

pub(crate) fn expand_decode(input: &DeriveInput) -> Result<TokenStream> {
    let Data::Struct(data) = &input.data else {
        Err(Error::new(
            input.span(),
            "`Decode` may only be derived on structs.",
        ))?
    };

    let fields = data
        .fields
        .iter()
        .enumerate()
        .map(|(index, field)| FieldMetadata::parse(index, field))
        .collect::<Result<Vec<_>>>()?;

    let record = input.ident.unraw().to_string();

    check_extension_order(&record, &fields)?;
    check_size_links(&fields)?;

    let descriptors = fields.iter().map(|field| {
        let FieldMetadata { name, tag, .. } = field;

        let FieldTag {
            skip,
            binary_extension,
            optional,
            big,
            ..
        } = tag;

        let order = if *big {
            quote! { ::wirebin::ByteOrder::Big }
        } else {
            quote! { ::wirebin::ByteOrder::Little }
        };

        let size_of = match &tag.size_of {
            Some(target) => {
                let target = &target.name;
                quote! { ::core::option::Option::Some(#target) }
            }
            None => quote! { ::core::option::Option::None },
        };

        quote! {
            ::wirebin::FieldDescriptor::new(#name, ::wirebin::FieldTag {
                skip: #skip,
                binary_extension: #binary_extension,
                optional: #optional,
                order: #order,
                size_of: #size_of,
            })
        }
    });

    let size_sources = fields
        .iter()
        .filter(|field| field.tag.size_of.is_some())
        .map(|field| &field.ty)
        .collect::<Vec<_>>();

    let size_check = (!size_sources.is_empty()).then(|| {
        quote! {
            fn assert_size_source<T: ::wirebin::SizeSource + ?Sized>() {}
            #(assert_size_source::<#size_sources>();)*
        }
    });

    let cases = fields
        .iter()
        .enumerate()
        .filter(|(_, field)| !field.tag.skip)
        .map(|(index, field)| {
            let member = &field.member;
            quote! { #index => ::core::option::Option::Some(&mut self.#member), }
        });

    let initializers = fields.iter().map(|field| {
        let FieldMetadata { member, ty, tag, .. } = field;

        if tag.skip {
            quote! { #member: ::core::default::Default::default() }
        } else {
            quote! { #member: <#ty as ::wirebin::Decode>::zeroed() }
        }
    });

    let mut generics = input.generics.clone();
    for param in generics.type_params_mut() {
        param.bounds.push(parse_quote!(::wirebin::Decode));
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let name = &input.ident;

    let expanded = quote! {
        impl #impl_generics ::wirebin::Record for #name #ty_generics #where_clause {
            fn record_name(&self) -> &'static str {
                #record
            }

            fn fields(&self) -> &'static [::wirebin::FieldDescriptor] {
                #size_check

                const FIELDS: &[::wirebin::FieldDescriptor] = &[#(#descriptors),*];
                FIELDS
            }

            fn field(
                &mut self,
                index: usize,
            ) -> ::core::option::Option<&mut dyn ::wirebin::Slot> {
                match index {
                    #(#cases)*
                    _ => ::core::option::Option::None,
                }
            }
        }

        impl #impl_generics ::wirebin::Decode for #name #ty_generics #where_clause {
            const CATEGORY: ::wirebin::Category = ::wirebin::Category::Record;

            fn shape(&mut self) -> ::wirebin::Shape<'_> {
                ::wirebin::Shape::Record(self)
            }

            fn zeroed() -> Self {
                Self {
                    #(#initializers,)*
                }
            }
        }
    };

    Ok(expanded.into())
}

/// Reject regular fields declared after an extension field. Skipped fields
/// may appear anywhere.
fn check_extension_order(record: &str, fields: &[FieldMetadata]) -> Result<()> {
    let misplaced = fields
        .iter()
        .filter(|field| !field.tag.skip)
        .skip_while(|field| !field.tag.binary_extension)
        .find(|field| !field.tag.binary_extension);

    if let Some(field) = misplaced {
        Err(Error::new(
            field.span,
            format!(
                "`binary_extension` fields must be packed together at the end of `{record}`, problematic field `{}`.",
                field.name
            ),
        ))?
    }

    Ok(())
}

/// Require each `sizeof` target to name a later field that is read.
fn check_size_links(fields: &[FieldMetadata]) -> Result<()> {
    for (index, field) in fields.iter().enumerate() {
        let Some(target) = &field.tag.size_of else {
            continue;
        };

        if field.tag.skip {
            Err(Error::new(
                field.span,
                "`skip` fields cannot be `sizeof` sources.",
            ))?
        }

        let Some(linked) = fields[index + 1..]
            .iter()
            .find(|later| later.name == target.name)
        else {
            Err(Error::new(
                target.span,
                format!("`sizeof` target `{}` must name a later field.", target.name),
            ))?
        };

        if linked.tag.skip {
            Err(Error::new(
                target.span,
                format!("`sizeof` target `{}` is skipped.", target.name),
            ))?
        }
    }

    Ok(())
}

#[derive(Debug)]
struct FieldMetadata {
    member: Member,
    name: String,
    ty: Type,
    tag: FieldTag,
    span: Span,
}

impl FieldMetadata {
    fn parse(index: usize, field: &Field) -> Result<Self> {
        let (member, name) = match &field.ident {
            Some(ident) => (Member::Named(ident.clone()), ident.unraw().to_string()),
            None => (Member::Unnamed(Index::from(index)), index.to_string()),
        };

        let mut tag = FieldTag::default();
        for attr in field.attrs.iter().filter(|a| a.path().is_ident("bin")) {
            let parsed = attr.meta.require_list()?.parse_args::<FieldTag>()?;
            tag.merge(parsed, attr.span())?;
        }

        Ok(Self {
            member,
            name,
            ty: field.ty.clone(),
            tag,
            span: field.span(),
        })
    }
}
