//! Records, decoded field by field.

use alloc::collections::BTreeMap;

use super::{Directive, FieldTag, Slot, engine};
use crate::{Decoder, Error, TagOrderingViolation};

/// The name and tag of a record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub tag: FieldTag,
}

impl FieldDescriptor {
    pub const fn new(name: &'static str, tag: FieldTag) -> Self {
        Self { name, tag }
    }
}

/// A structure with named fields, decoded in declaration order.
///
/// Usually implemented by the [`Decode`](macro@crate::Decode) derive macro.
pub trait Record {
    /// Name of the record, for errors and diagnostics.
    fn record_name(&self) -> &'static str;

    /// The fields, in declaration order.
    fn fields(&self) -> &'static [FieldDescriptor];

    /// The location of the field at an index into [`Record::fields`].
    fn field(&mut self, index: usize) -> Option<&mut dyn Slot>;
}

/// Find the first regular field declared after an extension field.
///
/// Skipped fields never touch the wire, so they may appear anywhere.
fn misplaced_field(fields: &[FieldDescriptor]) -> Option<&FieldDescriptor> {
    fields
        .iter()
        .filter(|field| !field.tag.skip)
        .skip_while(|field| !field.tag.binary_extension)
        .find(|field| !field.tag.binary_extension)
}

pub(crate) fn decode_record(d: &mut Decoder<'_>, record: &mut dyn Record) -> Result<(), Error> {
    let record_name = record.record_name();
    let fields = record.fields();

    if let Some(field) = misplaced_field(fields) {
        panic!(
            "{}",
            TagOrderingViolation {
                record: record_name,
                field: field.name,
            }
        );
    }

    tracing::trace!(record = record_name, fields = fields.len(), "decode record");

    let mut linked_sizes: BTreeMap<&'static str, usize> = BTreeMap::new();

    for (index, descriptor) in fields.iter().enumerate() {
        let FieldDescriptor { name, tag } = *descriptor;

        if tag.skip {
            tracing::trace!(record = record_name, field = name, "skip field");
            continue;
        }

        let Some(slot) = record.field(index) else {
            Err(Error::UnaddressableField {
                record: record_name,
                field: name,
            })?
        };

        if tag.binary_extension && !d.has_remaining() {
            tracing::trace!(
                record = record_name,
                field = name,
                "extension field missing, resetting to zero value"
            );
            slot.reset();
            continue;
        }

        let directive = Directive::for_field(&tag, linked_sizes.get(name).copied());
        engine::decode_slot(d, slot, &directive)?;

        if let Some(target) = tag.size_of {
            let Some(size) = slot.linked_size() else {
                Err(Error::InvalidSizeSource {
                    record: record_name,
                    field: name,
                })?
            };

            tracing::trace!(record = record_name, field = name, target, size, "linked size");
            linked_sizes.insert(target, size);
        }
    }

    Ok(())
}
