//! Field encoding
//!
//! Converts one present field's value into exactly one document element,
//! written under the key derived from the field number. All value
//! conversion is delegated to the codec resolved for the field's
//! representation type; the only error paths are propagated registry and
//! codec failures.

use crate::bridge;
use crate::document::Document;
use crate::error::Result;
use crate::key;
use crate::schema::FieldDescriptor;
use crate::value::FieldValue;

use super::MessageCodec;

pub(super) struct FieldEncoder<'a> {
    codec: &'a MessageCodec,
}

impl<'a> FieldEncoder<'a> {
    pub(super) fn new(codec: &'a MessageCodec) -> Self {
        Self { codec }
    }

    /// Encode one field value and append it to `document`
    pub(super) fn encode_field(
        &self,
        field: &FieldDescriptor,
        value: &FieldValue,
        document: &mut Document,
    ) -> Result<()> {
        let ty = bridge::representation_type(field);
        let value_codec = self.codec.registry().lookup(&ty, self.codec)?;
        let encoded = value_codec.encode(value)?;
        document.insert(key::key_of(field.number()), encoded);
        Ok(())
    }
}
