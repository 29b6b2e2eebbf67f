//! Field decoding
//!
//! Converts one document element back into a field value. The schema the
//! document was written under may disagree with the current schema about a
//! field's cardinality: turning a repeated field into a singular one, or
//! the reverse, is a supported schema evolution. Decoding therefore runs as
//! a two-state retry:
//!
//! 1. `Direct` — assume the stored cardinality matches the declared one.
//! 2. `Emulated` — on direct failure, assume the opposite cardinality and
//!    adapt: a stored list collapses into a now-singular field (messages
//!    merge element by element, scalars and enums keep the last element),
//!    a stored singular value is wrapped as a one-element list.
//!
//! If both states fail, the direct error is surfaced: it is the more
//! meaningful diagnostic for a genuinely malformed document. Maps never
//! participate in emulation; cardinality changes into or out of a map are
//! not a supported evolution.

use tracing::debug;

use crate::bridge;
use crate::document::DocumentValue;
use crate::error::{CodecError, Result};
use crate::message::DynamicMessage;
use crate::registry::ConcreteType;
use crate::schema::{FieldDescriptor, FieldKind};
use crate::value::FieldValue;

use super::MessageCodec;

/// Decode state for one document element
enum DecodeStrategy {
    Direct,
    Emulated { original: CodecError },
}

pub(super) struct FieldDecoder<'a> {
    codec: &'a MessageCodec,
}

impl<'a> FieldDecoder<'a> {
    pub(super) fn new(codec: &'a MessageCodec) -> Self {
        Self { codec }
    }

    /// Decode one element into its field on `target`
    ///
    /// On success the decoded value replaces the field's current value.
    pub(super) fn decode_element(
        &self,
        field: &FieldDescriptor,
        value: &DocumentValue,
        target: &mut DynamicMessage,
    ) -> Result<()> {
        let mut strategy = DecodeStrategy::Direct;
        loop {
            match strategy {
                DecodeStrategy::Direct => match self.decode_direct(field, value) {
                    Ok(decoded) => return target.set(field, decoded),
                    Err(original) => {
                        debug!(
                            field = field.name(),
                            error = %original,
                            "direct decode failed; retrying with cardinality emulation"
                        );
                        strategy = DecodeStrategy::Emulated { original };
                    }
                },
                DecodeStrategy::Emulated { original } => {
                    return match self.decode_emulated(field, value) {
                        Ok(decoded) => target.set(field, decoded),
                        Err(_) => Err(original),
                    };
                }
            }
        }
    }

    /// Decode assuming the stored cardinality matches the declared one
    fn decode_direct(&self, field: &FieldDescriptor, value: &DocumentValue) -> Result<FieldValue> {
        let ty = bridge::representation_type(field);
        let value_codec = self.codec.registry().lookup(&ty, self.codec)?;
        value_codec.decode(value)
    }

    /// Decode assuming the stored cardinality is the opposite of the
    /// declared one
    fn decode_emulated(
        &self,
        field: &FieldDescriptor,
        value: &DocumentValue,
    ) -> Result<FieldValue> {
        match field.kind() {
            FieldKind::Map { .. } => Err(CodecError::TypeMismatch {
                expected: field.kind().to_string(),
                found: value.shape_name().to_string(),
            }),
            FieldKind::List(element) => {
                // The data was written singular: decode one element value
                // and wrap it as the sole element of the list.
                let ty = bridge::element_type(element);
                let value_codec = self.codec.registry().lookup(&ty, self.codec)?;
                let element_value = value_codec.decode(value)?;
                Ok(FieldValue::List(vec![element_value]))
            }
            _ => {
                // The data was written repeated: decode it as a sequence of
                // the field's singular type, then collapse.
                let ty = ConcreteType::Sequence(Box::new(bridge::singular_type(field)));
                let value_codec = self.codec.registry().lookup(&ty, self.codec)?;
                match value_codec.decode(value)? {
                    FieldValue::List(items) => self.collapse(field, items),
                    other => Err(CodecError::TypeMismatch {
                        expected: "list".to_string(),
                        found: other.kind_name().to_string(),
                    }),
                }
            }
        }
    }

    /// Collapse decoded sequence elements into one singular field value
    ///
    /// Message elements merge in document order, later present fields
    /// overwriting earlier ones and absent fields never erasing anything.
    /// For every other kind the last element wins outright. An empty
    /// sequence collapses to the field's fresh value.
    fn collapse(&self, field: &FieldDescriptor, items: Vec<FieldValue>) -> Result<FieldValue> {
        match field.kind() {
            FieldKind::Message(descriptor) => {
                let mut merged = DynamicMessage::new(descriptor.clone());
                for item in items {
                    match item {
                        FieldValue::Message(element) => merged.merge_from(&element)?,
                        other => {
                            return Err(CodecError::TypeMismatch {
                                expected: format!("message {}", descriptor.name()),
                                found: other.kind_name().to_string(),
                            });
                        }
                    }
                }
                Ok(FieldValue::Message(merged))
            }
            kind => Ok(items
                .into_iter()
                .last()
                .unwrap_or_else(|| kind.default_value())),
        }
    }
}
