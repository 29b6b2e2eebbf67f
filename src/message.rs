//! Dynamic messages
//!
//! `DynamicMessage` is the mutable message instance the codec reads and
//! writes through reflection: enumerate present fields, get/set a field's
//! value by descriptor, construct fresh zero values. Presence follows the
//! schema format's implicit-presence rules: a scalar, enum, list, or map
//! field holding its exact default is absent; a message field is present
//! whenever it has been set, even if empty.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::{CodecError, Result};
use crate::schema::{FieldDescriptor, FieldNumber, MessageDescriptor};
use crate::value::FieldValue;

/// A mutable message instance driven entirely by its descriptor
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicMessage {
    descriptor: Arc<MessageDescriptor>,
    fields: BTreeMap<FieldNumber, FieldValue>,
}

impl DynamicMessage {
    /// Create a fresh message with every field at its default
    pub fn new(descriptor: Arc<MessageDescriptor>) -> Self {
        Self {
            descriptor,
            fields: BTreeMap::new(),
        }
    }

    /// The message type's descriptor
    pub fn descriptor(&self) -> &Arc<MessageDescriptor> {
        &self.descriptor
    }

    /// Whether the field currently holds a non-default (present) value
    pub fn has(&self, field: &FieldDescriptor) -> bool {
        self.fields.contains_key(&field.number())
    }

    /// The field's current value, or its default when absent
    pub fn get(&self, field: &FieldDescriptor) -> FieldValue {
        self.fields
            .get(&field.number())
            .cloned()
            .unwrap_or_else(|| field.kind().default_value())
    }

    /// Construct a fresh zero value for the field
    pub fn new_field(&self, field: &FieldDescriptor) -> FieldValue {
        field.kind().default_value()
    }

    /// Replace the field's value
    ///
    /// The value is type-checked against the field's declared kind. Storing
    /// an implicit-presence default clears the field instead, so presence
    /// and value stay consistent.
    pub fn set(&mut self, field: &FieldDescriptor, value: FieldValue) -> Result<()> {
        if self.descriptor.field(field.number()) != Some(field) {
            return Err(CodecError::InvalidDescriptor(format!(
                "field {} does not belong to message {}",
                field.name(),
                self.descriptor.name()
            )));
        }
        if !value.conforms_to(field.kind()) {
            return Err(CodecError::WrongValueKind {
                field: field.name().to_string(),
                expected: field.kind().to_string(),
                found: value.kind_name().to_string(),
            });
        }
        if value.is_implicit_default() {
            self.fields.remove(&field.number());
        } else {
            self.fields.insert(field.number(), value);
        }
        Ok(())
    }

    /// Reset the field to absent
    pub fn clear(&mut self, field: &FieldDescriptor) {
        self.fields.remove(&field.number());
    }

    /// Whether no field is present
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over present fields in ascending field-number order
    pub fn present_fields(&self) -> impl Iterator<Item = (&FieldDescriptor, &FieldValue)> {
        // `set` only admits descriptors belonging to this message type, so
        // every present number resolves.
        self.fields
            .iter()
            .filter_map(|(number, value)| self.descriptor.field(*number).map(|f| (f, value)))
    }

    /// Merge another message of the same type into this one
    ///
    /// Present fields of `other` are folded in: singular scalars and enums
    /// overwrite, singular messages merge recursively, list elements append,
    /// map entries insert or overwrite per key. Fields absent on `other`
    /// never erase values already set on `self`.
    pub fn merge_from(&mut self, other: &DynamicMessage) -> Result<()> {
        if self.descriptor.name() != other.descriptor.name() {
            return Err(CodecError::WrongValueKind {
                field: self.descriptor.name().to_string(),
                expected: format!("message {}", self.descriptor.name()),
                found: format!("message {}", other.descriptor.name()),
            });
        }
        for (field, value) in other.present_fields() {
            let number = field.number();
            let merged = match (self.fields.remove(&number), value) {
                (Some(FieldValue::Message(mut target)), FieldValue::Message(source)) => {
                    target.merge_from(source)?;
                    FieldValue::Message(target)
                }
                (Some(FieldValue::List(mut target)), FieldValue::List(source)) => {
                    target.extend(source.iter().cloned());
                    FieldValue::List(target)
                }
                (Some(FieldValue::Map(mut target)), FieldValue::Map(source)) => {
                    for (key, entry) in source {
                        target.insert(key.clone(), entry.clone());
                    }
                    FieldValue::Map(target)
                }
                (_, value) => value.clone(),
            };
            self.fields.insert(number, merged);
        }
        Ok(())
    }
}
