//! Type bridge
//!
//! Derives, for any schema field, the concrete value representation a codec
//! lookup needs. Cardinality is folded into the representation: a list field
//! is represented as a sequence of its element's type, a map field as a
//! mapping from its key kind to its value's type.
//!
//! The decode retry also needs the representations a field *would* have
//! under the opposite cardinality; [`singular_type`] and the sequence
//! composition in the decoder cover those.

use crate::registry::ConcreteType;
use crate::schema::{FieldDescriptor, FieldKind};

/// The concrete type of a singular kind (never list or map)
pub fn element_type(kind: &FieldKind) -> ConcreteType {
    match kind {
        FieldKind::Scalar(scalar) => ConcreteType::Scalar(*scalar),
        FieldKind::Enum(_) => ConcreteType::Enum,
        FieldKind::Message(desc) => ConcreteType::Message(desc.clone()),
        // Descriptor validation forbids repeated kinds inside repeated
        // kinds, so a list/map element is always singular.
        FieldKind::List(element) => element_type(element),
        FieldKind::Map { value, .. } => element_type(value),
    }
}

/// The representation the field's current declared kind implies
pub fn representation_type(field: &FieldDescriptor) -> ConcreteType {
    match field.kind() {
        FieldKind::List(element) => {
            ConcreteType::Sequence(Box::new(element_type(element)))
        }
        FieldKind::Map { key, value } => {
            ConcreteType::Mapping(*key, Box::new(element_type(value)))
        }
        singular => element_type(singular),
    }
}

/// The representation of one value of the field, ignoring list cardinality
///
/// For a singular field this equals [`representation_type`]; for a list
/// field it is the element's type. Map fields have no singular form.
pub fn singular_type(field: &FieldDescriptor) -> ConcreteType {
    match field.kind() {
        FieldKind::List(element) => element_type(element),
        other => element_type(other),
    }
}
