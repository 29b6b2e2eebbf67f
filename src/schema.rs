//! Schema descriptors
//!
//! Field and message descriptors identify the shape of a message type: each
//! field has a stable numeric identifier, a name, and a declared kind.
//! Descriptors are immutable after construction and shared across codec
//! invocations via `Arc`.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{CodecError, Result};
use crate::value::{FieldValue, ScalarValue};

/// Stable numeric identifier of a field within its message type
pub type FieldNumber = u32;

/// Smallest valid field number
pub const MIN_FIELD_NUMBER: FieldNumber = 1;
/// Largest valid field number (2^29 - 1)
pub const MAX_FIELD_NUMBER: FieldNumber = 536_870_911;
/// Reserved range, unusable by schemas
pub const RESERVED_RANGE: std::ops::RangeInclusive<FieldNumber> = 19_000..=19_999;

/// Scalar subtypes a field can declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarKind {
    Double,
    Float,
    Int32,
    Int64,
    Uint32,
    Uint64,
    Bool,
    String,
    Bytes,
}

impl ScalarKind {
    /// Whether this kind may serve as a map key
    pub fn is_valid_map_key(&self) -> bool {
        !matches!(
            self,
            ScalarKind::Double | ScalarKind::Float | ScalarKind::Bytes
        )
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScalarKind::Double => "double",
            ScalarKind::Float => "float",
            ScalarKind::Int32 => "int32",
            ScalarKind::Int64 => "int64",
            ScalarKind::Uint32 => "uint32",
            ScalarKind::Uint64 => "uint64",
            ScalarKind::Bool => "bool",
            ScalarKind::String => "string",
            ScalarKind::Bytes => "bytes",
        };
        write!(f, "{}", name)
    }
}

/// Declared kind of a field, covering both type and cardinality
///
/// Cardinality is part of the kind: `List` and `Map` are the repeated forms,
/// everything else is singular.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// Singular scalar value
    Scalar(ScalarKind),
    /// Singular enum value (open: unknown numbers are preserved)
    Enum(Arc<EnumDescriptor>),
    /// Singular nested message
    Message(Arc<MessageDescriptor>),
    /// Repeated field; the element kind must itself be singular
    List(Box<FieldKind>),
    /// Map field; keys are integral/bool/string scalars, values singular
    Map {
        key: ScalarKind,
        value: Box<FieldKind>,
    },
}

impl FieldKind {
    /// Whether this kind is a repeated (list) field
    pub fn is_list(&self) -> bool {
        matches!(self, FieldKind::List(_))
    }

    /// Whether this kind is a map field
    pub fn is_map(&self) -> bool {
        matches!(self, FieldKind::Map { .. })
    }

    /// Whether this kind is a singular nested message
    pub fn is_message(&self) -> bool {
        matches!(self, FieldKind::Message(_))
    }

    /// The fresh zero value for a field of this kind
    pub fn default_value(&self) -> FieldValue {
        match self {
            FieldKind::Scalar(kind) => FieldValue::Scalar(ScalarValue::default_of(*kind)),
            FieldKind::Enum(_) => FieldValue::Enum(0),
            FieldKind::Message(desc) => {
                FieldValue::Message(crate::message::DynamicMessage::new(desc.clone()))
            }
            FieldKind::List(_) => FieldValue::List(Vec::new()),
            FieldKind::Map { .. } => FieldValue::Map(BTreeMap::new()),
        }
    }

    fn is_singular(&self) -> bool {
        !self.is_list() && !self.is_map()
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Scalar(kind) => write!(f, "{}", kind),
            FieldKind::Enum(desc) => write!(f, "enum {}", desc.name),
            FieldKind::Message(desc) => write!(f, "message {}", desc.name()),
            FieldKind::List(element) => write!(f, "repeated {}", element),
            FieldKind::Map { key, value } => write!(f, "map<{}, {}>", key, value),
        }
    }
}

/// Descriptor of an enum type
#[derive(Debug, Clone, PartialEq)]
pub struct EnumDescriptor {
    /// Name of the enum type
    pub name: String,
    /// Known number -> name pairs; decoding never rejects unknown numbers
    pub values: BTreeMap<i32, String>,
}

impl EnumDescriptor {
    /// Create an enum descriptor from (number, name) pairs
    pub fn new<S: Into<String>>(
        name: impl Into<String>,
        values: impl IntoIterator<Item = (i32, S)>,
    ) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            values: values.into_iter().map(|(n, v)| (n, v.into())).collect(),
        })
    }
}

/// Descriptor of one field of a message type
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    number: FieldNumber,
    name: String,
    kind: FieldKind,
}

impl FieldDescriptor {
    /// Create a field descriptor, validating the number and kind constraints
    pub fn new(number: FieldNumber, name: impl Into<String>, kind: FieldKind) -> Result<Self> {
        let name = name.into();
        if !(MIN_FIELD_NUMBER..=MAX_FIELD_NUMBER).contains(&number)
            || RESERVED_RANGE.contains(&number)
        {
            return Err(CodecError::InvalidDescriptor(format!(
                "field {}: invalid field number {}",
                name, number
            )));
        }
        match &kind {
            FieldKind::List(element) if !element.is_singular() => {
                return Err(CodecError::InvalidDescriptor(format!(
                    "field {}: list element must be a singular kind",
                    name
                )));
            }
            FieldKind::Map { key, value } => {
                if !key.is_valid_map_key() {
                    return Err(CodecError::InvalidDescriptor(format!(
                        "field {}: {} is not a valid map key kind",
                        name, key
                    )));
                }
                if !value.is_singular() {
                    return Err(CodecError::InvalidDescriptor(format!(
                        "field {}: map value must be a singular kind",
                        name
                    )));
                }
            }
            _ => {}
        }
        Ok(Self { number, name, kind })
    }

    /// The field's stable numeric identifier
    pub fn number(&self) -> FieldNumber {
        self.number
    }

    /// The field's name (not part of the wire identity)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The field's declared kind
    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }
}

/// Descriptor of a message type: an ordered set of field descriptors
#[derive(Debug, PartialEq)]
pub struct MessageDescriptor {
    name: String,
    fields: Vec<FieldDescriptor>,
    by_number: BTreeMap<FieldNumber, usize>,
}

impl MessageDescriptor {
    /// Create a message descriptor, validating field uniqueness
    pub fn new(name: impl Into<String>, fields: Vec<FieldDescriptor>) -> Result<Arc<Self>> {
        let name = name.into();
        let mut by_number = BTreeMap::new();
        for (index, field) in fields.iter().enumerate() {
            if by_number.insert(field.number(), index).is_some() {
                return Err(CodecError::InvalidDescriptor(format!(
                    "message {}: duplicate field number {}",
                    name,
                    field.number()
                )));
            }
            if fields[..index].iter().any(|f| f.name() == field.name()) {
                return Err(CodecError::InvalidDescriptor(format!(
                    "message {}: duplicate field name {}",
                    name,
                    field.name()
                )));
            }
        }
        Ok(Arc::new(Self {
            name,
            fields,
            by_number,
        }))
    }

    /// Name of the message type
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All field descriptors, in declaration order
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Look up a field by its numeric identifier
    pub fn field(&self, number: FieldNumber) -> Option<&FieldDescriptor> {
        self.by_number.get(&number).map(|&i| &self.fields[i])
    }

    /// Look up a field by name
    pub fn field_by_name(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name() == name)
    }
}
