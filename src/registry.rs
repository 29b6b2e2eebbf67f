//! Generic value codec registry
//!
//! Dispatches an encoder/decoder pair for any concrete value representation
//! the type bridge can name. Scalar codecs own the mapping between scalar
//! kinds and document value shapes; sequence, mapping, and message codecs are
//! composed structurally, with message codecs delegating back to the
//! [`MessageCodec`](crate::codec::MessageCodec) so nested messages recurse
//! through the same machinery.
//!
//! Callers may register an override codec for any concrete type; built-in
//! resolution covers everything else.

use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::codec::MessageCodec;
use crate::document::{Document, DocumentValue};
use crate::error::{CodecError, Result};
use crate::message::DynamicMessage;
use crate::schema::{MessageDescriptor, ScalarKind};
use crate::value::{FieldValue, MapKey, ScalarValue};

/// The concrete representation a codec lookup is keyed by
#[derive(Debug, Clone)]
pub enum ConcreteType {
    /// A scalar of the given kind
    Scalar(ScalarKind),
    /// An enum number
    Enum,
    /// A message of the given type
    Message(Arc<MessageDescriptor>),
    /// A sequence of the element's concrete type
    Sequence(Box<ConcreteType>),
    /// A mapping from a scalar key kind to the value's concrete type
    Mapping(ScalarKind, Box<ConcreteType>),
}

// Message types compare and hash by full name: two descriptors with the same
// name denote the same wire type.
impl PartialEq for ConcreteType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ConcreteType::Scalar(a), ConcreteType::Scalar(b)) => a == b,
            (ConcreteType::Enum, ConcreteType::Enum) => true,
            (ConcreteType::Message(a), ConcreteType::Message(b)) => a.name() == b.name(),
            (ConcreteType::Sequence(a), ConcreteType::Sequence(b)) => a == b,
            (ConcreteType::Mapping(ka, va), ConcreteType::Mapping(kb, vb)) => {
                ka == kb && va == vb
            }
            _ => false,
        }
    }
}

impl Eq for ConcreteType {}

impl Hash for ConcreteType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            ConcreteType::Scalar(kind) => kind.hash(state),
            ConcreteType::Enum => {}
            ConcreteType::Message(desc) => desc.name().hash(state),
            ConcreteType::Sequence(inner) => inner.hash(state),
            ConcreteType::Mapping(key, value) => {
                key.hash(state);
                value.hash(state);
            }
        }
    }
}

impl fmt::Display for ConcreteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConcreteType::Scalar(kind) => write!(f, "{}", kind),
            ConcreteType::Enum => write!(f, "enum"),
            ConcreteType::Message(desc) => write!(f, "message {}", desc.name()),
            ConcreteType::Sequence(inner) => write!(f, "sequence<{}>", inner),
            ConcreteType::Mapping(key, value) => write!(f, "mapping<{}, {}>", key, value),
        }
    }
}

/// An encoder/decoder pair for one concrete value representation
///
/// `decode` failures carry the type-mismatch signal the two-pass decode
/// retry keys off, so decoders must verify the stored shape before
/// converting.
pub trait ValueCodec {
    /// Convert a field value of this codec's type into a document value
    fn encode(&self, value: &FieldValue) -> Result<DocumentValue>;

    /// Convert a document value back into a field value of this codec's type
    fn decode(&self, value: &DocumentValue) -> Result<FieldValue>;
}

impl fmt::Debug for dyn ValueCodec + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ValueCodec")
    }
}

impl ValueCodec for Arc<dyn ValueCodec + Send + Sync> {
    fn encode(&self, value: &FieldValue) -> Result<DocumentValue> {
        (**self).encode(value)
    }

    fn decode(&self, value: &DocumentValue) -> Result<FieldValue> {
        (**self).decode(value)
    }
}

/// Registry resolving a [`ValueCodec`] for a [`ConcreteType`]
#[derive(Default)]
pub struct CodecRegistry {
    overrides: HashMap<ConcreteType, Arc<dyn ValueCodec + Send + Sync>>,
}

impl CodecRegistry {
    /// Create a registry with only the built-in codecs
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an override codec for a concrete type
    pub fn register(&mut self, ty: ConcreteType, codec: Arc<dyn ValueCodec + Send + Sync>) {
        self.overrides.insert(ty, codec);
    }

    /// Resolve a codec for a concrete type
    ///
    /// Overrides win over built-in resolution. `messages` is the codec used
    /// for nested message recursion; it is passed in rather than held
    /// globally.
    pub fn lookup<'a>(
        &'a self,
        ty: &ConcreteType,
        messages: &'a MessageCodec,
    ) -> Result<Box<dyn ValueCodec + 'a>> {
        if let Some(codec) = self.overrides.get(ty) {
            return Ok(Box::new(codec.clone()));
        }
        match ty {
            ConcreteType::Scalar(kind) => Ok(Box::new(ScalarCodec { kind: *kind })),
            ConcreteType::Enum => Ok(Box::new(EnumCodec)),
            ConcreteType::Message(desc) => Ok(Box::new(MessageValueCodec {
                descriptor: desc.clone(),
                messages,
            })),
            ConcreteType::Sequence(inner) => Ok(Box::new(SequenceCodec {
                inner: self.lookup(inner, messages)?,
            })),
            ConcreteType::Mapping(key, value) => {
                if !key.is_valid_map_key() {
                    return Err(CodecError::CodecNotFound(ty.to_string()));
                }
                Ok(Box::new(MappingCodec {
                    key: *key,
                    inner: self.lookup(value, messages)?,
                }))
            }
        }
    }
}

fn mismatch(expected: impl fmt::Display, found: &DocumentValue) -> CodecError {
    CodecError::TypeMismatch {
        expected: expected.to_string(),
        found: found.shape_name().to_string(),
    }
}

fn wrong_value(expected: impl fmt::Display, found: &FieldValue) -> CodecError {
    CodecError::TypeMismatch {
        expected: expected.to_string(),
        found: found.kind_name().to_string(),
    }
}

fn out_of_range(kind: ScalarKind, value: impl fmt::Display) -> CodecError {
    CodecError::OutOfRange {
        kind: kind.to_string(),
        value: value.to_string(),
    }
}

/// Built-in codec for one scalar kind
///
/// Wire mappings follow the document store's value model: floats widen to
/// doubles, `uint32` fits in `int64`, `uint64` is range-checked into
/// `int64`. Decoding accepts lossless numeric widenings of the stored shape
/// and range-checked narrowings for the unsigned kinds.
struct ScalarCodec {
    kind: ScalarKind,
}

impl ScalarCodec {
    fn decode_scalar(&self, value: &DocumentValue) -> Result<ScalarValue> {
        let kind = self.kind;
        match (kind, value) {
            (ScalarKind::Double, DocumentValue::Double(v)) => Ok(ScalarValue::Double(*v)),
            (ScalarKind::Double, DocumentValue::Int32(v)) => Ok(ScalarValue::Double(f64::from(*v))),
            (ScalarKind::Double, DocumentValue::Int64(v)) => Ok(ScalarValue::Double(*v as f64)),
            (ScalarKind::Float, DocumentValue::Double(v)) => Ok(ScalarValue::Float(*v as f32)),
            (ScalarKind::Float, DocumentValue::Int32(v)) => Ok(ScalarValue::Float(*v as f32)),
            (ScalarKind::Int32, DocumentValue::Int32(v)) => Ok(ScalarValue::Int32(*v)),
            (ScalarKind::Int32, DocumentValue::Int64(v)) => i32::try_from(*v)
                .map(ScalarValue::Int32)
                .map_err(|_| out_of_range(kind, v)),
            (ScalarKind::Int64, DocumentValue::Int64(v)) => Ok(ScalarValue::Int64(*v)),
            (ScalarKind::Int64, DocumentValue::Int32(v)) => Ok(ScalarValue::Int64(i64::from(*v))),
            (ScalarKind::Uint32, DocumentValue::Int32(v)) => u32::try_from(*v)
                .map(ScalarValue::Uint32)
                .map_err(|_| out_of_range(kind, v)),
            (ScalarKind::Uint32, DocumentValue::Int64(v)) => u32::try_from(*v)
                .map(ScalarValue::Uint32)
                .map_err(|_| out_of_range(kind, v)),
            (ScalarKind::Uint64, DocumentValue::Int32(v)) => u64::try_from(*v)
                .map(ScalarValue::Uint64)
                .map_err(|_| out_of_range(kind, v)),
            (ScalarKind::Uint64, DocumentValue::Int64(v)) => u64::try_from(*v)
                .map(ScalarValue::Uint64)
                .map_err(|_| out_of_range(kind, v)),
            (ScalarKind::Bool, DocumentValue::Bool(v)) => Ok(ScalarValue::Bool(*v)),
            (ScalarKind::String, DocumentValue::String(v)) => {
                Ok(ScalarValue::String(v.clone()))
            }
            (ScalarKind::Bytes, DocumentValue::Binary(v)) => Ok(ScalarValue::Bytes(v.clone())),
            _ => Err(mismatch(kind, value)),
        }
    }
}

impl ValueCodec for ScalarCodec {
    fn encode(&self, value: &FieldValue) -> Result<DocumentValue> {
        let FieldValue::Scalar(scalar) = value else {
            return Err(wrong_value(self.kind, value));
        };
        if scalar.kind() != self.kind {
            return Err(wrong_value(self.kind, value));
        }
        match scalar {
            ScalarValue::Double(v) => Ok(DocumentValue::Double(*v)),
            ScalarValue::Float(v) => Ok(DocumentValue::Double(f64::from(*v))),
            ScalarValue::Int32(v) => Ok(DocumentValue::Int32(*v)),
            ScalarValue::Int64(v) => Ok(DocumentValue::Int64(*v)),
            ScalarValue::Uint32(v) => Ok(DocumentValue::Int64(i64::from(*v))),
            ScalarValue::Uint64(v) => i64::try_from(*v)
                .map(DocumentValue::Int64)
                .map_err(|_| out_of_range(ScalarKind::Uint64, v)),
            ScalarValue::Bool(v) => Ok(DocumentValue::Bool(*v)),
            ScalarValue::String(v) => Ok(DocumentValue::String(v.clone())),
            ScalarValue::Bytes(v) => Ok(DocumentValue::Binary(v.clone())),
        }
    }

    fn decode(&self, value: &DocumentValue) -> Result<FieldValue> {
        self.decode_scalar(value).map(FieldValue::Scalar)
    }
}

/// Built-in codec for enum numbers
struct EnumCodec;

impl ValueCodec for EnumCodec {
    fn encode(&self, value: &FieldValue) -> Result<DocumentValue> {
        let FieldValue::Enum(number) = value else {
            return Err(wrong_value("enum", value));
        };
        Ok(DocumentValue::Int32(*number))
    }

    fn decode(&self, value: &DocumentValue) -> Result<FieldValue> {
        match value {
            DocumentValue::Int32(v) => Ok(FieldValue::Enum(*v)),
            DocumentValue::Int64(v) => i32::try_from(*v)
                .map(FieldValue::Enum)
                .map_err(|_| mismatch("enum", value)),
            _ => Err(mismatch("enum", value)),
        }
    }
}

/// Composed codec for sequences: a document array of converted elements
struct SequenceCodec<'a> {
    inner: Box<dyn ValueCodec + 'a>,
}

impl ValueCodec for SequenceCodec<'_> {
    fn encode(&self, value: &FieldValue) -> Result<DocumentValue> {
        let FieldValue::List(items) = value else {
            return Err(wrong_value("list", value));
        };
        let mut out = Vec::with_capacity(items.len());
        for item in items {
            out.push(self.inner.encode(item)?);
        }
        Ok(DocumentValue::Array(out))
    }

    fn decode(&self, value: &DocumentValue) -> Result<FieldValue> {
        let DocumentValue::Array(items) = value else {
            return Err(mismatch("array", value));
        };
        let mut out = Vec::with_capacity(items.len());
        for item in items {
            out.push(self.inner.decode(item)?);
        }
        Ok(FieldValue::List(out))
    }
}

/// Composed codec for mappings: a sub-document keyed by the map key's
/// canonical string form
struct MappingCodec<'a> {
    key: ScalarKind,
    inner: Box<dyn ValueCodec + 'a>,
}

impl ValueCodec for MappingCodec<'_> {
    fn encode(&self, value: &FieldValue) -> Result<DocumentValue> {
        let FieldValue::Map(entries) = value else {
            return Err(wrong_value("map", value));
        };
        let mut doc = Document::new();
        for (key, entry) in entries {
            doc.insert(key.to_document_key(), self.inner.encode(entry)?);
        }
        Ok(DocumentValue::Document(doc))
    }

    fn decode(&self, value: &DocumentValue) -> Result<FieldValue> {
        let DocumentValue::Document(doc) = value else {
            return Err(mismatch("document", value));
        };
        let mut entries = std::collections::BTreeMap::new();
        for (key, entry) in doc.iter() {
            entries.insert(MapKey::parse(self.key, key)?, self.inner.decode(entry)?);
        }
        Ok(FieldValue::Map(entries))
    }
}

/// Codec for nested messages, recursing through the message codec
struct MessageValueCodec<'a> {
    descriptor: Arc<MessageDescriptor>,
    messages: &'a MessageCodec,
}

impl ValueCodec for MessageValueCodec<'_> {
    fn encode(&self, value: &FieldValue) -> Result<DocumentValue> {
        let FieldValue::Message(msg) = value else {
            return Err(wrong_value(format!("message {}", self.descriptor.name()), value));
        };
        Ok(DocumentValue::Document(self.messages.encode(msg)?))
    }

    fn decode(&self, value: &DocumentValue) -> Result<FieldValue> {
        let DocumentValue::Document(doc) = value else {
            return Err(mismatch("document", value));
        };
        let mut msg = DynamicMessage::new(self.descriptor.clone());
        self.messages.decode(doc, &mut msg)?;
        Ok(FieldValue::Message(msg))
    }
}
