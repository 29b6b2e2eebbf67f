//! Field values
//!
//! The tagged value union exchanged between the message codec and the
//! per-field encoders/decoders. Every schema field kind has a corresponding
//! variant; list and map variants carry their elements/entries directly.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::{CodecError, Result};
use crate::message::DynamicMessage;
use crate::schema::{FieldKind, ScalarKind};

/// A scalar field value
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    Double(f64),
    Float(f32),
    Int32(i32),
    Int64(i64),
    Uint32(u32),
    Uint64(u64),
    Bool(bool),
    String(String),
    Bytes(Vec<u8>),
}

impl ScalarValue {
    /// The kind this value belongs to
    pub fn kind(&self) -> ScalarKind {
        match self {
            ScalarValue::Double(_) => ScalarKind::Double,
            ScalarValue::Float(_) => ScalarKind::Float,
            ScalarValue::Int32(_) => ScalarKind::Int32,
            ScalarValue::Int64(_) => ScalarKind::Int64,
            ScalarValue::Uint32(_) => ScalarKind::Uint32,
            ScalarValue::Uint64(_) => ScalarKind::Uint64,
            ScalarValue::Bool(_) => ScalarKind::Bool,
            ScalarValue::String(_) => ScalarKind::String,
            ScalarValue::Bytes(_) => ScalarKind::Bytes,
        }
    }

    /// The zero value of a scalar kind
    pub fn default_of(kind: ScalarKind) -> Self {
        match kind {
            ScalarKind::Double => ScalarValue::Double(0.0),
            ScalarKind::Float => ScalarValue::Float(0.0),
            ScalarKind::Int32 => ScalarValue::Int32(0),
            ScalarKind::Int64 => ScalarValue::Int64(0),
            ScalarKind::Uint32 => ScalarValue::Uint32(0),
            ScalarKind::Uint64 => ScalarValue::Uint64(0),
            ScalarKind::Bool => ScalarValue::Bool(false),
            ScalarKind::String => ScalarValue::String(String::new()),
            ScalarKind::Bytes => ScalarValue::Bytes(Vec::new()),
        }
    }

    /// Whether this value equals the zero value of its kind
    pub fn is_default(&self) -> bool {
        match self {
            ScalarValue::Double(v) => *v == 0.0,
            ScalarValue::Float(v) => *v == 0.0,
            ScalarValue::Int32(v) => *v == 0,
            ScalarValue::Int64(v) => *v == 0,
            ScalarValue::Uint32(v) => *v == 0,
            ScalarValue::Uint64(v) => *v == 0,
            ScalarValue::Bool(v) => !v,
            ScalarValue::String(v) => v.is_empty(),
            ScalarValue::Bytes(v) => v.is_empty(),
        }
    }
}

/// A map field key, totally ordered so map entries have a stable iteration
/// order
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MapKey {
    Int32(i32),
    Int64(i64),
    Uint32(u32),
    Uint64(u64),
    Bool(bool),
    String(String),
}

impl MapKey {
    /// The scalar kind this key belongs to
    pub fn kind(&self) -> ScalarKind {
        match self {
            MapKey::Int32(_) => ScalarKind::Int32,
            MapKey::Int64(_) => ScalarKind::Int64,
            MapKey::Uint32(_) => ScalarKind::Uint32,
            MapKey::Uint64(_) => ScalarKind::Uint64,
            MapKey::Bool(_) => ScalarKind::Bool,
            MapKey::String(_) => ScalarKind::String,
        }
    }

    /// Canonical document-key form of this map key
    pub fn to_document_key(&self) -> String {
        match self {
            MapKey::Int32(v) => v.to_string(),
            MapKey::Int64(v) => v.to_string(),
            MapKey::Uint32(v) => v.to_string(),
            MapKey::Uint64(v) => v.to_string(),
            MapKey::Bool(v) => v.to_string(),
            MapKey::String(v) => v.clone(),
        }
    }

    /// Parse a document key back into a map key of the given kind
    pub fn parse(kind: ScalarKind, key: &str) -> Result<Self> {
        let invalid = || CodecError::InvalidMapKey {
            kind: kind.to_string(),
            key: key.to_string(),
        };
        match kind {
            ScalarKind::Int32 => key.parse().map(MapKey::Int32).map_err(|_| invalid()),
            ScalarKind::Int64 => key.parse().map(MapKey::Int64).map_err(|_| invalid()),
            ScalarKind::Uint32 => key.parse().map(MapKey::Uint32).map_err(|_| invalid()),
            ScalarKind::Uint64 => key.parse().map(MapKey::Uint64).map_err(|_| invalid()),
            ScalarKind::Bool => key.parse().map(MapKey::Bool).map_err(|_| invalid()),
            ScalarKind::String => Ok(MapKey::String(key.to_string())),
            _ => Err(invalid()),
        }
    }
}

/// A generic field value: the unit exchanged between the message codec and
/// the field encoder/decoder
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Scalar(ScalarValue),
    /// Enum number; unknown numbers are preserved as-is
    Enum(i32),
    Message(DynamicMessage),
    List(Vec<FieldValue>),
    Map(BTreeMap<MapKey, FieldValue>),
}

impl FieldValue {
    /// Short name of the variant, for diagnostics
    pub fn kind_name(&self) -> &'static str {
        match self {
            FieldValue::Scalar(_) => "scalar",
            FieldValue::Enum(_) => "enum",
            FieldValue::Message(_) => "message",
            FieldValue::List(_) => "list",
            FieldValue::Map(_) => "map",
        }
    }

    /// Whether this value carries implicit presence and equals its default
    ///
    /// Message values are excluded: message fields have explicit presence,
    /// so an empty submessage still counts as present.
    pub fn is_implicit_default(&self) -> bool {
        match self {
            FieldValue::Scalar(v) => v.is_default(),
            FieldValue::Enum(n) => *n == 0,
            FieldValue::Message(_) => false,
            FieldValue::List(items) => items.is_empty(),
            FieldValue::Map(entries) => entries.is_empty(),
        }
    }

    /// Check that this value is admissible for a field of the given kind
    pub fn conforms_to(&self, kind: &FieldKind) -> bool {
        match (self, kind) {
            (FieldValue::Scalar(v), FieldKind::Scalar(k)) => v.kind() == *k,
            (FieldValue::Enum(_), FieldKind::Enum(_)) => true,
            (FieldValue::Message(m), FieldKind::Message(desc)) => {
                m.descriptor().name() == desc.name()
            }
            (FieldValue::List(items), FieldKind::List(element)) => {
                items.iter().all(|v| v.conforms_to(element))
            }
            (FieldValue::Map(entries), FieldKind::Map { key, value }) => entries
                .iter()
                .all(|(k, v)| k.kind() == *key && v.conforms_to(value)),
            _ => false,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind_name())
    }
}

impl From<ScalarValue> for FieldValue {
    fn from(value: ScalarValue) -> Self {
        FieldValue::Scalar(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldKind, ScalarKind};

    #[test]
    fn test_scalar_defaults() {
        for kind in [
            ScalarKind::Double,
            ScalarKind::Float,
            ScalarKind::Int32,
            ScalarKind::Int64,
            ScalarKind::Uint32,
            ScalarKind::Uint64,
            ScalarKind::Bool,
            ScalarKind::String,
            ScalarKind::Bytes,
        ] {
            let default = ScalarValue::default_of(kind);
            assert_eq!(default.kind(), kind);
            assert!(default.is_default());
        }
        assert!(!ScalarValue::Int32(5).is_default());
        assert!(!ScalarValue::Bool(true).is_default());
    }

    #[test]
    fn test_map_key_roundtrip() {
        let keys = [
            (ScalarKind::Int32, MapKey::Int32(-7)),
            (ScalarKind::Uint64, MapKey::Uint64(u64::MAX)),
            (ScalarKind::Bool, MapKey::Bool(true)),
            (ScalarKind::String, MapKey::String("k".to_string())),
        ];
        for (kind, key) in keys {
            let doc_key = key.to_document_key();
            assert_eq!(MapKey::parse(kind, &doc_key).unwrap(), key);
        }
    }

    #[test]
    fn test_map_key_parse_rejects_garbage() {
        assert!(MapKey::parse(ScalarKind::Int32, "x").is_err());
        assert!(MapKey::parse(ScalarKind::Bool, "2").is_err());
        assert!(MapKey::parse(ScalarKind::Double, "1.0").is_err());
    }

    #[test]
    fn test_conforms_to() {
        let int_list = FieldKind::List(Box::new(FieldKind::Scalar(ScalarKind::Int32)));
        let good = FieldValue::List(vec![
            FieldValue::Scalar(ScalarValue::Int32(1)),
            FieldValue::Scalar(ScalarValue::Int32(2)),
        ]);
        let bad = FieldValue::List(vec![FieldValue::Scalar(ScalarValue::String(
            "x".to_string(),
        ))]);
        assert!(good.conforms_to(&int_list));
        assert!(!bad.conforms_to(&int_list));
        assert!(!good.conforms_to(&FieldKind::Scalar(ScalarKind::Int32)));
    }

    #[test]
    fn test_implicit_defaults() {
        assert!(FieldValue::Enum(0).is_implicit_default());
        assert!(!FieldValue::Enum(2).is_implicit_default());
        assert!(FieldValue::List(Vec::new()).is_implicit_default());
        assert!(FieldValue::Map(BTreeMap::new()).is_implicit_default());
    }
}
