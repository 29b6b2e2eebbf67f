//! Generic hierarchical documents
//!
//! The schema-less key/value format the codec writes to and reads from.
//! A document is an ordered sequence of (key, value) elements; values are
//! scalars, arrays, or nested documents. Elements are read back in write
//! order, and skipping an element is simply not descending into its value.
//!
//! Both types derive serde support so documents can be persisted through any
//! serde backend.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A value stored under a document key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentValue {
    Double(f64),
    Int32(i32),
    Int64(i64),
    Bool(bool),
    String(String),
    Binary(Vec<u8>),
    Array(Vec<DocumentValue>),
    Document(Document),
}

impl DocumentValue {
    /// Short name of the stored shape, for diagnostics
    pub fn shape_name(&self) -> &'static str {
        match self {
            DocumentValue::Double(_) => "double",
            DocumentValue::Int32(_) => "int32",
            DocumentValue::Int64(_) => "int64",
            DocumentValue::Bool(_) => "bool",
            DocumentValue::String(_) => "string",
            DocumentValue::Binary(_) => "binary",
            DocumentValue::Array(_) => "array",
            DocumentValue::Document(_) => "document",
        }
    }
}

impl fmt::Display for DocumentValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.shape_name())
    }
}

/// An ordered sequence of (key, value) elements
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    elements: Vec<(String, DocumentValue)>,
}

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element
    pub fn insert(&mut self, key: impl Into<String>, value: DocumentValue) {
        self.elements.push((key.into(), value));
    }

    /// First value stored under `key`, if any
    pub fn get(&self, key: &str) -> Option<&DocumentValue> {
        self.elements
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Iterate elements in write order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DocumentValue)> {
        self.elements.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the document has no elements
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl FromIterator<(String, DocumentValue)> for Document {
    fn from_iter<I: IntoIterator<Item = (String, DocumentValue)>>(iter: I) -> Self {
        Self {
            elements: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_preserves_write_order() {
        let mut doc = Document::new();
        doc.insert("b", DocumentValue::Int32(2));
        doc.insert("a", DocumentValue::Int32(1));
        doc.insert("c", DocumentValue::String("x".to_string()));

        let keys: Vec<_> = doc.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
        assert_eq!(doc.get("a"), Some(&DocumentValue::Int32(1)));
        assert_eq!(doc.get("missing"), None);
    }

    #[test]
    fn test_serde_roundtrip() {
        let mut inner = Document::new();
        inner.insert("n", DocumentValue::Int64(-5));

        let mut doc = Document::new();
        doc.insert("d", DocumentValue::Double(1.5));
        doc.insert("bin", DocumentValue::Binary(vec![1, 2, 3]));
        doc.insert(
            "arr",
            DocumentValue::Array(vec![DocumentValue::Bool(true), DocumentValue::Int32(7)]),
        );
        doc.insert("sub", DocumentValue::Document(inner));

        let json = serde_json::to_string(&doc).unwrap();
        let back: Document = serde_json::from_str(&json).unwrap();
        assert_eq!(doc, back);
    }
}
