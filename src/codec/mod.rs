//! Message codec
//!
//! Orchestrates the per-field encoder and decoder over whole messages. The
//! write path visits every present field (defaults are never written, so
//! absence and default stay indistinguishable downstream); the read path
//! visits every document element, silently skipping elements whose key does
//! not resolve to a field of the target schema.

mod decode;
mod encode;

use std::sync::Arc;

use tracing::trace;

use crate::document::Document;
use crate::error::Result;
use crate::key;
use crate::message::DynamicMessage;
use crate::registry::CodecRegistry;

use decode::FieldDecoder;
use encode::FieldEncoder;

/// Bidirectional codec between dynamic messages and documents
pub struct MessageCodec {
    registry: Arc<CodecRegistry>,
}

impl MessageCodec {
    /// Create a codec over the built-in value codecs
    pub fn new() -> Self {
        Self::with_registry(Arc::new(CodecRegistry::new()))
    }

    /// Create a codec over a caller-supplied registry
    pub fn with_registry(registry: Arc<CodecRegistry>) -> Self {
        Self { registry }
    }

    /// The value codec registry this codec dispatches through
    pub fn registry(&self) -> &CodecRegistry {
        &self.registry
    }

    /// Encode every present field of `message` into a document
    ///
    /// Fails atomically: any field failure aborts the call.
    pub fn encode(&self, message: &DynamicMessage) -> Result<Document> {
        let encoder = FieldEncoder::new(self);
        let mut document = Document::new();
        for (field, value) in message.present_fields() {
            encoder.encode_field(field, value, &mut document)?;
        }
        Ok(document)
    }

    /// Decode a document into `message`, mutating it in place
    ///
    /// Elements whose key was not produced by this codec, or whose field
    /// number is unknown to the target schema, are skipped. A field that
    /// fails both decode passes aborts the call; fields decoded before the
    /// failure are left in place.
    pub fn decode(&self, document: &Document, message: &mut DynamicMessage) -> Result<()> {
        let decoder = FieldDecoder::new(self);
        let descriptor = message.descriptor().clone();
        for (doc_key, value) in document.iter() {
            let Some(number) = key::field_number_of(doc_key)? else {
                trace!(key = doc_key, "skipping foreign document element");
                continue;
            };
            let Some(field) = descriptor.field(number) else {
                trace!(number, "skipping element for unknown field");
                continue;
            };
            decoder.decode_element(field, value, message)?;
        }
        Ok(())
    }
}

impl Default for MessageCodec {
    fn default() -> Self {
        Self::new()
    }
}
