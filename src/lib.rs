//! Protodoc
//!
//! A bidirectional codec between schema-typed messages (field number, name,
//! kind, cardinality) and a generic hierarchical document format, built so
//! that stored documents survive independent schema evolution on the read
//! and write sides.
//!
//! ## Features
//!
//! - **Rename-proof keys**: document keys derive from field numbers, never
//!   field names, so renaming a field keeps old documents readable
//! - **Cardinality emulation**: a field may change between singular and
//!   repeated without breaking stored documents; the decoder retries under
//!   the opposite cardinality and adapts the result
//! - **Unknown-field tolerance**: elements for deleted or foreign fields are
//!   skipped, never failed on
//! - **Default omission**: fields at their exact default are never written,
//!   keeping absence and default indistinguishable downstream
//!
//! ## Architecture
//!
//! ```text
//! MessageCodec
//! ├── FieldEncoder ── one present field -> one document element
//! ├── FieldDecoder ── one element -> one field value
//! │   └── DirectDecode -> EmulatedDecode -> Fail(original error)
//! ├── bridge ──────── field descriptor -> concrete representation type
//! └── CodecRegistry ─ representation type -> value codec
//!     └── scalar / enum / sequence / mapping / message codecs
//! ```

pub mod bridge;
pub mod codec;
pub mod document;
pub mod error;
pub mod key;
pub mod message;
pub mod registry;
pub mod schema;
pub mod value;

pub use codec::MessageCodec;
pub use document::{Document, DocumentValue};
pub use error::{CodecError, Result};
pub use message::DynamicMessage;
pub use registry::{CodecRegistry, ConcreteType, ValueCodec};
pub use schema::{
    EnumDescriptor, FieldDescriptor, FieldKind, FieldNumber, MessageDescriptor, ScalarKind,
};
pub use value::{FieldValue, MapKey, ScalarValue};
