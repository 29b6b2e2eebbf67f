//! Error types for the message/document codec

use thiserror::Error;

/// Result type for codec operations
pub type Result<T> = std::result::Result<T, CodecError>;

/// Codec errors
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    #[error("Malformed field key: {0}")]
    MalformedKey(String),

    #[error("No codec registered for type {0}")]
    CodecNotFound(String),

    #[error("Invalid descriptor: {0}")]
    InvalidDescriptor(String),

    #[error("Wrong value for field {field}: expected {expected}, found {found}")]
    WrongValueKind {
        field: String,
        expected: String,
        found: String,
    },

    #[error("Value out of range for {kind}: {value}")]
    OutOfRange { kind: String, value: String },

    #[error("Invalid map key for {kind}: {key:?}")]
    InvalidMapKey { kind: String, key: String },
}
