//! Field key scheme
//!
//! Maps a field's numeric identifier to its document key and back. Keys are
//! derived from field numbers rather than field names, so renaming a field
//! never invalidates previously stored documents: the number, not the name,
//! is the stable identity.

use crate::error::{CodecError, Result};
use crate::schema::FieldNumber;

/// Prefix of every document key written by this codec
pub const FIELD_PREFIX: &str = "pb_field_";

/// Document key for a field number (e.g. field 7 -> "pb_field_7")
pub fn key_of(number: FieldNumber) -> String {
    format!("{}{}", FIELD_PREFIX, number)
}

/// Inverse of [`key_of`].
///
/// Returns `Ok(None)` when the key lacks the field prefix, which marks a
/// foreign element that this codec never wrote and must skip. A key that
/// carries the prefix but no decimal field number is a malformed document.
pub fn field_number_of(key: &str) -> Result<Option<FieldNumber>> {
    let Some(suffix) = key.strip_prefix(FIELD_PREFIX) else {
        return Ok(None);
    };
    suffix
        .parse::<FieldNumber>()
        .map(Some)
        .map_err(|_| CodecError::MalformedKey(key.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_roundtrip() {
        for number in [1, 7, 42, 536_870_911] {
            let key = key_of(number);
            assert_eq!(field_number_of(&key).unwrap(), Some(number));
        }
    }

    #[test]
    fn test_foreign_key_is_skipped() {
        assert_eq!(field_number_of("_id").unwrap(), None);
        assert_eq!(field_number_of("created_at").unwrap(), None);
        assert_eq!(field_number_of("").unwrap(), None);
    }

    #[test]
    fn test_malformed_suffix_is_an_error() {
        assert!(field_number_of("pb_field_").is_err());
        assert!(field_number_of("pb_field_abc").is_err());
        assert!(field_number_of("pb_field_-3").is_err());
    }
}
