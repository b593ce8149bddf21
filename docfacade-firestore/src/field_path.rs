//! Field path handling for Firestore update masks and document metadata.

use docfacade_core::{
    document::DocumentData,
    error::{FacadeError, FacadeResult},
};

/// Prefix of the metadata keys the Firestore deserializer injects into every document.
const METADATA_PREFIX: &str = "_firestore_";

/// Key holding the document id among the injected metadata.
pub const DOCUMENT_ID_KEY: &str = "_firestore_id";

/// Field name rules of the Firestore backend.
///
/// Top-level keys starting with `_firestore_` are reserved: they carry the metadata the
/// client attaches to read documents and cannot be stored as user fields.
pub struct FieldPath;

impl FieldPath {
    /// Escapes a top-level field name for use in an update mask.
    ///
    /// Simple names (`[A-Za-z_][A-Za-z0-9_]*`) are used as-is, anything else is quoted
    /// with backticks so dots and other characters are not read as path separators.
    pub fn escape(field: &str) -> String {
        let mut chars = field.chars();
        let simple = match chars.next() {
            Some(first) => {
                (first.is_ascii_alphabetic() || first == '_')
                    && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
            }
            None => false,
        };

        if simple {
            return field.to_string();
        }

        format!("`{}`", field.replace('\\', "\\\\").replace('`', "\\`"))
    }

    /// Rejects documents holding fields under the reserved metadata prefix.
    pub fn check_reserved(data: &DocumentData) -> FacadeResult<()> {
        match data.keys().find(|key| key.starts_with(METADATA_PREFIX)) {
            Some(key) => Err(FacadeError::Validation(format!(
                "field '{key}' uses the reserved prefix '{METADATA_PREFIX}'"
            ))),
            None => Ok(()),
        }
    }

    /// Removes the injected metadata keys, returning the document id if present.
    pub fn strip_metadata(data: &mut DocumentData) -> Option<String> {
        let id = data
            .get(DOCUMENT_ID_KEY)
            .and_then(|value| value.as_str())
            .map(str::to_string);

        data.retain(|key, _| !key.starts_with(METADATA_PREFIX));

        id
    }
}
