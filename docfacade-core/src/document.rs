//! Document data representation and conversions.
//!
//! Documents are schemaless JSON objects. Any `Serialize` value can be written as long as
//! it serializes to a JSON object; reads hand back the raw [`DocumentData`] or decode it
//! into a caller-chosen type.

use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Map, Value, from_value, to_value};
use std::collections::BTreeMap;

use crate::error::{FacadeError, FacadeResult};

/// The content of a single document: an unordered string-keyed mapping to JSON values.
pub type DocumentData = Map<String, Value>;

/// Every document of a collection keyed by document id (the last path segment).
pub type CollectionSnapshot = BTreeMap<String, DocumentData>;

/// Converts a serializable value into [`DocumentData`].
///
/// # Errors
///
/// Returns [`FacadeError::Validation`] if the value cannot be serialized or does not
/// serialize to a JSON object.
pub fn to_document_data<T>(data: &T) -> FacadeResult<DocumentData>
where
    T: Serialize + ?Sized,
{
    match to_value(data).map_err(|e| FacadeError::Validation(e.to_string()))? {
        Value::Object(map) => Ok(map),
        other => Err(FacadeError::Validation(format!(
            "document data must be an object, got {}",
            value_kind(&other)
        ))),
    }
}

/// Decodes [`DocumentData`] into a concrete type.
///
/// # Errors
///
/// Returns [`FacadeError::Serialization`] if the data does not match the target type.
pub fn from_document_data<T>(data: DocumentData) -> FacadeResult<T>
where
    T: DeserializeOwned,
{
    Ok(from_value(Value::Object(data))?)
}

/// Merges the top-level fields of `patch` into `target`.
///
/// Fields present in `patch` replace the stored value, all other fields are kept.
pub fn merge_fields(target: &mut DocumentData, patch: DocumentData) {
    for (field, value) in patch {
        target.insert(field, value);
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
