//! Default-Value Checks for Step Bodies
//!
//! A step that changes a field's default usually only wants to rewrite objects
//! whose field was never customized. `property_matches_default` compares one
//! serialized field against the same field of `T::default()`.

use crate::services::error::{MigrationError, Result};
use serde::Serialize;
use serde_json::Value;

/// Whether `object.<property>` still equals the type's default value
///
/// The comparison is done on the serde_json representation, so serde renames
/// apply to `property`.
///
/// # Errors
///
/// - `UnknownProperty`: neither `object` nor `T::default()` serializes the field
/// - `Serialization`: `T` does not serialize to a JSON object
pub fn property_matches_default<T>(object: &T, property: &str) -> Result<bool>
where
    T: Serialize + Default,
{
    let current = to_object(object)?;
    let defaults = to_object(&T::default())?;

    match (current.get(property), defaults.get(property)) {
        (None, None) => Err(MigrationError::unknown_property(property)),
        (current, default) => Ok(current == default),
    }
}

fn to_object<T: Serialize>(value: &T) -> Result<serde_json::Map<String, Value>> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(MigrationError::Serialization(serde::ser::Error::custom(
            format!("expected an object, got {}", other),
        ))),
    }
}
