//! Record containers
//!
//! Records are fixed-schema objects. Typed records are any
//! `Serialize + DeserializeOwned + JsonSchema` type; [`RecordValue`] carries a
//! record's fields together with its JSON schema when no Rust type is at hand.

use jsonschema::JSONSchema;
use morph_mutation::ContainerKind;
use schemars::{schema_for, JsonSchema};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value as JsonValue};

use crate::canonical::CanonicalContainer;
use crate::error::ContainerError;

/// Typed record that can be flattened to fields and rebuilt from them
pub trait Record: Serialize + DeserializeOwned + JsonSchema {}

impl<T: Serialize + DeserializeOwned + JsonSchema> Record for T {}

/// Flatten a typed record into its top-level fields
///
/// # Errors
/// Returns [`ContainerError::UnsupportedType`] if the record does not
/// serialize to an object
pub fn record_fields<R: Serialize>(record: &R) -> Result<Map<String, JsonValue>, ContainerError> {
    match serde_json::to_value(record)? {
        JsonValue::Object(fields) => Ok(fields),
        other => Err(ContainerError::unsupported(&other)),
    }
}

/// JSON schema of a typed record
///
/// # Errors
/// Returns error if the schema cannot be serialized
pub fn record_schema<R: JsonSchema>() -> Result<JsonValue, ContainerError> {
    Ok(serde_json::to_value(schema_for!(R))?)
}

/// Canonicalize a typed record (one level; nested values stay opaque)
///
/// # Errors
/// Returns error if the record does not serialize to an object
pub fn canonicalize_record<R: Serialize>(record: &R) -> Result<CanonicalContainer, ContainerError> {
    Ok(CanonicalContainer::named(
        ContainerKind::Record,
        record_fields(record)?,
    ))
}

/// Rebuild a typed record from its mutated canonical form
///
/// # Errors
/// Returns [`ContainerError::Validation`] if the fields no longer satisfy
/// the record type
pub fn restore_record<R: DeserializeOwned>(canonical: CanonicalContainer) -> Result<R, ContainerError> {
    canonical.expect_kind(ContainerKind::Record)?;
    let fields: Map<String, JsonValue> = canonical.into_named().collect();
    serde_json::from_value(JsonValue::Object(fields)).map_err(|e| ContainerError::Validation {
        reason: e.to_string(),
    })
}

/// Record fields plus the schema they must satisfy
#[derive(Debug, Clone, PartialEq)]
pub struct RecordValue {
    fields: Map<String, JsonValue>,
    schema: JsonValue,
}

impl RecordValue {
    /// Create from fields and schema, validating the fields
    ///
    /// # Errors
    /// Returns error if the schema is invalid or the fields violate it
    pub fn new(fields: Map<String, JsonValue>, schema: JsonValue) -> Result<Self, ContainerError> {
        let record = Self { fields, schema };
        record.validate()?;
        Ok(record)
    }

    /// Capture a typed record and its derived schema
    ///
    /// # Errors
    /// Returns error if the record does not serialize to an object
    pub fn from_typed<R: Record>(record: &R) -> Result<Self, ContainerError> {
        Ok(Self {
            fields: record_fields(record)?,
            schema: record_schema::<R>()?,
        })
    }

    #[inline]
    #[must_use]
    pub fn fields(&self) -> &Map<String, JsonValue> {
        &self.fields
    }

    #[inline]
    #[must_use]
    pub fn schema(&self) -> &JsonValue {
        &self.schema
    }

    #[inline]
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&JsonValue> {
        self.fields.get(field)
    }

    /// Convert to a typed record
    ///
    /// # Errors
    /// Returns [`ContainerError::Validation`] if the fields don't fit `R`
    pub fn to_typed<R: DeserializeOwned>(&self) -> Result<R, ContainerError> {
        serde_json::from_value(JsonValue::Object(self.fields.clone())).map_err(|e| {
            ContainerError::Validation {
                reason: e.to_string(),
            }
        })
    }

    /// Same schema, new fields; validated
    ///
    /// # Errors
    /// Returns [`ContainerError::Validation`] if the fields violate the schema
    pub fn with_fields(&self, fields: Map<String, JsonValue>) -> Result<Self, ContainerError> {
        Self::new(fields, self.schema.clone())
    }

    /// Validate fields against the schema
    ///
    /// # Errors
    /// Returns error if the schema is invalid or any constraint fails
    pub fn validate(&self) -> Result<(), ContainerError> {
        let compiled = JSONSchema::compile(&self.schema)
            .map_err(|e| ContainerError::InvalidSchema(e.to_string()))?;
        let instance = JsonValue::Object(self.fields.clone());

        let reasons: Vec<String> = match compiled.validate(&instance) {
            Ok(()) => return Ok(()),
            Err(errors) => errors.map(|e| e.to_string()).collect(),
        };
        Err(ContainerError::Validation {
            reason: reasons.join("; "),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
    struct Person {
        name: String,
        age: u32,
        color: String,
        is_student: bool,
    }

    fn john() -> Person {
        Person {
            name: "John".to_string(),
            age: 25,
            color: "blue".to_string(),
            is_student: true,
        }
    }

    #[test]
    fn typed_record_round_trip() {
        let canonical = canonicalize_record(&john()).unwrap();
        assert_eq!(canonical.len(), 4);
        let restored: Person = restore_record(canonical).unwrap();
        assert_eq!(restored, john());
    }

    #[test]
    fn typed_restore_rejects_wrong_field_type() {
        let mut canonical = canonicalize_record(&john()).unwrap();
        canonical.insert("age".into(), json!("twenty"));
        let err = restore_record::<Person>(canonical).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn typed_restore_rejects_missing_field() {
        let mut canonical = canonicalize_record(&john()).unwrap();
        canonical.remove(&"color".into());
        assert!(restore_record::<Person>(canonical).unwrap_err().is_validation());
    }

    #[test]
    fn non_object_record_is_unsupported() {
        let err = canonicalize_record(&vec![1, 2]).unwrap_err();
        assert!(matches!(err, ContainerError::UnsupportedType { .. }));
    }

    #[test]
    fn record_value_validates_against_schema() {
        let record = RecordValue::from_typed(&john()).unwrap();
        assert!(record.validate().is_ok());

        let mut fields = record.fields().clone();
        fields.insert("is_student".to_string(), json!("no"));
        let err = record.with_fields(fields).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn record_value_requires_required_fields() {
        let record = RecordValue::from_typed(&john()).unwrap();
        let mut fields = record.fields().clone();
        fields.remove("name");
        assert!(record.with_fields(fields).unwrap_err().is_validation());
    }

    #[test]
    fn record_value_to_typed() {
        let record = RecordValue::from_typed(&john()).unwrap();
        assert_eq!(record.get("name"), Some(&json!("John")));
        assert_eq!(record.to_typed::<Person>().unwrap(), john());
    }

    #[test]
    fn hand_written_schema() {
        let schema = json!({
            "type": "object",
            "properties": {"title": {"type": "string"}},
            "required": ["title"]
        });
        let mut fields = Map::new();
        fields.insert("title".to_string(), json!("draft"));
        assert!(RecordValue::new(fields, schema.clone()).is_ok());
        assert!(RecordValue::new(Map::new(), schema).is_err());
    }
}
