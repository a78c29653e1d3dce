//! Closed container union
//!
//! [`Container`] is the single dispatch point over the four supported shapes.

use morph_mutation::ContainerKind;
use serde_json::Value as JsonValue;

use crate::adapter::{ContainerAdapter, Mapping, Sequence};
use crate::canonical::CanonicalContainer;
use crate::error::ContainerError;
use crate::record::{Record, RecordValue};
use crate::set::ValueSet;

/// Any supported container
#[derive(Debug, Clone, PartialEq)]
pub enum Container {
    Mapping(Mapping),
    Set(ValueSet),
    Sequence(Sequence),
    Record(RecordValue),
}

impl Container {
    /// Classify a JSON value
    ///
    /// Objects become mappings and arrays become sequences. Sets and records
    /// have no JSON-native form and must be built explicitly.
    ///
    /// # Errors
    /// Returns [`ContainerError::UnsupportedType`] for scalars and null
    pub fn from_json(value: JsonValue) -> Result<Self, ContainerError> {
        match value {
            JsonValue::Object(map) => Ok(Self::Mapping(map.into_iter().collect())),
            JsonValue::Array(items) => Ok(Self::Sequence(items)),
            other => Err(ContainerError::unsupported(&other)),
        }
    }

    /// Wrap a typed record together with its schema
    ///
    /// # Errors
    /// Returns error if the record does not serialize to an object
    pub fn record<R: Record>(record: &R) -> Result<Self, ContainerError> {
        RecordValue::from_typed(record).map(Self::Record)
    }

    /// Plain JSON view (sets render as arrays, records as objects)
    #[must_use]
    pub fn to_json(&self) -> JsonValue {
        match self {
            Self::Mapping(map) => JsonValue::Object(
                map.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
            ),
            Self::Set(set) => JsonValue::Array(set.iter().cloned().collect()),
            Self::Sequence(items) => JsonValue::Array(items.clone()),
            Self::Record(record) => JsonValue::Object(record.fields().clone()),
        }
    }
}

impl ContainerAdapter for Container {
    fn kind(&self) -> ContainerKind {
        match self {
            Self::Mapping(_) => ContainerKind::Mapping,
            Self::Set(_) => ContainerKind::Set,
            Self::Sequence(_) => ContainerKind::Sequence,
            Self::Record(_) => ContainerKind::Record,
        }
    }

    fn canonicalize(&self) -> Result<CanonicalContainer, ContainerError> {
        match self {
            Self::Mapping(map) => map.canonicalize(),
            Self::Set(set) => set.canonicalize(),
            Self::Sequence(items) => items.canonicalize(),
            Self::Record(record) => record.canonicalize(),
        }
    }

    fn restore(&self, canonical: CanonicalContainer) -> Result<Self, ContainerError> {
        match self {
            Self::Mapping(map) => map.restore(canonical).map(Self::Mapping),
            Self::Set(set) => set.restore(canonical).map(Self::Set),
            Self::Sequence(items) => items.restore(canonical).map(Self::Sequence),
            Self::Record(record) => record.restore(canonical).map(Self::Record),
        }
    }
}

impl From<Mapping> for Container {
    fn from(map: Mapping) -> Self {
        Self::Mapping(map)
    }
}

impl From<ValueSet> for Container {
    fn from(set: ValueSet) -> Self {
        Self::Set(set)
    }
}

impl From<Sequence> for Container {
    fn from(items: Sequence) -> Self {
        Self::Sequence(items)
    }
}

impl From<RecordValue> for Container {
    fn from(record: RecordValue) -> Self {
        Self::Record(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_json_classifies_shapes() {
        let mapping = Container::from_json(json!({"a": 1})).unwrap();
        assert_eq!(mapping.kind(), ContainerKind::Mapping);

        let sequence = Container::from_json(json!([1, 2])).unwrap();
        assert_eq!(sequence.kind(), ContainerKind::Sequence);
    }

    #[test]
    fn from_json_rejects_scalars() {
        for value in [json!(1), json!("s"), json!(true), JsonValue::Null] {
            assert!(matches!(
                Container::from_json(value),
                Err(ContainerError::UnsupportedType { .. })
            ));
        }
    }

    #[test]
    fn restore_keeps_variant() {
        let set: ValueSet = vec![json!("x"), json!("y")].into_iter().collect();
        let container = Container::from(set);
        let canonical = container.canonicalize().unwrap();
        assert_eq!(container.restore(canonical).unwrap(), container);
    }

    #[derive(Debug, serde::Serialize, serde::Deserialize, schemars::JsonSchema)]
    struct Note {
        title: String,
        pinned: bool,
    }

    #[test]
    fn record_carries_its_schema() {
        let note = Note { title: "draft".to_string(), pinned: false };
        let container = Container::record(&note).unwrap();
        assert_eq!(container.kind(), ContainerKind::Record);
        assert_eq!(container.to_json(), json!({"title": "draft", "pinned": false}));

        let Container::Record(record) = container else {
            panic!("expected a record");
        };
        let mut fields = record.fields().clone();
        fields.insert("pinned".to_string(), json!("yes"));
        assert!(record.with_fields(fields).unwrap_err().is_validation());
    }

    #[test]
    fn to_json_views() {
        let set: ValueSet = vec![json!("y"), json!("x")].into_iter().collect();
        assert_eq!(Container::from(set).to_json(), json!(["x", "y"]));
        assert_eq!(
            Container::from_json(json!({"a": 1})).unwrap().to_json(),
            json!({"a": 1})
        );
    }
}
