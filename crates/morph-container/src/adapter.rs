//! Container adapters
//!
//! Each supported shape converts to a [`CanonicalContainer`] and back.

use indexmap::IndexMap;
use morph_mutation::ContainerKind;
use serde_json::Value as JsonValue;

use crate::canonical::CanonicalContainer;
use crate::error::ContainerError;
use crate::record::RecordValue;
use crate::set::ValueSet;

/// String-keyed map, insertion ordered
pub type Mapping = IndexMap<String, JsonValue>;

/// Ordered list
pub type Sequence = Vec<JsonValue>;

/// Bidirectional conversion to the canonical form
///
/// # Contract
/// - `restore(canonicalize(x)) == x` for every supported `x` (sets compare
///   as sets)
/// - `restore` takes `self` as the template the canonical form came from,
///   which records need for their schema
pub trait ContainerAdapter: Sized {
    /// Container kind this shape maps to
    fn kind(&self) -> ContainerKind;

    /// Convert to the canonical keyed form
    ///
    /// # Errors
    /// Returns error if the value cannot be represented
    fn canonicalize(&self) -> Result<CanonicalContainer, ContainerError>;

    /// Rebuild this shape from a (possibly mutated) canonical form
    ///
    /// # Errors
    /// Returns error if the canonical form belongs to another kind or the
    /// rebuilt value violates this shape's constraints
    fn restore(&self, canonical: CanonicalContainer) -> Result<Self, ContainerError>;
}

impl ContainerAdapter for Mapping {
    fn kind(&self) -> ContainerKind {
        ContainerKind::Mapping
    }

    fn canonicalize(&self) -> Result<CanonicalContainer, ContainerError> {
        Ok(CanonicalContainer::named(
            ContainerKind::Mapping,
            self.iter().map(|(k, v)| (k.clone(), v.clone())),
        ))
    }

    fn restore(&self, canonical: CanonicalContainer) -> Result<Self, ContainerError> {
        canonical.expect_kind(ContainerKind::Mapping)?;
        Ok(canonical.into_named().collect())
    }
}

impl ContainerAdapter for ValueSet {
    fn kind(&self) -> ContainerKind {
        ContainerKind::Set
    }

    fn canonicalize(&self) -> Result<CanonicalContainer, ContainerError> {
        Ok(CanonicalContainer::indexed(
            ContainerKind::Set,
            self.iter().cloned(),
        ))
    }

    fn restore(&self, canonical: CanonicalContainer) -> Result<Self, ContainerError> {
        canonical.expect_kind(ContainerKind::Set)?;
        Ok(canonical.into_values_by_index().into_iter().collect())
    }
}

impl ContainerAdapter for Sequence {
    fn kind(&self) -> ContainerKind {
        ContainerKind::Sequence
    }

    fn canonicalize(&self) -> Result<CanonicalContainer, ContainerError> {
        Ok(CanonicalContainer::indexed(
            ContainerKind::Sequence,
            self.iter().cloned(),
        ))
    }

    fn restore(&self, canonical: CanonicalContainer) -> Result<Self, ContainerError> {
        canonical.expect_kind(ContainerKind::Sequence)?;
        Ok(canonical.into_values_by_index())
    }
}

impl ContainerAdapter for RecordValue {
    fn kind(&self) -> ContainerKind {
        ContainerKind::Record
    }

    fn canonicalize(&self) -> Result<CanonicalContainer, ContainerError> {
        Ok(CanonicalContainer::named(
            ContainerKind::Record,
            self.fields().iter().map(|(k, v)| (k.clone(), v.clone())),
        ))
    }

    fn restore(&self, canonical: CanonicalContainer) -> Result<Self, ContainerError> {
        canonical.expect_kind(ContainerKind::Record)?;
        self.with_fields(canonical.into_named().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canonical::CanonicalKey;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use serde_json::json;

    fn scalar() -> impl Strategy<Value = JsonValue> {
        prop_oneof![
            any::<bool>().prop_map(JsonValue::from),
            any::<i64>().prop_map(JsonValue::from),
            "[a-z]{0,8}".prop_map(JsonValue::from),
        ]
    }

    #[test]
    fn mapping_canonical_form_is_identity() {
        let mut mapping = Mapping::new();
        mapping.insert("a".to_string(), json!(1));
        mapping.insert("b".to_string(), json!(2));

        let canonical = mapping.canonicalize().unwrap();
        assert_eq!(canonical.get(&"a".into()), Some(&json!(1)));
        assert_eq!(mapping.restore(canonical).unwrap(), mapping);
    }

    #[test]
    fn set_enumerates_with_positions() {
        let set: ValueSet = vec![json!("x"), json!("y")].into_iter().collect();
        let canonical = set.canonicalize().unwrap();
        assert_eq!(canonical.get(&CanonicalKey::Index(0)), Some(&json!("x")));
        assert_eq!(canonical.get(&CanonicalKey::Index(1)), Some(&json!("y")));
    }

    #[test]
    fn set_restore_deduplicates() {
        let set: ValueSet = vec![json!("x")].into_iter().collect();
        let mut canonical = set.canonicalize().unwrap();
        canonical.insert(CanonicalKey::Index(1), json!("x"));
        assert_eq!(set.restore(canonical).unwrap().len(), 1);
    }

    #[test]
    fn restore_rejects_foreign_kind() {
        let sequence: Sequence = vec![json!(1)];
        let foreign = CanonicalContainer::new(ContainerKind::Set);
        assert!(matches!(
            sequence.restore(foreign),
            Err(ContainerError::KindMismatch { .. })
        ));
    }

    proptest! {
        #[test]
        fn prop_sequence_round_trip(values in prop::collection::vec(scalar(), 0..16)) {
            let canonical = values.canonicalize().unwrap();
            prop_assert_eq!(canonical.len(), values.len());
            prop_assert_eq!(values.restore(canonical).unwrap(), values);
        }

        #[test]
        fn prop_set_round_trip(values in prop::collection::vec(scalar(), 0..16)) {
            let set: ValueSet = values.into_iter().collect();
            let restored = set.restore(set.canonicalize().unwrap()).unwrap();
            prop_assert_eq!(restored, set);
        }

        #[test]
        fn prop_mapping_round_trip(entries in prop::collection::vec(("[a-z]{1,6}", scalar()), 0..16)) {
            let mapping: Mapping = entries.into_iter().collect();
            let restored = mapping.restore(mapping.canonicalize().unwrap()).unwrap();
            prop_assert_eq!(restored, mapping);
        }
    }
}
