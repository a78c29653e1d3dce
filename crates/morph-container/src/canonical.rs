//! Canonical container
//!
//! The uniform key → value form every container shape is converted to before
//! mutation and back from afterwards.

use indexmap::IndexMap;
use morph_mutation::{ContainerKind, MutationKey};
use serde_json::{Map, Value as JsonValue};

use crate::error::ContainerError;

/// Canonical keys share the mutation key representation
pub type CanonicalKey = MutationKey;

/// Insertion-ordered key → value working form
///
/// Mappings and records use [`CanonicalKey::Name`], sets and sequences use
/// [`CanonicalKey::Index`]. Removing an entry never renumbers the others, so
/// positions keep meaning what the proposer was shown.
///
/// Fresh keys come from a high-water mark that only grows: a key handed out
/// or removed once is never handed out again.
#[derive(Debug, Clone)]
pub struct CanonicalContainer {
    kind: ContainerKind,
    entries: IndexMap<CanonicalKey, JsonValue>,
    high_water: usize,
}

impl CanonicalContainer {
    /// Create empty canonical form
    #[inline]
    #[must_use]
    pub fn new(kind: ContainerKind) -> Self {
        Self {
            kind,
            entries: IndexMap::new(),
            high_water: 0,
        }
    }

    /// Build from name → value pairs
    #[must_use]
    pub fn named(kind: ContainerKind, entries: impl IntoIterator<Item = (String, JsonValue)>) -> Self {
        Self::from_entries(
            kind,
            entries
                .into_iter()
                .map(|(name, value)| (CanonicalKey::Name(name), value))
                .collect(),
        )
    }

    /// Build from values, assigning positions `0..n`
    #[must_use]
    pub fn indexed(kind: ContainerKind, values: impl IntoIterator<Item = JsonValue>) -> Self {
        Self::from_entries(
            kind,
            values
                .into_iter()
                .enumerate()
                .map(|(index, value)| (CanonicalKey::Index(index), value))
                .collect(),
        )
    }

    fn from_entries(kind: ContainerKind, entries: IndexMap<CanonicalKey, JsonValue>) -> Self {
        let high_water = entries
            .keys()
            .filter_map(key_position)
            .map(|position| position.saturating_add(1))
            .fold(entries.len(), usize::max);
        Self {
            kind,
            entries,
            high_water,
        }
    }

    /// Container kind this form was built from
    #[inline]
    #[must_use]
    pub fn kind(&self) -> ContainerKind {
        self.kind
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn get(&self, key: &CanonicalKey) -> Option<&JsonValue> {
        self.entries.get(key)
    }

    #[inline]
    #[must_use]
    pub fn contains_key(&self, key: &CanonicalKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Insert or overwrite, returning the previous value
    #[inline]
    pub fn insert(&mut self, key: CanonicalKey, value: JsonValue) -> Option<JsonValue> {
        if let Some(position) = key_position(&key) {
            self.high_water = self.high_water.max(position.saturating_add(1));
        }
        self.entries.insert(key, value)
    }

    /// Remove an entry, keeping the order of the rest
    #[inline]
    pub fn remove(&mut self, key: &CanonicalKey) -> Option<JsonValue> {
        self.entries.shift_remove(key)
    }

    /// Iterate entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&CanonicalKey, &JsonValue)> {
        self.entries.iter()
    }

    /// Keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &CanonicalKey> {
        self.entries.keys()
    }

    /// Fresh position for an appended element
    ///
    /// Equals the original size until something is appended, and never
    /// repeats a position that was live or deleted before.
    #[inline]
    #[must_use]
    pub fn next_index(&self) -> usize {
        self.high_water
    }

    /// Fresh property name for an appended element
    ///
    /// The decimal high-water mark, bumped past any name in use.
    #[must_use]
    pub fn next_name(&self) -> String {
        let mut candidate = self.high_water;
        loop {
            let name = candidate.to_string();
            if !self.entries.contains_key(&CanonicalKey::Name(name.clone())) {
                return name;
            }
            candidate += 1;
        }
    }

    /// JSON object view shown to the proposer
    ///
    /// Positions are rendered as decimal property names.
    #[must_use]
    pub fn to_json(&self) -> JsonValue {
        let object: Map<String, JsonValue> = self
            .entries
            .iter()
            .map(|(key, value)| (key_string(key), value.clone()))
            .collect();
        JsonValue::Object(object)
    }

    /// Serialize the proposer view
    ///
    /// # Errors
    /// Returns error if serialization fails
    pub fn to_json_string(&self) -> Result<String, ContainerError> {
        Ok(serde_json::to_string(&self.to_json())?)
    }

    /// Consume into name → value pairs, in insertion order
    pub fn into_named(self) -> impl Iterator<Item = (String, JsonValue)> {
        self.entries
            .into_iter()
            .map(|(key, value)| (key_string(&key), value))
    }

    /// Consume into values ordered by position
    ///
    /// Named entries, which only appear if a mapping form is misused, sort last.
    #[must_use]
    pub fn into_values_by_index(self) -> Vec<JsonValue> {
        let mut entries: Vec<_> = self.entries.into_iter().collect();
        entries.sort_by_key(|(key, _)| key.as_index().unwrap_or(usize::MAX));
        entries.into_iter().map(|(_, value)| value).collect()
    }

    /// Fail unless this form belongs to `expected`
    ///
    /// # Errors
    /// Returns [`ContainerError::KindMismatch`] on mismatch
    pub fn expect_kind(&self, expected: ContainerKind) -> Result<(), ContainerError> {
        if self.kind == expected {
            Ok(())
        } else {
            Err(ContainerError::KindMismatch {
                expected,
                found: self.kind,
            })
        }
    }
}

/// Equal when kind and entries match; the high-water mark is bookkeeping
impl PartialEq for CanonicalContainer {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.entries == other.entries
    }
}

/// Position a key occupies, counting decimal names
fn key_position(key: &CanonicalKey) -> Option<usize> {
    match key {
        CanonicalKey::Index(index) => Some(*index),
        CanonicalKey::Name(name) => name.parse().ok(),
    }
}

fn key_string(key: &CanonicalKey) -> String {
    match key {
        CanonicalKey::Name(name) => name.clone(),
        CanonicalKey::Index(index) => index.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn indexed_assigns_positions() {
        let c = CanonicalContainer::indexed(ContainerKind::Sequence, vec![json!(10), json!(20)]);
        assert_eq!(c.get(&CanonicalKey::Index(1)), Some(&json!(20)));
        assert_eq!(c.next_index(), 2);
    }

    #[test]
    fn next_index_skips_past_deleted_positions() {
        let mut c = CanonicalContainer::indexed(
            ContainerKind::Sequence,
            vec![json!("a"), json!("b"), json!("c")],
        );
        c.remove(&CanonicalKey::Index(0));
        assert_eq!(c.len(), 2);
        assert_eq!(c.next_index(), 3);
    }

    #[test]
    fn next_index_of_empty_is_zero() {
        assert_eq!(CanonicalContainer::new(ContainerKind::Set).next_index(), 0);
    }

    #[test]
    fn deleted_top_position_is_not_reused() {
        let mut c = CanonicalContainer::indexed(
            ContainerKind::Set,
            vec![json!("a"), json!("b"), json!("c")],
        );
        c.remove(&CanonicalKey::Index(2));
        assert_eq!(c.next_index(), 3);

        let mut single = CanonicalContainer::indexed(ContainerKind::Set, vec![json!("a")]);
        single.remove(&CanonicalKey::Index(0));
        assert_eq!(single.next_index(), 1);
    }

    #[test]
    fn appended_positions_advance_the_mark() {
        let mut c = CanonicalContainer::indexed(ContainerKind::Sequence, vec![json!(1)]);
        let key = CanonicalKey::Index(c.next_index());
        c.insert(key.clone(), json!(2));
        c.remove(&key);
        assert_eq!(c.next_index(), 2);
    }

    #[test]
    fn deleted_numeric_name_is_not_reused() {
        let mut c = CanonicalContainer::named(
            ContainerKind::Mapping,
            vec![
                ("0".to_string(), json!(0)),
                ("1".to_string(), json!(1)),
                ("2".to_string(), json!(2)),
            ],
        );
        c.remove(&CanonicalKey::Name("2".to_string()));
        assert_eq!(c.next_name(), "3");
    }

    #[test]
    fn equality_ignores_high_water() {
        let mut grown = CanonicalContainer::indexed(ContainerKind::Sequence, vec![json!(1)]);
        grown.insert(CanonicalKey::Index(5), json!(2));
        grown.remove(&CanonicalKey::Index(5));
        let fresh = CanonicalContainer::indexed(ContainerKind::Sequence, vec![json!(1)]);
        assert_eq!(grown, fresh);
    }

    #[test]
    fn proposer_view_keeps_mapping_order() {
        let c = CanonicalContainer::named(
            ContainerKind::Mapping,
            vec![("b".to_string(), json!(1)), ("a".to_string(), json!(2))],
        );
        assert_eq!(c.to_json_string().unwrap(), r#"{"b":1,"a":2}"#);
    }

    #[test]
    fn next_name_avoids_existing_keys() {
        let c = CanonicalContainer::named(
            ContainerKind::Mapping,
            vec![("a".to_string(), json!(1)), ("2".to_string(), json!(2))],
        );
        assert_eq!(c.next_name(), "3");
    }

    #[test]
    fn proposer_view_stringifies_positions() {
        let c = CanonicalContainer::indexed(ContainerKind::Set, vec![json!("x"), json!("y")]);
        assert_eq!(c.to_json(), json!({"0": "x", "1": "y"}));
        assert_eq!(c.to_json_string().unwrap(), r#"{"0":"x","1":"y"}"#);
    }

    #[test]
    fn remove_keeps_order() {
        let mut c = CanonicalContainer::named(
            ContainerKind::Mapping,
            vec![
                ("a".to_string(), json!(1)),
                ("b".to_string(), json!(2)),
                ("c".to_string(), json!(3)),
            ],
        );
        c.remove(&CanonicalKey::Name("a".to_string()));
        let names: Vec<_> = c.into_named().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["b".to_string(), "c".to_string()]);
    }

    #[test]
    fn values_by_index_sorts_appended_positions() {
        let mut c = CanonicalContainer::indexed(ContainerKind::Sequence, vec![json!(1), json!(2)]);
        c.remove(&CanonicalKey::Index(0));
        c.insert(CanonicalKey::Index(2), json!(3));
        c.insert(CanonicalKey::Index(0), json!(0));
        assert_eq!(c.into_values_by_index(), vec![json!(0), json!(2), json!(3)]);
    }

    #[test]
    fn expect_kind() {
        let c = CanonicalContainer::new(ContainerKind::Record);
        assert!(c.expect_kind(ContainerKind::Record).is_ok());
        assert!(matches!(
            c.expect_kind(ContainerKind::Mapping),
            Err(ContainerError::KindMismatch { .. })
        ));
    }
}
