//! Value sets
//!
//! Provides [`ValueSet`], a set of JSON values with a deterministic
//! enumeration order.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value as JsonValue;

/// Set of distinct JSON values
///
/// Elements are ordered by their canonical JSON text (object keys sorted), so
/// the same logical set always enumerates the same way and index-addressed
/// edits are reproducible.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValueSet {
    items: BTreeMap<String, JsonValue>,
}

impl ValueSet {
    /// Create empty set
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Insert a value, returning `false` if it was already present
    pub fn insert(&mut self, value: JsonValue) -> bool {
        let key = canonical_json(&value);
        if self.items.contains_key(&key) {
            return false;
        }
        self.items.insert(key, value);
        true
    }

    /// Remove a value, returning `true` if it was present
    pub fn remove(&mut self, value: &JsonValue) -> bool {
        self.items.remove(&canonical_json(value)).is_some()
    }

    #[must_use]
    pub fn contains(&self, value: &JsonValue) -> bool {
        self.items.contains_key(&canonical_json(value))
    }

    /// Iterate in canonical order
    pub fn iter(&self) -> impl Iterator<Item = &JsonValue> {
        self.items.values()
    }
}

impl FromIterator<JsonValue> for ValueSet {
    fn from_iter<I: IntoIterator<Item = JsonValue>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl Extend<JsonValue> for ValueSet {
    fn extend<I: IntoIterator<Item = JsonValue>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl IntoIterator for ValueSet {
    type Item = JsonValue;
    type IntoIter = std::collections::btree_map::IntoValues<String, JsonValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_values()
    }
}

impl Serialize for ValueSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.items.values())
    }
}

impl<'de> Deserialize<'de> for ValueSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let values = Vec::<JsonValue>::deserialize(deserializer)?;
        Ok(values.into_iter().collect())
    }
}

/// Canonical JSON text (sorted object keys, escaped strings)
#[must_use]
pub fn canonical_json(value: &JsonValue) -> String {
    match value {
        JsonValue::Object(map) => {
            let mut keys: Vec<_> = map.keys().collect();
            keys.sort();

            let parts: Vec<_> = keys
                .into_iter()
                .map(|key| format!("{}:{}", JsonValue::from(key.as_str()), canonical_json(&map[key])))
                .collect();
            format!("{{{}}}", parts.join(","))
        }
        JsonValue::Array(arr) => {
            let parts: Vec<_> = arr.iter().map(canonical_json).collect();
            format!("[{}]", parts.join(","))
        }
        scalar => scalar.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn duplicates_collapse() {
        let set: ValueSet = vec![json!("x"), json!("y"), json!("x")].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert!(set.contains(&json!("x")));
    }

    #[test]
    fn enumeration_order_is_independent_of_insertion_order() {
        let a: ValueSet = vec![json!("b"), json!("a"), json!(3)].into_iter().collect();
        let b: ValueSet = vec![json!(3), json!("a"), json!("b")].into_iter().collect();
        let a_order: Vec<_> = a.iter().cloned().collect();
        let b_order: Vec<_> = b.iter().cloned().collect();
        assert_eq!(a_order, b_order);
        assert_eq!(a, b);
    }

    #[test]
    fn canonical_json_sorts_keys_and_escapes() {
        let value = json!({"b": 1, "a": "q\"uote"});
        assert_eq!(canonical_json(&value), r#"{"a":"q\"uote","b":1}"#);
    }

    #[test]
    fn object_elements_compare_by_content() {
        let mut set = ValueSet::new();
        assert!(set.insert(json!({"x": 1, "y": 2})));
        assert!(!set.insert(json!({"y": 2, "x": 1})));
        assert!(set.remove(&json!({"y": 2, "x": 1})));
        assert!(set.is_empty());
    }

    #[test]
    fn serde_as_array() {
        let set: ValueSet = serde_json::from_value(json!(["y", "x", "y"])).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(serde_json::to_value(&set).unwrap(), json!(["x", "y"]));
    }
}
