//! Mutation records
//!
//! Provides [`Mutation`], the single typed edit a proposer returns.

use std::fmt::{self, Display, Formatter};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::key::MutationKey;
use crate::kind::MutationKind;
use crate::scalar::Scalar;

/// One proposed edit
///
/// NOT a text patch: each record names one kind of change and the element it
/// addresses. Records are applied in the order they were proposed.
///
/// # Invariants
/// - `set` and `delete` carry a `key`
/// - `add` ignores `key`; `delete` ignores `new_value`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Mutation {
    /// Kind of change to make
    pub kind: MutationKind,

    /// Element to change; used by `set` and `delete` only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<MutationKey>,

    /// Value to write; used by `add` and `set` only, null when absent
    #[serde(default)]
    pub new_value: Option<Scalar>,
}

impl Mutation {
    /// Append a new element
    #[inline]
    #[must_use]
    pub fn add(value: impl Into<Scalar>) -> Self {
        Self {
            kind: MutationKind::Add,
            key: None,
            new_value: Some(value.into()),
        }
    }

    /// Overwrite the element at `key`
    #[inline]
    #[must_use]
    pub fn set(key: impl Into<MutationKey>, value: impl Into<Scalar>) -> Self {
        Self {
            kind: MutationKind::Set,
            key: Some(key.into()),
            new_value: Some(value.into()),
        }
    }

    /// Overwrite the element at `key` with null
    #[inline]
    #[must_use]
    pub fn set_null(key: impl Into<MutationKey>) -> Self {
        Self {
            kind: MutationKind::Set,
            key: Some(key.into()),
            new_value: None,
        }
    }

    /// Remove the element at `key`
    #[inline]
    #[must_use]
    pub fn delete(key: impl Into<MutationKey>) -> Self {
        Self {
            kind: MutationKind::Delete,
            key: Some(key.into()),
            new_value: None,
        }
    }

    /// Value this record writes, as JSON (null when absent)
    #[inline]
    #[must_use]
    pub fn value_json(&self) -> JsonValue {
        self.new_value.as_ref().map_or(JsonValue::Null, Scalar::to_json)
    }

    /// Check that key presence matches the kind
    ///
    /// # Errors
    /// Returns error if a `set` or `delete` has no key
    pub fn check_shape(&self) -> Result<(), ShapeError> {
        if self.kind.requires_key() && self.key.is_none() {
            return Err(ShapeError::MissingKey(self.kind));
        }
        Ok(())
    }
}

impl Display for Mutation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match (self.kind, &self.key) {
            (MutationKind::Add, _) => write!(f, "add {}", self.value_json()),
            (MutationKind::Set, Some(key)) => write!(f, "set {key} = {}", self.value_json()),
            (MutationKind::Delete, Some(key)) => write!(f, "delete {key}"),
            (kind, None) => write!(f, "{kind} <missing key>"),
        }
    }
}

/// Malformed mutation record
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShapeError {
    /// `set` or `delete` without a key
    #[error("'{0}' mutation requires a key")]
    MissingKey(MutationKind),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn constructors() {
        let add = Mutation::add(40);
        assert_eq!(add.kind, MutationKind::Add);
        assert_eq!(add.key, None);
        assert_eq!(add.value_json(), json!(40));

        let delete = Mutation::delete("b");
        assert_eq!(delete.key, Some(MutationKey::Name("b".to_string())));
        assert_eq!(delete.new_value, None);
    }

    #[test]
    fn check_shape_rejects_keyless_set_and_delete() {
        let keyless_set = Mutation {
            kind: MutationKind::Set,
            key: None,
            new_value: Some(Scalar::from(1)),
        };
        assert_eq!(
            keyless_set.check_shape(),
            Err(ShapeError::MissingKey(MutationKind::Set))
        );

        let keyless_delete = Mutation {
            kind: MutationKind::Delete,
            key: None,
            new_value: None,
        };
        assert!(keyless_delete.check_shape().is_err());
        assert!(Mutation::add("x").check_shape().is_ok());
    }

    #[test]
    fn decode_tolerates_missing_optional_fields() {
        let m: Mutation = serde_json::from_value(json!({"kind": "delete", "key": 0})).unwrap();
        assert_eq!(m, Mutation::delete(0usize));

        let m: Mutation =
            serde_json::from_value(json!({"kind": "set", "key": "a", "new_value": null})).unwrap();
        assert_eq!(m, Mutation::set_null("a"));
    }

    #[test]
    fn display() {
        assert_eq!(Mutation::set("a", 5).to_string(), "set \"a\" = 5");
        assert_eq!(Mutation::delete(1usize).to_string(), "delete 1");
        assert_eq!(Mutation::add("z").to_string(), "add \"z\"");
    }
}
