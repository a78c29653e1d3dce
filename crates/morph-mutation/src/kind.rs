//! Edit kinds and container kinds

use std::fmt::{self, Display, Formatter};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::schema::SchemaVariant;

/// Kind of a single edit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum MutationKind {
    /// Append a new element; any key is ignored
    Add,
    /// Overwrite the element at a key
    Set,
    /// Remove the element at a key
    Delete,
}

impl MutationKind {
    /// All kinds, in declaration order
    pub const ALL: [Self; 3] = [Self::Add, Self::Set, Self::Delete];

    /// Wire name of the kind
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Set => "set",
            Self::Delete => "delete",
        }
    }

    /// Whether records of this kind must carry a key
    #[inline]
    #[must_use]
    pub fn requires_key(self) -> bool {
        matches!(self, Self::Set | Self::Delete)
    }

    /// Whether records of this kind write a value
    #[inline]
    #[must_use]
    pub fn writes_value(self) -> bool {
        matches!(self, Self::Add | Self::Set)
    }
}

impl Display for MutationKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shape of the container being mutated
///
/// Closed set: every entry point dispatches on this with an exhaustive match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerKind {
    /// String-keyed map of values
    Mapping,
    /// Unordered collection of distinct values
    Set,
    /// Ordered list of values
    Sequence,
    /// Fixed-schema typed object
    Record,
}

impl ContainerKind {
    /// Human-readable label used in proposer briefings
    #[inline]
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Mapping => "mapping",
            Self::Set => "set",
            Self::Sequence => "sequence",
            Self::Record => "record",
        }
    }

    /// Whether canonical keys are integer positions
    #[inline]
    #[must_use]
    pub fn is_indexed(self) -> bool {
        matches!(self, Self::Set | Self::Sequence)
    }

    /// Wire schema the proposer must follow for this kind
    #[inline]
    #[must_use]
    pub fn schema_variant(self) -> SchemaVariant {
        if self.is_indexed() {
            SchemaVariant::Indexed
        } else {
            SchemaVariant::Keyed
        }
    }
}

impl Display for ContainerKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mutation_kind_wire_names() {
        assert_eq!(serde_json::to_string(&MutationKind::Add).unwrap(), "\"add\"");
        assert_eq!(
            serde_json::from_str::<MutationKind>("\"delete\"").unwrap(),
            MutationKind::Delete
        );
        assert!(serde_json::from_str::<MutationKind>("\"upsert\"").is_err());
    }

    #[test]
    fn key_requirements() {
        assert!(!MutationKind::Add.requires_key());
        assert!(MutationKind::Set.requires_key());
        assert!(MutationKind::Delete.requires_key());
        assert!(!MutationKind::Delete.writes_value());
    }

    #[test]
    fn container_kind_labels() {
        assert_eq!(ContainerKind::Sequence.to_string(), "sequence");
        assert!(ContainerKind::Set.is_indexed());
        assert!(!ContainerKind::Record.is_indexed());
    }
}
