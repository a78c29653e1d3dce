//! Mutation keys
//!
//! Provides [`MutationKey`] for addressing the element an edit targets.

use std::fmt::{self, Display, Formatter};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Address of the element a `set` or `delete` targets
///
/// Mappings and records are addressed by property name, sets and sequences
/// by the 0-based position shown to the proposer.
///
/// # Examples
/// - `"color"` → `Name("color")`
/// - `2` → `Index(2)`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum MutationKey {
    /// Integer position (sets and sequences)
    Index(usize),
    /// Property name (mappings and records)
    Name(String),
}

impl MutationKey {
    /// Property name, if this is a named key
    #[inline]
    #[must_use]
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Self::Name(name) => Some(name),
            Self::Index(_) => None,
        }
    }

    /// Position, if this is an index key
    #[inline]
    #[must_use]
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Self::Index(index) => Some(*index),
            Self::Name(_) => None,
        }
    }

    /// Check if this key addresses by position
    #[inline]
    #[must_use]
    pub fn is_index(&self) -> bool {
        matches!(self, Self::Index(_))
    }
}

impl Display for MutationKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(index) => write!(f, "{index}"),
            Self::Name(name) => write!(f, "{name:?}"),
        }
    }
}

impl From<usize> for MutationKey {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl From<&str> for MutationKey {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for MutationKey {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}
