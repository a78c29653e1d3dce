//! Proposal wire schemas
//!
//! A proposer replies with `{"mutations": [...]}`. Two schema variants exist:
//! keyed (any key, for mappings and records) and indexed (integer keys only,
//! for sets and sequences).

use schemars::schema::RootSchema;
use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::key::MutationKey;
use crate::kind::MutationKind;
use crate::mutation::Mutation;
use crate::scalar::Scalar;

/// Schema a proposer reply must follow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaVariant {
    /// Keys may be property names or positions
    Keyed,
    /// Keys must be integer positions
    Indexed,
}

impl SchemaVariant {
    /// JSON schema of a reply batch
    #[must_use]
    pub fn json_schema(self) -> RootSchema {
        match self {
            Self::Keyed => schema_for!(MutationBatch),
            Self::Indexed => schema_for!(IndexedMutationBatch),
        }
    }

    /// JSON schema of a reply batch, as a JSON value
    ///
    /// # Errors
    /// Returns error if the schema cannot be serialized
    pub fn json_schema_value(self) -> Result<JsonValue, serde_json::Error> {
        serde_json::to_value(self.json_schema())
    }
}

/// Reply batch for keyed containers (mappings and records)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct MutationBatch {
    /// Mutations to apply to the data structure, in order
    pub mutations: Vec<Mutation>,
}

/// Mutation record restricted to integer keys
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct IndexedMutation {
    /// Kind of change to make
    pub kind: MutationKind,

    /// 0-based position of the element to change; used by `set` and `delete` only
    #[serde(default)]
    pub key: Option<usize>,

    /// Value to write; used by `add` and `set` only, null when absent
    #[serde(default)]
    pub new_value: Option<Scalar>,
}

impl From<IndexedMutation> for Mutation {
    fn from(m: IndexedMutation) -> Self {
        Self {
            kind: m.kind,
            key: m.key.map(MutationKey::Index),
            new_value: m.new_value,
        }
    }
}

/// Reply batch for indexed containers (sets and sequences)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct IndexedMutationBatch {
    /// Mutations to apply to the data structure, in order
    pub mutations: Vec<IndexedMutation>,
}

impl From<IndexedMutationBatch> for MutationBatch {
    fn from(batch: IndexedMutationBatch) -> Self {
        Self {
            mutations: batch.mutations.into_iter().map(Mutation::from).collect(),
        }
    }
}
