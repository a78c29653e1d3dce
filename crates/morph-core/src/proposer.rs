//! Edit-proposal port
//!
//! The only suspending step of a mutate call. Implementations turn an
//! instruction plus a container snapshot into an ordered mutation list.

use async_trait::async_trait;
use morph_mutation::{ContainerKind, Mutation, SchemaVariant};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Everything a proposer needs for one call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposalRequest {
    /// Free-text user instruction
    pub instruction: String,
    /// JSON rendering of the canonical snapshot
    pub snapshot: String,
    /// System-level briefing describing the rules
    pub briefing: String,
    /// Reply schema the proposer must follow
    pub schema: SchemaVariant,
    /// Shape of the container being mutated
    pub kind: ContainerKind,
    /// Record schema, when records pass theirs along
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_schema: Option<JsonValue>,
}

/// Proposal failures
///
/// Wrapped unmodified by [`crate::MutateError::ProposalFailed`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProposalError {
    /// Backend refused the call or could not be driven at all
    #[error("proposer unavailable: {0}")]
    Unavailable(String),

    /// Every attempt failed
    #[error("no valid proposal after {attempts} attempts: {last}")]
    Exhausted { attempts: u32, last: String },

    /// Call was cancelled or timed out
    #[error("proposal cancelled")]
    Cancelled,
}

/// Edit-proposal port
///
/// Awaited exactly once per mutate call. Retrying, timeouts and transport
/// belong to the implementation.
#[async_trait]
pub trait EditProposer: Send + Sync {
    /// Propose mutations for `request`
    ///
    /// # Errors
    /// Returns [`ProposalError`] when no usable mutation list can be produced
    async fn propose(&self, request: ProposalRequest) -> Result<Vec<Mutation>, ProposalError>;
}

#[async_trait]
impl<P: EditProposer + ?Sized> EditProposer for std::sync::Arc<P> {
    async fn propose(&self, request: ProposalRequest) -> Result<Vec<Mutation>, ProposalError> {
        (**self).propose(request).await
    }
}

#[async_trait]
impl<P: EditProposer + ?Sized> EditProposer for Box<P> {
    async fn propose(&self, request: ProposalRequest) -> Result<Vec<Mutation>, ProposalError> {
        (**self).propose(request).await
    }
}
