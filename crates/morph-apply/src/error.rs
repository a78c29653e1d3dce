//! Apply error types

use morph_mutation::{ContainerKind, MutationKey, MutationKind};

/// Errors applying a mutation list
///
/// Every variant aborts the whole list; the input snapshot is never touched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApplyError {
    /// Mutation kind not permitted for this container kind
    #[error("mutation #{index}: '{kind}' is not allowed for a {container}")]
    DisallowedMutation {
        index: usize,
        kind: MutationKind,
        container: ContainerKind,
    },

    /// `set` or `delete` addressed a key the snapshot does not contain
    #[error("mutation #{index}: key {key} not found")]
    KeyNotFound { index: usize, key: MutationKey },

    /// Key missing or of the wrong addressing style
    #[error("mutation #{index} is malformed: {reason}")]
    MalformedMutation { index: usize, reason: String },

    /// Policy and snapshot disagree on the container kind
    #[error("a {policy} policy cannot apply to a {container} snapshot")]
    KindMismatch {
        policy: ContainerKind,
        container: ContainerKind,
    },
}

impl ApplyError {
    /// Check if switching to `ignore` would let the call proceed
    #[inline]
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::DisallowedMutation { .. })
    }

    /// Index of the offending mutation, if any
    #[inline]
    #[must_use]
    pub fn mutation_index(&self) -> Option<usize> {
        match self {
            Self::DisallowedMutation { index, .. }
            | Self::KeyNotFound { index, .. }
            | Self::MalformedMutation { index, .. } => Some(*index),
            Self::KindMismatch { .. } => None,
        }
    }
}
