//! Error types for morph core

use morph_apply::ApplyError;
use morph_container::ContainerError;

use crate::proposer::ProposalError;

/// Main mutate error type
///
/// Every variant aborts the call; no partially mutated container escapes.
#[derive(Debug, thiserror::Error)]
pub enum MutateError {
    /// Edit proposer failed
    #[error("proposal failed: {0}")]
    ProposalFailed(#[from] ProposalError),

    /// Mutation list could not be applied
    #[error("apply failed: {0}")]
    Apply(#[from] ApplyError),

    /// Container could not be converted to or from canonical form
    #[error("container error: {0}")]
    Container(#[from] ContainerError),
}

impl MutateError {
    /// Check if switching to `ignore` would let the call succeed
    #[inline]
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Apply(e) if e.is_recoverable())
    }

    #[inline]
    #[must_use]
    pub fn is_proposal_failure(&self) -> bool {
        matches!(self, Self::ProposalFailed(_))
    }

    /// Check if the restored record failed validation
    #[inline]
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Container(e) if e.is_validation())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use morph_mutation::{ContainerKind, MutationKey, MutationKind};

    #[test]
    fn predicates() {
        let disallowed = MutateError::from(ApplyError::DisallowedMutation {
            index: 0,
            kind: MutationKind::Add,
            container: ContainerKind::Record,
        });
        assert!(disallowed.is_recoverable());
        assert!(!disallowed.is_proposal_failure());

        let missing = MutateError::from(ApplyError::KeyNotFound {
            index: 0,
            key: MutationKey::from("x"),
        });
        assert!(!missing.is_recoverable());

        let proposal = MutateError::from(ProposalError::Cancelled);
        assert!(proposal.is_proposal_failure());
        assert!(!proposal.is_recoverable());

        let invalid = MutateError::from(ContainerError::Validation {
            reason: "age: expected integer".into(),
        });
        assert!(invalid.is_validation());
    }

    #[test]
    fn proposal_error_propagates_unmodified() {
        let inner = ProposalError::Exhausted {
            attempts: 4,
            last: "not json".into(),
        };
        match MutateError::from(inner.clone()) {
            MutateError::ProposalFailed(e) => assert_eq!(e, inner),
            other => panic!("unexpected {other:?}"),
        }
    }
}
