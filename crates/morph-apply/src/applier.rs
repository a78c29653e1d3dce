//! Mutation applier
//!
//! Applies an ordered mutation list to a canonical snapshot under a
//! [`MutationPolicy`], copy-on-write.

use morph_container::{CanonicalContainer, CanonicalKey};
use morph_mutation::{ContainerKind, Mutation, MutationKind};
use serde::{Deserialize, Serialize};

use crate::error::ApplyError;
use crate::policy::{Addressing, MutationPolicy};

/// Reaction to a mutation kind the policy forbids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OnDisallowed {
    /// Fail the whole call before anything is applied
    #[default]
    Raise,
    /// Skip the mutation and apply the rest
    Ignore,
}

/// Result of a successful apply
#[derive(Debug, Clone, PartialEq)]
pub struct Applied {
    /// New canonical form
    pub container: CanonicalContainer,
    /// Every proposed mutation, including skipped ones, in proposal order
    pub mutations: Vec<Mutation>,
    /// Indices into `mutations` skipped under [`OnDisallowed::Ignore`]
    pub skipped: Vec<usize>,
}

/// Mutations of `mutations` whose positions are not in `skipped`
pub fn applied_mutations<'a>(
    mutations: &'a [Mutation],
    skipped: &'a [usize],
) -> impl Iterator<Item = &'a Mutation> {
    mutations
        .iter()
        .enumerate()
        .filter(move |(index, _)| !skipped.contains(index))
        .map(|(_, mutation)| mutation)
}

impl Applied {
    /// Mutations that were actually applied
    pub fn applied(&self) -> impl Iterator<Item = &Mutation> {
        applied_mutations(&self.mutations, &self.skipped)
    }

    #[inline]
    #[must_use]
    pub fn was_skipped(&self, index: usize) -> bool {
        self.skipped.contains(&index)
    }
}

/// Applies mutation lists under a policy
///
/// # Characteristics
/// - Sequential, in proposal order; no reordering or conflict resolution
/// - Last write wins when several mutations address the same key
/// - Copy-on-write: the snapshot is cloned, never edited in place
/// - All-or-nothing: any error discards the working copy
#[derive(Debug, Clone, Copy)]
pub struct Applier {
    policy: MutationPolicy,
    on_disallowed: OnDisallowed,
}

impl Applier {
    #[inline]
    #[must_use]
    pub fn new(policy: MutationPolicy, on_disallowed: OnDisallowed) -> Self {
        Self {
            policy,
            on_disallowed,
        }
    }

    /// Applier with the standard policy for `kind`
    #[inline]
    #[must_use]
    pub fn for_kind(kind: ContainerKind, on_disallowed: OnDisallowed) -> Self {
        Self::new(MutationPolicy::for_kind(kind), on_disallowed)
    }

    #[inline]
    #[must_use]
    pub fn policy(&self) -> &MutationPolicy {
        &self.policy
    }

    #[inline]
    #[must_use]
    pub fn on_disallowed(&self) -> OnDisallowed {
        self.on_disallowed
    }

    /// Check every mutation kind against the policy
    ///
    /// # Returns
    /// Indices of disallowed mutations to skip (always empty under `Raise`)
    ///
    /// # Errors
    /// [`ApplyError::DisallowedMutation`] for the first offender under `Raise`
    pub fn screen(&self, mutations: &[Mutation]) -> Result<Vec<usize>, ApplyError> {
        let mut skipped = Vec::new();
        for (index, mutation) in mutations.iter().enumerate() {
            if self.policy.allows(mutation.kind) {
                continue;
            }
            match self.on_disallowed {
                OnDisallowed::Raise => {
                    return Err(ApplyError::DisallowedMutation {
                        index,
                        kind: mutation.kind,
                        container: self.policy.kind(),
                    });
                }
                OnDisallowed::Ignore => {
                    tracing::warn!(
                        index,
                        kind = %mutation.kind,
                        container = %self.policy.kind(),
                        "skipping disallowed mutation"
                    );
                    skipped.push(index);
                }
            }
        }
        Ok(skipped)
    }

    /// Apply `mutations` to a copy of `snapshot`
    ///
    /// # Errors
    /// - [`ApplyError::KindMismatch`] if the snapshot is of another kind
    /// - [`ApplyError::DisallowedMutation`] under `Raise`
    /// - [`ApplyError::MalformedMutation`] for a missing or mistyped key
    /// - [`ApplyError::KeyNotFound`] for `delete`, or non-inserting `set`, on
    ///   an absent key
    pub fn apply(
        &self,
        snapshot: &CanonicalContainer,
        mutations: Vec<Mutation>,
    ) -> Result<Applied, ApplyError> {
        if snapshot.kind() != self.policy.kind() {
            return Err(ApplyError::KindMismatch {
                policy: self.policy.kind(),
                container: snapshot.kind(),
            });
        }

        let skipped = self.screen(&mutations)?;

        let mut working = snapshot.clone();
        for (index, mutation) in mutations.iter().enumerate() {
            if skipped.contains(&index) {
                continue;
            }
            self.apply_one(&mut working, index, mutation)?;
        }

        Ok(Applied {
            container: working,
            mutations,
            skipped,
        })
    }

    fn apply_one(
        &self,
        working: &mut CanonicalContainer,
        index: usize,
        mutation: &Mutation,
    ) -> Result<(), ApplyError> {
        match mutation.kind {
            MutationKind::Add => {
                let key = match self.policy.addressing() {
                    Addressing::Named => CanonicalKey::Name(working.next_name()),
                    Addressing::Indexed => CanonicalKey::Index(working.next_index()),
                };
                tracing::debug!(index, %key, "add");
                working.insert(key, mutation.value_json());
            }
            MutationKind::Set => {
                let key = self.resolve_key(index, mutation)?;
                if !self.policy.set_inserts() && !working.contains_key(&key) {
                    return Err(ApplyError::KeyNotFound { index, key });
                }
                tracing::debug!(index, %key, "set");
                working.insert(key, mutation.value_json());
            }
            MutationKind::Delete => {
                let key = self.resolve_key(index, mutation)?;
                if working.remove(&key).is_none() {
                    return Err(ApplyError::KeyNotFound { index, key });
                }
                tracing::debug!(index, %key, "delete");
            }
        }
        Ok(())
    }

    /// Key of a `set`/`delete`, checked against the addressing style
    fn resolve_key(&self, index: usize, mutation: &Mutation) -> Result<CanonicalKey, ApplyError> {
        mutation
            .check_shape()
            .map_err(|e| ApplyError::MalformedMutation {
                index,
                reason: e.to_string(),
            })?;

        let key = mutation.key.clone().ok_or_else(|| ApplyError::MalformedMutation {
            index,
            reason: "missing key".to_string(),
        })?;

        if !self.policy.accepts_key(&key) {
            let expected = match self.policy.addressing() {
                Addressing::Named => "a property name",
                Addressing::Indexed => "an integer position",
            };
            return Err(ApplyError::MalformedMutation {
                index,
                reason: format!(
                    "key {key} cannot address a {}; expected {expected}",
                    self.policy.kind()
                ),
            });
        }
        Ok(key)
    }
}
