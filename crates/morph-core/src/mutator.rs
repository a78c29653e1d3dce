//! Mutator - the public entry point
//!
//! One call: canonicalize the container, ask the proposer for mutations once,
//! apply them under the container's policy, rebuild the original shape.

use morph_apply::{Applied, Applier, Briefing, MutationPolicy};
use morph_container::{
    canonicalize_record, record_schema, restore_record, CanonicalContainer, Container,
    ContainerAdapter, Mapping, Record, RecordValue, Sequence, ValueSet,
};
use morph_mutation::Mutation;
use serde_json::Value as JsonValue;

use crate::config::MutatorConfig;
use crate::error::MutateError;
use crate::proposer::{EditProposer, ProposalRequest};

/// Result of a successful mutate call
#[derive(Debug, Clone, PartialEq)]
pub struct Mutated<C> {
    /// New container; the input is left untouched
    pub container: C,
    /// Every proposed mutation, in proposal order
    pub mutations: Vec<Mutation>,
    /// Indices into `mutations` skipped because the container forbids them
    pub skipped: Vec<usize>,
}

impl<C> Mutated<C> {
    /// Mutations that were actually applied
    pub fn applied(&self) -> impl Iterator<Item = &Mutation> {
        morph_apply::applied_mutations(&self.mutations, &self.skipped)
    }

    /// Split into the container and the full mutation list
    #[must_use]
    pub fn into_parts(self) -> (C, Vec<Mutation>) {
        (self.container, self.mutations)
    }
}

/// Proposes and applies structured mutations
///
/// Holds the proposer and an immutable config; no other state, so one
/// instance may serve concurrent calls.
#[derive(Debug)]
pub struct Mutator<P> {
    proposer: P,
    config: MutatorConfig,
}

impl<P: EditProposer> Mutator<P> {
    /// Create mutator
    #[inline]
    #[must_use]
    pub fn new(proposer: P, config: MutatorConfig) -> Self {
        Self { proposer, config }
    }

    /// Create mutator with default config
    #[inline]
    #[must_use]
    pub fn with_proposer(proposer: P) -> Self {
        Self::new(proposer, MutatorConfig::default())
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &MutatorConfig {
        &self.config
    }

    #[inline]
    #[must_use]
    pub fn proposer(&self) -> &P {
        &self.proposer
    }

    /// Mutate any supported container
    ///
    /// # Errors
    /// - [`MutateError::ProposalFailed`] if the proposer fails
    /// - [`MutateError::Apply`] if the mutation list is rejected
    /// - [`MutateError::Container`] if the result cannot be rebuilt
    pub async fn mutate(
        &self,
        container: &Container,
        instruction: &str,
        extra_briefing: Option<&str>,
    ) -> Result<Mutated<Container>, MutateError> {
        let record_schema = match container {
            Container::Record(record) => Some(record.schema()),
            Container::Mapping(_) | Container::Set(_) | Container::Sequence(_) => None,
        };
        self.mutate_adapter(container, instruction, extra_briefing, record_schema)
            .await
    }

    /// Mutate a string-keyed mapping
    ///
    /// # Errors
    /// See [`Mutator::mutate`]
    pub async fn mutate_mapping(
        &self,
        mapping: &Mapping,
        instruction: &str,
        extra_briefing: Option<&str>,
    ) -> Result<Mutated<Mapping>, MutateError> {
        self.mutate_adapter(mapping, instruction, extra_briefing, None)
            .await
    }

    /// Mutate a set of values
    ///
    /// # Errors
    /// See [`Mutator::mutate`]
    pub async fn mutate_set(
        &self,
        set: &ValueSet,
        instruction: &str,
        extra_briefing: Option<&str>,
    ) -> Result<Mutated<ValueSet>, MutateError> {
        self.mutate_adapter(set, instruction, extra_briefing, None)
            .await
    }

    /// Mutate an ordered sequence
    ///
    /// # Errors
    /// See [`Mutator::mutate`]
    pub async fn mutate_sequence(
        &self,
        sequence: &Sequence,
        instruction: &str,
        extra_briefing: Option<&str>,
    ) -> Result<Mutated<Sequence>, MutateError> {
        self.mutate_adapter(sequence, instruction, extra_briefing, None)
            .await
    }

    /// Mutate a dynamic record, validated against its own schema
    ///
    /// # Errors
    /// See [`Mutator::mutate`]; fails with a validation error if the new
    /// fields violate the schema
    pub async fn mutate_record_value(
        &self,
        record: &RecordValue,
        instruction: &str,
        extra_briefing: Option<&str>,
    ) -> Result<Mutated<RecordValue>, MutateError> {
        self.mutate_adapter(record, instruction, extra_briefing, Some(record.schema()))
            .await
    }

    /// Mutate a typed record; only `set` is permitted
    ///
    /// # Errors
    /// See [`Mutator::mutate`]; fails with a validation error if the new
    /// fields no longer deserialize into `R`
    pub async fn mutate_record<R: Record + Sync>(
        &self,
        record: &R,
        instruction: &str,
        extra_briefing: Option<&str>,
    ) -> Result<Mutated<R>, MutateError> {
        let snapshot = canonicalize_record(record)?;
        let schema = if self.config.pass_record_schema {
            Some(record_schema::<R>()?)
        } else {
            None
        };

        let applied = self
            .propose_and_apply(&snapshot, instruction, extra_briefing, schema.as_ref())
            .await?;
        let container = restore_record::<R>(applied.container)?;
        Ok(Mutated {
            container,
            mutations: applied.mutations,
            skipped: applied.skipped,
        })
    }

    async fn mutate_adapter<C: ContainerAdapter + Sync>(
        &self,
        container: &C,
        instruction: &str,
        extra_briefing: Option<&str>,
        record_schema: Option<&JsonValue>,
    ) -> Result<Mutated<C>, MutateError> {
        let snapshot = container.canonicalize()?;
        let schema = record_schema.filter(|_| self.config.pass_record_schema);

        let applied = self
            .propose_and_apply(&snapshot, instruction, extra_briefing, schema)
            .await?;
        let rebuilt = container.restore(applied.container)?;
        Ok(Mutated {
            container: rebuilt,
            mutations: applied.mutations,
            skipped: applied.skipped,
        })
    }

    async fn propose_and_apply(
        &self,
        snapshot: &CanonicalContainer,
        instruction: &str,
        extra_briefing: Option<&str>,
        record_schema: Option<&JsonValue>,
    ) -> Result<Applied, MutateError> {
        let kind = snapshot.kind();
        let policy = MutationPolicy::for_kind(kind);
        let briefing = Briefing::new(policy)
            .with_extra(extra_briefing)
            .with_record_schema(record_schema)
            .render();

        let request = ProposalRequest {
            instruction: instruction.to_string(),
            snapshot: snapshot.to_json_string()?,
            briefing,
            schema: policy.schema_variant(),
            kind,
            record_schema: record_schema.cloned(),
        };

        let mutations = match self.proposer.propose(request).await {
            Ok(mutations) => mutations,
            Err(e) => {
                tracing::error!(container = %kind, "proposal failed: {}", e);
                return Err(e.into());
            }
        };
        tracing::info!(
            container = %kind,
            proposed = mutations.len(),
            "applying proposed mutations"
        );

        let applier = Applier::new(policy, self.config.on_disallowed_mutation);
        Ok(applier.apply(snapshot, mutations)?)
    }
}
