//! Structured edit proposer
//!
//! Renders the user turn, asks the backend for a `{"mutations": [...]}`
//! reply, checks it against the wire schema and decodes it. Invalid replies
//! and transport errors are retried up to a fixed attempt budget.

use async_trait::async_trait;
use jsonschema::JSONSchema;
use morph_core::{ConfigError, EditProposer, ProposalError, ProposalRequest};
use morph_mutation::{IndexedMutationBatch, Mutation, MutationBatch, SchemaVariant};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::backend::{CompletionBackend, CompletionPrompt};

/// Proposer configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProposerConfig {
    /// Backend calls per proposal, first try included
    pub max_attempts: u32,
}

impl ProposerConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Parse from TOML; missing keys take their defaults
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] on malformed input or unknown keys
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }
}

impl Default for ProposerConfig {
    fn default() -> Self {
        Self { max_attempts: 4 }
    }
}

/// Render the user turn for a request
#[must_use]
pub fn user_message(request: &ProposalRequest) -> String {
    format!(
        "User's existing {}:\n{}\n\nUser message:\n{}",
        request.kind.label(),
        request.snapshot,
        request.instruction
    )
}

/// Edit proposer backed by a [`CompletionBackend`]
#[derive(Debug)]
pub struct StructuredProposer<B> {
    backend: B,
    config: ProposerConfig,
}

impl<B: CompletionBackend> StructuredProposer<B> {
    #[inline]
    #[must_use]
    pub fn new(backend: B, config: ProposerConfig) -> Self {
        Self { backend, config }
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &ProposerConfig {
        &self.config
    }

    #[inline]
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }
}

#[async_trait]
impl<B: CompletionBackend> EditProposer for StructuredProposer<B> {
    async fn propose(&self, request: ProposalRequest) -> Result<Vec<Mutation>, ProposalError> {
        let schema = request
            .schema
            .json_schema_value()
            .map_err(|e| ProposalError::Unavailable(format!("mutation schema: {e}")))?;

        let prompt = CompletionPrompt {
            system: request.briefing.clone(),
            user: user_message(&request),
            schema: schema.clone(),
        };

        let attempts = self.config.max_attempts.max(1);
        let mut last = String::new();
        for attempt in 1..=attempts {
            let reply = match self.backend.complete(prompt.clone()).await {
                Ok(reply) => reply,
                Err(e) if !e.is_retryable() => {
                    tracing::error!(attempt, "completion failed permanently: {}", e);
                    return Err(e.into());
                }
                Err(e) => {
                    tracing::warn!(attempt, attempts, "completion failed: {}", e);
                    last = e.to_string();
                    continue;
                }
            };

            match decode_reply(&reply, &schema, request.schema) {
                Ok(mutations) => {
                    tracing::debug!(attempt, proposed = mutations.len(), "proposal accepted");
                    return Ok(mutations);
                }
                Err(reason) => {
                    tracing::warn!(attempt, attempts, "rejected reply: {}", reason);
                    last = reason;
                }
            }
        }

        Err(ProposalError::Exhausted { attempts, last })
    }
}

/// Parse, schema-check and decode one reply
fn decode_reply(
    reply: &str,
    schema: &JsonValue,
    variant: SchemaVariant,
) -> Result<Vec<Mutation>, String> {
    let compiled =
        JSONSchema::compile(schema).map_err(|e| format!("mutation schema: {e}"))?;
    let value: JsonValue =
        serde_json::from_str(reply).map_err(|e| format!("reply is not JSON: {e}"))?;

    if let Err(errors) = compiled.validate(&value) {
        let reasons: Vec<String> = errors.map(|e| e.to_string()).collect();
        return Err(format!("reply violates schema: {}", reasons.join("; ")));
    }

    let batch = match variant {
        SchemaVariant::Keyed => serde_json::from_value::<MutationBatch>(value),
        SchemaVariant::Indexed => {
            serde_json::from_value::<IndexedMutationBatch>(value).map(MutationBatch::from)
        }
    }
    .map_err(|e| format!("reply cannot be decoded: {e}"))?;

    Ok(batch.mutations)
}
