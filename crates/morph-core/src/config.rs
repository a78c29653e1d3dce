//! Mutator configuration

use morph_apply::OnDisallowed;
use serde::{Deserialize, Serialize};

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML could not be parsed into a config
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Mutator configuration
///
/// Immutable once handed to a [`crate::Mutator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MutatorConfig {
    /// Reaction to mutation kinds the container forbids
    pub on_disallowed_mutation: OnDisallowed,
    /// Append the record's JSON schema to the briefing
    pub pass_record_schema: bool,
}

impl MutatorConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn with_on_disallowed(mut self, on_disallowed: OnDisallowed) -> Self {
        self.on_disallowed_mutation = on_disallowed;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_pass_record_schema(mut self, pass: bool) -> Self {
        self.pass_record_schema = pass;
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

impl Default for MutatorConfig {
    fn default() -> Self {
        Self {
            on_disallowed_mutation: OnDisallowed::Raise,
            pass_record_schema: true,
        }
    }
}
