//! Completion backend seam
//!
//! A backend turns a system briefing, a user message and a reply schema into
//! raw reply text. Transport, model choice and auth live behind it.

use async_trait::async_trait;
use morph_core::ProposalError;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// One completion call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionPrompt {
    /// System-level instructions
    pub system: String,
    /// User turn
    pub user: String,
    /// JSON schema the reply must satisfy
    pub schema: JsonValue,
}

/// Backend failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    /// Network or provider failure; worth retrying
    #[error("transport error: {0}")]
    Transport(String),

    /// Provider refused the request; never retried
    #[error("request refused: {0}")]
    Refused(String),

    /// Call was cancelled; never retried
    #[error("completion cancelled")]
    Cancelled,
}

impl BackendError {
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

impl From<BackendError> for ProposalError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Cancelled => Self::Cancelled,
            other => Self::Unavailable(other.to_string()),
        }
    }
}


/// Structured completion backend
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Complete `prompt`, returning the raw reply text
    ///
    /// # Errors
    /// Returns [`BackendError`] if no reply was produced
    async fn complete(&self, prompt: CompletionPrompt) -> Result<String, BackendError>;
}
