//! morph structured proposer
//!
//! An [`morph_core::EditProposer`] that drives any JSON-capable completion
//! backend.
//!
//! # Core Concepts
//!
//! - [`CompletionBackend`]: Pluggable seam to a language model
//! - [`StructuredProposer`]: Prompt rendering, schema checking and retries
//! - [`ProposerConfig`]: Attempt budget (default 4)

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod backend;
mod structured;

pub use backend::{BackendError, CompletionBackend, CompletionPrompt};
pub use structured::{user_message, ProposerConfig, StructuredProposer};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
