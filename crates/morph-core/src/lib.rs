//! morph core - AI-driven structured mutation of in-memory containers
//!
//! Given a container and a free-text instruction, asks an edit proposer for a
//! list of structured mutations, checks them against the container's policy
//! and applies them to a copy.
//!
//! - Mappings, sets and sequences accept `add`, `set` and `delete`
//! - Records accept only `set` and are revalidated after mutation
//! - The input container is never modified
//!
//! # Example
//!
//! ```rust,ignore
//! use morph_core::prelude::*;
//! use serde_json::json;
//!
//! # async fn example(proposer: impl EditProposer) -> Result<(), MutateError> {
//! let mutator = Mutator::new(proposer, MutatorConfig::new());
//!
//! let container = Container::from_json(json!({"a": 1, "b": 2}))?;
//! let result = mutator.mutate(&container, "set a to 5 and drop b", None).await?;
//!
//! println!("Applied {} mutations", result.applied().count());
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod config;
pub mod error;
pub mod mutator;
pub mod proposer;

pub use config::{ConfigError, MutatorConfig};
pub use error::MutateError;
pub use mutator::{Mutated, Mutator};
pub use proposer::{EditProposer, ProposalError, ProposalRequest};

pub use morph_apply::{ApplyError, OnDisallowed};
pub use morph_container::{Container, Mapping, Record, RecordValue, Sequence, ValueSet};
pub use morph_mutation::{ContainerKind, Mutation, MutationKey, MutationKind, Scalar};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with morph
    pub use crate::{
        Container, ContainerKind, EditProposer, MutateError, Mutated, Mutation, MutationKey,
        MutationKind, Mutator, MutatorConfig, OnDisallowed, ProposalError, ProposalRequest,
        RecordValue, Scalar, ValueSet,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
