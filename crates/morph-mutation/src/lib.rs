//! morph mutation records
//!
//! The edit vocabulary shared by every morph crate.
//!
//! # Core Concepts
//!
//! - [`Mutation`]: One proposed edit (`add`, `set` or `delete`)
//! - [`MutationKind`]: The closed set of edit kinds
//! - [`MutationKey`]: Address of the element an edit targets
//! - [`Scalar`]: Values an edit may write
//! - [`ContainerKind`]: The four container shapes edits can target
//! - [`SchemaVariant`]: Which wire schema a proposer must follow
//!
//! # Example
//!
//! ```rust
//! use morph_mutation::{Mutation, MutationKind};
//!
//! let edit = Mutation::set("color", "red");
//! assert_eq!(edit.kind, MutationKind::Set);
//! assert!(edit.check_shape().is_ok());
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod key;
mod kind;
mod mutation;
mod scalar;
mod schema;

pub use key::MutationKey;
pub use kind::{ContainerKind, MutationKind};
pub use mutation::{Mutation, ShapeError};
pub use scalar::Scalar;
pub use schema::{IndexedMutation, IndexedMutationBatch, MutationBatch, SchemaVariant};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
