//! morph mutation applier
//!
//! Decides which mutations a container kind permits and applies an ordered
//! mutation list to a canonical snapshot.
//!
//! # Core Concepts
//!
//! - [`MutationPolicy`]: Allowed kinds, addressing style and briefing per container kind
//! - [`Briefing`]: Instruction text handed to the edit proposer
//! - [`Applier`]: Sequential, copy-on-write, all-or-nothing application
//! - [`OnDisallowed`]: Raise or skip when a mutation kind is not permitted
//!
//! # Example
//!
//! ```rust
//! use morph_apply::{Applier, OnDisallowed};
//! use morph_container::CanonicalContainer;
//! use morph_mutation::{ContainerKind, Mutation};
//! use serde_json::json;
//!
//! let snapshot = CanonicalContainer::indexed(ContainerKind::Sequence, vec![json!(1), json!(2)]);
//! let applier = Applier::for_kind(ContainerKind::Sequence, OnDisallowed::Raise);
//!
//! let applied = applier
//!     .apply(&snapshot, vec![Mutation::delete(0usize), Mutation::add(3)])
//!     .unwrap();
//! assert_eq!(applied.container.into_values_by_index(), vec![json!(2), json!(3)]);
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod applier;
mod error;
mod policy;

pub use applier::{applied_mutations, Applied, Applier, OnDisallowed};
pub use error::ApplyError;
pub use policy::{Addressing, Briefing, MutationPolicy};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
