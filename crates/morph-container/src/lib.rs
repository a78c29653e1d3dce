//! morph container adapters
//!
//! Normalizes mappings, sets, sequences and records into one canonical keyed
//! form for mutation, and rebuilds the original shape afterwards.
//!
//! # Core Concepts
//!
//! - [`CanonicalContainer`]: Key → value working form the applier edits
//! - [`ContainerAdapter`]: Conversion to and from the canonical form
//! - [`Container`]: Closed union of the supported shapes
//! - [`ValueSet`]: Set of JSON values with deterministic enumeration
//! - [`RecordValue`]: Record fields plus the JSON schema they must satisfy
//!
//! # Example
//!
//! ```rust
//! use morph_container::{Container, ContainerAdapter};
//! use serde_json::json;
//!
//! let container = Container::from_json(json!([10, 20, 30])).unwrap();
//! let canonical = container.canonicalize().unwrap();
//! assert_eq!(canonical.to_json(), json!({"0": 10, "1": 20, "2": 30}));
//! assert_eq!(container.restore(canonical).unwrap(), container);
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod adapter;
mod canonical;
mod container;
mod error;
mod record;
mod set;

pub use adapter::{ContainerAdapter, Mapping, Sequence};
pub use canonical::{CanonicalContainer, CanonicalKey};
pub use container::Container;
pub use error::ContainerError;
pub use record::{
    canonicalize_record, record_fields, record_schema, restore_record, Record, RecordValue,
};
pub use set::{canonical_json, ValueSet};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
