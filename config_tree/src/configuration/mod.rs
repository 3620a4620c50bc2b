//! The merged, authoritative view of the tree.
//!
//! Configuration nodes and properties are created lazily the first time a
//! definition touches their path and accumulate a back-reference to every
//! definition that touched them afterwards. Deletion is logical until
//! [`crate::ConfigurationTreeBuilder::build`] prunes the tombstones.

mod node;
mod property;

pub use node::{CategoryOverride, ConfigurationNode};
pub use property::ConfigurationProperty;
