//! Builds a single authoritative configuration tree from module definitions.
//!
//! Modules declare fragments of a hierarchical repository: nodes with
//! properties, ordering hints, category overrides and delete/override
//! operations. [`ConfigurationTreeBuilder`] merges those fragments in the
//! order it receives them, enforcing same-name-sibling contiguity, ordering
//! constraints and type safety, and records what was deleted on the way.
//!
//! Fatal problems are reported as [`ConfigTreeError`] values that name the
//! offending path and definition origin. Recoverable ones are logged through
//! `tracing` and kept as [`MergeWarning`]s.

pub mod builder;
pub mod category;
pub mod configuration;
pub mod constants;
pub mod definition;
pub mod diagnostics;
pub mod error;
pub mod model;
pub mod path;
pub mod settings;
pub mod value;

use std::sync::Arc;

pub use builder::ConfigurationTreeBuilder;
pub use category::Category;
pub use configuration::{CategoryOverride, ConfigurationNode, ConfigurationProperty};
pub use definition::{ConfigDefinition, DefinitionNode, DefinitionProperty, DefinitionSource};
pub use diagnostics::{MergeWarning, WarningKind};
pub use error::{AggregatedErrors, ConfigTreeError};
pub use model::{ModelItem, NodeOperation, OrderBefore, PropertyKind, PropertyOperation, PropertyValues};
pub use path::{NodePath, PathSegment};
pub use settings::BuilderSettings;
pub use value::{Payload, Value, ValueConsumer, ValueType};

/// Result type used throughout the crate.
///
/// Errors are shared behind [`Arc`] so they can be aggregated and reported
/// more than once without cloning.
pub type ConfigTreeResult<T> = Result<T, Arc<ConfigTreeError>>;
