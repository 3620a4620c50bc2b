//! Primary error enum for configuration tree merging.

use figment::Error as FigmentError;
use thiserror::Error;

use super::aggregate::AggregatedErrors;
use crate::model::PropertyKind;
use crate::path::NodePath;
use crate::value::ValueType;

/// Fatal failures raised while merging definitions into a configuration tree.
///
/// Every variant names the offending path and the origin of the definition
/// that triggered it, so an author can locate the mistake. Recoverable
/// conditions are never reported through this type; see
/// [`crate::diagnostics::MergeWarning`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigTreeError {
    /// A definition is rooted more than one level below the existing tree.
    #[error("definition '{path}' from '{origin}' is rooted at an unreachable node; its parent does not exist")]
    UnreachableDefinitionRoot {
        /// Root path of the rejected definition.
        path: NodePath,
        /// Origin of the rejected definition.
        origin: String,
    },

    /// A definition attempted to delete, re-categorise or reorder the root.
    #[error("definition from '{origin}' cannot {action} the root node")]
    RootModification {
        /// Verb describing the forbidden modification.
        action: &'static str,
        /// Origin of the rejected definition.
        origin: String,
    },

    /// A node declared itself as its own order-before target.
    #[error("node '{path}' from '{origin}' cannot be ordered before itself")]
    SelfOrderBefore {
        /// Path of the offending node.
        path: NodePath,
        /// Origin of the offending definition.
        origin: String,
    },

    /// An order-before target never materialised before the module finished.
    #[error("node '{path}' from '{origin}' is ordered before '{sibling}', which does not exist")]
    MissingOrderBeforeTarget {
        /// Path of the node waiting to be ordered.
        path: NodePath,
        /// Name of the sibling it should precede.
        sibling: String,
        /// Origin of the waiting definition.
        origin: String,
    },

    /// A same-name sibling was declared without its predecessor.
    #[error("node '{path}' from '{origin}' cannot be created: same-name sibling '{missing}' does not exist")]
    SnsGap {
        /// Path of the node that could not be created.
        path: NodePath,
        /// Indexed name of the missing predecessor.
        missing: String,
        /// Origin of the offending definition.
        origin: String,
    },

    /// Content from one extension group tried to extend a node owned by another.
    #[error(
        "definition from '{origin}' (extension group {group}) cannot merge content into '{path}', created by '{existing_origin}' (extension group {existing_group})"
    )]
    ExtensionGroupConflict {
        /// Path of the contested node.
        path: NodePath,
        /// Origin of the rejected definition.
        origin: String,
        /// Extension group of the rejected definition.
        group: String,
        /// Origin of the definition that created the node.
        existing_origin: String,
        /// Extension group of the definition that created the node.
        existing_group: String,
    },

    /// A definition deletes a node and redefines its content in one step.
    #[error("node '{path}' from '{origin}' is deleted and redefined at the same time; existing definitions: {prior}")]
    DeleteAndRedefine {
        /// Path of the offending node.
        path: NodePath,
        /// Origin of the offending definition.
        origin: String,
        /// Origins of the definitions that populated the node so far.
        prior: String,
    },

    /// Single/list/set kind changed without `override`.
    #[error(
        "property '{path}' from '{origin}' changes kind from {existing} to {incoming} without 'override'; previously defined in {prior}"
    )]
    KindConflict {
        /// Path of the property.
        path: NodePath,
        /// Origin of the conflicting definition.
        origin: String,
        /// Kind already present in the tree.
        existing: PropertyKind,
        /// Kind requested by the definition.
        incoming: PropertyKind,
        /// Origins of the earlier definitions.
        prior: String,
    },

    /// Value type changed without `override`.
    #[error(
        "property '{path}' from '{origin}' changes value type from {existing} to {incoming} without 'override'; previously defined in {prior}"
    )]
    ValueTypeConflict {
        /// Path of the property.
        path: NodePath,
        /// Origin of the conflicting definition.
        origin: String,
        /// Value type already present in the tree.
        existing: ValueType,
        /// Value type requested by the definition.
        incoming: ValueType,
        /// Origins of the earlier definitions.
        prior: String,
    },

    /// The primary type of a node changed without `override`.
    #[error("property '{path}' from '{origin}' changes the primary type without 'override'; previously defined in {prior}")]
    PrimaryTypeChange {
        /// Path of the primary-type property.
        path: NodePath,
        /// Origin of the conflicting definition.
        origin: String,
        /// Origins of the earlier definitions.
        prior: String,
    },

    /// A `replace` of the mixin list would drop existing mixins.
    #[error("property '{path}' from '{origin}' drops mixins [{removed}] without 'override'; previously defined in {prior}")]
    MixinRemoval {
        /// Path of the mixin property.
        path: NodePath,
        /// Origin of the conflicting definition.
        origin: String,
        /// Mixins that would have been removed.
        removed: String,
        /// Origins of the earlier definitions.
        prior: String,
    },

    /// A live node ended a merge step without a primary type.
    #[error("node '{path}' from '{origin}' has no primary type")]
    MissingPrimaryType {
        /// Path of the node.
        path: NodePath,
        /// Origin of the definition that last touched the node.
        origin: String,
    },

    /// A single-valued accessor was used on a multi-valued property, or vice versa.
    #[error("property '{path}' is {actual}; the {requested} accessor does not apply")]
    ValueAccessor {
        /// Path of the property.
        path: NodePath,
        /// Kind the property actually has.
        actual: PropertyKind,
        /// Accessor the caller used.
        requested: &'static str,
    },

    /// A path or path segment could not be parsed.
    #[error("invalid path '{path}': {message}")]
    InvalidPath {
        /// Raw text that failed to parse.
        path: String,
        /// Explanation of the failure.
        message: String,
    },

    /// A [`crate::value::ValueConsumer`] rejected a resource value.
    #[error("resource '{resource}' at '{path}' could not be visited: {message}")]
    ResourceVisit {
        /// Path of the property holding the resource.
        path: NodePath,
        /// Resource reference carried by the value.
        resource: String,
        /// Explanation supplied by the consumer.
        message: String,
    },

    /// Builder settings could not be loaded.
    #[error("failed to load builder settings: {0}")]
    Settings(#[from] Box<FigmentError>),

    /// Several fatal errors were reported together.
    #[error("multiple configuration tree errors:\n{0}")]
    Aggregate(Box<AggregatedErrors>),
}
