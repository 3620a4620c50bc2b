//! The merge engine.
//!
//! [`ConfigurationTreeBuilder`] consumes definitions one at a time, in the
//! order the caller supplies them, and merges each onto the configuration
//! tree accumulated so far. Deletions are logical until [`build`] prunes the
//! tombstones.
//!
//! [`build`]: ConfigurationTreeBuilder::build
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use config_tree::{
//!     ConfigDefinition, ConfigurationTreeBuilder, DefinitionNode, DefinitionProperty,
//!     DefinitionSource, NodePath, Value,
//! };
//!
//! # fn main() -> config_tree::ConfigTreeResult<()> {
//! let source = Arc::new(DefinitionSource::new("demo/config.yaml", "demo"));
//! let mut node = DefinitionNode::new(NodePath::parse("/greeting")?, source);
//! node.add_property(DefinitionProperty::single(
//!     "jcr:primaryType",
//!     Value::name("nt:unstructured"),
//! ));
//! node.add_property(DefinitionProperty::single("text", Value::string("hello")));
//!
//! let mut builder = ConfigurationTreeBuilder::new();
//! builder.push(&ConfigDefinition::new(node))?.finish_module()?;
//! let root = builder.build();
//! assert!(root.child("greeting").is_some());
//! # Ok(())
//! # }
//! ```

mod nodes;
mod ordering;
mod properties;
mod sns;

use std::sync::Arc;

use indexmap::IndexMap;

use crate::ConfigTreeResult;
use crate::configuration::{ConfigurationNode, ConfigurationProperty};
use crate::definition::{ConfigDefinition, DefinitionNode};
use crate::diagnostics::{MergeWarning, WarningKind};
use crate::model::ModelItem;
use crate::path::NodePath;
use crate::settings::BuilderSettings;

/// Accumulates definitions into one authoritative configuration tree.
///
/// The builder is single-threaded and batch oriented: push every definition
/// of a module, call [`Self::finish_module`], repeat for the next module, and
/// finally call [`Self::build`].
#[derive(Debug)]
pub struct ConfigurationTreeBuilder {
    root: ConfigurationNode,
    state: MergeState,
}

/// Everything the merge touches besides the tree itself.
#[derive(Debug, Default)]
struct MergeState {
    settings: BuilderSettings,
    deferred_order_before: IndexMap<NodePath, Arc<DefinitionNode>>,
    deleted_nodes: IndexMap<NodePath, ConfigurationNode>,
    deleted_properties: IndexMap<NodePath, ConfigurationProperty>,
    warnings: Vec<MergeWarning>,
}

impl MergeState {
    fn warn(&mut self, kind: WarningKind, path: &NodePath, origin: &str, message: impl Into<String>) {
        self.warnings
            .push(MergeWarning::emit(kind, path, origin, message));
    }

    fn warn_redundant(
        &mut self,
        kind: WarningKind,
        path: &NodePath,
        origin: &str,
        message: impl Into<String>,
    ) {
        if self.settings.report_redundant_operations {
            self.warn(kind, path, origin, message);
        }
    }
}

impl Default for ConfigurationTreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigurationTreeBuilder {
    /// Creates a builder over a freshly bootstrapped root.
    #[must_use]
    pub fn new() -> Self {
        Self::with_root(ConfigurationNode::new_root())
    }

    /// Creates a builder that continues merging onto a previously built tree.
    #[must_use]
    pub fn with_root(root: ConfigurationNode) -> Self {
        Self {
            root,
            state: MergeState::default(),
        }
    }

    /// Replaces the builder settings.
    #[must_use]
    pub fn with_settings(mut self, settings: BuilderSettings) -> Self {
        self.state.settings = settings;
        self
    }

    /// The active settings.
    #[must_use]
    pub const fn settings(&self) -> &BuilderSettings {
        &self.state.settings
    }

    /// Merges one definition onto the tree.
    ///
    /// # Errors
    ///
    /// Returns the fatal error that stopped the merge. The tree may be
    /// partially updated afterwards and should be discarded.
    pub fn push(&mut self, definition: &ConfigDefinition) -> ConfigTreeResult<&mut Self> {
        let root_definition = definition.root();
        tracing::debug!(
            path = %root_definition.path(),
            origin = root_definition.origin(),
            "merging definition"
        );
        if root_definition.is_root() {
            self.state.merge_root(&mut self.root, root_definition)?;
        } else if let Some(parent) = self
            .state
            .resolve_definition_parent(&mut self.root, root_definition)?
        {
            nodes::check_extension_group(parent, root_definition)?;
            self.state.merge_child(parent, root_definition)?;
        }
        Ok(self)
    }

    /// Closes the current module.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConfigTreeError::MissingOrderBeforeTarget`], or an
    /// aggregate of them, for every order-before directive whose target never
    /// appeared. The pending directives are discarded either way.
    pub fn finish_module(&mut self) -> ConfigTreeResult<&mut Self> {
        tracing::debug!(
            unresolved = self.state.deferred_order_before.len(),
            "finishing module"
        );
        self.state.check_unresolved_order_before()?;
        Ok(self)
    }

    /// The tree as merged so far, tombstones included.
    #[must_use]
    pub const fn root(&self) -> &ConfigurationNode {
        &self.root
    }

    /// Nodes deleted so far, keyed by their path at deletion time, captured
    /// as they were just before deletion.
    #[must_use]
    pub const fn deleted_nodes(&self) -> &IndexMap<NodePath, ConfigurationNode> {
        &self.state.deleted_nodes
    }

    /// Properties deleted so far, keyed by path, captured as they were just
    /// before deletion.
    #[must_use]
    pub const fn deleted_properties(&self) -> &IndexMap<NodePath, ConfigurationProperty> {
        &self.state.deleted_properties
    }

    /// Recoverable diagnostics raised so far.
    #[must_use]
    pub fn warnings(&self) -> &[MergeWarning] {
        &self.state.warnings
    }

    /// Prunes every tombstone and returns the finished tree.
    #[must_use]
    pub fn build(mut self) -> ConfigurationNode {
        let (nodes, properties) = self.root.prune();
        tracing::debug!(
            pruned_nodes = nodes,
            pruned_properties = properties,
            path = %self.root.path(),
            "built configuration tree"
        );
        self.root
    }
}
