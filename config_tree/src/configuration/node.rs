//! Merged nodes.

use std::collections::HashMap;
use std::sync::Arc;

use indexmap::IndexMap;

use super::ConfigurationProperty;
use super::property::join_origins;
use crate::category::Category;
use crate::constants::{
    JCR_MIXIN_TYPES, JCR_PRIMARY_TYPE, JCR_UUID, ROOT_MIXIN, ROOT_PRIMARY_TYPE, ROOT_UUID,
};
use crate::definition::{DefinitionNode, DefinitionProperty};
use crate::model::{ModelItem, PropertyKind, PropertyValues};
use crate::path::{NodePath, PathSegment};
use crate::value::{Value, ValueType};

/// A category recorded on a parent for one of its children, with the
/// definition that set it.
#[derive(Debug, Clone)]
pub struct CategoryOverride<D> {
    category: Category,
    definition: Arc<D>,
}

impl<D> CategoryOverride<D> {
    pub(crate) fn new(category: Category, definition: &Arc<D>) -> Self {
        Self {
            category,
            definition: Arc::clone(definition),
        }
    }

    /// The overriding category.
    #[must_use]
    pub const fn category(&self) -> Category {
        self.category
    }

    /// The definition that declared the override.
    #[must_use]
    pub const fn definition(&self) -> &Arc<D> {
        &self.definition
    }
}

/// The authoritative state of one node after merging.
///
/// Children are keyed by their indexed segment (`a[1]`, `a[2]`) and keep the
/// order produced by the merge. A node does not point back at its parent;
/// the builder navigates from the root by path.
#[derive(Debug, Clone)]
pub struct ConfigurationNode {
    name: String,
    segment: PathSegment,
    path: NodePath,
    children: IndexMap<PathSegment, ConfigurationNode>,
    properties: IndexMap<String, ConfigurationProperty>,
    definitions: Vec<Arc<DefinitionNode>>,
    deleted: bool,
    ignore_reordered_children: Option<bool>,
    residual_node_category: Option<Category>,
    child_node_category_overrides: HashMap<String, CategoryOverride<DefinitionNode>>,
    child_property_category_overrides: HashMap<String, CategoryOverride<DefinitionProperty>>,
    extension_group: Option<String>,
}

impl ConfigurationNode {
    fn bare(parent_path: Option<&NodePath>, segment: PathSegment) -> Self {
        let path = parent_path.map_or_else(NodePath::root, |parent| {
            parent.child(segment.suppress_index())
        });
        Self {
            name: segment.to_string(),
            segment,
            path,
            children: IndexMap::new(),
            properties: IndexMap::new(),
            definitions: Vec::new(),
            deleted: false,
            ignore_reordered_children: None,
            residual_node_category: None,
            child_node_category_overrides: HashMap::new(),
            child_property_category_overrides: HashMap::new(),
            extension_group: None,
        }
    }

    /// Creates the root node with its bootstrap primary type, mixin and
    /// identifier.
    #[must_use]
    pub fn new_root() -> Self {
        let mut root = Self::bare(None, PathSegment::new(""));
        root.name = String::new();
        let path = root.path.clone();
        let bootstrap = [
            ConfigurationProperty::new(&path, JCR_PRIMARY_TYPE, PropertyKind::Single, ValueType::Name)
                .with_values(PropertyValues::Single(Value::name(ROOT_PRIMARY_TYPE))),
            ConfigurationProperty::new(&path, JCR_MIXIN_TYPES, PropertyKind::Set, ValueType::Name)
                .with_values(PropertyValues::Multiple(vec![Value::name(ROOT_MIXIN)])),
            ConfigurationProperty::new(&path, JCR_UUID, PropertyKind::Single, ValueType::String)
                .with_values(PropertyValues::Single(Value::string(ROOT_UUID))),
        ];
        for property in bootstrap {
            root.properties.insert(property.name().to_owned(), property);
        }
        root
    }

    pub(crate) fn new_child(
        parent_path: &NodePath,
        segment: &PathSegment,
        extension_group: Option<&str>,
    ) -> Self {
        let mut node = Self::bare(Some(parent_path), segment.force_index());
        node.extension_group = extension_group.map(str::to_owned);
        node
    }

    /// A deleted placeholder carrying this node's provenance, optionally
    /// extended by the deleting definition.
    pub(crate) fn tombstone(&self, deleting: Option<&Arc<DefinitionNode>>) -> Self {
        let mut tombstone = Self::bare(None, self.segment.clone());
        tombstone.path = self.path.clone();
        tombstone.definitions = self.definitions.clone();
        tombstone.definitions.extend(deleting.cloned());
        tombstone.deleted = true;
        tombstone.extension_group = self.extension_group.clone();
        tombstone
    }

    /// Moves the node under a new indexed segment, updating every
    /// descendant path.
    pub(crate) fn relocate(&mut self, parent_path: &NodePath, segment: PathSegment) {
        self.name = segment.to_string();
        self.path = parent_path.child(segment.suppress_index());
        self.segment = segment;
        let path = self.path.clone();
        for property in self.properties.values_mut() {
            property.relocate(&path);
        }
        for child in self.children.values_mut() {
            let child_segment = child.segment.clone();
            child.relocate(&path, child_segment);
        }
    }

    pub(crate) fn add_definition(&mut self, definition: &Arc<DefinitionNode>) {
        self.definitions.push(Arc::clone(definition));
    }

    pub(crate) const fn children_mut(&mut self) -> &mut IndexMap<PathSegment, Self> {
        &mut self.children
    }

    pub(crate) fn replace_children(&mut self, children: IndexMap<PathSegment, Self>) {
        self.children = children;
    }

    pub(crate) fn child_at(&self, key: &PathSegment) -> Option<&Self> {
        self.children.get(key)
    }

    pub(crate) fn child_mut(&mut self, key: &PathSegment) -> Option<&mut Self> {
        self.children.get_mut(key)
    }

    pub(crate) const fn properties_mut(&mut self) -> &mut IndexMap<String, ConfigurationProperty> {
        &mut self.properties
    }

    pub(crate) const fn set_ignore_reordered_children(&mut self, ignore: bool) {
        self.ignore_reordered_children = Some(ignore);
    }

    pub(crate) const fn set_residual_node_category(&mut self, category: Category) {
        self.residual_node_category = Some(category);
    }

    pub(crate) fn set_child_node_category(
        &mut self,
        name: &str,
        category: Category,
        definition: &Arc<DefinitionNode>,
    ) {
        self.child_node_category_overrides
            .insert(name.to_owned(), CategoryOverride::new(category, definition));
    }

    pub(crate) fn clear_child_node_category(
        &mut self,
        name: &str,
    ) -> Option<CategoryOverride<DefinitionNode>> {
        self.child_node_category_overrides.remove(name)
    }

    pub(crate) fn set_child_property_category(
        &mut self,
        name: &str,
        category: Category,
        definition: &Arc<DefinitionProperty>,
    ) {
        self.child_property_category_overrides
            .insert(name.to_owned(), CategoryOverride::new(category, definition));
    }

    pub(crate) fn clear_child_property_category(
        &mut self,
        name: &str,
    ) -> Option<CategoryOverride<DefinitionProperty>> {
        self.child_property_category_overrides.remove(name)
    }

    pub(crate) fn has_live_content(&self) -> bool {
        self.children.values().any(|child| !child.deleted)
            || self.properties.values().any(|property| !property.is_deleted())
    }

    /// Removes tombstoned children and properties throughout the subtree.
    ///
    /// Returns the number of nodes and properties removed.
    pub(crate) fn prune(&mut self) -> (usize, usize) {
        let nodes_before = self.children.len();
        let properties_before = self.properties.len();
        self.children.retain(|_, child| !child.deleted);
        self.properties.retain(|_, property| !property.is_deleted());
        let mut removed = (
            nodes_before - self.children.len(),
            properties_before - self.properties.len(),
        );
        for child in self.children.values_mut() {
            let (nodes, properties) = child.prune();
            removed.0 += nodes;
            removed.1 += properties;
        }
        removed
    }

    /// The indexed segment this node is stored under.
    #[must_use]
    pub const fn segment(&self) -> &PathSegment {
        &self.segment
    }

    /// Child nodes in order.
    pub fn children(&self) -> impl Iterator<Item = &Self> {
        self.children.values()
    }

    /// Indexed names of the children, in order.
    #[must_use]
    pub fn child_names(&self) -> Vec<String> {
        self.children.keys().map(ToString::to_string).collect()
    }

    /// The child stored under `name`; `a` and `a[1]` are equivalent.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&Self> {
        self.children.get(&PathSegment::from(name))
    }

    /// The descendant at `path`, relative to this node.
    #[must_use]
    pub fn descendant(&self, path: &NodePath) -> Option<&Self> {
        path.segments()
            .iter()
            .try_fold(self, |node, segment| node.children.get(segment))
    }

    /// Properties in order.
    pub fn properties(&self) -> impl Iterator<Item = &ConfigurationProperty> {
        self.properties.values()
    }

    /// The property named `name`.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&ConfigurationProperty> {
        self.properties.get(name)
    }

    /// The primary-type property, if present and live.
    #[must_use]
    pub fn primary_type(&self) -> Option<&ConfigurationProperty> {
        self.property(JCR_PRIMARY_TYPE)
            .filter(|property| !property.is_deleted())
    }

    /// Every definition that touched this node, oldest first.
    #[must_use]
    pub fn definitions(&self) -> &[Arc<DefinitionNode>] {
        &self.definitions
    }

    /// Origins of [`Self::definitions`], joined for diagnostics.
    #[must_use]
    pub fn origins(&self) -> String {
        join_origins(self.definitions.iter().map(|d| d.origin()))
    }

    /// Returns `true` for a tombstone awaiting pruning.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.deleted
    }

    /// Whether reordering of children is ignored, if declared.
    #[must_use]
    pub const fn ignore_reordered_children(&self) -> Option<bool> {
        self.ignore_reordered_children
    }

    /// Category for children never declared explicitly, if declared.
    #[must_use]
    pub const fn residual_node_category(&self) -> Option<Category> {
        self.residual_node_category
    }

    /// Extension group of the definition that created this node.
    #[must_use]
    pub fn extension_group(&self) -> Option<&str> {
        self.extension_group.as_deref()
    }

    /// The category override recorded for the child named `name`.
    #[must_use]
    pub fn child_node_category_override(
        &self,
        name: &str,
    ) -> Option<&CategoryOverride<DefinitionNode>> {
        self.child_node_category_overrides.get(name)
    }

    /// The category override recorded for the property named `name`.
    #[must_use]
    pub fn child_property_category_override(
        &self,
        name: &str,
    ) -> Option<&CategoryOverride<DefinitionProperty>> {
        self.child_property_category_overrides.get(name)
    }

    /// Effective category of the child named `name` (unindexed): an explicit
    /// override, else the residual category, else config.
    #[must_use]
    pub fn child_node_category(&self, name: &str) -> Category {
        self.child_node_category_overrides.get(name).map_or_else(
            || self.residual_node_category.unwrap_or_default(),
            CategoryOverride::category,
        )
    }

    /// Effective category of the property named `name`.
    #[must_use]
    pub fn child_property_category(&self, name: &str) -> Category {
        self.child_property_category_overrides
            .get(name)
            .map(CategoryOverride::category)
            .unwrap_or_default()
    }
}

impl ModelItem for ConfigurationNode {
    fn name(&self) -> &str {
        &self.name
    }

    fn path(&self) -> &NodePath {
        &self.path
    }
}
