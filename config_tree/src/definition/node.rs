//! Declared nodes.

use std::sync::Arc;

use indexmap::IndexMap;

use super::{DefinitionProperty, DefinitionSource};
use crate::ConfigTreeResult;
use crate::category::Category;
use crate::model::{ModelItem, NodeOperation, OrderBefore};
use crate::path::{NodePath, PathSegment};
use crate::value::ValueConsumer;

/// One module's declaration of a node and its subtree.
///
/// Children keep the order in which they were declared. Child nodes and
/// properties are shared behind [`Arc`] so the merged tree can keep
/// back-references to every definition that touched it.
#[derive(Debug, Clone)]
pub struct DefinitionNode {
    name: String,
    path: NodePath,
    source: Arc<DefinitionSource>,
    operation: NodeOperation,
    nodes: IndexMap<String, Arc<DefinitionNode>>,
    properties: IndexMap<String, Arc<DefinitionProperty>>,
    category: Option<Category>,
    order_before: Option<OrderBefore>,
    ignore_reordered_children: Option<bool>,
    residual_child_category: Option<Category>,
}

impl DefinitionNode {
    /// Creates an empty node definition at `path`.
    #[must_use]
    pub fn new(path: NodePath, source: Arc<DefinitionSource>) -> Self {
        let name = path
            .last_segment()
            .map(ToString::to_string)
            .unwrap_or_default();
        Self {
            name,
            path,
            source,
            operation: NodeOperation::default(),
            nodes: IndexMap::new(),
            properties: IndexMap::new(),
            category: None,
            order_before: None,
            ignore_reordered_children: None,
            residual_child_category: None,
        }
    }

    /// Returns the child named `name`, declaring it if needed.
    pub fn add_node(&mut self, name: &str) -> &mut Self {
        let path = self.path.child_named(name);
        let source = Arc::clone(&self.source);
        let child = self
            .nodes
            .entry(name.to_owned())
            .or_insert_with(|| Arc::new(Self::new(path, source)));
        Arc::make_mut(child)
    }

    /// Declares `property` on this node, replacing an earlier declaration of
    /// the same name.
    pub fn add_property(&mut self, mut property: DefinitionProperty) -> &mut Self {
        property.attach(&self.path, &self.source);
        self.properties
            .insert(property.name().to_owned(), Arc::new(property));
        self
    }

    /// Sets the node operation.
    pub const fn set_operation(&mut self, operation: NodeOperation) -> &mut Self {
        self.operation = operation;
        self
    }

    /// Marks the node for deletion.
    pub const fn set_delete(&mut self) -> &mut Self {
        self.set_operation(NodeOperation::Delete)
    }

    /// Sets the category override for this node.
    pub const fn set_category(&mut self, category: Category) -> &mut Self {
        self.category = Some(category);
        self
    }

    /// Orders this node before a sibling, or first.
    pub fn set_order_before(&mut self, order_before: OrderBefore) -> &mut Self {
        self.order_before = Some(order_before);
        self
    }

    /// Sets whether reordering of this node's children should be ignored.
    pub const fn set_ignore_reordered_children(&mut self, ignore: bool) -> &mut Self {
        self.ignore_reordered_children = Some(ignore);
        self
    }

    /// Sets the category given to children that were never declared.
    pub const fn set_residual_child_category(&mut self, category: Category) -> &mut Self {
        self.residual_child_category = Some(category);
        self
    }

    /// The final path segment; empty for the root.
    #[must_use]
    pub fn segment(&self) -> PathSegment {
        self.path
            .last_segment()
            .cloned()
            .unwrap_or_else(|| PathSegment::new(""))
    }

    /// Returns `true` when this definition targets the root node.
    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.path.is_root()
    }

    /// The source this node was declared in.
    #[must_use]
    pub const fn source(&self) -> &Arc<DefinitionSource> {
        &self.source
    }

    /// Origin used in diagnostics.
    #[must_use]
    pub fn origin(&self) -> &str {
        self.source.origin()
    }

    /// Declared operation.
    #[must_use]
    pub const fn operation(&self) -> NodeOperation {
        self.operation
    }

    /// Returns `true` when the operation is [`NodeOperation::Delete`].
    #[must_use]
    pub const fn is_delete(&self) -> bool {
        matches!(self.operation, NodeOperation::Delete)
    }

    /// Declared child nodes, in declaration order.
    pub fn nodes(&self) -> impl Iterator<Item = &Arc<Self>> {
        self.nodes.values()
    }

    /// The declared child named `name`.
    #[must_use]
    pub fn node(&self, name: &str) -> Option<&Arc<Self>> {
        self.nodes.get(name)
    }

    /// Declared properties, in declaration order.
    pub fn properties(&self) -> impl Iterator<Item = &Arc<DefinitionProperty>> {
        self.properties.values()
    }

    /// The declared property named `name`.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&Arc<DefinitionProperty>> {
        self.properties.get(name)
    }

    /// Returns `true` when the node declares children or properties.
    #[must_use]
    pub fn has_content(&self) -> bool {
        !self.nodes.is_empty() || !self.properties.is_empty()
    }

    /// Declared category override.
    #[must_use]
    pub const fn category(&self) -> Option<Category> {
        self.category
    }

    /// Declared ordering directive.
    #[must_use]
    pub const fn order_before(&self) -> Option<&OrderBefore> {
        self.order_before.as_ref()
    }

    /// Declared ignore-reordered-children flag.
    #[must_use]
    pub const fn ignore_reordered_children(&self) -> Option<bool> {
        self.ignore_reordered_children
    }

    /// Declared category for children never declared explicitly.
    #[must_use]
    pub const fn residual_child_category(&self) -> Option<Category> {
        self.residual_child_category
    }

    /// Returns `true` when the node only says "delete me": no content, no
    /// ordering and no category side effects.
    #[must_use]
    pub fn is_deleted_and_empty(&self) -> bool {
        self.is_delete()
            && !self.has_content()
            && self.order_before.is_none()
            && self.ignore_reordered_children.is_none()
            && self.category.is_none()
            && self.residual_child_category.is_none()
    }

    /// Passes every resource value in this subtree to `consumer`.
    ///
    /// # Errors
    ///
    /// Stops at and returns the first error raised by `consumer`.
    pub fn visit_resource_values<C>(&self, consumer: &mut C) -> ConfigTreeResult<()>
    where
        C: ValueConsumer + ?Sized,
    {
        for property in self.properties.values() {
            let Some(values) = property.raw_values() else {
                continue;
            };
            for value in values.as_slice().iter().filter(|v| v.is_resource()) {
                consumer.accept(value, property)?;
            }
        }
        for child in self.nodes.values() {
            child.visit_resource_values(consumer)?;
        }
        Ok(())
    }
}

impl ModelItem for DefinitionNode {
    fn name(&self) -> &str {
        &self.name
    }

    fn path(&self) -> &NodePath {
        &self.path
    }
}
