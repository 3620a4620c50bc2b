//! Node-level merging.

use std::sync::Arc;

use super::{MergeState, sns};
use crate::category::Category;
use crate::configuration::ConfigurationNode;
use crate::definition::DefinitionNode;
use crate::diagnostics::WarningKind;
use crate::model::ModelItem;
use crate::path::PathSegment;
use crate::{ConfigTreeError, ConfigTreeResult};

const CORE_GROUP: &str = "<core>";

impl MergeState {
    /// Walks from the root to the parent of the definition's root node.
    ///
    /// Returns `None` when an ancestor is deleted or hidden, in which case
    /// the definition is skipped with a warning.
    pub(super) fn resolve_definition_parent<'tree>(
        &mut self,
        root: &'tree mut ConfigurationNode,
        definition: &DefinitionNode,
    ) -> ConfigTreeResult<Option<&'tree mut ConfigurationNode>> {
        let Some((_, ancestors)) = definition.path().segments().split_last() else {
            return Ok(Some(root));
        };
        let mut node = root;
        for segment in ancestors {
            let key = segment.force_index();
            let category = node.child_node_category(key.name());
            let Some(child) = node.child_mut(&key) else {
                return Err(Arc::new(ConfigTreeError::UnreachableDefinitionRoot {
                    path: definition.path().clone(),
                    origin: definition.origin().to_owned(),
                }));
            };
            if child.is_deleted() {
                let kind = if category.is_config() {
                    WarningKind::DeletedNodeModified
                } else {
                    WarningKind::NonConfigNodeSkipped
                };
                let message = format!(
                    "ancestor '{}' is deleted or not configuration; definition ignored",
                    child.path()
                );
                self.warn(kind, definition.path(), definition.origin(), message);
                return Ok(None);
            }
            node = child;
        }
        Ok(Some(node))
    }

    /// Merges a definition that targets the root node itself.
    pub(super) fn merge_root(
        &mut self,
        root: &mut ConfigurationNode,
        definition: &Arc<DefinitionNode>,
    ) -> ConfigTreeResult<()> {
        let modification = if definition.is_delete() {
            Some("delete")
        } else if definition.category().is_some() {
            Some("re-categorise")
        } else if definition.order_before().is_some() {
            Some("reorder")
        } else {
            None
        };
        if let Some(action) = modification {
            return Err(Arc::new(ConfigTreeError::RootModification {
                action,
                origin: definition.origin().to_owned(),
            }));
        }
        self.apply_node_flags(root, definition);
        self.merge_content(root, definition)
    }

    /// Merges `definition` into the child of `parent` it names.
    pub(super) fn merge_child(
        &mut self,
        parent: &mut ConfigurationNode,
        definition: &Arc<DefinitionNode>,
    ) -> ConfigTreeResult<()> {
        let key = definition.segment().force_index();
        if definition.is_deleted_and_empty() {
            self.delete_child(parent, &key, definition);
            return Ok(());
        }
        if definition.is_delete()
            && let Some(existing) = parent
                .child_at(&key)
                .filter(|node| !node.is_deleted() && node.has_live_content())
        {
            return Err(Arc::new(ConfigTreeError::DeleteAndRedefine {
                path: existing.path().clone(),
                origin: definition.origin().to_owned(),
                prior: existing.origins(),
            }));
        }
        match definition.category() {
            Some(category @ (Category::Content | Category::System)) => {
                self.hide_child(parent, &key, definition, category);
                return Ok(());
            }
            Some(Category::Config) => restore_child(parent, &key, definition),
            None => {}
        }
        if !self.ensure_child(parent, &key, definition)? {
            return Ok(());
        }
        if let Some(child) = parent.child_mut(&key) {
            self.apply_node_flags(child, definition);
        }
        self.apply_order_before(parent, &key, definition)?;
        self.resolve_deferred(parent, &key);
        parent
            .child_mut(&key)
            .map_or(Ok(()), |child| self.merge_content(child, definition))
    }

    /// Merges properties, checks the primary type, then recurses into the
    /// declared children in declaration order.
    fn merge_content(
        &mut self,
        node: &mut ConfigurationNode,
        definition: &DefinitionNode,
    ) -> ConfigTreeResult<()> {
        for property in definition.properties() {
            self.merge_property(node, property)?;
        }
        if node.primary_type().is_none() {
            return Err(Arc::new(ConfigTreeError::MissingPrimaryType {
                path: node.path().clone(),
                origin: definition.origin().to_owned(),
            }));
        }
        for child in definition.nodes() {
            self.merge_child(node, child)?;
        }
        Ok(())
    }

    /// Makes sure a live child exists under `key`, creating it when allowed.
    ///
    /// Returns `false` when the definition must be skipped.
    fn ensure_child(
        &mut self,
        parent: &mut ConfigurationNode,
        key: &PathSegment,
        definition: &DefinitionNode,
    ) -> ConfigTreeResult<bool> {
        let category = parent.child_node_category(key.name());
        match parent.child_at(key) {
            Some(existing) if existing.is_deleted() => {
                let kind = if category.is_config() {
                    WarningKind::DeletedNodeModified
                } else {
                    WarningKind::NonConfigNodeSkipped
                };
                let message = format!(
                    "node '{}' was deleted or hidden earlier; definition ignored",
                    existing.path()
                );
                self.warn(kind, definition.path(), definition.origin(), message);
                Ok(false)
            }
            Some(_) => Ok(true),
            None if definition.category() != Some(Category::Config) && !category.is_config() => {
                self.warn(
                    WarningKind::NonConfigNodeSkipped,
                    definition.path(),
                    definition.origin(),
                    format!("children named '{}' are {category}; definition ignored", key.name()),
                );
                Ok(false)
            }
            None => {
                create_child(parent, key, definition)?;
                Ok(true)
            }
        }
    }

    fn apply_node_flags(&mut self, node: &mut ConfigurationNode, definition: &Arc<DefinitionNode>) {
        node.add_definition(definition);
        if let Some(category) = definition.residual_child_category() {
            node.set_residual_node_category(category);
        }
        let Some(ignore) = definition.ignore_reordered_children() else {
            return;
        };
        match node.ignore_reordered_children() {
            Some(current) if current == ignore => self.warn_redundant(
                WarningKind::RedundantIgnoreReorderedChildren,
                node.path(),
                definition.origin(),
                format!("ignore-reordered-children is already {ignore}"),
            ),
            Some(current) => self.warn(
                WarningKind::OverriddenIgnoreReorderedChildren,
                node.path(),
                definition.origin(),
                format!("ignore-reordered-children changes from {current} to {ignore}"),
            ),
            None => {}
        }
        node.set_ignore_reordered_children(ignore);
    }

    fn delete_child(
        &mut self,
        parent: &mut ConfigurationNode,
        key: &PathSegment,
        definition: &Arc<DefinitionNode>,
    ) {
        let Some(existing) = parent.child_at(key) else {
            self.warn(
                WarningKind::MissingNodeDeleted,
                definition.path(),
                definition.origin(),
                "node to delete does not exist",
            );
            return;
        };
        if existing.is_deleted() {
            self.warn(
                WarningKind::DeletedNodeModified,
                definition.path(),
                definition.origin(),
                "node is already deleted",
            );
            return;
        }
        let snapshot = existing.clone();
        let tombstone = existing.tombstone(Some(definition));
        tracing::debug!(path = %snapshot.path(), origin = definition.origin(), "deleting node");
        self.deleted_nodes.insert(snapshot.path().clone(), snapshot);
        parent.clear_child_node_category(key.name());
        if sns::is_same_name_sibling(parent, key) {
            sns::remove_and_renumber(parent, key);
        } else {
            parent.children_mut().insert(key.clone(), tombstone);
        }
    }

    /// Hands the child over to content or system ownership.
    ///
    /// Only the first same-name sibling survives, as a tombstone recorded in
    /// the delete ledger; the others are dropped unrecorded. The override is
    /// stored on the parent so later definitions skip the name.
    fn hide_child(
        &mut self,
        parent: &mut ConfigurationNode,
        key: &PathSegment,
        definition: &Arc<DefinitionNode>,
        category: Category,
    ) {
        sns::keep_only_first(parent, key.name());
        let first = key.with_index(1);
        let hidden = parent
            .child_at(&first)
            .filter(|node| !node.is_deleted())
            .map(|node| (node.clone(), node.tombstone(Some(definition))));
        if let Some((snapshot, placeholder)) = hidden {
            self.deleted_nodes.insert(snapshot.path().clone(), snapshot);
            parent.children_mut().insert(first, placeholder);
        }
        tracing::debug!(
            path = %definition.path(),
            origin = definition.origin(),
            %category,
            "node handed over to non-configuration category"
        );
        parent.set_child_node_category(key.name(), category, definition);
    }
}

/// Rejects content from one extension group landing on a node created by
/// another.
pub(super) fn check_extension_group(
    parent: &ConfigurationNode,
    definition: &DefinitionNode,
) -> ConfigTreeResult<()> {
    let key = definition.segment().force_index();
    let Some(existing) = parent.child_at(&key) else {
        return Ok(());
    };
    let group = definition.source().extension_group();
    if existing.is_deleted() || !definition.has_content() || existing.extension_group() == group {
        return Ok(());
    }
    let existing_origin = existing
        .definitions()
        .first()
        .map_or("<bootstrap>", |d| d.origin());
    Err(Arc::new(ConfigTreeError::ExtensionGroupConflict {
        path: existing.path().clone(),
        origin: definition.origin().to_owned(),
        group: group.unwrap_or(CORE_GROUP).to_owned(),
        existing_origin: existing_origin.to_owned(),
        existing_group: existing.extension_group().unwrap_or(CORE_GROUP).to_owned(),
    }))
}

/// Clears a category override and revives a node it had hidden.
///
/// The revived node starts empty but keeps the tombstone's definition trail.
fn restore_child(parent: &mut ConfigurationNode, key: &PathSegment, definition: &DefinitionNode) {
    if parent.clear_child_node_category(key.name()).is_none() {
        return;
    }
    let parent_path = parent.path().clone();
    if let Some(existing) = parent.child_mut(key)
        && existing.is_deleted()
    {
        let mut revived = ConfigurationNode::new_child(
            &parent_path,
            key,
            definition.source().extension_group(),
        );
        for earlier in existing.definitions() {
            revived.add_definition(earlier);
        }
        *existing = revived;
    }
}

fn create_child(
    parent: &mut ConfigurationNode,
    key: &PathSegment,
    definition: &DefinitionNode,
) -> ConfigTreeResult<()> {
    if key.index() > 1 {
        let previous = key.with_index(key.index() - 1);
        if !parent.child_at(&previous).is_some_and(|node| !node.is_deleted()) {
            return Err(Arc::new(ConfigTreeError::SnsGap {
                path: definition.path().clone(),
                missing: previous.to_string(),
                origin: definition.origin().to_owned(),
            }));
        }
    }
    let node = ConfigurationNode::new_child(
        parent.path(),
        key,
        definition.source().extension_group(),
    );
    parent.children_mut().insert(key.clone(), node);
    Ok(())
}
