//! Order-before handling.
//!
//! A directive whose target sibling does not exist yet is parked, keyed by
//! the target's path, until that sibling is merged or the module finishes.

use std::sync::Arc;

use indexmap::IndexMap;

use super::MergeState;
use crate::configuration::ConfigurationNode;
use crate::definition::DefinitionNode;
use crate::diagnostics::WarningKind;
use crate::model::{ModelItem, OrderBefore};
use crate::path::PathSegment;
use crate::{ConfigTreeError, ConfigTreeResult};

impl MergeState {
    /// Applies the definition's order-before directive to the child at `key`.
    pub(super) fn apply_order_before(
        &mut self,
        parent: &mut ConfigurationNode,
        key: &PathSegment,
        definition: &Arc<DefinitionNode>,
    ) -> ConfigTreeResult<()> {
        let Some(order_before) = definition.order_before() else {
            return Ok(());
        };
        if parent.ignore_reordered_children() == Some(true) {
            self.warn(
                WarningKind::OrderBeforeIgnored,
                definition.path(),
                definition.origin(),
                format!(
                    "'{}' ignores reordered children; ordering before '{order_before}' has no lasting effect",
                    parent.path()
                ),
            );
        }
        let target = match order_before {
            OrderBefore::First => None,
            OrderBefore::Sibling(name) => {
                let target = PathSegment::from(name.as_str()).force_index();
                if target == *key {
                    return Err(Arc::new(ConfigTreeError::SelfOrderBefore {
                        path: definition.path().clone(),
                        origin: definition.origin().to_owned(),
                    }));
                }
                if !parent.child_at(&target).is_some_and(|node| !node.is_deleted()) {
                    let target_path = parent.path().child(target.suppress_index());
                    tracing::debug!(
                        path = %definition.path(),
                        target = %target_path,
                        "deferring order-before until the target exists"
                    );
                    let displaced = self
                        .deferred_order_before
                        .insert(target_path.clone(), Arc::clone(definition));
                    if let Some(earlier) = displaced {
                        tracing::debug!(
                            path = %earlier.path(),
                            origin = earlier.origin(),
                            target = %target_path,
                            replaced_by = %definition.path(),
                            "dropping earlier deferred order-before on the same target"
                        );
                    }
                    return Ok(());
                }
                Some(target)
            }
        };
        if !reorder(parent, key, target.as_ref()) {
            self.warn_redundant(
                WarningKind::UnnecessaryOrderBefore,
                definition.path(),
                definition.origin(),
                format!("node is already ordered before '{order_before}'"),
            );
        }
        Ok(())
    }

    /// Places a node that was waiting for the child at `key` to appear.
    pub(super) fn resolve_deferred(&mut self, parent: &mut ConfigurationNode, key: &PathSegment) {
        let target_path = parent.path().child(key.suppress_index());
        let Some(waiting) = self.deferred_order_before.shift_remove(&target_path) else {
            return;
        };
        let waiting_key = waiting.segment().force_index();
        if parent
            .child_at(&waiting_key)
            .is_some_and(|node| !node.is_deleted())
        {
            reorder(parent, &waiting_key, Some(key));
            tracing::debug!(
                path = %waiting.path(),
                target = %target_path,
                "resolved deferred order-before"
            );
        }
    }

    /// Drains every parked directive, reporting those left unresolved.
    pub(super) fn check_unresolved_order_before(&mut self) -> ConfigTreeResult<()> {
        let errors: Vec<ConfigTreeError> = self
            .deferred_order_before
            .drain(..)
            .map(|(target_path, waiting)| ConfigTreeError::MissingOrderBeforeTarget {
                path: waiting.path().clone(),
                sibling: target_path
                    .last_segment()
                    .map(ToString::to_string)
                    .unwrap_or_default(),
                origin: waiting.origin().to_owned(),
            })
            .collect();
        ConfigTreeError::try_aggregate(errors).map_or(Ok(()), |err| Err(Arc::new(err)))
    }
}

/// Moves the child at `key` immediately before `target`, or first when
/// `target` is `None`.
///
/// Returns `false` when the child was already in place.
fn reorder(parent: &mut ConfigurationNode, key: &PathSegment, target: Option<&PathSegment>) -> bool {
    let Some(current) = parent.children_mut().get_index_of(key) else {
        return false;
    };
    let in_place = target.map_or(current == 0, |sibling| {
        parent
            .children_mut()
            .get_index(current + 1)
            .is_some_and(|(next, _)| next == sibling)
    });
    if in_place {
        return false;
    }
    let Some(entry) = parent.children_mut().shift_remove_entry(key) else {
        return false;
    };
    let remaining = std::mem::take(parent.children_mut());
    let mut moving = Some(entry);
    let mut reordered = IndexMap::with_capacity(remaining.len() + 1);
    if target.is_none() {
        reordered.extend(moving.take());
    }
    for (segment, child) in remaining {
        if Some(&segment) == target {
            reordered.extend(moving.take());
        }
        reordered.insert(segment, child);
    }
    reordered.extend(moving.take());
    parent.replace_children(reordered);
    true
}
