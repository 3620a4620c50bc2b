//! Property-level merging.

use std::sync::Arc;

use super::MergeState;
use crate::category::Category;
use crate::configuration::{ConfigurationNode, ConfigurationProperty};
use crate::constants::{JCR_MIXIN_TYPES, JCR_PRIMARY_TYPE};
use crate::definition::DefinitionProperty;
use crate::diagnostics::WarningKind;
use crate::model::{ModelItem, PropertyKind, PropertyOperation, PropertyValues};
use crate::value::Value;
use crate::{ConfigTreeError, ConfigTreeResult};

impl MergeState {
    /// Merges one property definition into `node`.
    pub(super) fn merge_property(
        &mut self,
        node: &mut ConfigurationNode,
        definition: &Arc<DefinitionProperty>,
    ) -> ConfigTreeResult<()> {
        if definition.category() == Some(Category::Content) {
            self.warn(
                WarningKind::ContentCategoryOnProperty,
                definition.path(),
                definition.origin(),
                "properties cannot be content; definition ignored",
            );
            return Ok(());
        }
        if node.property(definition.name()).is_some() {
            self.merge_existing_property(node, definition)
        } else {
            self.create_property(node, definition);
            Ok(())
        }
    }

    fn merge_existing_property(
        &mut self,
        node: &mut ConfigurationNode,
        definition: &Arc<DefinitionProperty>,
    ) -> ConfigTreeResult<()> {
        let name = definition.name();
        let prior_category = node.child_property_category(name);
        if node
            .property(name)
            .is_some_and(ConfigurationProperty::is_deleted)
        {
            self.warn(
                WarningKind::DeletedPropertyModified,
                definition.path(),
                definition.origin(),
                "property is already deleted; definition ignored",
            );
            return Ok(());
        }
        let becomes_system =
            definition.category() == Some(Category::System) && prior_category != Category::System;
        if prior_category == Category::System && definition.category() == Some(Category::Config) {
            if let Some(existing) = node.properties_mut().get_mut(name) {
                replace_wholesale(existing, definition);
            }
            node.clear_child_property_category(name);
            return Ok(());
        }
        if becomes_system && !definition.has_value() {
            node.properties_mut().shift_remove(name);
            node.set_child_property_category(name, Category::System, definition);
            return Ok(());
        }
        let Some(existing) = node.properties_mut().get_mut(name) else {
            return Ok(());
        };
        if definition.operation() == PropertyOperation::Delete {
            self.tombstone_property(existing, definition);
        } else {
            self.check_property_change(existing, definition)?;
            apply_values(existing, definition);
        }
        if becomes_system {
            node.set_child_property_category(name, Category::System, definition);
        }
        Ok(())
    }

    fn tombstone_property(
        &mut self,
        existing: &mut ConfigurationProperty,
        definition: &Arc<DefinitionProperty>,
    ) {
        let snapshot = existing.clone();
        *existing = snapshot.tombstone(definition);
        tracing::debug!(path = %snapshot.path(), origin = definition.origin(), "deleting property");
        self.deleted_properties
            .insert(snapshot.path().clone(), snapshot);
    }

    /// Enforces the rules that guard an existing property against silent
    /// changes, and reports no-op replaces.
    fn check_property_change(
        &mut self,
        existing: &ConfigurationProperty,
        definition: &DefinitionProperty,
    ) -> ConfigTreeResult<()> {
        let operation = definition.operation();
        let unchanged = has_same_values(existing, definition);
        if operation == PropertyOperation::Replace
            && unchanged
            && !self.settings.is_redundant_replace_exempt(existing.path())
        {
            self.warn_redundant(
                WarningKind::RedundantReplace,
                definition.path(),
                definition.origin(),
                "replace supplies the value already present",
            );
        }
        if operation == PropertyOperation::Override {
            return Ok(());
        }
        if existing.kind() != definition.kind() {
            return Err(Arc::new(ConfigTreeError::KindConflict {
                path: existing.path().clone(),
                origin: definition.origin().to_owned(),
                existing: existing.kind(),
                incoming: definition.kind(),
                prior: existing.origins(),
            }));
        }
        if existing.value_type() != definition.value_type() {
            return Err(Arc::new(ConfigTreeError::ValueTypeConflict {
                path: existing.path().clone(),
                origin: definition.origin().to_owned(),
                existing: existing.value_type(),
                incoming: definition.value_type(),
                prior: existing.origins(),
            }));
        }
        if existing.name() == JCR_PRIMARY_TYPE && definition.has_value() && !unchanged {
            return Err(Arc::new(ConfigTreeError::PrimaryTypeChange {
                path: existing.path().clone(),
                origin: definition.origin().to_owned(),
                prior: existing.origins(),
            }));
        }
        if existing.name() == JCR_MIXIN_TYPES && operation == PropertyOperation::Replace {
            let removed = removed_values(existing, definition);
            if !removed.is_empty() {
                return Err(Arc::new(ConfigTreeError::MixinRemoval {
                    path: existing.path().clone(),
                    origin: definition.origin().to_owned(),
                    removed: removed.join(", "),
                    prior: existing.origins(),
                }));
            }
        }
        Ok(())
    }

    fn create_property(&mut self, node: &mut ConfigurationNode, definition: &Arc<DefinitionProperty>) {
        let name = definition.name();
        if definition.operation() == PropertyOperation::Delete {
            self.warn(
                WarningKind::MissingPropertyDeleted,
                definition.path(),
                definition.origin(),
                "property to delete does not exist",
            );
            return;
        }
        match definition.category() {
            Some(Category::System) => {
                node.set_child_property_category(name, Category::System, definition);
                if !definition.has_value() {
                    tracing::debug!(path = %definition.path(), "recorded system property marker");
                    return;
                }
            }
            Some(Category::Config) => {
                node.clear_child_property_category(name);
            }
            Some(Category::Content) | None => {}
        }
        if definition.operation() == PropertyOperation::Add
            && node.child_property_category(name) == Category::System
        {
            self.warn(
                WarningKind::AddToMissingSystemProperty,
                definition.path(),
                definition.origin(),
                "add targets a system property without a value; it is treated as new",
            );
        }
        let mut property =
            ConfigurationProperty::new(node.path(), name, definition.kind(), definition.value_type());
        apply_values(&mut property, definition);
        node.properties_mut().insert(name.to_owned(), property);
    }
}

/// Assigns the definition's kind, type and values, discarding what was there.
fn replace_wholesale(property: &mut ConfigurationProperty, definition: &Arc<DefinitionProperty>) {
    property.set_kind(definition.kind());
    property.set_value_type(definition.value_type());
    property.set_values(definition.raw_values().cloned());
    property.add_definition(definition);
}

/// Applies the definition's values according to its operation and records it
/// as a contributor.
///
/// `add` appends to a list and appends only unseen values to a set; every
/// other operation replaces. A definition without values leaves them as they
/// are.
fn apply_values(property: &mut ConfigurationProperty, definition: &Arc<DefinitionProperty>) {
    property.add_definition(definition);
    let Some(incoming) = definition.raw_values() else {
        return;
    };
    if property.kind() != definition.kind() || property.value_type() != definition.value_type() {
        property.set_kind(definition.kind());
        property.set_value_type(definition.value_type());
        property.set_values(None);
    }
    let values = match incoming {
        PropertyValues::Multiple(added) if definition.operation() == PropertyOperation::Add => {
            let mut merged: Vec<Value> = property
                .raw_values()
                .map(|current| current.as_slice().to_vec())
                .unwrap_or_default();
            for value in added {
                if property.kind() == PropertyKind::Set && merged.contains(value) {
                    continue;
                }
                merged.push(value.clone());
            }
            PropertyValues::Multiple(merged)
        }
        other => other.clone(),
    };
    property.set_values(Some(values));
}

fn has_same_values(existing: &ConfigurationProperty, definition: &DefinitionProperty) -> bool {
    existing.kind() == definition.kind()
        && existing.value_type() == definition.value_type()
        && definition.has_value()
        && existing.raw_values() == definition.raw_values()
}

fn removed_values(existing: &ConfigurationProperty, definition: &DefinitionProperty) -> Vec<String> {
    let incoming = definition
        .raw_values()
        .map(PropertyValues::as_slice)
        .unwrap_or_default();
    existing
        .raw_values()
        .map(PropertyValues::as_slice)
        .unwrap_or_default()
        .iter()
        .filter(|value| !incoming.contains(*value))
        .map(Value::as_string)
        .collect()
}
