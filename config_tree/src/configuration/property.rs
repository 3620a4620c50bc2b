//! Merged properties.

use std::sync::Arc;

use crate::definition::DefinitionProperty;
use crate::model::{ModelItem, PropertyKind, PropertyValues};
use crate::path::NodePath;
use crate::value::{Value, ValueType};
use crate::{ConfigTreeError, ConfigTreeResult};

/// The authoritative state of one property after merging.
#[derive(Debug, Clone)]
pub struct ConfigurationProperty {
    name: String,
    path: NodePath,
    kind: PropertyKind,
    value_type: ValueType,
    values: Option<PropertyValues>,
    definitions: Vec<Arc<DefinitionProperty>>,
    deleted: bool,
}

impl ConfigurationProperty {
    pub(crate) fn new(
        node_path: &NodePath,
        name: &str,
        kind: PropertyKind,
        value_type: ValueType,
    ) -> Self {
        Self {
            name: name.to_owned(),
            path: node_path.child_named(name),
            kind,
            value_type,
            values: None,
            definitions: Vec::new(),
            deleted: false,
        }
    }

    pub(crate) fn with_values(mut self, values: PropertyValues) -> Self {
        self.values = Some(values);
        self
    }

    /// A placeholder that keeps this property's provenance and kind but no
    /// value, marked deleted.
    pub(crate) fn tombstone(&self, deleting: &Arc<DefinitionProperty>) -> Self {
        let mut definitions = self.definitions.clone();
        definitions.push(Arc::clone(deleting));
        Self {
            name: self.name.clone(),
            path: self.path.clone(),
            kind: self.kind,
            value_type: self.value_type,
            values: None,
            definitions,
            deleted: true,
        }
    }

    pub(crate) fn relocate(&mut self, node_path: &NodePath) {
        self.path = node_path.child_named(&self.name);
    }

    pub(crate) fn add_definition(&mut self, definition: &Arc<DefinitionProperty>) {
        self.definitions.push(Arc::clone(definition));
    }

    pub(crate) const fn set_kind(&mut self, kind: PropertyKind) {
        self.kind = kind;
    }

    pub(crate) const fn set_value_type(&mut self, value_type: ValueType) {
        self.value_type = value_type;
    }

    pub(crate) fn set_values(&mut self, values: Option<PropertyValues>) {
        self.values = values;
    }

    /// Single, list or set.
    #[must_use]
    pub const fn kind(&self) -> PropertyKind {
        self.kind
    }

    /// Value type shared by all values.
    #[must_use]
    pub const fn value_type(&self) -> ValueType {
        self.value_type
    }

    /// The value storage, or `None` for a tombstone.
    #[must_use]
    pub const fn raw_values(&self) -> Option<&PropertyValues> {
        self.values.as_ref()
    }

    /// The single value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigTreeError::ValueAccessor`] for list and set properties.
    pub fn value(&self) -> ConfigTreeResult<Option<&Value>> {
        match &self.values {
            _ if self.kind.is_multiple() => Err(self.accessor_error("single-value")),
            Some(PropertyValues::Single(value)) => Ok(Some(value)),
            _ => Ok(None),
        }
    }

    /// The values of a list or set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigTreeError::ValueAccessor`] for single-valued properties.
    pub fn values(&self) -> ConfigTreeResult<&[Value]> {
        match &self.values {
            _ if !self.kind.is_multiple() => Err(self.accessor_error("multi-value")),
            Some(PropertyValues::Multiple(values)) => Ok(values),
            _ => Ok(&[]),
        }
    }

    fn accessor_error(&self, requested: &'static str) -> Arc<ConfigTreeError> {
        Arc::new(ConfigTreeError::ValueAccessor {
            path: self.path.clone(),
            actual: self.kind,
            requested,
        })
    }

    /// Every definition that touched this property, oldest first.
    #[must_use]
    pub fn definitions(&self) -> &[Arc<DefinitionProperty>] {
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
}

impl ModelItem for ConfigurationProperty {
    fn name(&self) -> &str {
        &self.name
    }

    fn path(&self) -> &NodePath {
        &self.path
    }
}

pub(crate) fn join_origins<'a>(origins: impl Iterator<Item = &'a str>) -> String {
    let joined: Vec<&str> = origins.collect();
    if joined.is_empty() {
        String::from("<bootstrap>")
    } else {
        joined.join(", ")
    }
}
