//! Declared properties.

use std::sync::Arc;

use super::DefinitionSource;
use crate::category::Category;
use crate::model::{ModelItem, PropertyKind, PropertyOperation, PropertyValues};
use crate::path::NodePath;
use crate::value::{Value, ValueType};
use crate::{ConfigTreeError, ConfigTreeResult};

/// One module's declaration of a property.
///
/// Built detached with [`DefinitionProperty::single`],
/// [`DefinitionProperty::list`], [`DefinitionProperty::set`] or
/// [`DefinitionProperty::marker`], then attached with
/// [`super::DefinitionNode::add_property`], which fills in its path and source.
#[derive(Debug, Clone)]
pub struct DefinitionProperty {
    name: String,
    path: NodePath,
    source: Option<Arc<DefinitionSource>>,
    kind: PropertyKind,
    value_type: ValueType,
    values: Option<PropertyValues>,
    operation: PropertyOperation,
    category: Option<Category>,
}

impl DefinitionProperty {
    fn detached(
        name: impl Into<String>,
        kind: PropertyKind,
        value_type: ValueType,
        values: Option<PropertyValues>,
    ) -> Self {
        Self {
            name: name.into(),
            path: NodePath::root(),
            source: None,
            kind,
            value_type,
            values,
            operation: PropertyOperation::default(),
            category: None,
        }
    }

    /// A single-valued property.
    #[must_use]
    pub fn single(name: impl Into<String>, value: Value) -> Self {
        let value_type = value.value_type();
        Self::detached(
            name,
            PropertyKind::Single,
            value_type,
            Some(PropertyValues::Single(value)),
        )
    }

    /// A list-valued property.
    #[must_use]
    pub fn list(name: impl Into<String>, value_type: ValueType, values: Vec<Value>) -> Self {
        Self::detached(
            name,
            PropertyKind::List,
            value_type,
            Some(PropertyValues::Multiple(values)),
        )
    }

    /// A set-valued property.
    #[must_use]
    pub fn set(name: impl Into<String>, value_type: ValueType, values: Vec<Value>) -> Self {
        Self::detached(
            name,
            PropertyKind::Set,
            value_type,
            Some(PropertyValues::Multiple(values)),
        )
    }

    /// A property declared without any value, used for marker-only system
    /// properties and for deletions.
    #[must_use]
    pub fn marker(name: impl Into<String>, kind: PropertyKind, value_type: ValueType) -> Self {
        Self::detached(name, kind, value_type, None)
    }

    /// Sets the merge operation.
    #[must_use]
    pub const fn with_operation(mut self, operation: PropertyOperation) -> Self {
        self.operation = operation;
        self
    }

    /// Sets the category override.
    #[must_use]
    pub const fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub(super) fn attach(&mut self, node_path: &NodePath, source: &Arc<DefinitionSource>) {
        self.path = node_path.child_named(&self.name);
        self.source = Some(Arc::clone(source));
        let attach_value = |value: &mut Value| {
            if value.is_resource() && value.source().is_none() {
                *value = value.clone().with_source(Arc::clone(source));
            }
        };
        match &mut self.values {
            Some(PropertyValues::Single(value)) => attach_value(value),
            Some(PropertyValues::Multiple(values)) => values.iter_mut().for_each(attach_value),
            None => {}
        }
    }

    /// The source this property was declared in.
    #[must_use]
    pub fn source(&self) -> Option<&Arc<DefinitionSource>> {
        self.source.as_ref()
    }

    /// Origin used in diagnostics.
    #[must_use]
    pub fn origin(&self) -> &str {
        self.source.as_ref().map_or("<detached>", |s| s.origin())
    }

    /// Single, list or set.
    #[must_use]
    pub const fn kind(&self) -> PropertyKind {
        self.kind
    }

    /// Declared value type.
    #[must_use]
    pub const fn value_type(&self) -> ValueType {
        self.value_type
    }

    /// Declared merge operation.
    #[must_use]
    pub const fn operation(&self) -> PropertyOperation {
        self.operation
    }

    /// Declared category override, if any.
    #[must_use]
    pub const fn category(&self) -> Option<Category> {
        self.category
    }

    /// Returns `true` when any value was supplied.
    #[must_use]
    pub const fn has_value(&self) -> bool {
        self.values.is_some()
    }

    /// The value storage, if any.
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
        match (&self.values, self.kind) {
            (_, PropertyKind::List | PropertyKind::Set) => Err(Arc::new(
                ConfigTreeError::ValueAccessor {
                    path: self.path.clone(),
                    actual: self.kind,
                    requested: "single-value",
                },
            )),
            (Some(PropertyValues::Single(value)), PropertyKind::Single) => Ok(Some(value)),
            (_, PropertyKind::Single) => Ok(None),
        }
    }

    /// The values of a list or set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigTreeError::ValueAccessor`] for single-valued properties.
    pub fn values(&self) -> ConfigTreeResult<Option<&[Value]>> {
        match (&self.values, self.kind) {
            (_, PropertyKind::Single) => Err(Arc::new(ConfigTreeError::ValueAccessor {
                path: self.path.clone(),
                actual: self.kind,
                requested: "multi-value",
            })),
            (Some(PropertyValues::Multiple(values)), _) => Ok(Some(values)),
            (_, _) => Ok(None),
        }
    }
}

impl ModelItem for DefinitionProperty {
    fn name(&self) -> &str {
        &self.name
    }

    fn path(&self) -> &NodePath {
        &self.path
    }
}
