//! Vocabulary shared by the definition and configuration layers.

use std::fmt;

use crate::path::NodePath;
use crate::value::Value;

/// Identity shared by every node and property, declared or merged.
pub trait ModelItem {
    /// The item's name; for nodes this may carry a same-name-sibling index.
    fn name(&self) -> &str;

    /// The item's absolute path.
    fn path(&self) -> &NodePath;
}

/// Whether a property holds one value, a list, or a set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    /// Exactly one value.
    Single,
    /// Ordered values; duplicates allowed.
    List,
    /// Ordered values; `add` skips duplicates.
    Set,
}

impl PropertyKind {
    /// Returns `true` for list and set kinds.
    #[must_use]
    pub const fn is_multiple(self) -> bool {
        !matches!(self, Self::Single)
    }
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Single => "single",
            Self::List => "list",
            Self::Set => "set",
        })
    }
}

/// What a property definition does to the merged property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PropertyOperation {
    /// Append to a multi-valued property.
    Add,
    /// Replace the value(s); the default.
    #[default]
    Replace,
    /// Replace the value(s), allowing kind, type and primary type changes.
    Override,
    /// Remove the property.
    Delete,
}

/// What a node definition does to the merged node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NodeOperation {
    /// Merge the definition into the node; the default.
    #[default]
    Replace,
    /// Remove the node.
    Delete,
}

/// Where a node asks to be placed among its siblings.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OrderBefore {
    /// First child of its parent.
    First,
    /// Immediately before the named sibling.
    Sibling(String),
}

impl fmt::Display for OrderBefore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::First => f.write_str("<first>"),
            Self::Sibling(name) => f.write_str(name),
        }
    }
}

/// Value storage for a property; the variant always matches the kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValues {
    /// Storage for [`PropertyKind::Single`].
    Single(Value),
    /// Storage for [`PropertyKind::List`] and [`PropertyKind::Set`].
    Multiple(Vec<Value>),
}

impl PropertyValues {
    /// All values as a slice, regardless of kind.
    #[must_use]
    pub fn as_slice(&self) -> &[Value] {
        match self {
            Self::Single(value) => std::slice::from_ref(value),
            Self::Multiple(values) => values,
        }
    }
}
