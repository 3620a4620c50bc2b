//! Terse constructors for definitions and tree lookups.
//!
//! # Examples
//!
//! ```
//! use config_tree::ConfigurationTreeBuilder;
//! use config_tree_test_helpers::definitions::{merge, text, typed};
//!
//! let mut builder = ConfigurationTreeBuilder::new();
//! let mut node = typed("/a", "main.yaml").expect("valid path");
//! node.add_property(text("title", "hello"));
//! merge(&mut builder, node).expect("merge succeeds");
//! ```

use std::sync::Arc;

use anyhow::{Context, Result};
use config_tree::constants::JCR_PRIMARY_TYPE;
use config_tree::{
    ConfigDefinition, ConfigTreeResult, ConfigurationNode, ConfigurationTreeBuilder,
    DefinitionNode, DefinitionProperty, DefinitionSource, NodePath, Value,
};

/// Primary type given to nodes built with [`typed`].
pub const DEFAULT_PRIMARY_TYPE: &str = "nt:unstructured";

/// A core source with `origin` in module `test-module`.
#[must_use]
pub fn source(origin: &str) -> Arc<DefinitionSource> {
    Arc::new(DefinitionSource::new(origin, "test-module"))
}

/// A source belonging to an extension group.
#[must_use]
pub fn extension_source(origin: &str, group: &str) -> Arc<DefinitionSource> {
    Arc::new(DefinitionSource::new(origin, "test-module").with_extension_group(group))
}

/// An empty node definition at `path`.
///
/// # Errors
///
/// Returns an error when `path` is not a valid absolute path.
pub fn bare(path: &str, origin: &str) -> Result<DefinitionNode> {
    let parsed = NodePath::parse(path).with_context(|| format!("parse path {path}"))?;
    Ok(DefinitionNode::new(parsed, source(origin)))
}

/// A node definition at `path` that declares [`DEFAULT_PRIMARY_TYPE`].
///
/// # Errors
///
/// Returns an error when `path` is not a valid absolute path.
pub fn typed(path: &str, origin: &str) -> Result<DefinitionNode> {
    let mut node = bare(path, origin)?;
    with_type(&mut node);
    Ok(node)
}

/// Declares [`DEFAULT_PRIMARY_TYPE`] on `node`.
pub fn with_type(node: &mut DefinitionNode) -> &mut DefinitionNode {
    node.add_property(DefinitionProperty::single(
        JCR_PRIMARY_TYPE,
        Value::name(DEFAULT_PRIMARY_TYPE),
    ))
}

/// A single-valued string property.
#[must_use]
pub fn text(name: &str, value: &str) -> DefinitionProperty {
    DefinitionProperty::single(name, Value::string(value))
}

/// Pushes `node` as a whole definition.
///
/// # Errors
///
/// Returns the builder's fatal error.
pub fn merge(builder: &mut ConfigurationTreeBuilder, node: DefinitionNode) -> ConfigTreeResult<()> {
    builder.push(&ConfigDefinition::new(node)).map(|_| ())
}

/// Looks up the node at `path` below `root`.
#[must_use]
pub fn lookup<'tree>(root: &'tree ConfigurationNode, path: &str) -> Option<&'tree ConfigurationNode> {
    NodePath::parse(path)
        .ok()
        .and_then(|parsed| root.descendant(&parsed))
}

/// Renders the single value of `property` on the node at `path`.
#[must_use]
pub fn text_value(root: &ConfigurationNode, path: &str, property: &str) -> Option<String> {
    lookup(root, path)?
        .property(property)?
        .value()
        .ok()
        .flatten()
        .map(Value::as_string)
}

/// Renders every value of a list or set `property` on the node at `path`.
#[must_use]
pub fn text_values(root: &ConfigurationNode, path: &str, property: &str) -> Option<Vec<String>> {
    let values = lookup(root, path)?.property(property)?.values().ok()?;
    Some(values.iter().map(Value::as_string).collect())
}
