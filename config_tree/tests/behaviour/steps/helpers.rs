//! Plumbing shared by the step modules.

use anyhow::{Result, anyhow, bail};
use config_tree::{Category, ConfigTreeError, ConfigurationNode, DefinitionNode};
use test_helpers::definitions::merge;

use crate::fixtures::TreeContext;

/// Pushes `node`, keeping the first fatal error for later assertions.
///
/// # Errors
///
/// Fails when no builder was set up.
pub fn push(context: &TreeContext, node: DefinitionNode) -> Result<()> {
    let mut builder = context
        .builder
        .take()
        .ok_or_else(|| anyhow!("no configuration tree was started"))?;
    let outcome = merge(&mut builder, node);
    context.builder.set(builder);
    if let Err(err) = outcome
        && context.failure.is_empty()
    {
        context.failure.set(err);
    }
    Ok(())
}

/// Runs `inspect` against the built tree, or the tree under construction.
///
/// # Errors
///
/// Fails when neither exists.
pub fn with_root<T>(context: &TreeContext, inspect: impl FnOnce(&ConfigurationNode) -> T) -> Result<T> {
    if context.tree.is_filled() {
        return context
            .tree
            .with_ref(inspect)
            .ok_or_else(|| anyhow!("built tree unavailable"));
    }
    context
        .builder
        .with_ref(|builder| inspect(builder.root()))
        .ok_or_else(|| anyhow!("no configuration tree was started"))
}

/// Parses a category keyword.
///
/// # Errors
///
/// Fails for anything but `config`, `content` or `system`.
pub fn parse_category(raw: &str) -> Result<Category> {
    match raw {
        "config" => Ok(Category::Config),
        "content" => Ok(Category::Content),
        "system" => Ok(Category::System),
        other => bail!("unknown category {other}"),
    }
}

/// A stable name for the error variant, used in feature files.
#[must_use]
pub fn error_name(err: &ConfigTreeError) -> &'static str {
    match err {
        ConfigTreeError::UnreachableDefinitionRoot { .. } => "unreachable definition root",
        ConfigTreeError::RootModification { .. } => "root modification",
        ConfigTreeError::SelfOrderBefore { .. } => "self order-before",
        ConfigTreeError::MissingOrderBeforeTarget { .. } => "missing order-before target",
        ConfigTreeError::SnsGap { .. } => "same-name sibling gap",
        ConfigTreeError::ExtensionGroupConflict { .. } => "extension group conflict",
        ConfigTreeError::DeleteAndRedefine { .. } => "delete and redefine",
        ConfigTreeError::KindConflict { .. } => "kind conflict",
        ConfigTreeError::ValueTypeConflict { .. } => "value type conflict",
        ConfigTreeError::PrimaryTypeChange { .. } => "primary type change",
        ConfigTreeError::MixinRemoval { .. } => "mixin removal",
        ConfigTreeError::MissingPrimaryType { .. } => "missing primary type",
        ConfigTreeError::Aggregate(_) => "aggregate",
        _ => "other",
    }
}
