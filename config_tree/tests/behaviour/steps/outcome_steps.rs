//! Assertions on the merged tree, its warnings and its failures.

use anyhow::{Result, anyhow, ensure};
use config_tree::{ConfigurationNode, WarningKind};
use rstest_bdd_macros::then;
use test_helpers::definitions::{lookup, text_value, text_values};
use test_helpers::text::{param, param_list};

use super::helpers::{error_name, with_root};
use crate::fixtures::TreeContext;

fn warning_name(kind: WarningKind) -> &'static str {
    match kind {
        WarningKind::RedundantReplace => "redundant replace",
        WarningKind::UnnecessaryOrderBefore => "unnecessary order-before",
        WarningKind::DeletedNodeModified => "deleted node modified",
        WarningKind::NonConfigNodeSkipped => "non-config node skipped",
        WarningKind::MissingNodeDeleted => "missing node deleted",
        WarningKind::MissingPropertyDeleted => "missing property deleted",
        _ => "other",
    }
}

#[then("the children of {path} are {names}")]
fn children_are(tree_context: &TreeContext, path: String, names: String) -> Result<()> {
    let wanted = param_list(&names);
    let parent = param(&path);
    let actual = with_root(tree_context, |root| {
        lookup(root, &parent).map(ConfigurationNode::child_names)
    })?
    .ok_or_else(|| anyhow!("{parent} is missing"))?;
    ensure!(actual == wanted, "children of {parent}: {actual:?}");
    Ok(())
}

#[then("property {property} of {path} is {value}")]
fn property_is(tree_context: &TreeContext, property: String, path: String, value: String) -> Result<()> {
    let wanted = param(&value);
    let actual = with_root(tree_context, |root| {
        text_value(root, &param(&path), &param(&property))
    })?;
    ensure!(actual.as_deref() == Some(wanted.as_str()), "found {actual:?}");
    Ok(())
}

#[then("property {property} of {path} holds {values}")]
fn property_holds(
    tree_context: &TreeContext,
    property: String,
    path: String,
    values: String,
) -> Result<()> {
    let wanted = param_list(&values);
    let actual = with_root(tree_context, |root| {
        text_values(root, &param(&path), &param(&property))
    })?;
    ensure!(actual.as_ref() == Some(&wanted), "found {actual:?}");
    Ok(())
}

#[then("the merge fails with {kind}")]
fn merge_fails(tree_context: &TreeContext, kind: String) -> Result<()> {
    let wanted = param(&kind);
    let err = tree_context
        .failure
        .take()
        .ok_or_else(|| anyhow!("every merge succeeded"))?;
    ensure!(error_name(&err) == wanted, "unexpected error: {err}");
    Ok(())
}

#[then("no merge failed")]
fn merge_succeeds(tree_context: &TreeContext) -> Result<()> {
    let failure = tree_context.failure.take();
    ensure!(failure.is_none(), "unexpected failure: {failure:?}");
    Ok(())
}

#[then("a {kind} warning is reported")]
fn warning_reported(tree_context: &TreeContext, kind: String) -> Result<()> {
    let wanted = param(&kind);
    let found = tree_context
        .builder
        .with_ref(|builder| {
            builder
                .warnings()
                .iter()
                .any(|warning| warning_name(warning.kind()) == wanted)
        })
        .ok_or_else(|| anyhow!("warnings are only kept before the tree is built"))?;
    ensure!(found, "no {wanted} warning");
    Ok(())
}

#[then("the deletion of {path} is recorded")]
fn deletion_recorded(tree_context: &TreeContext, path: String) -> Result<()> {
    let wanted = param(&path);
    let recorded = tree_context
        .builder
        .with_ref(|builder| {
            builder
                .deleted_nodes()
                .keys()
                .any(|deleted| deleted.to_string() == wanted)
        })
        .ok_or_else(|| anyhow!("the builder was consumed"))?;
    ensure!(recorded, "{wanted} is not in the deletion ledger");
    Ok(())
}

#[then("node {path} is absent")]
fn node_absent(tree_context: &TreeContext, path: String) -> Result<()> {
    let wanted = param(&path);
    let present = with_root(tree_context, |root| {
        lookup(root, &wanted).is_some_and(|node| !node.is_deleted())
    })?;
    ensure!(!present, "{wanted} still exists");
    Ok(())
}
