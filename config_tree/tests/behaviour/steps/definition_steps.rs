//! Steps that feed definitions to the builder.

use anyhow::{Result, anyhow};
use config_tree::{
    ConfigurationTreeBuilder, DefinitionProperty, OrderBefore, PropertyOperation, Value, ValueType,
};
use rstest_bdd_macros::{given, when};
use test_helpers::definitions::{bare, text, typed};
use test_helpers::text::{param, param_list};

use super::helpers::{parse_category, push};
use crate::fixtures::TreeContext;

#[given("a fresh configuration tree")]
fn fresh_tree(tree_context: &TreeContext) {
    tree_context.builder.set(ConfigurationTreeBuilder::new());
}

#[given("module {origin} creates node {path}")]
fn create_node(tree_context: &TreeContext, origin: String, path: String) -> Result<()> {
    let node = typed(&param(&path), &param(&origin))?;
    push(tree_context, node)
}

#[given("module {origin} sets property {property} of {path} to {value}")]
fn set_property(
    tree_context: &TreeContext,
    origin: String,
    property: String,
    path: String,
    value: String,
) -> Result<()> {
    let mut node = bare(&param(&path), &param(&origin))?;
    node.add_property(text(&param(&property), &param(&value)));
    push(tree_context, node)
}

#[when("module {origin} redefines property {property} of {path} as the list {values}")]
fn redefine_as_list(
    tree_context: &TreeContext,
    origin: String,
    property: String,
    path: String,
    values: String,
) -> Result<()> {
    push_list(tree_context, &origin, &property, &path, &values, PropertyOperation::Replace)
}

#[when("module {origin} overrides property {property} of {path} with the list {values}")]
fn override_with_list(
    tree_context: &TreeContext,
    origin: String,
    property: String,
    path: String,
    values: String,
) -> Result<()> {
    push_list(tree_context, &origin, &property, &path, &values, PropertyOperation::Override)
}

fn push_list(
    tree_context: &TreeContext,
    origin: &str,
    property: &str,
    path: &str,
    values: &str,
    operation: PropertyOperation,
) -> Result<()> {
    let mut node = bare(&param(path), &param(origin))?;
    let list = param_list(values).into_iter().map(Value::string).collect();
    node.add_property(
        DefinitionProperty::list(param(property), ValueType::String, list)
            .with_operation(operation),
    );
    push(tree_context, node)
}

#[given("module {origin} deletes node {path}")]
fn delete_node(tree_context: &TreeContext, origin: String, path: String) -> Result<()> {
    let mut node = bare(&param(&path), &param(&origin))?;
    node.set_delete();
    push(tree_context, node)
}

#[given("module {origin} orders {path} before {sibling}")]
fn order_before(tree_context: &TreeContext, origin: String, path: String, sibling: String) -> Result<()> {
    let mut node = bare(&param(&path), &param(&origin))?;
    node.set_order_before(OrderBefore::Sibling(param(&sibling)));
    push(tree_context, node)
}

#[given("module {origin} inserts node {path} before {sibling}")]
fn create_ordered(tree_context: &TreeContext, origin: String, path: String, sibling: String) -> Result<()> {
    let mut node = typed(&param(&path), &param(&origin))?;
    node.set_order_before(OrderBefore::Sibling(param(&sibling)));
    push(tree_context, node)
}

#[given("module {origin} orders {path} first")]
fn order_first(tree_context: &TreeContext, origin: String, path: String) -> Result<()> {
    let mut node = bare(&param(&path), &param(&origin))?;
    node.set_order_before(OrderBefore::First);
    push(tree_context, node)
}

#[given("module {origin} marks node {path} as {category}")]
fn mark_category(tree_context: &TreeContext, origin: String, path: String, category: String) -> Result<()> {
    let parsed = parse_category(&param(&category))?;
    let mut node = if parsed.is_config() {
        typed(&param(&path), &param(&origin))?
    } else {
        bare(&param(&path), &param(&origin))?
    };
    node.set_category(parsed);
    push(tree_context, node)
}

#[when("the module is finished")]
fn finish_module(tree_context: &TreeContext) -> Result<()> {
    let mut builder = tree_context
        .builder
        .take()
        .ok_or_else(|| anyhow!("no configuration tree was started"))?;
    let outcome = builder.finish_module().map(|_| ());
    tree_context.builder.set(builder);
    if let Err(err) = outcome {
        tree_context.failure.set(err);
    }
    Ok(())
}

#[when("the tree is built")]
fn build_tree(tree_context: &TreeContext) -> Result<()> {
    let builder = tree_context
        .builder
        .take()
        .ok_or_else(|| anyhow!("no configuration tree was started"))?;
    tree_context.tree.set(builder.build());
    Ok(())
}
