//! Shared fixtures for the behavioural scenarios.

use std::sync::Arc;

use config_tree::{ConfigTreeError, ConfigurationNode, ConfigurationTreeBuilder};
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;

/// State threaded through the steps of one scenario.
#[derive(Debug, Default, ScenarioState)]
pub struct TreeContext {
    /// The builder receiving definitions.
    pub builder: Slot<ConfigurationTreeBuilder>,
    /// The first fatal error raised by a push or module finish.
    pub failure: Slot<Arc<ConfigTreeError>>,
    /// The pruned tree, once built.
    pub tree: Slot<ConfigurationNode>,
}

/// Creates an empty scenario state.
#[fixture]
pub fn tree_context() -> TreeContext {
    TreeContext::default()
}
