//! Binds the behavioural feature files to the step registry.

use crate::fixtures::{TreeContext, tree_context};
use rstest_bdd_macros::scenarios;

scenarios!(
    "tests/features/same_name_siblings.feature",
    fixtures = [tree_context: TreeContext]
);
scenarios!(
    "tests/features/ordering.feature",
    fixtures = [tree_context: TreeContext]
);
scenarios!(
    "tests/features/properties.feature",
    fixtures = [tree_context: TreeContext]
);
scenarios!(
    "tests/features/categories.feature",
    fixtures = [tree_context: TreeContext]
);
