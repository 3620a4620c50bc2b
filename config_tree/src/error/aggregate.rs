//! Several fatal merge errors reported as one.

use std::{error::Error, fmt, sync::Arc};

use super::ConfigTreeError;
use crate::path::NodePath;

/// Fatal errors gathered while closing a module.
///
/// [`crate::ConfigurationTreeBuilder::finish_module`] uses this to report
/// every unresolved order-before directive at once, in the order the
/// directives were parked.
///
/// # Examples
///
/// ```
/// use config_tree::{ConfigTreeError, NodePath};
///
/// let unresolved = |name: &str| ConfigTreeError::MissingOrderBeforeTarget {
///     path: NodePath::root().child_named(name),
///     sibling: String::from("gone"),
///     origin: String::from("a.yaml"),
/// };
/// let err = ConfigTreeError::try_aggregate(vec![unresolved("x"), unresolved("y")]);
/// let Some(ConfigTreeError::Aggregate(all)) = err else {
///     panic!("two errors aggregate");
/// };
/// assert_eq!(all.paths().map(ToString::to_string).collect::<Vec<_>>(), ["/x", "/y"]);
/// ```
#[derive(Debug, Default)]
pub struct AggregatedErrors(Vec<Arc<ConfigTreeError>>);

impl AggregatedErrors {
    /// Wraps `errors` in reporting order.
    #[must_use]
    pub const fn new(errors: Vec<Arc<ConfigTreeError>>) -> Self {
        Self(errors)
    }

    /// The gathered errors.
    pub fn iter(&self) -> impl Iterator<Item = &ConfigTreeError> {
        self.0.iter().map(Arc::as_ref)
    }

    /// Tree paths named by the gathered errors, skipping those without one.
    pub fn paths(&self) -> impl Iterator<Item = &NodePath> {
        self.iter().filter_map(ConfigTreeError::path)
    }

    /// Number of gathered errors.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when nothing was gathered.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Releases the gathered errors.
    #[must_use]
    pub fn into_errors(self) -> Vec<Arc<ConfigTreeError>> {
        self.0
    }
}

impl fmt::Display for AggregatedErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut errors = self.iter();
        if let Some(first) = errors.next() {
            write!(f, "  - {first}")?;
        }
        errors.try_for_each(|err| write!(f, "\n  - {err}"))
    }
}

impl Error for AggregatedErrors {}
