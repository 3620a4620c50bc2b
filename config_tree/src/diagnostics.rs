//! Recoverable merge diagnostics.
//!
//! Recoverable conditions never abort a merge. Each one is logged through
//! `tracing` at warn level and kept as a [`MergeWarning`] on the builder so
//! callers can report them after the fact.

use std::fmt;

use crate::path::NodePath;

/// The condition behind a [`MergeWarning`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum WarningKind {
    /// A definition targeted a node that was already deleted.
    DeletedNodeModified,
    /// A definition targeted a property that was already deleted.
    DeletedPropertyModified,
    /// A delete targeted a node that does not exist.
    MissingNodeDeleted,
    /// A delete targeted a property that does not exist.
    MissingPropertyDeleted,
    /// A `replace` supplied the value(s) already present.
    RedundantReplace,
    /// An ignore-reordered-children flag repeated the current setting.
    RedundantIgnoreReorderedChildren,
    /// An ignore-reordered-children flag changed an earlier setting.
    OverriddenIgnoreReorderedChildren,
    /// An order-before directive found the node already in place.
    UnnecessaryOrderBefore,
    /// An order-before directive targets children whose order is ignored.
    OrderBeforeIgnored,
    /// An `add` targeted a system property that has no value yet.
    AddToMissingSystemProperty,
    /// A definition tried to merge into a content or system node.
    NonConfigNodeSkipped,
    /// A property declared the content category, which only nodes accept.
    ContentCategoryOnProperty,
}

/// One recoverable diagnostic raised during a merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeWarning {
    kind: WarningKind,
    path: NodePath,
    origin: String,
    message: String,
}

impl MergeWarning {
    /// Records a warning and logs it.
    pub(crate) fn emit(
        kind: WarningKind,
        path: &NodePath,
        origin: &str,
        message: impl Into<String>,
    ) -> Self {
        let message = message.into();
        tracing::warn!(kind = ?kind, path = %path, origin, "{message}");
        Self {
            kind,
            path: path.clone(),
            origin: origin.to_owned(),
            message,
        }
    }

    /// The condition that raised the warning.
    #[must_use]
    pub const fn kind(&self) -> WarningKind {
        self.kind
    }

    /// Path of the affected item.
    #[must_use]
    pub const fn path(&self) -> &NodePath {
        &self.path
    }

    /// Origin of the definition that raised the warning.
    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Human-readable description.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for MergeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.path, self.origin, self.message)
    }
}
