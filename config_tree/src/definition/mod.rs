//! The declared, per-module view of the tree.
//!
//! An external parser turns each source file into one or more
//! [`ConfigDefinition`]s. Each is a [`DefinitionNode`] tree rooted at an
//! absolute path, tagged with the [`DefinitionSource`] it came from.

mod node;
mod property;
mod source;

use std::sync::Arc;

pub use node::DefinitionNode;
pub use property::DefinitionProperty;
pub use source::DefinitionSource;

/// A complete definition ready to be pushed into the builder.
#[derive(Debug, Clone)]
pub struct ConfigDefinition {
    root: Arc<DefinitionNode>,
}

impl ConfigDefinition {
    /// Wraps a finished definition tree.
    #[must_use]
    pub fn new(root: DefinitionNode) -> Self {
        Self {
            root: Arc::new(root),
        }
    }

    /// The definition's root node.
    #[must_use]
    pub const fn root(&self) -> &Arc<DefinitionNode> {
        &self.root
    }

    /// The source the definition was read from.
    #[must_use]
    pub fn source(&self) -> &Arc<DefinitionSource> {
        self.root.source()
    }
}

impl From<DefinitionNode> for ConfigDefinition {
    fn from(root: DefinitionNode) -> Self {
        Self::new(root)
    }
}
