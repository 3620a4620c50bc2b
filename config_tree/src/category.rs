//! Categories that decide who manages a node or property.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Management category of a node or property.
///
/// Only `Config` items take part in ordinary merging. `Content` items belong
/// to the content bootstrap and `System` items are owned by the running
/// system; both are opaque to later definitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Managed by configuration definitions.
    #[default]
    Config,
    /// Managed as content; applies to nodes only.
    Content,
    /// Managed by the system; values are initial values at most.
    System,
}

impl Category {
    /// Returns `true` for [`Category::Config`].
    #[must_use]
    pub const fn is_config(self) -> bool {
        matches!(self, Self::Config)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Config => "config",
            Self::Content => "content",
            Self::System => "system",
        })
    }
}
