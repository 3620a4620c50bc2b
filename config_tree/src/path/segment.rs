//! A single named step in a [`super::NodePath`].

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::Arc;

use crate::{ConfigTreeError, ConfigTreeResult};

/// A node or property name with an optional same-name-sibling index.
///
/// Indices are 1-based. A segment without an explicit index compares and
/// hashes as index 1, so `a` and `a[1]` address the same node; the explicit
/// form only changes how the segment is displayed.
#[derive(Debug, Clone)]
pub struct PathSegment {
    name: String,
    index: Option<u32>,
}

impl PathSegment {
    /// Creates an unindexed segment without validating `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            index: None,
        }
    }

    /// Parses `name` or `name[index]`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigTreeError::InvalidPath`] for empty names, names
    /// containing `/`, malformed brackets, or an index of zero.
    pub fn parse(raw: &str) -> ConfigTreeResult<Self> {
        let invalid = |message: &str| {
            Arc::new(ConfigTreeError::InvalidPath {
                path: raw.to_owned(),
                message: message.to_owned(),
            })
        };
        if raw.contains('/') {
            return Err(invalid("a segment cannot contain '/'"));
        }
        let (name, index) = match raw.split_once('[') {
            None => (raw, None),
            Some((name, rest)) => {
                let digits = rest
                    .strip_suffix(']')
                    .ok_or_else(|| invalid("unterminated same-name-sibling index"))?;
                let index: u32 = digits
                    .parse()
                    .map_err(|_| invalid("same-name-sibling index must be a positive integer"))?;
                if index == 0 {
                    return Err(invalid("same-name-sibling indices start at 1"));
                }
                (name, Some(index))
            }
        };
        if name.is_empty() {
            return Err(invalid("segment name is empty"));
        }
        if name.contains(']') {
            return Err(invalid("unexpected ']' in segment name"));
        }
        Ok(Self {
            name: name.to_owned(),
            index,
        })
    }

    /// The name without any index.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The effective 1-based index.
    #[must_use]
    pub fn index(&self) -> u32 {
        self.index.unwrap_or(1)
    }

    /// Returns `true` when the index is written out explicitly.
    #[must_use]
    pub const fn has_explicit_index(&self) -> bool {
        self.index.is_some()
    }

    /// Returns the same segment with its index written out.
    #[must_use]
    pub fn force_index(&self) -> Self {
        Self {
            name: self.name.clone(),
            index: Some(self.index()),
        }
    }

    /// Returns the same segment with an index of 1 omitted.
    #[must_use]
    pub fn suppress_index(&self) -> Self {
        Self {
            name: self.name.clone(),
            index: self.index.filter(|index| *index != 1),
        }
    }

    /// Returns a sibling segment with the given index written out.
    #[must_use]
    pub fn with_index(&self, index: u32) -> Self {
        Self {
            name: self.name.clone(),
            index: Some(index),
        }
    }
}

impl PartialEq for PathSegment {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.index() == other.index()
    }
}

impl Eq for PathSegment {}

impl Hash for PathSegment {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.index().hash(state);
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if let Some(index) = self.index {
            write!(f, "[{index}]")?;
        }
        Ok(())
    }
}

impl FromStr for PathSegment {
    type Err = Arc<ConfigTreeError>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<&str> for PathSegment {
    /// Parses `name[index]` leniently: text that is not a valid segment
    /// becomes an unindexed name verbatim.
    fn from(raw: &str) -> Self {
        Self::parse(raw).unwrap_or_else(|_| Self::new(raw))
    }
}
