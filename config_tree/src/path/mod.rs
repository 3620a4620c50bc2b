//! Absolute paths into the configuration tree.
//!
//! A [`NodePath`] is an ordered list of [`PathSegment`]s. The root is the
//! empty list and renders as `/`. Segments may carry a same-name-sibling
//! index (`/a/b[2]/c`); an omitted index is equivalent to `[1]`.

mod segment;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

pub use segment::PathSegment;

use crate::{ConfigTreeError, ConfigTreeResult};

/// Absolute path of a node or property.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NodePath {
    segments: Vec<PathSegment>,
}

impl NodePath {
    /// The root path.
    pub const ROOT: Self = Self {
        segments: Vec::new(),
    };

    /// Returns the root path.
    #[must_use]
    pub const fn root() -> Self {
        Self::ROOT
    }

    /// Builds a path from already-parsed segments.
    #[must_use]
    pub fn from_segments(segments: impl IntoIterator<Item = PathSegment>) -> Self {
        Self {
            segments: segments.into_iter().collect(),
        }
    }

    /// Parses an absolute path such as `/a/b[2]`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigTreeError::InvalidPath`] when the text is relative,
    /// contains empty segments, or any segment fails to parse.
    pub fn parse(raw: &str) -> ConfigTreeResult<Self> {
        let Some(rest) = raw.strip_prefix('/') else {
            return Err(Arc::new(ConfigTreeError::InvalidPath {
                path: raw.to_owned(),
                message: String::from("path must be absolute"),
            }));
        };
        if rest.is_empty() {
            return Ok(Self::root());
        }
        rest.split('/')
            .map(|part| {
                if part.is_empty() {
                    Err(Arc::new(ConfigTreeError::InvalidPath {
                        path: raw.to_owned(),
                        message: String::from("path contains an empty segment"),
                    }))
                } else {
                    PathSegment::parse(part)
                }
            })
            .collect::<ConfigTreeResult<Vec<_>>>()
            .map(|segments| Self { segments })
    }

    /// Returns `true` for the root path.
    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// The segments from the root downwards.
    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Number of segments.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.segments.len()
    }

    /// The final segment, or `None` for the root.
    #[must_use]
    pub fn last_segment(&self) -> Option<&PathSegment> {
        self.segments.last()
    }

    /// The parent path, or `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.segments.split_last().map(|(_, parent)| Self {
            segments: parent.to_vec(),
        })
    }

    /// Appends `segment`.
    #[must_use]
    pub fn child(&self, segment: PathSegment) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment);
        Self { segments }
    }

    /// Appends a segment parsed leniently from `name`.
    #[must_use]
    pub fn child_named(&self, name: &str) -> Self {
        self.child(PathSegment::from(name))
    }

    /// Returns the sibling path with the last segment replaced.
    #[must_use]
    pub fn sibling(&self, segment: PathSegment) -> Self {
        let mut segments = self.segments.clone();
        segments.pop();
        segments.push(segment);
        Self { segments }
    }

    /// Returns `true` when `prefix` is this path or one of its ancestors.
    #[must_use]
    pub fn starts_with(&self, prefix: &Self) -> bool {
        self.segments.starts_with(&prefix.segments)
    }

    /// Returns the same path with every index written out.
    #[must_use]
    pub fn force_index(&self) -> Self {
        Self::from_segments(self.segments.iter().map(PathSegment::force_index))
    }

    /// Returns the same path with every `[1]` omitted.
    #[must_use]
    pub fn suppress_index(&self) -> Self {
        Self::from_segments(self.segments.iter().map(PathSegment::suppress_index))
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("/");
        }
        for segment in &self.segments {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}

impl FromStr for NodePath {
    type Err = Arc<ConfigTreeError>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
