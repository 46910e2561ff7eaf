//! Path addressing for node trees.
//!
//! A [`PathSegment`] names one step into a map (by key) or a list (by index).
//! A [`Path`] is an ordered sequence of segments, rendered as `/`-joined text.
//!
//! # Usage
//!
//! ```rust
//! use arbor::path::{Path, PathSegment};
//! use std::str::FromStr;
//!
//! let path = Path::from_str("users/0/name").unwrap();
//! assert_eq!(path.len(), 3);
//!
//! let built = Path::root().join("users").join(0usize).join("name");
//! assert_eq!(built.to_string(), "users/0/name");
//!
//! // Key segments that look like indices still address list entries.
//! assert_eq!(PathSegment::from("7").as_index(), Some(7));
//! ```

use std::{borrow::Cow, convert::Infallible, fmt, str::FromStr};

/// One step of a path: a map key or a list index.
///
/// Segments parsed from text are always keys; lookups against lists convert them
/// with [`PathSegment::as_index`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A map key
    Key(String),
    /// A list index
    Index(usize),
}

impl PathSegment {
    /// Creates a key segment.
    pub fn key(key: impl Into<String>) -> Self {
        PathSegment::Key(key.into())
    }

    /// Creates an index segment.
    pub fn index(index: usize) -> Self {
        PathSegment::Index(index)
    }

    /// Returns the segment as a list index, parsing key segments as decimal.
    pub fn as_index(&self) -> Option<usize> {
        match self {
            PathSegment::Index(i) => Some(*i),
            PathSegment::Key(s) => s.parse().ok(),
        }
    }

    /// Returns the segment in its map-key form.
    pub fn as_key(&self) -> Cow<'_, str> {
        match self {
            PathSegment::Key(s) => Cow::Borrowed(s),
            PathSegment::Index(i) => Cow::Owned(i.to_string()),
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(s) => f.write_str(s),
            PathSegment::Index(i) => write!(f, "{i}"),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(s: &str) -> Self {
        PathSegment::Key(s.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(s: String) -> Self {
        PathSegment::Key(s)
    }
}

impl From<usize> for PathSegment {
    fn from(i: usize) -> Self {
        PathSegment::Index(i)
    }
}

/// An owned sequence of path segments from some root node.
///
/// The empty path addresses the root itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Path {
    segments: Vec<PathSegment>,
}

impl Path {
    /// The empty path.
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns a new path with `segment` appended.
    pub fn join(&self, segment: impl Into<PathSegment>) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend_from_slice(&self.segments);
        segments.push(segment.into());
        Self { segments }
    }

    /// Appends a segment in place.
    pub fn push(&mut self, segment: impl Into<PathSegment>) {
        self.segments.push(segment.into());
    }

    /// The segments of this path in order.
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true for the root path.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The final segment, if any.
    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }

    /// The path without its final segment. The root is its own parent.
    pub fn parent(&self) -> Path {
        let mut segments = self.segments.clone();
        segments.pop();
        Self { segments }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl FromStr for Path {
    type Err = Infallible;

    /// Parses `/`-separated text. Empty components are dropped, so leading,
    /// trailing and doubled separators are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.split('/')
            .filter(|component| !component.is_empty())
            .map(PathSegment::from)
            .collect())
    }
}

impl From<Vec<PathSegment>> for Path {
    fn from(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }
}

impl FromIterator<PathSegment> for Path {
    fn from_iter<I: IntoIterator<Item = PathSegment>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}
