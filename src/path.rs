//! Failure paths for locating a rejected value inside a nested structure.
//!
//! An [`ErrorPath`] is built inside-out: the innermost combinator fails with
//! an empty path, and every enclosing object, array or label prepends its own
//! [`PathSegment`] as the error unwinds.

use std::fmt::{self, Display};

/// Separator placed between path segments and before the root message.
pub const SEPARATOR: &str = " -> ";

/// A segment of a failure path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A field name or a label (e.g. `address`, `myType`).
    Field(String),
    /// An array index, rendered as `[0]`, `[42]`.
    Index(usize),
}

impl PathSegment {
    /// Creates a new field segment.
    pub fn field(name: impl Into<String>) -> Self {
        PathSegment::Field(name.into())
    }

    /// Creates a new index segment.
    pub fn index(idx: usize) -> Self {
        PathSegment::Index(idx)
    }
}

impl From<&str> for PathSegment {
    fn from(name: &str) -> Self {
        PathSegment::Field(name.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(name: String) -> Self {
        PathSegment::Field(name)
    }
}

impl From<usize> for PathSegment {
    fn from(idx: usize) -> Self {
        PathSegment::Index(idx)
    }
}

impl Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Field(name) => write!(f, "{}", name),
            PathSegment::Index(idx) => write!(f, "[{}]", idx),
        }
    }
}

/// The breadcrumb trail from the outermost validator to the failing value.
///
/// Segments are stored outermost first.
///
/// # Example
///
/// ```rust
/// use pathcheck::{ErrorPath, PathSegment};
///
/// let mut path = ErrorPath::root();
/// path.prepend(PathSegment::field("houseNumber"));
/// path.prepend(PathSegment::index(0));
/// path.prepend(PathSegment::field("addresses"));
///
/// assert_eq!(path.to_string(), "addresses -> [0] -> houseNumber");
/// assert_eq!(path.annotate("invalid"), "addresses -> [0] -> houseNumber -> invalid");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ErrorPath {
    segments: Vec<PathSegment>,
}

impl ErrorPath {
    /// Creates an empty path, pointing at the validated value itself.
    pub fn root() -> Self {
        Self::default()
    }

    /// Creates a path from segments given outermost first.
    pub fn from_segments(segments: impl IntoIterator<Item = PathSegment>) -> Self {
        Self {
            segments: segments.into_iter().collect(),
        }
    }

    /// Adds a segment in front of the existing ones.
    pub fn prepend(&mut self, segment: PathSegment) {
        self.segments.insert(0, segment);
    }

    /// Returns true if this path has no segments.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if this path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the segment closest to the failing value.
    pub fn leaf(&self) -> Option<&PathSegment> {
        self.segments.last()
    }

    /// Returns an iterator over the segments, outermost first.
    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter()
    }

    /// Renders `message` behind this path, e.g. `a -> [1] -> message`.
    pub fn annotate(&self, message: &str) -> String {
        if self.is_root() {
            message.to_string()
        } else {
            format!("{}{}{}", self, SEPARATOR, message)
        }
    }
}

impl Display for ErrorPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(SEPARATOR)?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}
