//! Validation error types.
//!
//! This module provides [`ValidationError`], the single error raised by every
//! predicate, and [`with_path`], the wrapper every composite predicate uses to
//! annotate a failure with its location.

use std::error::Error as StdError;
use std::fmt::{self, Display};
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;
use thiserror::Error;

use crate::path::{ErrorPath, PathSegment};

/// The three kinds of failure an error policy can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The value is present but has the wrong shape.
    Invalid,
    /// The value is absent.
    Missing,
    /// The value carries a key the schema does not know.
    Unsupported,
}

impl ErrorKind {
    /// Returns the lowercase name of this kind, used as the default code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Invalid => "invalid",
            ErrorKind::Missing => "missing",
            ErrorKind::Unsupported => "unsupported",
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rejected value, with the path leading to it.
///
/// The `Display` output is the path joined with `" -> "` followed by the root
/// message, e.g. `myType -> addresses -> [0] -> houseNumber -> invalid`.
/// Consumers may match on that text; it is stable.
///
/// Everything but the path is fixed by whoever created the error (usually an
/// [`ErrorPolicy`](crate::ErrorPolicy) handler) and is carried unchanged
/// through every enclosing combinator.
///
/// # Example
///
/// ```rust
/// use pathcheck::{ErrorKind, ValidationError};
///
/// let error = ValidationError::new(ErrorKind::Invalid, "dang")
///     .with_code("E_DANG")
///     .nested("whales")
///     .nested(1usize);
///
/// assert_eq!(error.kind, ErrorKind::Invalid);
/// assert_eq!(error.code, "E_DANG");
/// assert_eq!(error.to_string(), "[1] -> whales -> dang");
/// ```
#[derive(Debug, Clone, Error)]
#[error("{}", .path.annotate(.message))]
pub struct ValidationError {
    /// Which policy handler produced the error.
    pub kind: ErrorKind,
    /// Where the rejected value sits, outermost segment first.
    pub path: ErrorPath,
    /// The message given at creation, without any path.
    pub message: String,
    /// Machine-readable error code; defaults to the kind name.
    pub code: String,
    /// Extra attributes attached by the creator.
    pub attributes: IndexMap<String, Value>,
    #[source]
    source: Option<Arc<dyn StdError + Send + Sync>>,
}

impl ValidationError {
    /// Creates an error of the given kind with an empty path.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            path: ErrorPath::root(),
            message: message.into(),
            code: kind.as_str().to_string(),
            attributes: IndexMap::new(),
            source: None,
        }
    }

    /// Sets the error code and returns self for chaining.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    /// Attaches a named attribute and returns self for chaining.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Records the error that caused this rejection.
    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Arc::new(source));
        self
    }

    /// Returns this error with `segment` prepended to its path.
    pub fn nested(mut self, segment: impl Into<PathSegment>) -> Self {
        self.path.prepend(segment.into());
        self
    }

    /// Returns the attribute stored under `name`, if any.
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// Returns true if this error rejects a present but unacceptable value.
    pub fn is_invalid(&self) -> bool {
        self.kind == ErrorKind::Invalid
    }

    /// Returns true if this error reports an absent required value.
    pub fn is_missing(&self) -> bool {
        self.kind == ErrorKind::Missing
    }

    /// Returns true if this error reports a key a strict schema does not name.
    pub fn is_unsupported(&self) -> bool {
        self.kind == ErrorKind::Unsupported
    }
}

// Predicates are shared across threads, and so are the errors they return.
const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ValidationError>();
    assert_sync::<ValidationError>();
};

/// Runs `f`, nesting any error it returns under `segment`.
///
/// Success passes through untouched. This is the one place path segments are
/// added; object, array and label predicates all go through it.
///
/// ```rust
/// use pathcheck::{with_path, ErrorKind, ValidationError};
///
/// let result: Result<bool, _> = with_path("outer", || {
///     with_path("inner", || Err(ValidationError::new(ErrorKind::Invalid, "invalid")))
/// });
///
/// assert_eq!(result.unwrap_err().to_string(), "outer -> inner -> invalid");
/// ```
pub fn with_path<T, F>(segment: impl Into<PathSegment>, f: F) -> Result<T, ValidationError>
where
    F: FnOnce() -> Result<T, ValidationError>,
{
    f().map_err(|error| error.nested(segment))
}
