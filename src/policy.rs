//! Error policies: how invalid, missing and unsupported values are reported.
//!
//! Every object, array and required predicate is built against an
//! [`ErrorPolicy`]. The standard policy produces errors whose messages are
//! exactly `invalid`, `missing` and `unsupported`. A custom policy can be
//! supplied either as three typed handlers ([`ErrorPolicy::new`]) or as an
//! untyped handler table, which is checked by a strict object predicate
//! before it is accepted ([`ErrorPolicy::from_table`]).

use std::fmt;
use std::sync::{Arc, LazyLock};

use indexmap::IndexMap;
use serde_json::Value;

use crate::error::{ErrorKind, ValidationError};
use crate::schema::object::{object_of, Strictness};
use crate::schema::{combinators, Predicate};
use crate::subject::Subject;

/// A zero-argument constructor for a fresh error.
pub type Handler = Arc<dyn Fn() -> ValidationError + Send + Sync>;

/// Table key for the invalid-value handler.
pub const HANDLE_INVALID: &str = "handleInvalid";
/// Table key for the missing-value handler.
pub const HANDLE_MISSING: &str = "handleMissing";
/// Table key for the unsupported-key handler.
pub const HANDLE_UNSUPPORTED: &str = "handleUnsupported";

/// The three error constructors used by object, array and required
/// predicates.
///
/// # Example
///
/// ```rust
/// use pathcheck::{ErrorKind, ErrorPolicy, ValidationError};
///
/// let policy = ErrorPolicy::new(
///     || ValidationError::new(ErrorKind::Invalid, "dang"),
///     || ValidationError::new(ErrorKind::Missing, "crap"),
///     || ValidationError::new(ErrorKind::Unsupported, "doh"),
/// );
///
/// assert_eq!(policy.invalid().to_string(), "dang");
/// assert_eq!(ErrorPolicy::standard().missing().to_string(), "missing");
/// ```
#[derive(Clone)]
pub struct ErrorPolicy {
    handle_invalid: Handler,
    handle_missing: Handler,
    handle_unsupported: Handler,
}

impl ErrorPolicy {
    /// Creates a policy from three typed handlers.
    pub fn new<I, M, U>(handle_invalid: I, handle_missing: M, handle_unsupported: U) -> Self
    where
        I: Fn() -> ValidationError + Send + Sync + 'static,
        M: Fn() -> ValidationError + Send + Sync + 'static,
        U: Fn() -> ValidationError + Send + Sync + 'static,
    {
        Self {
            handle_invalid: Arc::new(handle_invalid),
            handle_missing: Arc::new(handle_missing),
            handle_unsupported: Arc::new(handle_unsupported),
        }
    }

    /// The built-in policy: plain errors reading `invalid`, `missing` and
    /// `unsupported`.
    pub fn standard() -> Self {
        Self::new(
            || ValidationError::new(ErrorKind::Invalid, "invalid"),
            || ValidationError::new(ErrorKind::Missing, "missing"),
            || ValidationError::new(ErrorKind::Unsupported, "unsupported"),
        )
    }

    /// Builds a policy from an untyped handler table.
    ///
    /// The table must hold exactly `handleInvalid`, `handleMissing` and
    /// `handleUnsupported`, each a [`PolicyEntry::Handler`]. Anything else is
    /// rejected with a standard-policy error naming the offending key, e.g.
    /// `handleInvalid -> missing` or `shibby -> unsupported`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pathcheck::{ErrorKind, ErrorPolicy, PolicyEntry, ValidationError};
    ///
    /// let result = ErrorPolicy::from_table([
    ///     ("handleMissing", PolicyEntry::handler(|| ValidationError::new(ErrorKind::Missing, "crap"))),
    ///     ("handleUnsupported", PolicyEntry::handler(|| ValidationError::new(ErrorKind::Unsupported, "doh"))),
    /// ]);
    ///
    /// assert_eq!(result.unwrap_err().to_string(), "handleInvalid -> missing");
    /// ```
    pub fn from_table<K, I>(table: I) -> Result<Self, ValidationError>
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, PolicyEntry)>,
    {
        let mut entries: IndexMap<String, PolicyEntry> = table
            .into_iter()
            .map(|(key, entry)| (key.into(), entry))
            .collect();

        let candidate = PolicyEntry::Table(entries.clone());
        if let Err(error) = POLICY_GATE.validate(&candidate) {
            tracing::debug!(%error, "rejected custom error policy");
            return Err(error);
        }

        match (
            entries.shift_remove(HANDLE_INVALID),
            entries.shift_remove(HANDLE_MISSING),
            entries.shift_remove(HANDLE_UNSUPPORTED),
        ) {
            (
                Some(PolicyEntry::Handler(handle_invalid)),
                Some(PolicyEntry::Handler(handle_missing)),
                Some(PolicyEntry::Handler(handle_unsupported)),
            ) => {
                tracing::trace!("accepted custom error policy");
                Ok(Self {
                    handle_invalid,
                    handle_missing,
                    handle_unsupported,
                })
            }
            _ => Err(Self::standard().invalid()),
        }
    }

    /// Creates a fresh invalid-value error.
    pub fn invalid(&self) -> ValidationError {
        (self.handle_invalid)()
    }

    /// Creates a fresh missing-value error.
    pub fn missing(&self) -> ValidationError {
        (self.handle_missing)()
    }

    /// Creates a fresh unsupported-key error.
    pub fn unsupported(&self) -> ValidationError {
        (self.handle_unsupported)()
    }
}

impl Default for ErrorPolicy {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for ErrorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorPolicy").finish_non_exhaustive()
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ErrorPolicy>();
    assert_sync::<ErrorPolicy>();
};

/// One slot of an untyped handler table.
#[derive(Clone)]
pub enum PolicyEntry {
    /// A callable error constructor.
    Handler(Handler),
    /// Any plain data value; never acceptable as a handler.
    Value(Value),
    /// A nested table.
    Table(IndexMap<String, PolicyEntry>),
}

impl PolicyEntry {
    /// Wraps a closure as a handler entry.
    pub fn handler<F>(handler: F) -> Self
    where
        F: Fn() -> ValidationError + Send + Sync + 'static,
    {
        PolicyEntry::Handler(Arc::new(handler))
    }
}

impl From<Value> for PolicyEntry {
    fn from(value: Value) -> Self {
        PolicyEntry::Value(value)
    }
}

impl fmt::Debug for PolicyEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyEntry::Handler(_) => f.write_str("Handler(<function>)"),
            PolicyEntry::Value(value) => f.debug_tuple("Value").field(value).finish(),
            PolicyEntry::Table(table) => f.debug_tuple("Table").field(table).finish(),
        }
    }
}

impl Subject for PolicyEntry {
    fn is_null(&self) -> bool {
        matches!(self, PolicyEntry::Value(Value::Null))
    }

    fn keys(&self) -> Option<Vec<&str>> {
        match self {
            PolicyEntry::Table(table) => Some(table.keys().map(String::as_str).collect()),
            _ => None,
        }
    }

    fn get(&self, key: &str) -> Option<&Self> {
        match self {
            PolicyEntry::Table(table) => table.get(key),
            _ => None,
        }
    }

    // Tables only hold handlers and scalars; there are no sequences to walk.
    fn elements(&self) -> Option<&[Self]> {
        None
    }
}

/// Strict object predicate over the standard policy that a handler table
/// must pass before it becomes an [`ErrorPolicy`].
static POLICY_GATE: LazyLock<Predicate<PolicyEntry>> = LazyLock::new(|| {
    let is_handler = || {
        combinators::required(
            ErrorPolicy::standard(),
            Predicate::<PolicyEntry>::new(|entry| match entry {
                Some(PolicyEntry::Handler(_)) => Ok(true),
                _ => Err(ValidationError::new(ErrorKind::Invalid, "must be function")),
            }),
        )
    };

    object_of(
        Strictness::Strict,
        ErrorPolicy::standard(),
        [
            (HANDLE_INVALID, is_handler()),
            (HANDLE_MISSING, is_handler()),
            (HANDLE_UNSUPPORTED, is_handler()),
        ],
    )
});
