//! The shared predicate type.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::ValidationError;
use crate::subject::Subject;

type CheckFn<S> = dyn Fn(Option<&S>) -> Result<bool, ValidationError> + Send + Sync;

/// A reusable check over an optional value.
///
/// `None` stands for a missing value (an absent field). The outcome is one of:
/// - `Ok(true)`: accepted
/// - `Ok(false)`: rejected; the enclosing object or array validator turns this
///   into an `invalid` error at the right path
/// - `Err(_)`: rejected with a specific cause, which enclosing validators
///   annotate with their path segments
///
/// Predicates are cheap to clone and safe to share between threads.
///
/// # Example
///
/// ```rust
/// use pathcheck::Predicate;
/// use serde_json::{json, Value};
///
/// let is_string = Predicate::satisfies(Value::is_string);
///
/// assert!(is_string.validate(&json!("beluga")).unwrap());
/// assert!(!is_string.validate(&json!(3)).unwrap());
/// assert!(!is_string.check(None).unwrap());
/// ```
pub struct Predicate<S = Value> {
    check: Arc<CheckFn<S>>,
}

impl<S: Subject> Predicate<S> {
    /// Creates a predicate from a closure that sees the missing sentinel.
    pub fn new<F>(check: F) -> Self
    where
        F: Fn(Option<&S>) -> Result<bool, ValidationError> + Send + Sync + 'static,
    {
        Self {
            check: Arc::new(check),
        }
    }

    /// Creates a predicate from a plain test on a present value.
    ///
    /// A missing value is rejected with `Ok(false)`; wrap the result in
    /// `is_required` to report it as `missing` instead.
    pub fn satisfies<F>(test: F) -> Self
    where
        F: Fn(&S) -> bool + Send + Sync + 'static,
    {
        Self::new(move |value| Ok(value.is_some_and(&test)))
    }

    /// Runs the predicate against a possibly missing value.
    pub fn check(&self, value: Option<&S>) -> Result<bool, ValidationError> {
        (self.check)(value)
    }

    /// Runs the predicate against a present value.
    pub fn validate(&self, value: &S) -> Result<bool, ValidationError> {
        self.check(Some(value))
    }
}

impl<S> Clone for Predicate<S> {
    fn clone(&self) -> Self {
        Self {
            check: Arc::clone(&self.check),
        }
    }
}

impl<S> fmt::Debug for Predicate<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate")
            .field("check", &"<function>")
            .finish()
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Predicate>();
    assert_sync::<Predicate>();
};
