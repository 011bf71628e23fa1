//! Primitive combinators: required, optional and label.
//!
//! - `required`: a missing value is reported through the policy
//! - `optional`: missing and null values are accepted as-is
//! - `label`: failures are nested under a name, accepted values flow onward

use std::fmt;

use serde_json::Value;

use crate::error::{with_path, ValidationError};
use crate::policy::ErrorPolicy;
use crate::schema::Predicate;
use crate::subject::Subject;

/// Rejects a missing value with `policy.missing()`, otherwise defers to
/// `predicate` without adding any path.
pub(crate) fn required<S: Subject>(policy: ErrorPolicy, predicate: Predicate<S>) -> Predicate<S> {
    Predicate::<S>::new(move |value: Option<&S>| match value {
        None => Err(policy.missing()),
        Some(_) => predicate.check(value),
    })
}

/// Accepts a missing or null value without consulting `predicate`.
pub(crate) fn optional<S: Subject>(predicate: Predicate<S>) -> Predicate<S> {
    Predicate::<S>::new(move |value: Option<&S>| match value {
        None => Ok(true),
        Some(v) if v.is_null() => Ok(true),
        Some(_) => predicate.check(value),
    })
}

/// A predicate whose failures are reported under a name.
///
/// Used as a predicate (via `From`), a label passes the inner verdict
/// through. [`Label::apply`] additionally hands the accepted value back, so
/// it can be used where the value must keep flowing.
///
/// # Example
///
/// ```rust
/// use pathcheck::{is_object_of, is_required, label, Predicate};
/// use serde_json::{json, Value};
///
/// let is_user = label("user", is_object_of([
///     ("name", is_required(Predicate::satisfies(Value::is_string))),
/// ]));
///
/// let value = json!({ "name": "ada" });
/// assert_eq!(is_user.apply(&value).unwrap(), Some(&value));
///
/// let error = is_user.apply(&json!({})).unwrap_err();
/// assert_eq!(error.to_string(), "user -> name -> missing");
/// ```
pub struct Label<S = Value> {
    name: String,
    predicate: Predicate<S>,
}

impl<S: Subject> Label<S> {
    pub(crate) fn new(name: impl Into<String>, predicate: Predicate<S>) -> Self {
        Self {
            name: name.into(),
            predicate,
        }
    }

    /// Returns the name failures are nested under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Runs the inner predicate, nesting any error under this label.
    pub fn check(&self, value: Option<&S>) -> Result<bool, ValidationError> {
        with_path(self.name.as_str(), || self.predicate.check(value))
    }

    /// Returns `Some(value)` when accepted and `None` when the inner predicate
    /// answered `false`.
    pub fn apply<'a>(&self, value: &'a S) -> Result<Option<&'a S>, ValidationError> {
        Ok(self.check(Some(value))?.then_some(value))
    }

    /// Converts this label into a plain predicate.
    pub fn into_predicate(self) -> Predicate<S> {
        Predicate::<S>::new(move |value: Option<&S>| self.check(value))
    }
}

impl<S: Subject> From<Label<S>> for Predicate<S> {
    fn from(label: Label<S>) -> Self {
        label.into_predicate()
    }
}

impl<S> Clone for Label<S> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            predicate: self.predicate.clone(),
        }
    }
}

impl<S> fmt::Debug for Label<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Label")
            .field("name", &self.name)
            .field("predicate", &self.predicate)
            .finish()
    }
}
