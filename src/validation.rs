//! Bridging predicates into `stillwater` validations.
//!
//! Predicates stop at the first failure. When several independent values
//! need checking, [`validate`] turns each outcome into a
//! [`Validation`](stillwater::Validation) so the caller can combine them.

use crate::error::ValidationError;
use crate::schema::{Predicate, Validators};
use crate::subject::Subject;

/// Type alias for validation results carrying a single path-annotated error.
pub type ValidationResult<T> = stillwater::Validation<T, ValidationError>;

/// Runs `predicate` against `subject` under the standard policy.
///
/// Acceptance yields the subject back; a `false` verdict yields the
/// standard `invalid` error; any raised error is passed through.
///
/// # Example
///
/// ```rust
/// use pathcheck::{is_object_of, is_required, scalar, validate};
/// use serde_json::json;
/// use stillwater::Validation;
///
/// let is_user = is_object_of([("name", is_required(scalar::string()))]);
///
/// let value = json!({ "name": "ada" });
/// assert!(matches!(validate(&is_user, &value), Validation::Success(_)));
///
/// match validate(&is_user, &json!({ "name": "ada", "age": 36 })) {
///     Validation::Failure(error) => assert_eq!(error.to_string(), "age -> unsupported"),
///     Validation::Success(_) => unreachable!(),
/// }
/// ```
pub fn validate<'a, S: Subject>(predicate: &Predicate<S>, subject: &'a S) -> ValidationResult<&'a S> {
    Validators::standard().validate(predicate, subject)
}
