//! Leaf predicates for JSON scalars.
//!
//! Each of these answers `false` for a missing value or a value of the wrong
//! type, so they compose with `is_required` (missing is an error) and
//! `is_optional` (missing is fine).

use regex::Regex;
use serde_json::Value;

use crate::schema::Predicate;

/// Accepts JSON strings.
pub fn string() -> Predicate {
    Predicate::satisfies(Value::is_string)
}

/// Accepts JSON numbers, integer or not.
pub fn number() -> Predicate {
    Predicate::satisfies(Value::is_number)
}

/// Accepts numbers with no fractional part that fit in an `i64` or `u64`.
pub fn integer() -> Predicate {
    Predicate::satisfies(|value: &Value| value.is_i64() || value.is_u64())
}

/// Accepts `true` and `false`.
pub fn boolean() -> Predicate {
    Predicate::satisfies(Value::is_boolean)
}

/// Accepts only an explicit `null`.
pub fn null() -> Predicate {
    Predicate::satisfies(Value::is_null)
}

/// Accepts strings matching `pattern`.
///
/// # Errors
///
/// Returns the regex compile error if `pattern` is not a valid expression.
///
/// # Example
///
/// ```rust
/// use pathcheck::scalar;
/// use serde_json::json;
///
/// let postcode = scalar::pattern(r"^[A-Z]{1,2}[0-9]{1,2}$").unwrap();
/// assert!(postcode.validate(&json!("NW8")).unwrap());
/// assert!(!postcode.validate(&json!("abbey road")).unwrap());
/// assert!(!postcode.validate(&json!(8)).unwrap());
/// ```
pub fn pattern(pattern: &str) -> Result<Predicate, regex::Error> {
    let regex = Regex::new(pattern)?;
    Ok(Predicate::satisfies(move |value: &Value| {
        value.as_str().is_some_and(|s| regex.is_match(s))
    }))
}
