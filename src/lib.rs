//! # Pathcheck
//!
//! Composable structural predicates over plain data, with errors that say
//! exactly where validation failed.
//!
//! ## Overview
//!
//! Small predicates are combined into object and array predicates, which
//! nest into full schemas. Validation stops at the first failure, and the
//! resulting [`ValidationError`] carries the breadcrumb trail from the outer
//! value down to the rejected one:
//!
//! ```text
//! myType -> addresses -> [0] -> houseNumber -> invalid
//! ```
//!
//! ## Core Types
//!
//! - [`Predicate`]: a shareable check over an optionally missing value
//! - [`ValidationError`]: kind, path, message and custom attributes
//! - [`ErrorPolicy`]: how invalid, missing and unsupported values are reported
//! - [`Validators`]: every factory, bound to one policy
//! - [`Subject`]: what a value must expose to be validated
//! - [`ErrorValue`]: JSON plus caught errors, for validating error-like values
//!
//! ## Example
//!
//! ```rust
//! use pathcheck::{is_array_of, is_optional, is_partial_object_of, is_required, scalar};
//! use serde_json::json;
//!
//! let is_string = is_required(scalar::string());
//! let is_number = is_required(scalar::number());
//!
//! let is_address = is_partial_object_of([
//!     ("street", is_string.clone()),
//!     ("houseNumber", is_number.clone()),
//! ]);
//! let is_my_type = is_partial_object_of([
//!     ("foo", is_optional(is_string.clone())),
//!     ("bar", is_number.clone()),
//!     ("arr", is_array_of(is_number)),
//!     ("addresses", is_optional(is_array_of(is_address))),
//! ]);
//! let is_my_other_type = is_partial_object_of([("baz", is_string), ("myType", is_my_type)]);
//!
//! let error = is_my_other_type
//!     .validate(&json!({
//!         "baz": "dop",
//!         "myType": {
//!             "bar": 3,
//!             "arr": [3, 3],
//!             "addresses": [{ "street": "penny lane", "houseNumber": "13" }]
//!         }
//!     }))
//!     .unwrap_err();
//!
//! assert_eq!(
//!     error.to_string(),
//!     "myType -> addresses -> [0] -> houseNumber -> invalid"
//! );
//! ```

pub mod error;
pub mod path;
pub mod policy;
pub mod registry;
pub mod schema;
pub mod subject;
pub mod validation;

pub use error::{with_path, ErrorKind, ValidationError};
pub use path::{ErrorPath, PathSegment};
pub use policy::{ErrorPolicy, Handler, PolicyEntry};
pub use registry::{PredicateRegistry, RegistryError};
pub use schema::{scalar, Label, Predicate, Validators};
pub use subject::{ErrorValue, Subject};
pub use validation::{validate, ValidationResult};

use serde_json::Value;

/// Strict object predicate under the standard policy.
///
/// Keys not named in `schema` are rejected as `unsupported`.
pub fn is_object_of<K, I>(schema: I) -> Predicate
where
    K: Into<String>,
    I: IntoIterator<Item = (K, Predicate)>,
{
    Validators::<Value>::standard().is_object_of(schema)
}

/// Partial object predicate under the standard policy.
///
/// Keys not named in `schema` are ignored.
pub fn is_partial_object_of<K, I>(schema: I) -> Predicate
where
    K: Into<String>,
    I: IntoIterator<Item = (K, Predicate)>,
{
    Validators::<Value>::standard().is_partial_object_of(schema)
}

/// Array predicate under the standard policy.
pub fn is_array_of(element: Predicate) -> Predicate {
    Validators::<Value>::standard().is_array_of(element)
}

/// Required predicate under the standard policy.
pub fn is_required(predicate: Predicate) -> Predicate {
    Validators::<Value>::standard().is_required(predicate)
}

/// Accepts missing and null values without consulting `predicate`.
pub fn is_optional(predicate: Predicate) -> Predicate {
    schema::combinators::optional(predicate)
}

/// Nests failures of `predicate` under `name`.
pub fn label(name: impl Into<String>, predicate: Predicate) -> Label {
    Label::new(name, predicate)
}

/// Checks a handler table and returns every factory bound to it.
///
/// The table must hold exactly `handleInvalid`, `handleMissing` and
/// `handleUnsupported`, each a handler; see [`ErrorPolicy::from_table`].
///
/// # Errors
///
/// Returns the gate's standard-policy error when the table is malformed,
/// e.g. `handleInvalid -> missing`.
///
/// # Example
///
/// ```rust
/// use pathcheck::{custom_errors, scalar, ErrorKind, PolicyEntry, ValidationError};
/// use serde_json::json;
///
/// let v = custom_errors([
///     ("handleInvalid", PolicyEntry::handler(|| ValidationError::new(ErrorKind::Invalid, "dang"))),
///     ("handleMissing", PolicyEntry::handler(|| ValidationError::new(ErrorKind::Missing, "crap"))),
///     ("handleUnsupported", PolicyEntry::handler(|| ValidationError::new(ErrorKind::Unsupported, "doh"))),
/// ])
/// .unwrap();
///
/// let is_car = v.is_object_of([("frond", v.is_required(scalar::string()))]);
/// let error = is_car.validate(&json!({ "frond": "gop", "foooo": "bar" })).unwrap_err();
/// assert_eq!(error.to_string(), "foooo -> doh");
/// ```
pub fn custom_errors<K, I>(table: I) -> Result<Validators, ValidationError>
where
    K: Into<String>,
    I: IntoIterator<Item = (K, PolicyEntry)>,
{
    ErrorPolicy::from_table(table).map(Validators::new)
}
