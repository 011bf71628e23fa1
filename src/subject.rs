//! Values that predicates can inspect.
//!
//! Object and array validators only need to ask a value a handful of
//! structural questions. [`Subject`] captures those questions so the same
//! factories work over `serde_json::Value` and over any other tree-shaped
//! type, such as the handler table checked by the error policy gate.
//!
//! [`ErrorValue`] extends JSON with caught errors. An error answers
//! `get("message")` like any record, but its message and source are not
//! listed among its keys, so strict object predicates only see the
//! attributes a caller attached.

use std::error::Error as StdError;

use indexmap::IndexMap;
use serde_json::Value;

use crate::schema::Predicate;

/// A value with enough structure to be validated by the object and array
/// factories.
///
/// The missing sentinel is not part of this trait: an absent value is passed
/// to predicates as `None`, while [`Subject::is_null`] reports the explicit
/// "no value" sentinel of a present one.
pub trait Subject: Sized + Send + Sync + 'static {
    /// Returns true for the explicit empty value (JSON `null`).
    fn is_null(&self) -> bool;

    /// Returns the own keys in insertion order, or `None` if this value is
    /// not a record.
    fn keys(&self) -> Option<Vec<&str>>;

    /// Returns the value stored under `key`, if this is a record holding it.
    fn get(&self, key: &str) -> Option<&Self>;

    /// Returns the elements in order, or `None` if this value is not a
    /// sequence.
    fn elements(&self) -> Option<&[Self]>;
}

impl Subject for Value {
    fn is_null(&self) -> bool {
        Value::is_null(self)
    }

    fn keys(&self) -> Option<Vec<&str>> {
        self.as_object()
            .map(|map| map.keys().map(String::as_str).collect())
    }

    fn get(&self, key: &str) -> Option<&Self> {
        self.as_object().and_then(|map| map.get(key))
    }

    fn elements(&self) -> Option<&[Self]> {
        self.as_array().map(Vec::as_slice)
    }
}

/// Converts an error into a plain record.
///
/// The record holds the error's `message` and, when present, its `source`
/// as a nested record. Callers add their own attributes (a `code`, a status)
/// on the returned value. Both built-in fields are ordinary keys here, so a
/// strict object predicate must name them; use [`ErrorValue`] to keep them
/// out of the key list.
///
/// ```rust
/// use pathcheck::subject::error_record;
/// use serde_json::json;
///
/// let io = std::io::Error::new(std::io::ErrorKind::NotFound, "Test error");
/// let mut record = error_record(&io);
/// record["code"] = json!(9001);
///
/// assert_eq!(record, json!({ "message": "Test error", "code": 9001 }));
/// ```
pub fn error_record(error: &(dyn StdError + 'static)) -> Value {
    ErrorValue::from_error(error).to_value()
}

/// A JSON-shaped value that may also hold a caught error.
///
/// # Example
///
/// ```rust
/// use pathcheck::subject::ErrorValue;
/// use pathcheck::{scalar, Validators};
/// use serde_json::json;
///
/// let v = Validators::<ErrorValue>::standard();
/// let is_coded = v.is_object_of([("code", v.is_required(ErrorValue::lift(scalar::number())))]);
///
/// let io = std::io::Error::new(std::io::ErrorKind::Other, "Test error");
/// let error = ErrorValue::from_error(&io).with_attribute("code", json!(9001));
/// assert!(is_coded.validate(&error).unwrap());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorValue {
    /// A JSON scalar or `null`.
    Scalar(Value),
    /// Named values in insertion order.
    Record(IndexMap<String, ErrorValue>),
    /// An ordered sequence.
    Sequence(Vec<ErrorValue>),
    /// A caught error.
    Error {
        /// `message`, and `source` when the error has one. Readable by name,
        /// never listed as keys.
        builtins: IndexMap<String, ErrorValue>,
        /// Caller-added attributes.
        attributes: IndexMap<String, ErrorValue>,
    },
}

impl ErrorValue {
    /// Captures an error's message and source chain.
    pub fn from_error(error: &(dyn StdError + 'static)) -> Self {
        let mut builtins = IndexMap::new();
        builtins.insert(
            "message".to_string(),
            ErrorValue::Scalar(Value::String(error.to_string())),
        );
        if let Some(source) = error.source() {
            builtins.insert("source".to_string(), Self::from_error(source));
        }
        ErrorValue::Error {
            builtins,
            attributes: IndexMap::new(),
        }
    }

    /// Adds an attribute to an error or a field to a record.
    ///
    /// Scalars and sequences have no keys and are returned unchanged.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<ErrorValue>) -> Self {
        match &mut self {
            ErrorValue::Error { attributes, .. } | ErrorValue::Record(attributes) => {
                attributes.insert(key.into(), value.into());
            }
            ErrorValue::Scalar(_) | ErrorValue::Sequence(_) => {}
        }
        self
    }

    /// Flattens into plain JSON. An error becomes a record holding its
    /// built-in fields followed by its attributes.
    pub fn to_value(&self) -> Value {
        match self {
            ErrorValue::Scalar(value) => value.clone(),
            ErrorValue::Record(fields) => Value::Object(
                fields
                    .iter()
                    .map(|(key, value)| (key.clone(), value.to_value()))
                    .collect(),
            ),
            ErrorValue::Sequence(items) => Value::Array(items.iter().map(Self::to_value).collect()),
            ErrorValue::Error {
                builtins,
                attributes,
            } => Value::Object(
                builtins
                    .iter()
                    .chain(attributes)
                    .map(|(key, value)| (key.clone(), value.to_value()))
                    .collect(),
            ),
        }
    }

    /// Runs a JSON predicate against this type.
    ///
    /// Scalars are checked directly; records, sequences and errors are
    /// checked in their [`to_value`](Self::to_value) form.
    pub fn lift(predicate: Predicate<Value>) -> Predicate<ErrorValue> {
        Predicate::<ErrorValue>::new(move |value: Option<&ErrorValue>| match value {
            None => predicate.check(None),
            Some(ErrorValue::Scalar(scalar)) => predicate.check(Some(scalar)),
            Some(other) => predicate.check(Some(&other.to_value())),
        })
    }
}

impl From<Value> for ErrorValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => ErrorValue::Record(
                map.into_iter()
                    .map(|(key, value)| (key, ErrorValue::from(value)))
                    .collect(),
            ),
            Value::Array(items) => {
                ErrorValue::Sequence(items.into_iter().map(ErrorValue::from).collect())
            }
            scalar => ErrorValue::Scalar(scalar),
        }
    }
}

impl Subject for ErrorValue {
    fn is_null(&self) -> bool {
        matches!(self, ErrorValue::Scalar(Value::Null))
    }

    fn keys(&self) -> Option<Vec<&str>> {
        match self {
            ErrorValue::Record(fields) => Some(fields.keys().map(String::as_str).collect()),
            ErrorValue::Error { attributes, .. } => {
                Some(attributes.keys().map(String::as_str).collect())
            }
            ErrorValue::Scalar(_) | ErrorValue::Sequence(_) => None,
        }
    }

    fn get(&self, key: &str) -> Option<&Self> {
        match self {
            ErrorValue::Record(fields) => fields.get(key),
            // Attributes shadow built-ins of the same name.
            ErrorValue::Error {
                builtins,
                attributes,
            } => attributes.get(key).or_else(|| builtins.get(key)),
            ErrorValue::Scalar(_) | ErrorValue::Sequence(_) => None,
        }
    }

    fn elements(&self) -> Option<&[Self]> {
        match self {
            ErrorValue::Sequence(items) => Some(items.as_slice()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, thiserror::Error)]
    #[error("outer failure")]
    struct Outer(#[source] std::io::Error);

    #[test]
    fn test_value_keys_keep_insertion_order() {
        let value = json!({ "zebra": 1, "apple": 2, "mango": 3 });
        assert_eq!(value.keys(), Some(vec!["zebra", "apple", "mango"]));
    }

    #[test]
    fn test_non_records_have_no_keys() {
        assert_eq!(json!([1, 2]).keys(), None);
        assert_eq!(json!("text").keys(), None);
        assert_eq!(json!(null).keys(), None);
    }

    #[test]
    fn test_elements_only_for_arrays() {
        let value = json!([1, "two"]);
        assert_eq!(value.elements().map(<[Value]>::len), Some(2));
        assert!(json!({}).elements().is_none());
        assert!(json!(3).elements().is_none());
    }

    #[test]
    fn test_get_distinguishes_null_from_absent() {
        let value = json!({ "present": null });
        assert!(value.get("present").is_some_and(Subject::is_null));
        assert!(value.get("absent").is_none());
    }

    #[test]
    fn test_error_record_includes_source_chain() {
        let error = Outer(std::io::Error::new(std::io::ErrorKind::Other, "inner failure"));
        let record = error_record(&error);

        assert_eq!(
            record,
            json!({
                "message": "outer failure",
                "source": { "message": "inner failure" }
            })
        );
    }

    #[test]
    fn test_error_value_hides_builtins_from_keys() {
        let error = ErrorValue::from_error(&Outer(std::io::Error::new(
            std::io::ErrorKind::Other,
            "inner failure",
        )))
        .with_attribute("code", json!(9001));

        assert_eq!(error.keys(), Some(vec!["code"]));
        assert_eq!(
            error.get("message"),
            Some(&ErrorValue::Scalar(json!("outer failure")))
        );
        assert!(error.get("source").is_some_and(|s| s.get("message").is_some()));
        assert!(error.get("stack").is_none());
    }

    #[test]
    fn test_error_value_from_json_keeps_shape() {
        let value = json!({ "a": [1, null], "b": { "c": "d" } });
        let converted = ErrorValue::from(value.clone());

        assert_eq!(converted.keys(), Some(vec!["a", "b"]));
        assert_eq!(converted.get("a").and_then(Subject::elements).map(<[_]>::len), Some(2));
        assert_eq!(converted.to_value(), value);
    }

    #[test]
    fn test_error_value_flattens_with_attributes_last() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        let error = ErrorValue::from_error(&io).with_attribute("status", json!(500));
        assert_eq!(error.to_value(), json!({ "message": "boom", "status": 500 }));
    }
}
