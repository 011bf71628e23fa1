//! Predicate factories.
//!
//! This module provides the [`Predicate`] type and the [`Validators`] bundle,
//! which binds the object, array and required factories to one
//! [`ErrorPolicy`]. The crate root re-exports a standard-policy version of
//! every factory; build a `Validators` yourself (or go through
//! [`custom_errors`](crate::custom_errors)) to change how failures are
//! reported.
//!
//! # Example
//!
//! ```rust
//! use pathcheck::{scalar, ErrorKind, ErrorPolicy, ValidationError, Validators};
//! use serde_json::json;
//!
//! let v = Validators::new(ErrorPolicy::new(
//!     || ValidationError::new(ErrorKind::Invalid, "dang"),
//!     || ValidationError::new(ErrorKind::Missing, "crap"),
//!     || ValidationError::new(ErrorKind::Unsupported, "doh"),
//! ));
//!
//! let is_string = v.is_required(scalar::string());
//! let is_awesome_car = v.is_object_of([
//!     ("whales", v.is_array_of(is_string.clone())),
//!     ("frond", is_string),
//! ]);
//!
//! let error = is_awesome_car
//!     .validate(&json!({ "whales": ["beluga", 3] }))
//!     .unwrap_err();
//! assert_eq!(error.to_string(), "whales -> [1] -> dang");
//! ```

mod array;
pub(crate) mod combinators;
pub(crate) mod object;
mod predicate;
pub mod scalar;

use std::fmt;
use std::marker::PhantomData;

use serde_json::Value;
use stillwater::Validation;

pub use combinators::Label;
pub use predicate::Predicate;

use crate::error::ValidationError;
use crate::policy::ErrorPolicy;
use crate::subject::Subject;
use object::Strictness;

/// The full set of factories, bound to one error policy.
///
/// `is_optional` and `label` do not depend on the policy; they are included
/// so a caller holding a `Validators` has everything in one place.
pub struct Validators<S = Value> {
    policy: ErrorPolicy,
    _subject: PhantomData<fn(&S)>,
}

impl<S: Subject> Validators<S> {
    /// Binds the factories to `policy`.
    pub fn new(policy: ErrorPolicy) -> Self {
        Self {
            policy,
            _subject: PhantomData,
        }
    }

    /// Binds the factories to the standard policy.
    pub fn standard() -> Self {
        Self::new(ErrorPolicy::standard())
    }

    /// Returns the policy failures are built with.
    pub fn policy(&self) -> &ErrorPolicy {
        &self.policy
    }

    /// Strict object predicate: keys outside `schema` are `unsupported`.
    pub fn is_object_of<K, I>(&self, schema: I) -> Predicate<S>
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Predicate<S>)>,
    {
        object::object_of(Strictness::Strict, self.policy.clone(), schema)
    }

    /// Partial object predicate: keys outside `schema` are ignored.
    pub fn is_partial_object_of<K, I>(&self, schema: I) -> Predicate<S>
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Predicate<S>)>,
    {
        object::object_of(Strictness::Partial, self.policy.clone(), schema)
    }

    /// Applies `element` to every member of a sequence.
    pub fn is_array_of(&self, element: Predicate<S>) -> Predicate<S> {
        array::array_of(self.policy.clone(), element)
    }

    /// Reports a missing value as `missing`, otherwise defers to `predicate`.
    pub fn is_required(&self, predicate: Predicate<S>) -> Predicate<S> {
        combinators::required(self.policy.clone(), predicate)
    }

    /// Accepts missing and null values; defers to `predicate` otherwise.
    pub fn is_optional(&self, predicate: Predicate<S>) -> Predicate<S> {
        combinators::optional(predicate)
    }

    /// Nests failures of `predicate` under `name`.
    pub fn label(&self, name: impl Into<String>, predicate: Predicate<S>) -> Label<S> {
        Label::new(name, predicate)
    }

    /// Runs `predicate` and reports the outcome as a [`Validation`].
    ///
    /// A `false` verdict at the top level becomes this policy's invalid
    /// error, matching what an enclosing object or array would report.
    pub fn validate<'a>(
        &self,
        predicate: &Predicate<S>,
        subject: &'a S,
    ) -> Validation<&'a S, ValidationError> {
        match predicate.validate(subject) {
            Ok(true) => Validation::Success(subject),
            Ok(false) => Validation::Failure(self.policy.invalid()),
            Err(error) => Validation::Failure(error),
        }
    }
}

impl<S: Subject> Default for Validators<S> {
    fn default() -> Self {
        Self::standard()
    }
}

impl<S> Clone for Validators<S> {
    fn clone(&self) -> Self {
        Self {
            policy: self.policy.clone(),
            _subject: PhantomData,
        }
    }
}

impl<S> fmt::Debug for Validators<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validators")
            .field("policy", &self.policy)
            .finish()
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Validators>();
    assert_sync::<Validators>();
};
