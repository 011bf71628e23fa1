//! Array validation.
//!
//! An array predicate applies one element predicate to every member of a
//! sequence, stopping at the first rejected index.

use crate::error::with_path;
use crate::policy::ErrorPolicy;
use crate::schema::Predicate;
use crate::subject::Subject;

/// Builds an array predicate.
///
/// A missing value raises `missing`, a non-sequence raises `invalid`. Each
/// element error is nested under `[i]`, and a `false` verdict becomes
/// `invalid` under `[i]`.
pub(crate) fn array_of<S: Subject>(policy: ErrorPolicy, element: Predicate<S>) -> Predicate<S> {
    Predicate::<S>::new(move |value: Option<&S>| {
        let sequence = value.ok_or_else(|| policy.missing())?;
        let elements = sequence.elements().ok_or_else(|| policy.invalid())?;

        for (index, item) in elements.iter().enumerate() {
            with_path(index, || {
                if element.validate(item)? {
                    Ok(())
                } else {
                    Err(policy.invalid())
                }
            })?;
        }

        Ok(true)
    })
}
