//! Object validation.
//!
//! An object predicate checks a record field by field against a schema of
//! named predicates. In strict mode it also rejects keys the schema does not
//! name; in partial mode such keys are ignored.

use std::sync::Arc;

use indexmap::IndexMap;

use crate::error::with_path;
use crate::policy::ErrorPolicy;
use crate::schema::Predicate;
use crate::subject::Subject;

/// Whether keys outside the schema are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Strictness {
    Strict,
    Partial,
}

/// Builds an object predicate.
///
/// The returned predicate, in order:
/// 1. raises `missing` for a missing value
/// 2. raises `invalid` for anything that is not a record
/// 3. in strict mode, raises `unsupported` under the first input key (in the
///    input's own order) the schema does not name
/// 4. runs each field predicate in schema order; an error is nested under the
///    field name, and a `false` verdict becomes `invalid` under the field name
///
/// The first failure wins; nothing is accumulated.
pub(crate) fn object_of<S, K, I>(
    strictness: Strictness,
    policy: ErrorPolicy,
    schema: I,
) -> Predicate<S>
where
    S: Subject,
    K: Into<String>,
    I: IntoIterator<Item = (K, Predicate<S>)>,
{
    let fields: Arc<IndexMap<String, Predicate<S>>> = Arc::new(
        schema
            .into_iter()
            .map(|(name, predicate)| (name.into(), predicate))
            .collect(),
    );

    Predicate::<S>::new(move |value: Option<&S>| {
        let record = value.ok_or_else(|| policy.missing())?;
        let keys = record.keys().ok_or_else(|| policy.invalid())?;

        if strictness == Strictness::Strict {
            if let Some(unknown) = keys.into_iter().find(|key| !fields.contains_key(*key)) {
                return Err(policy.unsupported().nested(unknown));
            }
        }

        for (name, predicate) in fields.iter() {
            with_path(name.as_str(), || {
                if predicate.check(record.get(name))? {
                    Ok(())
                } else {
                    Err(policy.invalid())
                }
            })?;
        }

        Ok(true)
    })
}
