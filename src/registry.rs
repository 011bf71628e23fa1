//! Named predicate storage and late-bound references.
//!
//! This module provides [`PredicateRegistry`], which stores predicates under
//! string names. Its main use is recursive schemas: a predicate cannot
//! capture itself, but it can capture a [`PredicateRegistry::reference`] that
//! looks the name up each time it runs.

use std::cell::Cell;
use std::sync::{Arc, Weak};

use indexmap::{IndexMap, IndexSet};
use parking_lot::RwLock;
use serde_json::Value;

use crate::error::{ErrorKind, ValidationError};
use crate::schema::Predicate;
use crate::subject::Subject;

type PredicateMap<S> = RwLock<IndexMap<String, Predicate<S>>>;

/// Default limit on nested reference resolutions.
pub const DEFAULT_MAX_DEPTH: usize = 100;

thread_local! {
    static REFERENCE_DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// Counts one active reference resolution on this thread until dropped.
struct DepthGuard;

impl DepthGuard {
    /// Enters one more reference level, or returns `None` at `max_depth`.
    fn enter(max_depth: usize) -> Option<Self> {
        REFERENCE_DEPTH.with(|depth| {
            if depth.get() >= max_depth {
                None
            } else {
                depth.set(depth.get() + 1);
                Some(DepthGuard)
            }
        })
    }
}

impl Drop for DepthGuard {
    fn drop(&mut self) {
        REFERENCE_DEPTH.with(|depth| depth.set(depth.get().saturating_sub(1)));
    }
}

/// A thread-safe registry of named predicates.
///
/// Clones share the same storage. References handed out by
/// [`reference`](Self::reference) hold only a weak handle, so a registry
/// whose predicates refer to each other is still freed when the last clone
/// is dropped.
///
/// # Example
///
/// ```rust
/// use pathcheck::{is_array_of, is_object_of, is_optional, is_required, scalar, PredicateRegistry};
/// use serde_json::json;
///
/// let registry = PredicateRegistry::new();
/// registry.register("Node", is_object_of([
///     ("name", is_required(scalar::string())),
///     ("children", is_optional(is_array_of(registry.reference("Node")))),
/// ])).unwrap();
///
/// let tree = json!({
///     "name": "root",
///     "children": [{ "name": "leaf" }, { "name": 7 }]
/// });
///
/// let error = registry.validate("Node", &tree).unwrap().unwrap_err();
/// assert_eq!(error.to_string(), "children -> [1] -> name -> invalid");
/// ```
pub struct PredicateRegistry<S = Value> {
    predicates: Arc<PredicateMap<S>>,
    references: Arc<RwLock<IndexSet<String>>>,
    max_depth: usize,
}

impl<S: Subject> PredicateRegistry<S> {
    /// Creates an empty registry with the default max depth (100).
    pub fn new() -> Self {
        Self {
            predicates: Arc::new(RwLock::new(IndexMap::new())),
            references: Arc::new(RwLock::new(IndexSet::new())),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Sets the maximum number of nested reference resolutions.
    ///
    /// A reference chain that never descends into the value (`A` registered
    /// as `reference("A")`) would otherwise recurse forever. Once a thread is
    /// `depth` references deep, the next reference fails with a
    /// `max_depth_exceeded` error instead. The limit applies to references
    /// created after this call.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pathcheck::PredicateRegistry;
    /// use serde_json::json;
    ///
    /// let registry = PredicateRegistry::new().with_max_depth(8);
    /// registry.register("Loop", registry.reference("Loop")).unwrap();
    ///
    /// let error = registry.validate("Loop", &json!(1)).unwrap().unwrap_err();
    /// assert_eq!(error.code, "max_depth_exceeded");
    /// assert_eq!(error.to_string(), "maximum reference depth 8 exceeded");
    /// ```
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Returns the reference depth limit.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Registers a predicate under `name`.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateName` if the name is already taken.
    pub fn register(
        &self,
        name: impl Into<String>,
        predicate: Predicate<S>,
    ) -> Result<(), RegistryError> {
        let name = name.into();
        let mut predicates = self.predicates.write();

        if predicates.contains_key(&name) {
            return Err(RegistryError::DuplicateName(name));
        }

        tracing::trace!(name = %name, "registered predicate");
        predicates.insert(name, predicate);
        Ok(())
    }

    /// Retrieves a predicate by name.
    pub fn get(&self, name: &str) -> Option<Predicate<S>> {
        self.predicates.read().get(name).cloned()
    }

    /// Returns true if a predicate is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.predicates.read().contains_key(name)
    }

    /// Returns the registered names in registration order.
    pub fn names(&self) -> Vec<String> {
        self.predicates.read().keys().cloned().collect()
    }

    /// Returns the number of registered predicates.
    pub fn len(&self) -> usize {
        self.predicates.read().len()
    }

    /// Returns true if nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.predicates.read().is_empty()
    }

    /// Returns a predicate that runs whatever is registered under `name` at
    /// call time.
    ///
    /// If nothing is registered by then (or the registry is gone) the
    /// reference fails with an invalid error reading
    /// `unresolved reference '<name>'`. Resolving more than
    /// [`max_depth`](Self::max_depth) nested references on one thread fails
    /// with code `max_depth_exceeded`.
    pub fn reference(&self, name: impl Into<String>) -> Predicate<S> {
        let name = name.into();
        self.references.write().insert(name.clone());
        let predicates: Weak<PredicateMap<S>> = Arc::downgrade(&self.predicates);
        let max_depth = self.max_depth;

        Predicate::<S>::new(move |value: Option<&S>| {
            let _depth = DepthGuard::enter(max_depth).ok_or_else(|| {
                tracing::debug!(reference = %name, max_depth, "reference depth exceeded");
                ValidationError::new(
                    ErrorKind::Invalid,
                    format!("maximum reference depth {} exceeded", max_depth),
                )
                .with_code("max_depth_exceeded")
            })?;

            let target = predicates
                .upgrade()
                .and_then(|predicates| predicates.read().get(&name).cloned())
                .ok_or_else(|| {
                    ValidationError::new(
                        ErrorKind::Invalid,
                        format!("unresolved reference '{}'", name),
                    )
                })?;
            target.check(value)
        })
    }

    /// Returns the referenced names that have no registered predicate.
    ///
    /// Call this once every predicate is registered to catch typos before
    /// any value is validated.
    pub fn unresolved(&self) -> Vec<String> {
        let predicates = self.predicates.read();
        let mut unresolved: Vec<String> = self
            .references
            .read()
            .iter()
            .filter(|name| !predicates.contains_key(name.as_str()))
            .cloned()
            .collect();

        unresolved.sort();
        unresolved
    }

    /// Validates a value against the predicate registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::PredicateNotFound` if the name is unknown. The
    /// inner result is the predicate's own verdict.
    pub fn validate(
        &self,
        name: &str,
        value: &S,
    ) -> Result<Result<bool, ValidationError>, RegistryError> {
        let predicate = self
            .get(name)
            .ok_or_else(|| RegistryError::PredicateNotFound(name.to_string()))?;
        Ok(predicate.validate(value))
    }
}

impl<S: Subject> Default for PredicateRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Clone for PredicateRegistry<S> {
    fn clone(&self) -> Self {
        Self {
            predicates: Arc::clone(&self.predicates),
            references: Arc::clone(&self.references),
            max_depth: self.max_depth,
        }
    }
}

/// Errors that can occur during registry operations.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Attempted to register a predicate under a name that already exists.
    #[error("predicate '{0}' already registered")]
    DuplicateName(String),

    /// Attempted to validate with a name that was never registered.
    #[error("predicate '{0}' not found")]
    PredicateNotFound(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::scalar;
    use serde_json::json;

    #[test]
    fn test_register_and_get() {
        let registry = PredicateRegistry::new();
        registry.register("Email", scalar::string()).unwrap();

        assert!(registry.contains("Email"));
        assert!(registry.get("Email").is_some());
        assert!(registry.get("Unknown").is_none());
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.names(), vec!["Email".to_string()]);
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let registry = PredicateRegistry::new();
        registry.register("Email", scalar::string()).unwrap();

        let error = registry.register("Email", scalar::number()).unwrap_err();
        assert!(matches!(error, RegistryError::DuplicateName(ref n) if n == "Email"));
        assert_eq!(error.to_string(), "predicate 'Email' already registered");
    }

    #[test]
    fn test_validate_unknown_name() {
        let registry = PredicateRegistry::<Value>::new();
        let error = registry.validate("Nope", &json!(1)).unwrap_err();
        assert!(matches!(error, RegistryError::PredicateNotFound(_)));
    }

    #[test]
    fn test_reference_resolves_late() {
        let registry = PredicateRegistry::new();
        let later = registry.reference("Later");

        let error = later.validate(&json!("x")).unwrap_err();
        assert_eq!(error.to_string(), "unresolved reference 'Later'");
        assert_eq!(registry.unresolved(), vec!["Later".to_string()]);

        registry.register("Later", scalar::string()).unwrap();
        assert!(later.validate(&json!("x")).unwrap());
        assert!(registry.unresolved().is_empty());
    }

    #[test]
    fn test_reference_outliving_registry() {
        let registry = PredicateRegistry::new();
        registry.register("Id", scalar::integer()).unwrap();
        let id = registry.reference("Id");
        drop(registry);

        let error = id.validate(&json!(1)).unwrap_err();
        assert!(error.is_invalid());
    }

    #[test]
    fn test_self_reference_stops_at_max_depth() {
        let registry = PredicateRegistry::new();
        registry.register("A", registry.reference("A")).unwrap();

        let error = registry.validate("A", &json!(1)).unwrap().unwrap_err();
        assert!(error.is_invalid());
        assert_eq!(error.code, "max_depth_exceeded");
        assert_eq!(error.to_string(), "maximum reference depth 100 exceeded");
    }

    #[test]
    fn test_depth_is_released_after_failure() {
        let registry = PredicateRegistry::new().with_max_depth(4);
        registry.register("A", registry.reference("A")).unwrap();
        registry.register("Id", scalar::integer()).unwrap();
        let id = registry.reference("Id");

        assert!(registry.validate("A", &json!(1)).unwrap().is_err());
        assert!(id.validate(&json!(7)).unwrap());
        REFERENCE_DEPTH.with(|depth| assert_eq!(depth.get(), 0));
    }

    #[test]
    fn test_repeated_references_recorded_once() {
        let registry = PredicateRegistry::<Value>::new();
        for _ in 0..3 {
            registry.reference("Node");
        }
        assert_eq!(registry.references.read().len(), 1);
        assert_eq!(registry.unresolved(), vec!["Node".to_string()]);
    }

    #[test]
    fn test_clones_share_storage() {
        let registry = PredicateRegistry::new();
        let clone = registry.clone();
        clone.register("Flag", scalar::boolean()).unwrap();
        assert!(registry.contains("Flag"));
        assert!(!registry.is_empty());
    }
}
