//! Integration tests for named predicates and recursive schemas.

use pathcheck::{
    is_array_of, is_object_of, is_optional, is_partial_object_of, is_required, label, scalar,
    Predicate, PredicateRegistry, RegistryError,
};
use serde_json::json;

fn tree_registry() -> PredicateRegistry {
    let registry = PredicateRegistry::new();
    registry
        .register(
            "Node",
            is_object_of([
                ("name", is_required(scalar::string())),
                ("children", is_optional(is_array_of(registry.reference("Node")))),
            ]),
        )
        .unwrap();
    registry
}

#[test]
fn test_recursive_tree_accepted() {
    let registry = tree_registry();
    let tree = json!({
        "name": "root",
        "children": [
            { "name": "a", "children": [{ "name": "a1" }] },
            { "name": "b", "children": [] }
        ]
    });
    assert!(registry.validate("Node", &tree).unwrap().unwrap());
}

#[test]
fn test_recursive_tree_error_path() {
    let registry = tree_registry();
    let tree = json!({
        "name": "root",
        "children": [
            { "name": "a", "children": [{ "name": "a1", "colour": "red" }] }
        ]
    });
    let error = registry.validate("Node", &tree).unwrap().unwrap_err();
    assert_eq!(
        error.to_string(),
        "children -> [0] -> children -> [0] -> colour -> unsupported"
    );
}

#[test]
fn test_mutually_recursive_predicates() {
    let registry = PredicateRegistry::new();
    registry
        .register(
            "Folder",
            is_partial_object_of([
                ("title", is_required(scalar::string())),
                ("items", is_required(is_array_of(registry.reference("Item")))),
            ]),
        )
        .unwrap();
    registry
        .register(
            "Item",
            Predicate::from(label(
                "Item",
                is_partial_object_of([
                    ("file", is_optional(scalar::string())),
                    ("folder", is_optional(registry.reference("Folder"))),
                ]),
            )),
        )
        .unwrap();

    assert!(registry.unresolved().is_empty());

    let error = registry
        .validate(
            "Folder",
            &json!({
                "title": "docs",
                "items": [{ "file": "a.txt" }, { "folder": { "title": "sub" } }]
            }),
        )
        .unwrap()
        .unwrap_err();
    assert_eq!(error.to_string(), "items -> [1] -> Item -> folder -> items -> missing");
}

#[test]
fn test_unresolved_references_listed_once() {
    let registry = PredicateRegistry::new();
    registry
        .register(
            "User",
            is_object_of([
                ("id", registry.reference("UserId")),
                ("manager", is_optional(registry.reference("UserId"))),
                ("team", is_optional(registry.reference("Team"))),
            ]),
        )
        .unwrap();

    assert_eq!(registry.unresolved(), vec!["Team".to_string(), "UserId".to_string()]);
}

#[test]
fn test_non_descending_cycle_fails_instead_of_overflowing() {
    let registry = PredicateRegistry::new();
    registry.register("A", registry.reference("A")).unwrap();

    let error = registry.validate("A", &json!(1)).unwrap().unwrap_err();
    assert_eq!(error.code, "max_depth_exceeded");
    assert_eq!(error.to_string(), "maximum reference depth 100 exceeded");
}

#[test]
fn test_max_depth_bounds_mutual_cycles() {
    let registry = PredicateRegistry::new().with_max_depth(10);
    registry.register("Ping", registry.reference("Pong")).unwrap();
    registry.register("Pong", registry.reference("Ping")).unwrap();

    let error = registry.validate("Ping", &json!(null)).unwrap().unwrap_err();
    assert!(error.is_invalid());
    assert_eq!(error.to_string(), "maximum reference depth 10 exceeded");
}

#[test]
fn test_max_depth_allows_deep_enough_data() {
    let registry = PredicateRegistry::new().with_max_depth(3);
    registry
        .register(
            "Node",
            is_object_of([("next", is_optional(registry.reference("Node")))]),
        )
        .unwrap();

    assert!(registry
        .validate("Node", &json!({ "next": { "next": { "next": {} } } }))
        .unwrap()
        .unwrap());

    let error = registry
        .validate("Node", &json!({ "next": { "next": { "next": { "next": {} } } } }))
        .unwrap()
        .unwrap_err();
    assert_eq!(
        error.to_string(),
        "next -> next -> next -> next -> maximum reference depth 3 exceeded"
    );
}

#[test]
fn test_registry_errors() {
    let registry = tree_registry();
    assert!(matches!(
        registry.register("Node", scalar::null()),
        Err(RegistryError::DuplicateName(_))
    ));
    assert!(matches!(
        registry.validate("Leaf", &json!({})),
        Err(RegistryError::PredicateNotFound(_))
    ));
}
