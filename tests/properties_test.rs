//! Property tests for strictness, path rendering and idempotence.

use pathcheck::{
    is_array_of, is_object_of, is_optional, is_partial_object_of, is_required, label, scalar,
    Predicate,
};
use proptest::prelude::*;
use serde_json::{json, Map, Value};

/// Schema with three required fields whose names cannot clash with the
/// generated extra keys (those are upper case).
fn schema() -> Vec<(&'static str, Predicate)> {
    vec![
        ("name", is_required(scalar::string())),
        ("count", is_required(scalar::integer())),
        ("tags", is_required(is_array_of(is_required(scalar::string())))),
    ]
}

fn record(name: &str, count: i64, tags: &[String]) -> Map<String, Value> {
    let mut map = Map::new();
    map.insert("name".to_string(), json!(name));
    map.insert("count".to_string(), json!(count));
    map.insert("tags".to_string(), json!(tags));
    map
}

fn scalar_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        "[a-z]{0,8}".prop_map(Value::String),
    ]
}

proptest! {
    #[test]
    fn exact_matches_are_accepted(
        name in "[a-z]{0,12}",
        count in any::<i64>(),
        tags in prop::collection::vec("[a-z]{1,5}", 0..5),
    ) {
        let value = Value::Object(record(&name, count, &tags));
        prop_assert!(is_object_of(schema()).validate(&value).unwrap());
        prop_assert!(is_partial_object_of(schema()).validate(&value).unwrap());
    }

    #[test]
    fn extra_keys_only_matter_when_strict(
        name in "[a-z]{0,12}",
        count in any::<i64>(),
        extra in "[A-Z]{1,8}",
        extra_value in scalar_value(),
    ) {
        let mut map = record(&name, count, &[]);
        map.insert(extra.clone(), extra_value);
        let value = Value::Object(map);

        prop_assert!(is_partial_object_of(schema()).validate(&value).unwrap());

        let error = is_object_of(schema()).validate(&value).unwrap_err();
        prop_assert!(error.is_unsupported());
        prop_assert_eq!(error.to_string(), format!("{} -> unsupported", extra));
    }

    #[test]
    fn missing_field_reports_its_name(which in 0usize..3) {
        let mut map = record("n", 1, &[]);
        let field = ["name", "count", "tags"][which];
        map.remove(field);

        let error = is_partial_object_of(schema())
            .validate(&Value::Object(map))
            .unwrap_err();
        prop_assert_eq!(error.to_string(), format!("{} -> missing", field));
    }

    #[test]
    fn wrong_shaped_field_is_invalid(bad in prop_oneof![
        Just(json!(null)),
        Just(json!(1.5)),
        Just(json!({})),
        Just(json!([1])),
    ]) {
        let mut map = record("n", 1, &[]);
        map.insert("name".to_string(), bad);

        let error = is_partial_object_of(schema())
            .validate(&Value::Object(map))
            .unwrap_err();
        prop_assert_eq!(error.to_string(), "name -> invalid");
    }

    #[test]
    fn first_bad_element_index_is_reported(
        good in prop::collection::vec("[a-z]{1,4}", 0..6),
        bad in any::<i64>(),
    ) {
        let mut items: Vec<Value> = good.iter().map(|s| json!(s)).collect();
        let index = items.len();
        items.push(json!(bad));
        items.push(json!(bad));

        let mut map = record("n", 1, &[]);
        map.insert("tags".to_string(), Value::Array(items));

        let error = is_partial_object_of(schema())
            .validate(&Value::Object(map))
            .unwrap_err();
        prop_assert_eq!(error.to_string(), format!("tags -> [{}] -> invalid", index));
    }

    #[test]
    fn non_records_never_pass_object_predicates(value in prop_oneof![
        scalar_value(),
        prop::collection::vec(scalar_value(), 0..4).prop_map(Value::Array),
    ]) {
        let error = is_partial_object_of(schema()).validate(&value).unwrap_err();
        prop_assert!(error.is_invalid());
        prop_assert!(error.path.is_root());

        let empty = is_partial_object_of(Vec::<(String, Predicate)>::new());
        prop_assert!(empty.validate(&value).unwrap_err().is_invalid());
    }

    #[test]
    fn non_sequences_never_pass_array_predicates(value in scalar_value()) {
        let error = is_array_of(scalar::string()).validate(&value).unwrap_err();
        prop_assert!(error.is_invalid());
    }

    #[test]
    fn optional_delegates_for_present_values(value in scalar_value()) {
        let inner = scalar::boolean();
        let expected = value.is_null() || inner.validate(&value).unwrap();
        prop_assert_eq!(is_optional(inner).validate(&value).unwrap(), expected);
    }

    #[test]
    fn label_returns_accepted_value(value in scalar_value()) {
        let labelled = label("any", Predicate::satisfies(|_: &Value| true));
        prop_assert_eq!(labelled.apply(&value).unwrap(), Some(&value));
    }

    #[test]
    fn validation_is_idempotent(
        name in scalar_value(),
        count in scalar_value(),
        extra in prop::option::of("[A-Z]{1,3}"),
    ) {
        let mut map = Map::new();
        map.insert("name".to_string(), name);
        map.insert("count".to_string(), count);
        if let Some(key) = extra {
            map.insert(key, json!(true));
        }
        let value = Value::Object(map);
        let predicate = is_object_of(schema());

        let first = predicate.validate(&value).map_err(|e| e.to_string());
        let second = predicate.validate(&value).map_err(|e| e.to_string());
        prop_assert_eq!(first, second);
    }
}
