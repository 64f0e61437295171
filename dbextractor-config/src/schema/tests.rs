//! Tests for the declarative schema engine.
//!
//! These cover each constraint on its own, the ordering between the two
//! passes, and the pass-through of undeclared keys.

use super::*;
use crate::error::StructuralKind;
use serde_json::json;

fn table_schema() -> Node {
    Node::map(
        "root",
        vec![
            Node::scalar("name").cannot_be_empty(),
            Node::map(
                "table",
                vec![
                    Node::scalar("schema").required().cannot_be_empty(),
                    Node::scalar("tableName").required().cannot_be_empty(),
                ],
            ),
            Node::list("columns", Node::scalar("column").cannot_be_empty()),
            Node::integer("retries").min(0).default_value(5),
            Node::boolean("enabled").default_value(true),
        ],
    )
}

fn kind_of(error: &ConfigError) -> Option<StructuralKind> {
    match error {
        ConfigError::Structural { kind, .. } => Some(*kind),
        _ => None,
    }
}

#[test]
fn test_valid_document_gets_defaults() {
    let data = table_schema()
        .process(json!({
            "name": "sales",
            "table": {"schema": "public", "tableName": "sales"}
        }))
        .unwrap();

    assert_eq!(
        data,
        json!({
            "name": "sales",
            "table": {"schema": "public", "tableName": "sales"},
            "retries": 5,
            "enabled": true
        })
    );
}

#[test]
fn test_explicit_values_are_not_replaced_by_defaults() {
    let data = table_schema()
        .process(json!({"retries": 0, "enabled": false}))
        .unwrap();
    assert_eq!(data["retries"], json!(0));
    assert_eq!(data["enabled"], json!(false));
}

#[test]
fn test_unknown_keys_pass_through() {
    let data = table_schema()
        .process(json!({"advancedMode": true, "table": {"schema": "s", "tableName": "t", "x": 1}}))
        .unwrap();
    assert_eq!(data["advancedMode"], json!(true));
    assert_eq!(data["table"]["x"], json!(1));
}

#[test]
fn test_missing_required_child() {
    let error = table_schema()
        .process(json!({"table": {"schema": "test"}}))
        .unwrap_err();

    assert_eq!(
        error.to_string(),
        "The child node \"tableName\" at path \"root.table\" must be configured."
    );
    assert_eq!(kind_of(&error), Some(StructuralKind::MissingRequired));
}

#[test]
fn test_null_map_is_treated_as_empty_map() {
    let error = table_schema()
        .process(json!({"table": null}))
        .unwrap_err();
    assert_eq!(
        error.to_string(),
        "The child node \"schema\" at path \"root.table\" must be configured."
    );
}

#[test]
fn test_empty_scalar_rejected() {
    let error = table_schema()
        .process(json!({"table": {"schema": "", "tableName": "t"}}))
        .unwrap_err();
    assert_eq!(
        error.to_string(),
        "The path \"root.table.schema\" cannot contain an empty value, but got \"\"."
    );
    assert_eq!(kind_of(&error), Some(StructuralKind::EmptyValue));
}

#[test]
fn test_null_rejected_by_non_empty_scalar() {
    let error = table_schema().process(json!({"name": null})).unwrap_err();
    assert_eq!(
        error.to_string(),
        "The path \"root.name\" cannot contain an empty value, but got null."
    );
}

#[test]
fn test_nullable_scalar_accepts_null() {
    let schema = Node::map("root", vec![Node::scalar("query").nullable().cannot_be_empty()]);
    let data = schema.process(json!({"query": null})).unwrap();
    assert_eq!(data, json!({"query": null}));

    let error = schema.process(json!({"query": ""})).unwrap_err();
    assert_eq!(kind_of(&error), Some(StructuralKind::EmptyValue));
}

#[test]
fn test_list_item_path_uses_index() {
    let error = table_schema()
        .process(json!({"columns": ["abc", ""]}))
        .unwrap_err();
    assert_eq!(
        error.to_string(),
        "The path \"root.columns.1\" cannot contain an empty value, but got \"\"."
    );
}

#[test]
fn test_integer_minimum() {
    let error = table_schema().process(json!({"retries": -1})).unwrap_err();
    assert_eq!(
        error.to_string(),
        "The value -1 is too small for path \"root.retries\". Should be greater than or equal to 0"
    );
    assert_eq!(kind_of(&error), Some(StructuralKind::BelowMinimum));
}

#[test]
fn test_type_mismatches() {
    let cases = [
        (json!({"retries": "5"}), "root.retries", "int", "string"),
        (json!({"retries": 1.5}), "root.retries", "int", "float"),
        (json!({"retries": null}), "root.retries", "int", "null"),
        (json!({"enabled": "yes"}), "root.enabled", "bool", "string"),
        (json!({"name": ["a"]}), "root.name", "scalar", "list"),
        (json!({"table": "t"}), "root.table", "array", "string"),
        (json!({"table": []}), "root.table", "array", "list"),
        (json!({"columns": {"a": 1}}), "root.columns", "list", "array"),
    ];

    for (document, path, expected, actual) in cases {
        let error = table_schema().process(document).unwrap_err();
        assert_eq!(
            error.to_string(),
            format!("Invalid type for path \"{path}\". Expected \"{expected}\", but got \"{actual}\"."),
        );
        assert_eq!(kind_of(&error), Some(StructuralKind::InvalidType));
    }
}

#[test]
fn test_type_errors_precede_presence_errors() {
    // The missing tableName is declared before retries, but type checks
    // run over the whole tree first.
    let error = table_schema()
        .process(json!({"table": {"schema": "s"}, "retries": "x"}))
        .unwrap_err();
    assert_eq!(kind_of(&error), Some(StructuralKind::InvalidType));
}

#[test]
fn test_children_finalized_in_declaration_order() {
    let error = table_schema()
        .process(json!({"name": "", "table": {"schema": ""}}))
        .unwrap_err();
    assert_eq!(error.path(), Some("root.name"));
}

#[test]
fn test_treat_null_like() {
    let schema = Node::map(
        "root",
        vec![Node::integer("limit").treat_null_like(0).min(0)],
    );
    let data = schema.process(json!({"limit": null})).unwrap();
    assert_eq!(data, json!({"limit": 0}));
}

fn reject_both(map: Map<String, Value>) -> std::result::Result<Map<String, Value>, String> {
    if is_set(map.get("a")) && is_set(map.get("b")) {
        return Err("Both a and b cannot be set together.".to_string());
    }
    Ok(map)
}

fn mark_checked(mut map: Map<String, Value>) -> std::result::Result<Map<String, Value>, String> {
    map.insert("checked".to_string(), json!(true));
    Ok(map)
}

#[test]
fn test_rules_run_in_order_after_children() {
    let schema = Node::map("root", vec![Node::scalar("a"), Node::scalar("b")])
        .rule(reject_both)
        .rule(mark_checked);

    let data = schema.process(json!({"a": 1})).unwrap();
    assert_eq!(data["checked"], json!(true));

    let error = schema.process(json!({"a": 1, "b": 2})).unwrap_err();
    assert!(matches!(error, ConfigError::BusinessRule { .. }));
    assert_eq!(error.to_string(), "Both a and b cannot be set together.");
    assert_eq!(error.path(), Some("root"));
}

#[test]
fn test_rules_on_list_items_report_item_path() {
    let schema = Node::map(
        "root",
        vec![Node::list(
            "rows",
            Node::map("row", vec![Node::scalar("a"), Node::scalar("b")]).rule(reject_both),
        )],
    );
    let error = schema
        .process(json!({"rows": [{"a": 1}, {"a": 1, "b": 1}]}))
        .unwrap_err();
    assert_eq!(error.path(), Some("root.rows.1"));
}

#[test]
fn test_child_composition() {
    let schema = Node::map("root", vec![Node::scalar("a")])
        .children([Node::scalar("b").required()]);
    assert!(schema.find_child("b").is_some_and(Node::is_required));
    assert!(schema.process(json!({"a": 1})).is_err());
}

#[cfg(debug_assertions)]
#[test]
#[should_panic(expected = "added to non-map node")]
fn test_child_on_scalar_node_is_rejected() {
    let _ = Node::scalar("name").child(Node::scalar("nested"));
}

#[cfg(debug_assertions)]
#[test]
#[should_panic(expected = "added to non-map node")]
fn test_children_on_list_node_is_rejected() {
    let _ = Node::list("columns", Node::scalar("column")).children([Node::scalar("extra")]);
}

#[test]
fn test_is_blank() {
    assert!(is_blank(None));
    assert!(is_blank(Some(&json!(null))));
    assert!(is_blank(Some(&json!(""))));
    assert!(is_blank(Some(&json!("0"))));
    assert!(is_blank(Some(&json!(0))));
    assert!(is_blank(Some(&json!(false))));
    assert!(is_blank(Some(&json!([]))));
    assert!(is_blank(Some(&json!({}))));
    assert!(!is_blank(Some(&json!("SELECT 1"))));
    assert!(!is_blank(Some(&json!(100))));
    assert!(!is_blank(Some(&json!({"schema": "s"}))));
}

#[test]
fn test_is_set() {
    assert!(!is_set(None));
    assert!(!is_set(Some(&json!(null))));
    assert!(is_set(Some(&json!(""))));
    assert!(is_set(Some(&json!(0))));
}
