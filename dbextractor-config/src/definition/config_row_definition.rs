//! Single-row configuration: the row fields live directly in `parameters`.

use super::Definition;
use super::db_node::db_node;
use super::table_nodes::{table_nodes, validate_row};
use crate::schema::{Node, is_set};
use serde_json::{Map, Value};
use std::sync::OnceLock;

/// Schema for a configuration row, where `parameters` is itself one
/// extraction row plus `data_dir`, `extractor_class` and an optional `db`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigRowDefinition;

/// Root-level checks kept from the earliest row format.
///
/// They overlap with [`validate_row`] and run after it, so in practice only
/// the advanced-query message can still surface (an empty-string
/// `incrementalFetchingColumn` next to a query). The wording differs from
/// the row rules and is preserved as is.
///
/// # Errors
/// Returns the user-facing message of the first violated check.
pub fn validate_parameters(v: Map<String, Value>) -> Result<Map<String, Value>, String> {
    let has_query =
        is_set(v.get("query")) && v.get("query").and_then(Value::as_str) != Some("");

    if has_query && is_set(v.get("table")) {
        return Err("Both table and query cannot be set together.".to_string());
    }

    if has_query && is_set(v.get("incrementalFetchingColumn")) {
        return Err("Incremental fetching is not supported for advanced queries.".to_string());
    }

    if !is_set(v.get("table")) && !is_set(v.get("query")) {
        return Err("One of table or query is required".to_string());
    }

    Ok(v)
}

fn build() -> Node {
    let parameters = Node::map(
        "parameters",
        vec![
            Node::scalar("data_dir").required().cannot_be_empty(),
            Node::scalar("extractor_class").required().cannot_be_empty(),
            db_node(),
        ],
    )
    .children(table_nodes())
    .rule(validate_row)
    .rule(validate_parameters)
    .required();

    Node::map("root", vec![parameters])
}

impl Definition for ConfigRowDefinition {
    fn name(&self) -> &'static str {
        "config_row"
    }

    fn schema(&self) -> &Node {
        static SCHEMA: OnceLock<Node> = OnceLock::new();
        SCHEMA.get_or_init(build)
    }
}
