//! Fields and cross-field rules of one extraction row.
//!
//! A row selects either a custom `query` or a `table`, names the output
//! table, and optionally enables incremental fetching over a watermark
//! column. The same fields are used by the multi-table definition (one map
//! per `tables` item) and by the single-row definition (flattened into
//! `parameters`).

use crate::schema::{Node, is_blank};
use serde_json::{Map, Value};

/// Declares all row fields in their validation order.
pub fn table_nodes() -> Vec<Node> {
    vec![
        Node::integer("id").min(0),
        Node::scalar("name").cannot_be_empty(),
        Node::scalar("query").nullable().cannot_be_empty(),
        Node::map(
            "table",
            vec![
                Node::scalar("schema").required().cannot_be_empty(),
                Node::scalar("tableName").required().cannot_be_empty(),
            ],
        ),
        Node::list("columns", Node::scalar("column").cannot_be_empty()),
        Node::scalar("outputTable").required().cannot_be_empty(),
        // Incremental *loading* into the output table. Incremental fetching
        // additionally needs the watermark column below.
        Node::boolean("incremental").default_value(false),
        Node::scalar("incrementalFetchingColumn").nullable(),
        // Older configurations use null or 0 for "no limit".
        Node::integer("incrementalFetchingLimit")
            .treat_null_like(0)
            .min(0),
        Node::boolean("enabled").default_value(true),
        Node::list("primaryKey", Node::scalar("column").cannot_be_empty()),
        // No schema default: an absent value stays absent in the validated
        // document and the export layer falls back to its own default.
        Node::integer("retries").min(0),
    ]
}

/// Rewrites a zero `incrementalFetchingLimit` to `null`.
pub fn normalize_row(mut row: Map<String, Value>) -> Map<String, Value> {
    if row.get("incrementalFetchingLimit").and_then(Value::as_i64) == Some(0) {
        row.insert("incrementalFetchingLimit".to_string(), Value::Null);
    }
    row
}

/// Enforces the query/table and incremental-fetching rules on one row.
///
/// Rules are checked in a fixed order and the first violation wins.
///
/// # Errors
/// Returns the user-facing message of the first violated rule.
pub fn validate_row(row: Map<String, Value>) -> Result<Map<String, Value>, String> {
    let row = normalize_row(row);

    let has_query = !is_blank(row.get("query"));
    let has_table = !is_blank(row.get("table"));
    let has_column = !is_blank(row.get("incrementalFetchingColumn"));
    let has_limit = !is_blank(row.get("incrementalFetchingLimit"));
    let incremental = !is_blank(row.get("incremental"));

    if !has_query && !has_table {
        return Err("Table or query must be configured.".to_string());
    }

    if has_query && has_table {
        return Err("Both table and query cannot be set together.".to_string());
    }

    if has_query && has_column {
        return Err(
            "The \"incrementalFetchingColumn\" is configured, \
             but incremental fetching is not supported for custom query."
                .to_string(),
        );
    }

    if has_query && has_limit {
        return Err(
            "The \"incrementalFetchingLimit\" is configured, \
             but incremental fetching is not supported for custom query."
                .to_string(),
        );
    }

    if has_limit && !incremental {
        return Err(
            "The \"incrementalFetchingLimit\" is configured, \
             but incremental fetching is not enabled."
                .to_string(),
        );
    }

    if has_column && !incremental {
        return Err(
            "The \"incrementalFetchingColumn\" is configured, \
             but incremental fetching is not enabled."
                .to_string(),
        );
    }

    if has_limit && !has_column {
        return Err(
            "The \"incrementalFetchingLimit\" is configured, \
             but \"incrementalFetchingColumn\" is missing."
                .to_string(),
        );
    }

    if incremental && has_table && !has_column {
        return Err(
            "The \"incrementalFetchingColumn\" must be configured, \
             if is incremental fetching enabled."
                .to_string(),
        );
    }

    Ok(row)
}
