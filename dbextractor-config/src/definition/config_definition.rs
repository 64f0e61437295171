//! Multi-table configuration: one connection, many extraction rows.

use super::Definition;
use super::db_node::db_node;
use super::table_nodes::{table_nodes, validate_row};
use crate::schema::Node;
use std::sync::OnceLock;

/// Schema for `{parameters: {data_dir, extractor_class, db, tables: [...]}}`.
///
/// Each `tables` item is a full row and must carry an `id`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigDefinition;

fn row_node() -> Node {
    let fields = table_nodes().into_iter().map(|node| {
        if node.name() == "id" {
            node.required()
        } else {
            node
        }
    });
    Node::map("row", Vec::new()).children(fields).rule(validate_row)
}

fn build() -> Node {
    let parameters = Node::map(
        "parameters",
        vec![
            Node::scalar("data_dir").required().cannot_be_empty(),
            Node::scalar("extractor_class").required().cannot_be_empty(),
            db_node().required(),
            Node::list("tables", row_node()),
        ],
    )
    .required();

    Node::map("root", vec![parameters])
}

impl Definition for ConfigDefinition {
    fn name(&self) -> &'static str {
        "config"
    }

    fn schema(&self) -> &Node {
        static SCHEMA: OnceLock<Node> = OnceLock::new();
        SCHEMA.get_or_init(build)
    }
}
