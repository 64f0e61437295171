//! Action-only configuration, used for connection tests and similar
//! synchronous actions that do not extract any table.

use super::Definition;
use super::db_node::db_node;
use crate::schema::Node;
use std::sync::OnceLock;

/// Schema for `{parameters: {data_dir, extractor_class, db}}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActionConfigRowDefinition;

fn build() -> Node {
    let parameters = Node::map(
        "parameters",
        vec![
            Node::scalar("data_dir").required().cannot_be_empty(),
            Node::scalar("extractor_class").required().cannot_be_empty(),
            db_node().required(),
        ],
    )
    .required();

    Node::map("root", vec![parameters])
}

impl Definition for ActionConfigRowDefinition {
    fn name(&self) -> &'static str {
        "action_config_row"
    }

    fn schema(&self) -> &Node {
        static SCHEMA: OnceLock<Node> = OnceLock::new();
        SCHEMA.get_or_init(build)
    }
}
