//! SSL sub-tree of the database connection node.

use crate::schema::Node;

/// Name of the SSL node under `db`.
pub const NODE_NAME: &str = "ssl";

/// Declares the optional `ssl` map: key material paths and cipher are plain
/// scalars, `verifyServerCert` defaults to `true`.
pub fn ssl_node() -> Node {
    Node::map(
        NODE_NAME,
        vec![
            Node::scalar("key"),
            Node::scalar("cert"),
            Node::scalar("ca"),
            Node::scalar("cipher"),
            Node::boolean("verifyServerCert").default_value(true),
        ],
    )
}
