//! Database connection node.
//!
//! Declares where and how to connect: driver, host, port, database and the
//! credentials, plus the nested `ssh` tunnel and `ssl` sub-trees. Only the
//! shape is validated here; connecting is the caller's concern.

use super::ssl_node::ssl_node;
use crate::schema::Node;

/// Name of the connection node under `parameters`.
pub const NODE_NAME: &str = "db";

/// Key holding the database password. The `#` prefix marks it as secret
/// for the platform storing the configuration.
pub const PASSWORD_KEY: &str = "#password";

/// Declares the `ssh` tunnel map. Every field is optional.
pub fn ssh_node() -> Node {
    Node::map(
        "ssh",
        vec![
            Node::boolean("enabled"),
            Node::map(
                "keys",
                vec![Node::scalar("#private"), Node::scalar("public")],
            ),
            Node::scalar("sshHost"),
            Node::scalar("sshPort"),
            Node::scalar("remoteHost"),
            Node::scalar("remotePort"),
            Node::scalar("localPort"),
            Node::scalar("user"),
        ],
    )
}

/// Declares the `db` map. `user` and `#password` are required; `database`
/// may be omitted but not left empty.
pub fn db_node() -> Node {
    Node::map(
        NODE_NAME,
        vec![
            Node::scalar("driver"),
            Node::scalar("host"),
            Node::scalar("port"),
            Node::scalar("database").cannot_be_empty(),
            Node::scalar("user").required(),
            Node::scalar(PASSWORD_KEY).required(),
            ssh_node(),
            ssl_node(),
        ],
    )
}
