//! Declarative schema nodes for configuration documents.
//!
//! A schema is a tree of [`Node`] records. Each record carries its type and
//! constraints (required, non-empty, minimum, default) and is evaluated
//! generically, so the tree reads as a table of field declarations rather
//! than as code.
//!
//! Processing runs two passes, both fail-fast:
//! 1. **normalize** - null substitution and type checks on present values
//! 2. **finalize** - presence, defaults, emptiness, minimums, then the
//!    cross-field rules attached to map nodes
//!
//! Keys a map node does not declare are passed through untouched.
//!
//! # Example
//! ```rust
//! use dbextractor_config::schema::Node;
//! use serde_json::json;
//!
//! let schema = Node::map("root", vec![
//!     Node::scalar("name").required().cannot_be_empty(),
//!     Node::integer("retries").min(0).default_value(5),
//! ]);
//!
//! let data = schema.process(json!({"name": "sales"})).unwrap();
//! assert_eq!(data, json!({"name": "sales", "retries": 5}));
//! ```

use crate::error::{ConfigError, Result};
use serde_json::{Map, Value};

/// Cross-field rule attached to a map node.
///
/// Receives the finalized map and returns it, possibly rewritten, or a
/// free-text message describing the violation.
pub type NodeRule = fn(Map<String, Value>) -> std::result::Result<Map<String, Value>, String>;

/// Shape of the value a node accepts.
#[derive(Debug, Clone)]
pub enum NodeKind {
    /// String, number, boolean or null
    Scalar,
    /// Integral number
    Integer,
    /// `true` or `false`
    Boolean,
    /// Object with declared children
    Map(Vec<Node>),
    /// Array whose items all follow the prototype
    List(Box<Node>),
}

/// One field declaration.
#[derive(Debug, Clone)]
pub struct Node {
    name: &'static str,
    kind: NodeKind,
    required: bool,
    cannot_be_empty: bool,
    nullable: bool,
    min: Option<i64>,
    default: Option<Value>,
    null_equivalent: Option<Value>,
    rules: Vec<NodeRule>,
}

impl Node {
    fn new(name: &'static str, kind: NodeKind) -> Self {
        Self {
            name,
            kind,
            required: false,
            cannot_be_empty: false,
            nullable: false,
            min: None,
            default: None,
            null_equivalent: None,
            rules: Vec::new(),
        }
    }

    /// Declares a scalar node.
    pub fn scalar(name: &'static str) -> Self {
        Self::new(name, NodeKind::Scalar)
    }

    /// Declares an integer node.
    pub fn integer(name: &'static str) -> Self {
        Self::new(name, NodeKind::Integer)
    }

    /// Declares a boolean node.
    pub fn boolean(name: &'static str) -> Self {
        Self::new(name, NodeKind::Boolean)
    }

    /// Declares a map node with the given children.
    pub fn map(name: &'static str, children: Vec<Node>) -> Self {
        Self::new(name, NodeKind::Map(children))
    }

    /// Declares a list node; every item is checked against `prototype`.
    pub fn list(name: &'static str, prototype: Node) -> Self {
        Self::new(name, NodeKind::List(Box::new(prototype)))
    }

    /// Node must be present in its parent map.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Scalar node rejects `""` and, unless nullable, `null`.
    pub fn cannot_be_empty(mut self) -> Self {
        self.cannot_be_empty = true;
        self
    }

    /// Scalar node accepts an explicit `null` even when non-empty.
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Integer node lower bound (inclusive).
    pub fn min(mut self, min: i64) -> Self {
        self.min = Some(min);
        self
    }

    /// Value inserted when the node is absent.
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Value substituted for an explicit `null` before type checks.
    pub fn treat_null_like(mut self, value: impl Into<Value>) -> Self {
        self.null_equivalent = Some(value.into());
        self
    }

    /// Attaches a cross-field rule. Rules run in registration order after
    /// all children are finalized.
    pub fn rule(mut self, rule: NodeRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Appends a child to a map node.
    ///
    /// # Panics
    /// In debug builds, panics when `self` is not a map node. Release builds
    /// drop the child.
    pub fn child(mut self, child: Node) -> Self {
        debug_assert!(
            matches!(self.kind, NodeKind::Map(_)),
            "child \"{}\" added to non-map node \"{}\"",
            child.name,
            self.name
        );
        if let NodeKind::Map(children) = &mut self.kind {
            children.push(child);
        }
        self
    }

    /// Appends several children to a map node.
    ///
    /// # Panics
    /// Same as [`Node::child`].
    pub fn children(self, children: impl IntoIterator<Item = Node>) -> Self {
        children.into_iter().fold(self, Self::child)
    }

    /// Node name as it appears in paths.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Node kind.
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Whether the node must be present.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Looks up a declared child of a map node.
    pub fn find_child(&self, name: &str) -> Option<&Node> {
        match &self.kind {
            NodeKind::Map(children) => children.iter().find(|c| c.name == name),
            _ => None,
        }
    }

    /// Validates and normalizes `value`, using the node name as root path.
    ///
    /// # Errors
    /// Returns the first structural or business-rule violation found.
    pub fn process(&self, value: Value) -> Result<Value> {
        let path = self.name.to_string();
        let normalized = self.normalize(value, &path)?;
        self.finalize(normalized, &path)
    }

    fn normalize(&self, value: Value, path: &str) -> Result<Value> {
        let value = match (value, &self.null_equivalent) {
            (Value::Null, Some(equivalent)) => equivalent.clone(),
            (value, _) => value,
        };

        match &self.kind {
            NodeKind::Scalar => match value {
                Value::Array(_) | Value::Object(_) => {
                    Err(ConfigError::invalid_type(path, "scalar", &value))
                }
                scalar => Ok(scalar),
            },
            NodeKind::Integer => {
                if value.is_i64() || value.is_u64() {
                    Ok(value)
                } else {
                    Err(ConfigError::invalid_type(path, "int", &value))
                }
            }
            NodeKind::Boolean => {
                if value.is_boolean() {
                    Ok(value)
                } else {
                    Err(ConfigError::invalid_type(path, "bool", &value))
                }
            }
            NodeKind::Map(children) => {
                let mut map = match value {
                    Value::Object(map) => map,
                    Value::Null => Map::new(),
                    other => return Err(ConfigError::invalid_type(path, "array", &other)),
                };
                for child in children {
                    if let Some(child_value) = map.remove(child.name) {
                        let child_path = format!("{path}.{}", child.name);
                        let normalized = child.normalize(child_value, &child_path)?;
                        map.insert(child.name.to_string(), normalized);
                    }
                }
                Ok(Value::Object(map))
            }
            NodeKind::List(prototype) => {
                let items = match value {
                    Value::Array(items) => items,
                    Value::Null => Vec::new(),
                    other => return Err(ConfigError::invalid_type(path, "list", &other)),
                };
                items
                    .into_iter()
                    .enumerate()
                    .map(|(index, item)| prototype.normalize(item, &format!("{path}.{index}")))
                    .collect::<Result<Vec<_>>>()
                    .map(Value::Array)
            }
        }
    }

    fn finalize(&self, value: Value, path: &str) -> Result<Value> {
        match &self.kind {
            NodeKind::Scalar => {
                if self.cannot_be_empty && self.is_empty_scalar(&value) {
                    return Err(ConfigError::empty_value(path, &value));
                }
                Ok(value)
            }
            NodeKind::Integer => {
                if let (Some(min), Some(number)) = (self.min, value.as_i64()) {
                    if number < min {
                        return Err(ConfigError::below_minimum(path, &value, min));
                    }
                }
                Ok(value)
            }
            NodeKind::Boolean => Ok(value),
            NodeKind::Map(children) => {
                let Value::Object(map) = value else {
                    return Err(ConfigError::invalid_type(path, "array", &value));
                };
                let map = finalize_children(children, map, path)?;
                self.apply_rules(map, path).map(Value::Object)
            }
            NodeKind::List(prototype) => {
                let Value::Array(items) = value else {
                    return Err(ConfigError::invalid_type(path, "list", &value));
                };
                items
                    .into_iter()
                    .enumerate()
                    .map(|(index, item)| prototype.finalize(item, &format!("{path}.{index}")))
                    .collect::<Result<Vec<_>>>()
                    .map(Value::Array)
            }
        }
    }

    fn is_empty_scalar(&self, value: &Value) -> bool {
        match value {
            Value::Null => !self.nullable,
            Value::String(s) => s.is_empty(),
            _ => false,
        }
    }

    fn apply_rules(&self, map: Map<String, Value>, path: &str) -> Result<Map<String, Value>> {
        self.rules.iter().try_fold(map, |map, rule| {
            rule(map).map_err(|message| {
                tracing::debug!(path, "Cross-field rule rejected configuration");
                ConfigError::business_rule(path, message)
            })
        })
    }
}

fn finalize_children(
    children: &[Node],
    mut map: Map<String, Value>,
    path: &str,
) -> Result<Map<String, Value>> {
    for child in children {
        match map.remove(child.name) {
            Some(child_value) => {
                let child_path = format!("{path}.{}", child.name);
                let finalized = child.finalize(child_value, &child_path)?;
                map.insert(child.name.to_string(), finalized);
            }
            None if child.required => {
                return Err(ConfigError::missing_required(path, child.name));
            }
            None => {
                if let Some(default) = &child.default {
                    map.insert(child.name.to_string(), default.clone());
                }
            }
        }
    }
    Ok(map)
}

/// Loose emptiness test used by cross-field rules.
///
/// Absent, `null`, `""`, `"0"`, `0`, `false` and empty collections are all
/// empty; existing configurations rely on this exact notion.
pub fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::Bool(b)) => !b,
        Some(Value::Number(n)) => n.as_f64() == Some(0.0),
        Some(Value::String(s)) => s.is_empty() || s == "0",
        Some(Value::Array(items)) => items.is_empty(),
        Some(Value::Object(map)) => map.is_empty(),
    }
}

/// Present and not `null`.
pub fn is_set(value: Option<&Value>) -> bool {
    !matches!(value, None | Some(Value::Null))
}

#[cfg(test)]
mod tests;
