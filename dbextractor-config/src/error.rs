//! Error types for configuration validation and value-object construction.
//!
//! Every message produced here is user-facing: callers and existing tests
//! match on the exact wording, so the templates must not drift.

use serde_json::Value;
use thiserror::Error;

/// Category of a structural violation reported by the schema layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructuralKind {
    /// A required child node is absent
    MissingRequired,
    /// A non-empty node holds an empty value
    EmptyValue,
    /// An integer node is below its minimum
    BelowMinimum,
    /// The value has the wrong JSON type for the node
    InvalidType,
}

/// Main error type for configuration handling.
///
/// # Security
/// Messages never embed values of secret nodes (`#password`, ssl `key`);
/// structural errors only echo values that failed an emptiness or minimum
/// check.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Type, presence, emptiness or minimum violation at a given path
    #[error("{message}")]
    Structural {
        path: String,
        kind: StructuralKind,
        message: String,
    },

    /// Cross-field rule violation. The path is kept for diagnostics only,
    /// the message is shown without it.
    #[error("{message}")]
    BusinessRule { path: String, message: String },

    /// A value object was assembled from data violating its invariants
    #[error("{message}")]
    InvalidArgument { message: String },

    /// An optional value-object property was read while absent
    #[error("Property \"{property}\" is not set.")]
    PropertyNotSet { property: String },

    /// The configuration document is not valid JSON
    #[error("JSON parsing failed: {source}")]
    JsonParsing {
        #[from]
        source: serde_json::Error,
    },

    /// Logging subscriber could not be installed
    #[error("Logging initialization failed: {message}")]
    Logging { message: String },
}

/// Convenience type alias for Results with ConfigError
pub type Result<T> = std::result::Result<T, ConfigError>;

impl ConfigError {
    /// Creates a missing-child error. `parent` is the path of the map node
    /// that should contain `child`.
    pub fn missing_required(parent: &str, child: &str) -> Self {
        Self::Structural {
            path: format!("{parent}.{child}"),
            kind: StructuralKind::MissingRequired,
            message: format!(
                "The child node \"{child}\" at path \"{parent}\" must be configured."
            ),
        }
    }

    /// Creates an empty-value error echoing the rejected value as JSON.
    pub fn empty_value(path: &str, value: &Value) -> Self {
        Self::Structural {
            path: path.to_string(),
            kind: StructuralKind::EmptyValue,
            message: format!(
                "The path \"{path}\" cannot contain an empty value, but got {value}."
            ),
        }
    }

    /// Creates a below-minimum error for an integer node.
    pub fn below_minimum(path: &str, value: &Value, min: i64) -> Self {
        Self::Structural {
            path: path.to_string(),
            kind: StructuralKind::BelowMinimum,
            message: format!(
                "The value {value} is too small for path \"{path}\". Should be greater than or equal to {min}"
            ),
        }
    }

    /// Creates a type-mismatch error.
    pub fn invalid_type(path: &str, expected: &str, value: &Value) -> Self {
        Self::Structural {
            path: path.to_string(),
            kind: StructuralKind::InvalidType,
            message: format!(
                "Invalid type for path \"{path}\". Expected \"{expected}\", but got \"{}\".",
                type_name(value)
            ),
        }
    }

    /// Creates a cross-field rule error raised at `path`.
    pub fn business_rule(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::BusinessRule {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a value-object construction error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Creates an error for reading an absent optional property
    pub fn property_not_set(property: impl Into<String>) -> Self {
        Self::PropertyNotSet {
            property: property.into(),
        }
    }

    /// Path of the offending node, when the error is tied to one.
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::Structural { path, .. } | Self::BusinessRule { path, .. } => Some(path),
            _ => None,
        }
    }

    /// Whether the error stems from the user's configuration document
    /// rather than from the runtime environment.
    pub fn is_user_error(&self) -> bool {
        !matches!(self, Self::Logging { .. })
    }
}

/// Name of a JSON value's type as reported in type-mismatch messages.
pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_i64() || n.is_u64() => "int",
        Value::Number(_) => "float",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "array",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_required_message() {
        let error = ConfigError::missing_required("root.parameters.table", "tableName");
        assert_eq!(
            error.to_string(),
            "The child node \"tableName\" at path \"root.parameters.table\" must be configured."
        );
        assert_eq!(error.path(), Some("root.parameters.table.tableName"));
    }

    #[test]
    fn test_empty_value_message() {
        let error = ConfigError::empty_value("root.parameters.query", &json!(""));
        assert_eq!(
            error.to_string(),
            "The path \"root.parameters.query\" cannot contain an empty value, but got \"\"."
        );

        let error = ConfigError::empty_value("root.parameters.db.database", &Value::Null);
        assert!(error.to_string().ends_with("but got null."));
    }

    #[test]
    fn test_below_minimum_message() {
        let error = ConfigError::below_minimum("root.parameters.retries", &json!(-1), 0);
        assert_eq!(
            error.to_string(),
            "The value -1 is too small for path \"root.parameters.retries\". Should be greater than or equal to 0"
        );
    }

    #[test]
    fn test_invalid_type_message() {
        let error = ConfigError::invalid_type("root.parameters.id", "int", &json!("1"));
        assert_eq!(
            error.to_string(),
            "Invalid type for path \"root.parameters.id\". Expected \"int\", but got \"string\"."
        );
    }

    #[test]
    fn test_business_rule_message_has_no_path_prefix() {
        let error =
            ConfigError::business_rule("root.parameters", "Table or query must be configured.");
        assert_eq!(error.to_string(), "Table or query must be configured.");
        assert_eq!(error.path(), Some("root.parameters"));
    }

    #[test]
    fn test_property_not_set_message() {
        let error = ConfigError::property_not_set("key");
        assert_eq!(error.to_string(), "Property \"key\" is not set.");
        assert!(error.path().is_none());
    }

    #[test]
    fn test_user_error_classification() {
        assert!(ConfigError::invalid_argument("x").is_user_error());
        assert!(
            !ConfigError::Logging {
                message: "already set".to_string()
            }
            .is_user_error()
        );
    }

    #[test]
    fn test_type_names() {
        assert_eq!(type_name(&json!(1)), "int");
        assert_eq!(type_name(&json!(-1)), "int");
        assert_eq!(type_name(&json!(1.5)), "float");
        assert_eq!(type_name(&json!(true)), "bool");
        assert_eq!(type_name(&json!([])), "list");
        assert_eq!(type_name(&json!({})), "array");
    }
}
