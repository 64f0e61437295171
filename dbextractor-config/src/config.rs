//! Entry point tying a raw configuration document to a schema definition.

use crate::definition::Definition;
use crate::Result;
use serde_json::{Map, Value};

/// A configuration document that passed validation.
///
/// Holding a `Config` guarantees the data satisfied the definition it was
/// built with. Value objects are then read from [`Config::parameters`] or
/// from individual rows.
///
/// # Example
/// ```rust
/// use dbextractor_config::{Config, definition::ConfigRowDefinition};
/// use serde_json::json;
///
/// let config = Config::new(
///     json!({"parameters": {
///         "data_dir": "/data",
///         "extractor_class": "MySQL",
///         "outputTable": "in.c-main.sales",
///         "query": "SELECT * FROM sales"
///     }}),
///     &ConfigRowDefinition,
/// )
/// .unwrap();
///
/// assert_eq!(config.parameters()["incremental"], json!(false));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    data: Value,
}

impl Config {
    /// Validates `document` against `definition`.
    ///
    /// # Errors
    /// Returns the first structural or business-rule violation.
    pub fn new(document: Value, definition: &dyn Definition) -> Result<Self> {
        match definition.validate(document) {
            Ok(data) => {
                tracing::info!(definition = definition.name(), "Configuration validated");
                Ok(Self { data })
            }
            Err(error) => {
                tracing::warn!(
                    definition = definition.name(),
                    path = error.path().unwrap_or_default(),
                    "Configuration rejected: {}",
                    error
                );
                Err(error)
            }
        }
    }

    /// Parses a JSON document and validates it against `definition`.
    ///
    /// # Errors
    /// Returns `ConfigError::JsonParsing` for malformed JSON, otherwise the
    /// first validation violation.
    pub fn from_json(json: &str, definition: &dyn Definition) -> Result<Self> {
        let document: Value = serde_json::from_str(json)?;
        Self::new(document, definition)
    }

    /// The validated, normalized document.
    pub fn data(&self) -> &Value {
        &self.data
    }

    /// Consumes the configuration, returning the validated document.
    pub fn into_data(self) -> Value {
        self.data
    }

    /// The validated `parameters` map.
    ///
    /// Every definition requires `parameters`, so this is always present.
    pub fn parameters(&self) -> &Map<String, Value> {
        static EMPTY: std::sync::OnceLock<Map<String, Value>> = std::sync::OnceLock::new();
        self.data
            .get("parameters")
            .and_then(Value::as_object)
            .unwrap_or_else(|| EMPTY.get_or_init(Map::new))
    }
}
