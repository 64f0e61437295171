//! Source table of an extraction row.

use super::{required_str, nested};
use crate::{Result, error::ConfigError};
use serde::Serialize;
use serde_json::{Map, Value};

/// Schema-qualified table to extract from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputTable {
    #[serde(rename = "tableName")]
    name: String,
    schema: String,
}

impl InputTable {
    /// Creates a table reference. Both parts must be non-empty.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidArgument` for an empty name or schema.
    pub fn new(name: impl Into<String>, schema: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let schema = schema.into();

        if name.is_empty() {
            return Err(ConfigError::invalid_argument("Table name cannot be empty."));
        }
        if schema.is_empty() {
            return Err(ConfigError::invalid_argument("Table schema cannot be empty."));
        }

        Ok(Self { name, schema })
    }

    /// Builds the table from a validated row holding
    /// `table: {schema, tableName}`.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidArgument` if a key is missing or empty.
    pub fn from_array(data: &Map<String, Value>) -> Result<Self> {
        let table = nested(data, "table")?;
        Self::new(
            required_str(table, "table.tableName", "tableName")?,
            required_str(table, "table.schema", "schema")?,
        )
    }

    /// Table name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Schema name.
    pub fn schema(&self) -> &str {
        &self.schema
    }
}

impl std::fmt::Display for InputTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.schema, self.name)
    }
}
