//! Schema definitions for the supported configuration variants.
//!
//! The variants share building blocks:
//! - [`db_node`]: connection parameters with `ssh` and `ssl` sub-trees
//! - [`table_nodes`]: extraction-row fields and their cross-field rules
//!
//! and compose them into three top-level schemas:
//! - [`ConfigDefinition`]: many rows under `parameters.tables`
//! - [`ConfigRowDefinition`]: one row flattened into `parameters`
//! - [`ActionConfigRowDefinition`]: connection only
//!
//! Unknown keys are never rejected, so newer configurations keep working
//! with older validators.

mod action_config_row_definition;
mod config_definition;
mod config_row_definition;
pub mod db_node;
pub mod ssl_node;
pub mod table_nodes;

pub use action_config_row_definition::ActionConfigRowDefinition;
pub use config_definition::ConfigDefinition;
pub use config_row_definition::{ConfigRowDefinition, validate_parameters};

use crate::Result;
use crate::schema::Node;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A complete configuration schema.
pub trait Definition: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Root node of the schema. Its name, `root`, prefixes every path.
    fn schema(&self) -> &Node;

    /// Validates and normalizes a whole configuration document.
    ///
    /// # Errors
    /// Returns the first structural or business-rule violation.
    fn validate(&self, document: Value) -> Result<Value> {
        tracing::debug!(definition = self.name(), "Validating configuration document");
        self.schema().process(document)
    }
}

/// Selects one of the configuration variants by name.
///
/// # Example
/// ```rust
/// use dbextractor_config::definition::SchemaKind;
///
/// let kind: SchemaKind = "config_row".parse().unwrap();
/// assert_eq!(kind, SchemaKind::ConfigRow);
/// assert_eq!(kind.definition().name(), "config_row");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaKind {
    /// Multi-table configuration
    Config,
    /// Single-row configuration
    ConfigRow,
    /// Connection-only configuration for actions
    ActionConfigRow,
}

impl SchemaKind {
    /// All variants, in declaration order.
    pub const ALL: [Self; 3] = [Self::Config, Self::ConfigRow, Self::ActionConfigRow];

    /// Identifier accepted by [`str::parse`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Config => "config",
            Self::ConfigRow => "config_row",
            Self::ActionConfigRow => "action_config_row",
        }
    }

    /// Returns the schema definition for this variant.
    pub fn definition(&self) -> Box<dyn Definition> {
        match self {
            Self::Config => Box::new(ConfigDefinition),
            Self::ConfigRow => Box::new(ConfigRowDefinition),
            Self::ActionConfigRow => Box::new(ActionConfigRowDefinition),
        }
    }
}

impl std::fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SchemaKind {
    type Err = crate::error::ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| {
                crate::error::ConfigError::invalid_argument(format!(
                    "Unknown configuration schema \"{s}\". Supported schemas: config, config_row, action_config_row."
                ))
            })
    }
}
