//! Typed view of one extraction row.

use super::incremental_fetching_config::IncrementalFetchingConfig;
use super::input_table::InputTable;
use super::{optional_str, optional_str_list, required_str};
use crate::{Result, error::ConfigError, schema::is_set};
use serde::Serialize;
use serde_json::{Map, Value};

/// What to extract and where to write it.
///
/// Exactly one of query or table is normally set; the schema layer enforces
/// the exclusivity, this object only requires at least one.
///
/// # Example
/// ```rust
/// use dbextractor_config::value_object::{ExportConfig, InputTable};
///
/// let export = ExportConfig::new(
///     None,
///     Some(InputTable::new("sales", "public").unwrap()),
///     None,
///     None,
///     "in.c-main.sales",
///     Some(vec!["id".to_string()]),
///     5,
/// )
/// .unwrap();
///
/// assert!(export.has_table());
/// assert!(!export.is_incremental());
/// assert_eq!(export.primary_key().unwrap(), ["id"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportConfig {
    query: Option<String>,
    table: Option<InputTable>,
    incremental_fetching_config: Option<IncrementalFetchingConfig>,
    columns: Option<Vec<String>>,
    output_table: String,
    primary_key: Option<Vec<String>>,
    max_retries: u64,
}

impl ExportConfig {
    /// Number of retries used when a row does not set `retries`.
    pub const DEFAULT_MAX_TRIES: u64 = 5;

    /// Creates an export configuration.
    ///
    /// `columns` and `primary_key` must be `None` rather than empty when not
    /// used, so that "no primary key" is never ambiguous.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidArgument` on the first violated invariant.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        query: Option<String>,
        table: Option<InputTable>,
        incremental_fetching_config: Option<IncrementalFetchingConfig>,
        columns: Option<Vec<String>>,
        output_table: impl Into<String>,
        primary_key: Option<Vec<String>>,
        max_retries: u64,
    ) -> Result<Self> {
        let output_table = output_table.into();

        if query.is_none() && table.is_none() {
            return Err(ConfigError::invalid_argument(
                "Query or table must be specified.",
            ));
        }

        if query.as_deref() == Some("") {
            return Err(ConfigError::invalid_argument("Query cannot be empty string."));
        }

        if let Some(columns) = &columns {
            check_name_list(
                columns,
                "Columns cannot be empty array, null expected.",
                "Column name cannot be empty string.",
            )?;
        }

        if output_table.is_empty() {
            return Err(ConfigError::invalid_argument(
                "Output table cannot be empty string.",
            ));
        }

        if let Some(primary_key) = &primary_key {
            check_name_list(
                primary_key,
                "Primary key cannot be empty array, null expected.",
                "Primary key column cannot be empty string.",
            )?;
        }

        Ok(Self {
            query,
            table,
            incremental_fetching_config,
            columns,
            output_table,
            primary_key,
            max_retries,
        })
    }

    /// Builds the configuration from a validated row.
    ///
    /// Empty `columns` / `primaryKey` lists are read as "not set", which is
    /// how the schema layer lets users leave them blank. `retries` defaults
    /// to [`Self::DEFAULT_MAX_TRIES`].
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidArgument` for missing keys or violated
    /// invariants.
    pub fn from_array(data: &Map<String, Value>) -> Result<Self> {
        if !is_set(data.get("table")) && !is_set(data.get("query")) {
            return Err(ConfigError::invalid_argument(
                "Key \"table\" or \"query\" must be set.",
            ));
        }

        let query = optional_str(data, "query");
        let table = if is_set(data.get("table")) {
            Some(InputTable::from_array(data)?)
        } else {
            None
        };
        let max_retries = parse_max_retries(data.get("retries"))?;

        let export = Self::new(
            query,
            table,
            IncrementalFetchingConfig::from_array(data)?,
            optional_str_list(data, "columns")?.filter(|columns| !columns.is_empty()),
            required_str(data, "outputTable", "outputTable")?,
            optional_str_list(data, "primaryKey")?.filter(|pk| !pk.is_empty()),
            max_retries,
        )?;

        tracing::trace!(
            output_table = %export.output_table,
            incremental = export.is_incremental(),
            "Built export configuration"
        );
        Ok(export)
    }

    /// Whether a custom query is set.
    pub fn has_query(&self) -> bool {
        self.query.is_some()
    }

    /// Custom query.
    ///
    /// # Errors
    /// Returns `ConfigError::PropertyNotSet` when no query is set.
    pub fn query(&self) -> Result<&str> {
        self.query
            .as_deref()
            .ok_or_else(|| ConfigError::property_not_set("query"))
    }

    /// Whether a source table is set.
    pub fn has_table(&self) -> bool {
        self.table.is_some()
    }

    /// Source table.
    ///
    /// # Errors
    /// Returns `ConfigError::PropertyNotSet` when no table is set.
    pub fn table(&self) -> Result<&InputTable> {
        self.table
            .as_ref()
            .ok_or_else(|| ConfigError::property_not_set("table"))
    }

    /// Whether incremental fetching is configured.
    pub fn is_incremental(&self) -> bool {
        self.incremental_fetching_config.is_some()
    }

    /// Incremental fetching settings.
    ///
    /// # Errors
    /// Returns `ConfigError::PropertyNotSet` when fetching is not incremental.
    pub fn incremental_fetching_config(&self) -> Result<&IncrementalFetchingConfig> {
        self.incremental_fetching_config
            .as_ref()
            .ok_or_else(|| ConfigError::property_not_set("incrementalFetchingConfig"))
    }

    /// Watermark column of incremental fetching.
    ///
    /// # Errors
    /// Returns `ConfigError::PropertyNotSet` when fetching is not incremental.
    pub fn incremental_column(&self) -> Result<&str> {
        self.incremental_fetching_config()
            .map(IncrementalFetchingConfig::column)
    }

    /// Row limit of incremental fetching.
    ///
    /// # Errors
    /// Returns `ConfigError::PropertyNotSet` when fetching is not incremental
    /// or has no limit.
    pub fn incremental_limit(&self) -> Result<u64> {
        self.incremental_fetching_config()?.limit()
    }

    /// Whether an explicit column list is set.
    pub fn has_columns(&self) -> bool {
        self.columns.is_some()
    }

    /// Columns to extract, in order.
    ///
    /// # Errors
    /// Returns `ConfigError::PropertyNotSet` when all columns are extracted.
    pub fn columns(&self) -> Result<&[String]> {
        self.columns
            .as_deref()
            .ok_or_else(|| ConfigError::property_not_set("columns"))
    }

    /// Destination table.
    pub fn output_table(&self) -> &str {
        &self.output_table
    }

    /// Whether a primary key is set.
    pub fn has_primary_key(&self) -> bool {
        self.primary_key.is_some()
    }

    /// Primary key columns, in order.
    ///
    /// # Errors
    /// Returns `ConfigError::PropertyNotSet` when the output has no primary key.
    pub fn primary_key(&self) -> Result<&[String]> {
        self.primary_key
            .as_deref()
            .ok_or_else(|| ConfigError::property_not_set("primaryKey"))
    }

    /// Maximum number of retries of a failed extraction.
    pub fn max_retries(&self) -> u64 {
        self.max_retries
    }
}

fn parse_max_retries(value: Option<&Value>) -> Result<u64> {
    let Some(value) = value.filter(|v| !v.is_null()) else {
        return Ok(ExportConfig::DEFAULT_MAX_TRIES);
    };
    match (value.as_u64(), value.as_i64()) {
        (Some(retries), _) => Ok(retries),
        (None, Some(_)) => Err(ConfigError::invalid_argument("Max retries must be >= 0.")),
        (None, None) => Err(ConfigError::invalid_argument(
            "Max retries must be an integer.",
        )),
    }
}

fn check_name_list(names: &[String], empty_list: &str, empty_name: &str) -> Result<()> {
    if names.is_empty() {
        return Err(ConfigError::invalid_argument(empty_list));
    }
    if names.iter().any(String::is_empty) {
        return Err(ConfigError::invalid_argument(empty_name));
    }
    Ok(())
}
