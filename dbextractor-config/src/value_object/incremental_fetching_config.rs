//! Incremental fetching settings of an extraction row.

use super::optional_limit;
use crate::{Result, error::ConfigError, schema::is_blank};
use serde::Serialize;
use serde_json::{Map, Value};

/// Watermark column and optional row limit for incremental fetching.
///
/// A row without this object fetches everything on every run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IncrementalFetchingConfig {
    column: String,
    limit: Option<u64>,
}

impl IncrementalFetchingConfig {
    /// Creates the settings. The column must be non-empty.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidArgument` for an empty column.
    pub fn new(column: impl Into<String>, limit: Option<u64>) -> Result<Self> {
        let column = column.into();
        if column.is_empty() {
            return Err(ConfigError::invalid_argument(
                "Incremental fetching column cannot be empty.",
            ));
        }
        Ok(Self { column, limit })
    }

    /// Builds the settings from a validated row.
    ///
    /// Returns `Ok(None)` when `incremental` is off or no
    /// `incrementalFetchingColumn` is configured. A numeric column is read
    /// as its decimal text. A limit of `0` or `null` means no limit.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidArgument` for a negative limit or a
    /// boolean column.
    pub fn from_array(data: &Map<String, Value>) -> Result<Option<Self>> {
        if is_blank(data.get("incremental")) {
            return Ok(None);
        }
        let column = data.get("incrementalFetchingColumn");
        if is_blank(column) {
            return Ok(None);
        }
        // The schema keeps the column an untyped scalar, so numbers are
        // column names too.
        let column = match column {
            Some(Value::String(name)) => name.clone(),
            Some(Value::Number(name)) => name.to_string(),
            _ => {
                return Err(ConfigError::invalid_argument(
                    "Incremental fetching column must be a string.",
                ));
            }
        };
        let limit = optional_limit(data.get("incrementalFetchingLimit"))?;
        Self::new(column, limit).map(Some)
    }

    /// Watermark column name.
    pub fn column(&self) -> &str {
        &self.column
    }

    /// Whether a row limit is set.
    pub fn has_limit(&self) -> bool {
        self.limit.is_some()
    }

    /// Row limit per run.
    ///
    /// # Errors
    /// Returns `ConfigError::PropertyNotSet` when no limit is set.
    pub fn limit(&self) -> Result<u64> {
        self.limit
            .ok_or_else(|| ConfigError::property_not_set("limit"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn from(value: Value) -> Result<Option<IncrementalFetchingConfig>> {
        IncrementalFetchingConfig::from_array(value.as_object().unwrap())
    }

    #[test]
    fn test_new_with_limit() {
        let config = IncrementalFetchingConfig::new("column1", Some(100)).unwrap();
        assert_eq!(config.column(), "column1");
        assert!(config.has_limit());
        assert_eq!(config.limit().unwrap(), 100);
    }

    #[test]
    fn test_new_without_limit() {
        let config = IncrementalFetchingConfig::new("column2", None).unwrap();
        assert!(!config.has_limit());
        assert_eq!(config.limit().unwrap_err().to_string(), "Property \"limit\" is not set.");
    }

    #[test]
    fn test_empty_column_rejected() {
        let error = IncrementalFetchingConfig::new("", None).unwrap_err();
        assert_eq!(error.to_string(), "Incremental fetching column cannot be empty.");
    }

    #[test]
    fn test_from_array() {
        let config = from(json!({
            "incremental": true,
            "incrementalFetchingColumn": "b",
            "incrementalFetchingLimit": 100
        }))
        .unwrap()
        .unwrap();
        assert_eq!(config.column(), "b");
        assert_eq!(config.limit().unwrap(), 100);
    }

    #[test]
    fn test_from_array_disabled() {
        assert!(from(json!({"incremental": false, "incrementalFetchingColumn": "b"})).unwrap().is_none());
        assert!(from(json!({"incremental": true})).unwrap().is_none());
        assert!(from(json!({"incremental": true, "incrementalFetchingColumn": null})).unwrap().is_none());
        assert!(from(json!({})).unwrap().is_none());
    }

    #[test]
    fn test_from_array_zero_or_null_limit_means_none() {
        for limit in [json!(0), json!(null)] {
            let config = from(json!({
                "incremental": true,
                "incrementalFetchingColumn": "b",
                "incrementalFetchingLimit": limit
            }))
            .unwrap()
            .unwrap();
            assert!(!config.has_limit());
        }
    }

    #[test]
    fn test_from_array_numeric_column() {
        let config = from(json!({
            "incremental": true,
            "incrementalFetchingColumn": 123,
            "incrementalFetchingLimit": 10
        }))
        .unwrap()
        .unwrap();
        assert_eq!(config.column(), "123");
        assert_eq!(config.limit().unwrap(), 10);
    }

    #[test]
    fn test_from_array_boolean_column_rejected() {
        let error = from(json!({"incremental": true, "incrementalFetchingColumn": true}))
            .unwrap_err();
        assert_eq!(error.to_string(), "Incremental fetching column must be a string.");
    }

    #[test]
    fn test_from_array_negative_limit() {
        let error = from(json!({
            "incremental": true,
            "incrementalFetchingColumn": "b",
            "incrementalFetchingLimit": -5
        }))
        .unwrap_err();
        assert_eq!(error.to_string(), "Incremental fetching limit must be >= 0.");
    }
}
