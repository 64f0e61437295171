//! Immutable typed views over validated configuration data.
//!
//! Each value object checks its own invariants on construction and offers a
//! `from_array` constructor reading the key layout produced by the schema
//! definitions. Optional properties come with a `has_*` probe; reading an
//! absent one fails with [`ConfigError::PropertyNotSet`].

mod database_config;
mod export_config;
mod incremental_fetching_config;
mod input_table;
mod ssl_connection_config;

pub use database_config::DatabaseConfig;
pub use export_config::ExportConfig;
pub use incremental_fetching_config::IncrementalFetchingConfig;
pub use input_table::InputTable;
pub use ssl_connection_config::SslConnectionConfig;

use crate::{Result, error::ConfigError};
use serde_json::{Map, Value};

fn must_be_set(display_key: &str) -> ConfigError {
    ConfigError::invalid_argument(format!("Key \"{display_key}\" must be set."))
}

/// Returns the object stored under `key`.
pub(crate) fn nested<'a>(data: &'a Map<String, Value>, key: &str) -> Result<&'a Map<String, Value>> {
    data.get(key)
        .and_then(Value::as_object)
        .ok_or_else(|| must_be_set(key))
}

/// Reads a mandatory scalar as a string. Numbers are accepted since the
/// schema keeps scalars untyped.
pub(crate) fn required_str(
    data: &Map<String, Value>,
    display_key: &str,
    key: &str,
) -> Result<String> {
    match data.get(key) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        _ => Err(must_be_set(display_key)),
    }
}

pub(crate) fn optional_str(data: &Map<String, Value>, key: &str) -> Option<String> {
    match data.get(key) {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

/// Reads an optional list of names. `null` counts as absent.
pub(crate) fn optional_str_list(data: &Map<String, Value>, key: &str) -> Result<Option<Vec<String>>> {
    let items = match data.get(key) {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Array(items)) => items,
        Some(_) => {
            return Err(ConfigError::invalid_argument(format!(
                "Key \"{key}\" must be a list."
            )));
        }
    };

    items
        .iter()
        .map(|item| match item {
            Value::String(s) => Ok(s.clone()),
            Value::Number(n) => Ok(n.to_string()),
            _ => Err(ConfigError::invalid_argument(format!(
                "Key \"{key}\" must contain only strings."
            ))),
        })
        .collect::<Result<Vec<_>>>()
        .map(Some)
}

/// Reads an incremental fetching limit. Absent, `null` and `0` all mean
/// "no limit".
pub(crate) fn optional_limit(value: Option<&Value>) -> Result<Option<u64>> {
    let Some(value) = value.filter(|v| !v.is_null()) else {
        return Ok(None);
    };
    match value.as_i64() {
        Some(0) => Ok(None),
        Some(limit) => u64::try_from(limit).map(Some).map_err(|_| {
            ConfigError::invalid_argument("Incremental fetching limit must be >= 0.")
        }),
        None => value.as_u64().map(Some).ok_or_else(|| {
            ConfigError::invalid_argument("Incremental fetching limit must be an integer.")
        }),
    }
}
