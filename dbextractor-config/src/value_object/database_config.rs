//! Database connection parameters.

use super::ssl_connection_config::SslConnectionConfig;
use super::{nested, optional_str, required_str};
use crate::definition::db_node::PASSWORD_KEY;
use crate::{Result, error::ConfigError};
use serde::Serialize;
use serde_json::{Map, Value};
use zeroize::Zeroizing;

/// Where and as whom to connect.
///
/// # Security
/// The password is held in a `Zeroizing` container, cleared on drop, and
/// redacted from `Debug` and `Display` output. Serialization skips it.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseConfig {
    driver: Option<String>,
    host: Option<String>,
    port: Option<u16>,
    database: Option<String>,
    username: String,
    #[serde(skip)]
    password: Zeroizing<String>,
    ssl: Option<SslConnectionConfig>,
}

impl DatabaseConfig {
    /// Creates connection parameters. The username must be non-empty.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidArgument` for an empty username or
    /// database name.
    pub fn new(
        driver: Option<String>,
        host: Option<String>,
        port: Option<u16>,
        database: Option<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        ssl: Option<SslConnectionConfig>,
    ) -> Result<Self> {
        let username = username.into();
        if username.is_empty() {
            return Err(ConfigError::invalid_argument("User cannot be empty."));
        }
        if database.as_deref() == Some("") {
            return Err(ConfigError::invalid_argument("Database cannot be empty."));
        }

        Ok(Self {
            driver,
            host,
            port,
            database,
            username,
            password: Zeroizing::new(password.into()),
            ssl,
        })
    }

    /// Builds the parameters from a validated document's `db` map.
    ///
    /// `port` may be given as a number or a numeric string.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidArgument` for a missing `db` map, missing
    /// credentials or an invalid port.
    pub fn from_array(data: &Map<String, Value>) -> Result<Self> {
        let db = nested(data, "db")?;

        let config = Self::new(
            optional_str(db, "driver"),
            optional_str(db, "host"),
            parse_port(db.get("port"))?,
            optional_str(db, "database"),
            required_str(db, "db.user", "user")?,
            required_str(db, "db.#password", PASSWORD_KEY)?,
            db.get("ssl")
                .and_then(Value::as_object)
                .map(SslConnectionConfig::from_ssl_map),
        )?;

        tracing::debug!(connection = %config, "Built database configuration");
        Ok(config)
    }

    /// Driver name, if configured.
    pub fn driver(&self) -> Option<&str> {
        self.driver.as_deref()
    }

    /// Whether a host is set.
    pub fn has_host(&self) -> bool {
        self.host.is_some()
    }

    /// Host name.
    ///
    /// # Errors
    /// Returns `ConfigError::PropertyNotSet` when absent.
    pub fn host(&self) -> Result<&str> {
        self.host
            .as_deref()
            .ok_or_else(|| ConfigError::property_not_set("host"))
    }

    /// Whether a port is set.
    pub fn has_port(&self) -> bool {
        self.port.is_some()
    }

    /// Port number.
    ///
    /// # Errors
    /// Returns `ConfigError::PropertyNotSet` when absent.
    pub fn port(&self) -> Result<u16> {
        self.port
            .ok_or_else(|| ConfigError::property_not_set("port"))
    }

    /// Whether a database name is set.
    pub fn has_database(&self) -> bool {
        self.database.is_some()
    }

    /// Database name.
    ///
    /// # Errors
    /// Returns `ConfigError::PropertyNotSet` when absent.
    pub fn database(&self) -> Result<&str> {
        self.database
            .as_deref()
            .ok_or_else(|| ConfigError::property_not_set("database"))
    }

    /// User name.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Password. Callers must not log it.
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Whether SSL settings are present.
    pub fn has_ssl_connection(&self) -> bool {
        self.ssl.is_some()
    }

    /// SSL settings.
    ///
    /// # Errors
    /// Returns `ConfigError::PropertyNotSet` when absent.
    pub fn ssl_connection_config(&self) -> Result<&SslConnectionConfig> {
        self.ssl
            .as_ref()
            .ok_or_else(|| ConfigError::property_not_set("sslConnectionConfig"))
    }
}

fn parse_port(value: Option<&Value>) -> Result<Option<u16>> {
    let invalid = || ConfigError::invalid_argument("Port must be a number between 0 and 65535.");
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_u64()
            .and_then(|port| u16::try_from(port).ok())
            .map(Some)
            .ok_or_else(invalid),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => s.parse::<u16>().map(Some).map_err(|_| invalid()),
        Some(_) => Err(invalid()),
    }
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("driver", &self.driver)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("ssl", &self.ssl)
            .finish()
    }
}

impl std::fmt::Display for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "DatabaseConfig({}{}{})",
            self.host.as_deref().unwrap_or("<default host>"),
            self.port.map_or_else(String::new, |p| format!(":{}", p)),
            self.database
                .as_ref()
                .map_or_else(String::new, |db| format!("/{}", db))
        )
        // Intentionally omit username and never include credentials
    }
}
