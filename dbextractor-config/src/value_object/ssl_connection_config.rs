//! SSL settings of the database connection.

use super::{nested, optional_str};
use crate::{Result, error::ConfigError};
use serde::Serialize;
use serde_json::{Map, Value};

/// Client key, certificates and cipher for an SSL connection.
///
/// # Security
/// The private key is never printed by `Debug` and never serialized.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SslConnectionConfig {
    #[serde(skip)]
    key: Option<String>,
    cert: Option<String>,
    ca: Option<String>,
    cipher: Option<String>,
    verify_server_cert: bool,
}

impl SslConnectionConfig {
    /// Creates SSL settings. Every part is optional.
    pub fn new(
        key: Option<String>,
        cert: Option<String>,
        ca: Option<String>,
        cipher: Option<String>,
        verify_server_cert: bool,
    ) -> Self {
        Self {
            key,
            cert,
            ca,
            cipher,
            verify_server_cert,
        }
    }

    /// Builds the settings from a validated document's `db.ssl` map.
    /// `verifyServerCert` defaults to `true`.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidArgument` if `db.ssl` is absent.
    pub fn from_array(data: &Map<String, Value>) -> Result<Self> {
        let db = nested(data, "db")?;
        let ssl = db
            .get("ssl")
            .and_then(Value::as_object)
            .ok_or_else(|| ConfigError::invalid_argument("Key \"db.ssl\" must be set."))?;
        Ok(Self::from_ssl_map(ssl))
    }

    pub(crate) fn from_ssl_map(ssl: &Map<String, Value>) -> Self {
        Self::new(
            optional_str(ssl, "key"),
            optional_str(ssl, "cert"),
            optional_str(ssl, "ca"),
            optional_str(ssl, "cipher"),
            ssl.get("verifyServerCert")
                .and_then(Value::as_bool)
                .unwrap_or(true),
        )
    }

    /// Whether a client key is set.
    pub fn has_key(&self) -> bool {
        self.key.is_some()
    }

    /// Whether a client certificate is set.
    pub fn has_cert(&self) -> bool {
        self.cert.is_some()
    }

    /// Whether a CA certificate is set.
    pub fn has_ca(&self) -> bool {
        self.ca.is_some()
    }

    /// Whether a cipher list is set.
    pub fn has_cipher(&self) -> bool {
        self.cipher.is_some()
    }

    /// Client private key.
    ///
    /// # Errors
    /// Returns `ConfigError::PropertyNotSet` when absent.
    pub fn key(&self) -> Result<&str> {
        self.key
            .as_deref()
            .ok_or_else(|| ConfigError::property_not_set("key"))
    }

    /// Client certificate.
    ///
    /// # Errors
    /// Returns `ConfigError::PropertyNotSet` when absent.
    pub fn cert(&self) -> Result<&str> {
        self.cert
            .as_deref()
            .ok_or_else(|| ConfigError::property_not_set("cert"))
    }

    /// CA certificate.
    ///
    /// # Errors
    /// Returns `ConfigError::PropertyNotSet` when absent.
    pub fn ca(&self) -> Result<&str> {
        self.ca
            .as_deref()
            .ok_or_else(|| ConfigError::property_not_set("ca"))
    }

    /// Cipher list.
    ///
    /// # Errors
    /// Returns `ConfigError::PropertyNotSet` when absent.
    pub fn cipher(&self) -> Result<&str> {
        self.cipher
            .as_deref()
            .ok_or_else(|| ConfigError::property_not_set("cipher"))
    }

    /// Whether the server certificate must be verified.
    pub fn verify_server_cert(&self) -> bool {
        self.verify_server_cert
    }
}

impl std::fmt::Debug for SslConnectionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SslConnectionConfig")
            .field("key", &self.key.as_ref().map(|_| "[REDACTED]"))
            .field("cert", &self.cert)
            .field("ca", &self.ca)
            .field("cipher", &self.cipher)
            .field("verify_server_cert", &self.verify_server_cert)
            .finish()
    }
}
