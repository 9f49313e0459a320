//! SMTP account configuration

use std::{fmt, fs, io, path::Path};

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading a [`MailerConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read
    #[error("could not read mail settings from {path}")]
    Read {
        /// The configuration file path
        path: String,

        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The configuration file is not valid JSON or is missing a setting
    #[error("invalid mail settings in {path}: {source}")]
    Parse {
        /// The configuration file path
        path: String,

        /// The underlying parse error
        #[source]
        source: serde_json::Error,
    },
}

/// SMTP configuration
///
/// Loaded from a JSON file holding exactly the keys `SMTP_ACCOUNT`,
/// `SMTP_PASSWORD`, `SMTP_SERVER` and `SMTP_PORT`.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct MailerConfig {
    /// The SMTP username
    #[serde(rename = "SMTP_ACCOUNT")]
    pub smtp_account_name: String,

    /// The SMTP password
    #[serde(rename = "SMTP_PASSWORD")]
    pub smtp_account_password: String,

    /// The SMTP host
    #[serde(rename = "SMTP_SERVER")]
    pub smtp_server_host: String,

    /// The SMTP port, connected to with implicit TLS
    #[serde(rename = "SMTP_PORT")]
    pub smtp_server_port: u16,
}

impl MailerConfig {
    /// Load the configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }
}

impl fmt::Debug for MailerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailerConfig")
            .field("smtp_account_name", &self.smtp_account_name)
            .field("smtp_account_password", &"********")
            .field("smtp_server_host", &self.smtp_server_host)
            .field("smtp_server_port", &self.smtp_server_port)
            .finish()
    }
}
