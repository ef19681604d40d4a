//! YAML credential files.
//!
//! Two files are read at startup: one for the emulation database and one for
//! the Kafka REST proxy. Keys use the upper-case names of the deployment
//! (`RDS_HOST`, `INVOKE_URL_BASE`, ...). Unknown keys are ignored so both
//! kinds of credentials may also live in one file.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CredentialsError {
    #[error("Failed to read credentials file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid credentials YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Connection settings for the emulation database.
#[derive(Clone, Deserialize)]
pub struct DatabaseCredentials {
    #[serde(rename = "RDS_HOST")]
    pub host: String,
    #[serde(rename = "RDS_PORT", deserialize_with = "deserialize_port")]
    pub port: u16,
    #[serde(rename = "RDS_DATABASE")]
    pub database: String,
    #[serde(rename = "RDS_USER")]
    pub user: String,
    #[serde(rename = "RDS_PASSWORD")]
    pub password: String,
}

// Password is never printed.
impl fmt::Debug for DatabaseCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseCredentials")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"***")
            .finish()
    }
}

impl DatabaseCredentials {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CredentialsError> {
        load(path)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, CredentialsError> {
        Ok(serde_yaml::from_str(yaml)?)
    }
}

/// Kafka REST proxy settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiCredentials {
    /// Topic URL prefix; the sub-record name is appended after a `.`.
    #[serde(rename = "INVOKE_URL_BASE")]
    pub invoke_url_base: String,
}

impl ApiCredentials {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CredentialsError> {
        load(path)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, CredentialsError> {
        Ok(serde_yaml::from_str(yaml)?)
    }
}

/// Read and parse a YAML credentials file.
pub fn load<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T, CredentialsError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| CredentialsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_yaml::from_str(&content)?)
}

/// Ports show up both as `3306` and `"3306"` in hand-written files.
fn deserialize_port<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u16, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Port {
        Number(u16),
        Text(String),
    }

    match Port::deserialize(deserializer)? {
        Port::Number(port) => Ok(port),
        Port::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid RDS_PORT: {text:?}"))),
    }
}
