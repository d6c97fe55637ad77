use serde::Deserialize;
use std::{fs, path::Path};
use thiserror::Error;

/// Configuration for a [`PamRealm`](crate::PamRealm).
///
/// Both properties are optional here. A missing `service` is reported when the realm is
/// initialized.
///
/// ```
/// use pam_realm::PamRealmConfig;
///
/// let config = PamRealmConfig::from_json(r#"{ "name": "pamRealm", "service": "my-app" }"#).unwrap();
/// assert_eq!(config.service.as_deref(), Some("my-app"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PamRealmConfig {
    /// The realm name principals are tagged with.
    #[serde(default)]
    pub name: Option<String>,
    /// The PAM service profile, i.e. the name of a file under `/etc/pam.d`.
    #[serde(default)]
    pub service: Option<String>,
}

impl PamRealmConfig {
    /// Reads the configuration from a JSON file.
    pub fn from_file<P: AsRef<Path>>(filename: P) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(filename)?;
        PamRealmConfig::from_json(json)
    }

    /// Reads the configuration from a JSON string.
    pub fn from_json<T: AsRef<str>>(json: T) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json.as_ref())?)
    }
}

/// Errors while loading a [`PamRealmConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("could not read realm configuration: {0}")]
    Io(#[from] std::io::Error),
    /// The configuration is not valid JSON or has unknown properties.
    #[error("invalid realm configuration: {0}")]
    Json(#[from] serde_json::Error),
}
