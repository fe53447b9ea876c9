//! Configuration module
//!
//! Settings are read from the process environment (after loading a `.env` file,
//! if present). Local settings are enough to read the catalog; the Pinata
//! credentials are only required for commands that talk to the pinning API.

use std::env;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::path::PathBuf;

use crate::constants::{
    DEFAULT_DATA_DIR, DEFAULT_MAX_UPLOAD_MB, DEFAULT_PINATA_API_URL, DEFAULT_PINATA_GATEWAY_URL,
    DEFAULT_STORAGE_LIMIT_MB,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Pinata API key pair. `Debug` output never includes the values.
#[derive(Clone)]
pub struct PinataCredentials {
    api_key: String,
    secret_api_key: String,
}

impl PinataCredentials {
    pub fn new(api_key: impl Into<String>, secret_api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            secret_api_key: secret_api_key.into(),
        }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn secret_api_key(&self) -> &str {
        &self.secret_api_key
    }
}

impl Debug for PinataCredentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("PinataCredentials")
            .field("api_key", &"<redacted>")
            .field("secret_api_key", &"<redacted>")
            .finish()
    }
}

/// Settings for the local catalog.
#[derive(Clone, Debug, PartialEq)]
pub struct LocalSettings {
    pub data_dir: PathBuf,
    pub storage_limit_mb: f64,
    pub max_upload_mb: u64,
}

/// Settings for the Pinata API.
#[derive(Clone, Debug)]
pub struct PinataSettings {
    pub credentials: PinataCredentials,
    pub api_url: String,
    pub gateway_url: String,
}

/// Full configuration for commands that pin or look up content.
#[derive(Clone, Debug)]
pub struct PinvaultConfig {
    pub local: LocalSettings,
    pub pinata: PinataSettings,
}

impl LocalSettings {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = lookup("PINVAULT_DATA_DIR")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DATA_DIR.to_string());

        let storage_limit_mb = match lookup("PINVAULT_STORAGE_LIMIT_MB") {
            Some(raw) => raw.trim().parse::<f64>().map_err(|_| ConfigError::Invalid {
                name: "PINVAULT_STORAGE_LIMIT_MB",
                reason: format!("'{}' is not a number", raw),
            })?,
            None => DEFAULT_STORAGE_LIMIT_MB,
        };

        let max_upload_mb = match lookup("PINVAULT_MAX_UPLOAD_MB") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| ConfigError::Invalid {
                name: "PINVAULT_MAX_UPLOAD_MB",
                reason: format!("'{}' is not a whole number", raw),
            })?,
            None => DEFAULT_MAX_UPLOAD_MB,
        };

        let settings = LocalSettings {
            data_dir: PathBuf::from(data_dir),
            storage_limit_mb,
            max_upload_mb,
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.storage_limit_mb.is_finite() || self.storage_limit_mb <= 0.0 {
            return Err(ConfigError::Invalid {
                name: "PINVAULT_STORAGE_LIMIT_MB",
                reason: "must be a positive number".to_string(),
            });
        }
        Ok(())
    }
}

impl PinataSettings {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("PINATA_API_KEY").ok_or(ConfigError::Missing("PINATA_API_KEY"))?;
        let secret_api_key = lookup("PINATA_SECRET_API_KEY")
            .ok_or(ConfigError::Missing("PINATA_SECRET_API_KEY"))?;

        let settings = PinataSettings {
            credentials: PinataCredentials::new(api_key.trim(), secret_api_key.trim()),
            api_url: lookup("PINATA_API_URL")
                .unwrap_or_else(|| DEFAULT_PINATA_API_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            gateway_url: lookup("PINATA_GATEWAY_URL")
                .unwrap_or_else(|| DEFAULT_PINATA_GATEWAY_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.credentials.api_key().is_empty() {
            return Err(ConfigError::Missing("PINATA_API_KEY"));
        }
        if self.credentials.secret_api_key().is_empty() {
            return Err(ConfigError::Missing("PINATA_SECRET_API_KEY"));
        }
        for (name, url) in [
            ("PINATA_API_URL", &self.api_url),
            ("PINATA_GATEWAY_URL", &self.gateway_url),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::Invalid {
                    name,
                    reason: format!("'{}' is not an http(s) URL", url),
                });
            }
        }
        Ok(())
    }
}

impl PinvaultConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(PinvaultConfig {
            local: LocalSettings::from_lookup(&lookup)?,
            pinata: PinataSettings::from_lookup(&lookup)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn local_defaults() {
        let settings = LocalSettings::from_lookup(lookup(&[])).unwrap();
        assert_eq!(settings.data_dir, PathBuf::from(".pinvault"));
        assert_eq!(settings.storage_limit_mb, 1024.0);
        assert_eq!(settings.max_upload_mb, 100);
    }

    #[test]
    fn local_overrides() {
        let settings = LocalSettings::from_lookup(lookup(&[
            ("PINVAULT_DATA_DIR", "/tmp/vault"),
            ("PINVAULT_STORAGE_LIMIT_MB", "2048"),
            ("PINVAULT_MAX_UPLOAD_MB", "25"),
        ]))
        .unwrap();
        assert_eq!(settings.data_dir, PathBuf::from("/tmp/vault"));
        assert_eq!(settings.storage_limit_mb, 2048.0);
        assert_eq!(settings.max_upload_mb, 25);
    }

    #[test]
    fn local_rejects_bad_limits() {
        assert!(matches!(
            LocalSettings::from_lookup(lookup(&[("PINVAULT_STORAGE_LIMIT_MB", "lots")])),
            Err(ConfigError::Invalid { .. })
        ));
        assert!(LocalSettings::from_lookup(lookup(&[("PINVAULT_STORAGE_LIMIT_MB", "0")])).is_err());
        assert!(LocalSettings::from_lookup(lookup(&[("PINVAULT_MAX_UPLOAD_MB", "-1")])).is_err());
    }

    #[test]
    fn pinata_requires_both_secrets() {
        assert_eq!(
            PinataSettings::from_lookup(lookup(&[])).unwrap_err(),
            ConfigError::Missing("PINATA_API_KEY")
        );
        assert_eq!(
            PinataSettings::from_lookup(lookup(&[("PINATA_API_KEY", "key")])).unwrap_err(),
            ConfigError::Missing("PINATA_SECRET_API_KEY")
        );
        assert_eq!(
            PinataSettings::from_lookup(lookup(&[
                ("PINATA_API_KEY", " "),
                ("PINATA_SECRET_API_KEY", "secret"),
            ]))
            .unwrap_err(),
            ConfigError::Missing("PINATA_API_KEY")
        );
    }

    #[test]
    fn pinata_defaults() {
        let settings = PinataSettings::from_lookup(lookup(&[
            ("PINATA_API_KEY", "key"),
            ("PINATA_SECRET_API_KEY", "secret"),
        ]))
        .unwrap();
        assert_eq!(settings.api_url, "https://api.pinata.cloud");
        assert_eq!(settings.gateway_url, "https://gateway.pinata.cloud");
        assert_eq!(settings.credentials.api_key(), "key");
    }

    #[test]
    fn pinata_rejects_non_http_urls() {
        let result = PinataSettings::from_lookup(lookup(&[
            ("PINATA_API_KEY", "key"),
            ("PINATA_SECRET_API_KEY", "secret"),
            ("PINATA_API_URL", "ftp://example.com"),
        ]));
        assert!(matches!(
            result,
            Err(ConfigError::Invalid {
                name: "PINATA_API_URL",
                ..
            })
        ));
    }

    #[test]
    fn credentials_debug_is_redacted() {
        let credentials = PinataCredentials::new("visible-key", "visible-secret");
        let rendered = format!("{:?}", credentials);
        assert!(!rendered.contains("visible-key"));
        assert!(!rendered.contains("visible-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
