use std::env;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required environment variables: {0}")]
    MissingVars(String),
}

/// Relay configuration, read once at startup.
///
/// Every field is required; loading fails closed with all missing keys
/// named so a broken deployment is caught before the server binds.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Shared secret Ghost uses to sign webhook deliveries
    pub webhook_secret: String,

    /// Bunny pull zone to purge
    pub pull_zone_id: String,

    /// Bunny control API key (pull zone purge)
    pub api_key: String,

    /// Storage endpoint host, e.g. "storage.bunnycdn.com"
    pub storage_host: String,

    /// Storage zone holding the perma-cache folders
    pub storage_zone_name: String,

    /// Storage zone password (AccessKey for list/delete)
    pub storage_password: String,

    /// Operator-held token that bypasses signature verification
    pub manual_trigger_token: String,
}

const REQUIRED_VARS: [&str; 7] = [
    "GHOST_WEBHOOK_SECRET",
    "BUNNY_PULL_ZONE_ID",
    "BUNNY_API_KEY",
    "BUNNY_STORAGE_HOST",
    "BUNNY_STORAGE_ZONE_NAME",
    "BUNNY_STORAGE_PASSWORD",
    "MANUAL_TRIGGER_TOKEN",
];

impl RelayConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let missing: Vec<&str> = REQUIRED_VARS
            .iter()
            .filter(|key| lookup(key).is_none_or(|v| v.is_empty()))
            .copied()
            .collect();

        if !missing.is_empty() {
            return Err(ConfigError::MissingVars(missing.join(", ")));
        }

        let get = |key: &str| lookup(key).unwrap_or_default();

        Ok(Self {
            webhook_secret: get("GHOST_WEBHOOK_SECRET"),
            pull_zone_id: get("BUNNY_PULL_ZONE_ID"),
            api_key: get("BUNNY_API_KEY"),
            storage_host: get("BUNNY_STORAGE_HOST"),
            storage_zone_name: get("BUNNY_STORAGE_ZONE_NAME"),
            storage_password: get("BUNNY_STORAGE_PASSWORD"),
            manual_trigger_token: get("MANUAL_TRIGGER_TOKEN"),
        })
    }
}
