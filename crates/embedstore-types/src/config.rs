//! Store client configuration.
//!
//! Credentials are always injected by the caller (flags, environment, or a
//! config file) -- there are no compiled-in defaults for endpoint or key,
//! and a cloud endpoint without a key fails validation at startup.

use secrecy::SecretString;
use serde::Deserialize;

use crate::error::ConfigError;

/// Default embedding model identifier (small general-purpose sentence model).
pub const DEFAULT_MODEL: &str = "all-minilm-l6-v2";

/// Default collection name for stored text embeddings.
pub const DEFAULT_COLLECTION: &str = "text_embeddings";

/// Resolved configuration for one embedding-store session.
#[derive(Debug)]
pub struct StoreConfig {
    /// Store endpoint: a local data directory or a `db://` cloud URI.
    pub endpoint: String,

    /// API key for cloud endpoints. Required when `endpoint` is a `db://` URI.
    pub api_key: Option<SecretString>,

    /// Collection the writer targets.
    pub collection: String,

    /// Embedding model identifier (determines vector dimensionality).
    pub model: String,
}

impl StoreConfig {
    /// Build a config for the given endpoint with default model and collection.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: None,
            collection: DEFAULT_COLLECTION.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Whether the endpoint is a managed cloud cluster (`db://` URI).
    pub fn is_cloud(&self) -> bool {
        self.endpoint.starts_with("db://")
    }

    /// Validate connection parameters.
    ///
    /// Called before any I/O: a missing endpoint, or a cloud endpoint
    /// without an API key, is reported here rather than on first use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.endpoint.trim().is_empty() {
            return Err(ConfigError::MissingEndpoint);
        }
        if self.is_cloud() && self.api_key.is_none() {
            return Err(ConfigError::MissingApiKey(self.endpoint.clone()));
        }
        Ok(())
    }
}

/// On-disk configuration file shape (`config.toml`).
///
/// All fields optional; command-line flags and environment variables take
/// precedence over file values.
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub collection: Option<String>,
    pub model: Option<String>,
}
