//! Configuration file loader.
//!
//! Reads `config.toml` from the embedstore home directory
//! (`~/.embedstore/` in production) and deserializes it into
//! [`ConfigFile`]. Falls back to empty defaults when the file is missing
//! or malformed; flags and environment variables always take precedence.

use std::path::Path;

use embedstore_types::config::ConfigFile;

/// Load the optional configuration file.
///
/// - If the file does not exist, returns [`ConfigFile::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the
///   default.
/// - If the file exists and parses successfully, returns the parsed config.
pub async fn load_config_file(path: &Path) -> ConfigFile {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return ConfigFile::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", path.display());
            return ConfigFile::default();
        }
    };

    match toml::from_str::<ConfigFile>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("Failed to parse {}: {err}, using defaults", path.display());
            ConfigFile::default()
        }
    }
}
