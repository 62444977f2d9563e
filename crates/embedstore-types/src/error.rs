use thiserror::Error;

/// Errors from validating configuration or establishing the store connection.
///
/// Raised at startup or `connect` time, never deferred to the first write.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("store endpoint is not configured")]
    MissingEndpoint,

    #[error("cloud endpoint '{0}' requires an api key")]
    MissingApiKey(String),

    #[error("unknown embedding model: '{0}'")]
    UnknownModel(String),

    #[error("failed to connect to store: {0}")]
    Connection(String),
}

/// Errors from the embedding model.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to load embedding model: {0}")]
    Load(String),

    #[error("embedding failed: {0}")]
    Inference(String),
}

/// Errors from collection existence checks or creation.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("failed to check collection '{name}': {message}")]
    Lookup { name: String, message: String },

    #[error("failed to create collection '{name}': {message}")]
    Create { name: String, message: String },
}

/// Errors from single or batch inserts.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("vector length {actual} does not match batch dimension {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("insert into '{collection}' failed: {message}")]
    Insert { collection: String, message: String },
}

/// Umbrella error for session-level operations that cross component
/// boundaries (e.g., a batch store involves both the model and the store).
///
/// None of the variants are retried internally; each is surfaced to the
/// caller as a distinct, typed failure.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Write(#[from] WriteError),
}
