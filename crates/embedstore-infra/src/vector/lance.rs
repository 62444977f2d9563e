//! LanceDB-backed vector store.
//!
//! Implements the `VectorStore` trait from `embedstore-core` over a
//! `lancedb::Connection`. The endpoint is either a local data directory
//! (embedded mode) or a `db://` cloud URI authenticated with an API key.

use std::path::PathBuf;
use std::sync::Arc;

use arrow_array::{
    FixedSizeListArray, Float32Array, RecordBatch, RecordBatchIterator, StringArray,
};
use arrow_schema::{DataType, Field};
use secrecy::ExposeSecret;

use embedstore_core::store::VectorStore;
use embedstore_types::config::StoreConfig;
use embedstore_types::error::{ConfigError, SchemaError, WriteError};
use embedstore_types::record::EmbeddingRecord;

use super::schema::collection_schema;

/// LanceDB vector store handle.
///
/// Owns one connection for the duration of a session. Obtain it with
/// [`LanceVectorStore::connect`] and release it through the trait's `close`.
pub struct LanceVectorStore {
    db: lancedb::Connection,
}

impl LanceVectorStore {
    /// Connect to the store described by the configuration.
    ///
    /// Validates the configuration before any I/O, so a missing endpoint or
    /// a cloud endpoint without an API key fails here -- never on first
    /// write. Local endpoints get their data directory created on demand.
    pub async fn connect(config: &StoreConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        // Plain paths are embedded mode; create the directory like any
        // local data store would.
        if !config.endpoint.contains("://") {
            std::fs::create_dir_all(&config.endpoint)
                .map_err(|e| ConfigError::Connection(e.to_string()))?;
        }

        let mut builder = lancedb::connect(&config.endpoint);
        if config.is_cloud() {
            // validate() guarantees the key is present for db:// endpoints
            if let Some(key) = &config.api_key {
                builder = builder.api_key(key.expose_secret());
            }
        }

        let db = builder
            .execute()
            .await
            .map_err(|e| ConfigError::Connection(e.to_string()))?;

        tracing::info!(endpoint = %config.endpoint, "connected to vector store");
        Ok(Self { db })
    }

    /// Default local data directory: `~/.embedstore/data`.
    pub fn default_data_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".embedstore")
            .join("data")
    }

    /// The underlying LanceDB connection.
    pub fn connection(&self) -> &lancedb::Connection {
        &self.db
    }
}

/// Convert records into one Arrow RecordBatch.
///
/// All vectors in a batch must share one length; a mismatch is rejected
/// before the store is touched.
fn build_record_batch(
    collection: &str,
    records: &[EmbeddingRecord],
) -> Result<RecordBatch, WriteError> {
    let dimension = records[0].vector.len();
    for record in records {
        if record.vector.len() != dimension {
            return Err(WriteError::DimensionMismatch {
                expected: dimension,
                actual: record.vector.len(),
            });
        }
    }

    let texts = StringArray::from(records.iter().map(|r| r.text.clone()).collect::<Vec<_>>());
    let ids = StringArray::from(records.iter().map(|r| r.id.clone()).collect::<Vec<_>>());

    let mut values = Vec::with_capacity(records.len() * dimension);
    for record in records {
        values.extend_from_slice(&record.vector);
    }
    let field = Arc::new(Field::new("item", DataType::Float32, true));
    let vectors = FixedSizeListArray::new(
        field,
        dimension as i32,
        Arc::new(Float32Array::from(values)),
        None,
    );

    let schema = Arc::new(collection_schema(dimension as i32));
    RecordBatch::try_new(
        schema,
        vec![Arc::new(texts), Arc::new(ids), Arc::new(vectors)],
    )
    .map_err(|e| WriteError::Insert {
        collection: collection.to_string(),
        message: format!("failed to build record batch: {e}"),
    })
}

impl VectorStore for LanceVectorStore {
    async fn collection_exists(&self, name: &str) -> Result<bool, SchemaError> {
        match self.db.open_table(name).execute().await {
            Ok(_) => Ok(true),
            Err(lancedb::Error::TableNotFound { .. }) => Ok(false),
            Err(e) => Err(SchemaError::Lookup {
                name: name.to_string(),
                message: e.to_string(),
            }),
        }
    }

    async fn create_collection(&self, name: &str, dimension: usize) -> Result<(), SchemaError> {
        let schema = Arc::new(collection_schema(dimension as i32));
        self.db
            .create_empty_table(name, schema)
            .execute()
            .await
            .map_err(|e| SchemaError::Create {
                name: name.to_string(),
                message: e.to_string(),
            })?;
        Ok(())
    }

    async fn insert(&self, collection: &str, record: &EmbeddingRecord) -> Result<(), WriteError> {
        self.insert_many(collection, std::slice::from_ref(record))
            .await
    }

    async fn insert_many(
        &self,
        collection: &str,
        records: &[EmbeddingRecord],
    ) -> Result<(), WriteError> {
        if records.is_empty() {
            return Ok(());
        }

        let batch = build_record_batch(collection, records)?;
        let schema = batch.schema();

        let table = self
            .db
            .open_table(collection)
            .execute()
            .await
            .map_err(|e| WriteError::Insert {
                collection: collection.to_string(),
                message: e.to_string(),
            })?;

        let reader = RecordBatchIterator::new(vec![Ok(batch)], schema);
        table
            .add(reader)
            .execute()
            .await
            .map_err(|e| WriteError::Insert {
                collection: collection.to_string(),
                message: e.to_string(),
            })?;

        Ok(())
    }

    async fn close(self) {
        // Dropping the connection releases it; consuming self makes a
        // second close unrepresentable.
        tracing::debug!("closing lancedb connection");
    }
}
