//! Vector store trait.
//!
//! Defines the interface the external vector store must provide: collection
//! lifecycle, single and batch inserts, and connection release.
//! Implementations (e.g., LanceDB) live in embedstore-infra.

use embedstore_types::error::{SchemaError, WriteError};
use embedstore_types::record::EmbeddingRecord;

/// Trait for a vector store that persists embedding records.
///
/// Uses RPITIT (native async fn in traits, Rust 2024 edition).
/// Implementations live in embedstore-infra.
pub trait VectorStore: Send + Sync {
    /// Check whether the named collection exists.
    fn collection_exists(
        &self,
        name: &str,
    ) -> impl std::future::Future<Output = Result<bool, SchemaError>> + Send;

    /// Create the named collection with `text` and `text_id` properties and
    /// a vector column of the given dimension. Vectors are always supplied
    /// externally; the store never computes them.
    fn create_collection(
        &self,
        name: &str,
        dimension: usize,
    ) -> impl std::future::Future<Output = Result<(), SchemaError>> + Send;

    /// Insert a single record into the collection.
    fn insert(
        &self,
        collection: &str,
        record: &EmbeddingRecord,
    ) -> impl std::future::Future<Output = Result<(), WriteError>> + Send;

    /// Insert all records in one batch call. Either the whole set is
    /// accepted or a single failure is reported for the whole set; any
    /// partial-failure detail from the backend is surfaced unmodified.
    fn insert_many(
        &self,
        collection: &str,
        records: &[EmbeddingRecord],
    ) -> impl std::future::Future<Output = Result<(), WriteError>> + Send;

    /// Release all resources held by the connection.
    ///
    /// Consumes the handle, so release happens exactly once per connection.
    fn close(self) -> impl std::future::Future<Output = ()> + Send;
}
