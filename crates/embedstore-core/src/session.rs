//! One embedding-store session: schema ensure, writes, and connection release.
//!
//! A [`Session`] owns the embedder and the store connection for its lifetime.
//! Opening a session guarantees the target collection exists before any
//! write; closing it releases the store connection exactly once. The
//! [`with_session`] helper scopes acquisition so release runs on every exit
//! path, success or failure.

use futures_util::future::BoxFuture;

use embedstore_types::error::{ClientError, ModelError, SchemaError, WriteError};
use embedstore_types::record::EmbeddingRecord;

use crate::embedder::Embedder;
use crate::store::VectorStore;

/// A single logical session against the embedding store.
///
/// Operations execute sequentially; each model or store call is one awaited
/// unit of work. The session is not shared across concurrent callers --
/// open independent sessions instead.
pub struct Session<E: Embedder, S: VectorStore> {
    embedder: E,
    store: S,
    collection: String,
}

impl<E: Embedder, S: VectorStore> Session<E, S> {
    /// Open a session: take ownership of the connection and ensure the
    /// target collection exists.
    ///
    /// If the schema check or creation fails, the store connection is
    /// released before the error propagates.
    pub async fn open(
        embedder: E,
        store: S,
        collection: impl Into<String>,
    ) -> Result<Self, ClientError> {
        let session = Self {
            embedder,
            store,
            collection: collection.into(),
        };

        if let Err(err) = session.ensure_schema().await {
            session.close().await;
            return Err(err.into());
        }

        Ok(session)
    }

    /// Ensure the collection exists, creating it if absent. Idempotent.
    ///
    /// The collection is created with the embedder's vector dimensionality,
    /// so every record written through this session satisfies the
    /// fixed-length invariant.
    pub async fn ensure_schema(&self) -> Result<(), SchemaError> {
        if self.store.collection_exists(&self.collection).await? {
            tracing::debug!(collection = %self.collection, "collection already exists");
        } else {
            let dimension = self.embedder.dimension();
            self.store
                .create_collection(&self.collection, dimension)
                .await?;
            tracing::info!(collection = %self.collection, dimension, "created collection");
        }
        Ok(())
    }

    /// Embed a single text.
    pub async fn embed(&self, text: &str) -> Result<Vec<f32>, ModelError> {
        let texts = [text.to_string()];
        let mut vectors = self.embedder.embed(&texts).await?;
        vectors
            .pop()
            .ok_or_else(|| ModelError::Inference("model returned no vector".to_string()))
    }

    /// Embed a sequence of texts, preserving order and length.
    pub async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, ModelError> {
        let vectors = self.embedder.embed(texts).await?;
        if vectors.len() != texts.len() {
            return Err(ModelError::Inference(format!(
                "model returned {} vectors for {} texts",
                vectors.len(),
                texts.len()
            )));
        }
        Ok(vectors)
    }

    /// Store one (text, vector) pair, returning the identifier used.
    ///
    /// When `id` is absent a random UUID v4 is generated. The supplied
    /// vector is associated with the record directly; the store never
    /// re-embeds.
    pub async fn store_one(
        &self,
        text: &str,
        vector: Vec<f32>,
        id: Option<String>,
    ) -> Result<String, WriteError> {
        let record = EmbeddingRecord::new(text, vector, id);
        self.store.insert(&self.collection, &record).await?;
        tracing::debug!(id = %record.id, collection = %self.collection, "stored record");
        Ok(record.id)
    }

    /// Embed and store a batch of texts in one insert, returning the
    /// generated identifiers in input order.
    ///
    /// Identifiers are always generated in batch mode. An empty input
    /// returns an empty vec without touching the store.
    pub async fn store_batch(&self, texts: &[String]) -> Result<Vec<String>, ClientError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let vectors = self.embed_batch(texts).await?;
        let records: Vec<EmbeddingRecord> = texts
            .iter()
            .zip(vectors)
            .map(|(text, vector)| EmbeddingRecord::new(text.clone(), vector, None))
            .collect();
        let ids: Vec<String> = records.iter().map(|r| r.id.clone()).collect();

        self.store.insert_many(&self.collection, &records).await?;
        tracing::info!(count = texts.len(), collection = %self.collection, "stored batch");
        Ok(ids)
    }

    /// The collection this session writes to.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Release the store connection. Consuming `self` makes a second close
    /// unrepresentable.
    pub async fn close(self) {
        self.store.close().await;
        tracing::debug!("store connection released");
    }
}

/// Run `f` inside a scoped session: open, execute, and close on every exit
/// path (normal completion or failure).
pub async fn with_session<E, S, T, F>(
    embedder: E,
    store: S,
    collection: &str,
    f: F,
) -> Result<T, ClientError>
where
    E: Embedder,
    S: VectorStore,
    F: for<'a> FnOnce(&'a Session<E, S>) -> BoxFuture<'a, Result<T, ClientError>>,
{
    let session = Session::open(embedder, store, collection).await?;
    let result = f(&session).await;
    session.close().await;
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};

    use futures_util::FutureExt;
    use uuid::Uuid;

    const MOCK_DIMENSION: usize = 4;

    /// Deterministic stand-in for a real embedding model.
    fn mock_vector(text: &str) -> Vec<f32> {
        let byte_sum: u32 = text.bytes().map(u32::from).sum();
        vec![text.len() as f32, byte_sum as f32, 7.0, 1.0]
    }

    struct MockEmbedder;

    impl Embedder for MockEmbedder {
        async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, ModelError> {
            Ok(texts.iter().map(|t| mock_vector(t)).collect())
        }

        fn model_name(&self) -> &str {
            "mock"
        }

        fn dimension(&self) -> usize {
            MOCK_DIMENSION
        }
    }

    #[derive(Default)]
    struct StoreState {
        collections: HashMap<String, (usize, Vec<EmbeddingRecord>)>,
        exists_calls: usize,
        create_calls: usize,
        insert_calls: usize,
        insert_many_calls: usize,
        closed: bool,
    }

    /// In-memory store; the test keeps a clone to inspect state after close.
    #[derive(Clone, Default)]
    struct MemoryStore {
        state: Arc<Mutex<StoreState>>,
    }

    impl MemoryStore {
        fn records(&self, collection: &str) -> Vec<EmbeddingRecord> {
            self.state.lock().unwrap().collections[collection].1.clone()
        }
    }

    impl VectorStore for MemoryStore {
        async fn collection_exists(&self, name: &str) -> Result<bool, SchemaError> {
            let mut state = self.state.lock().unwrap();
            state.exists_calls += 1;
            Ok(state.collections.contains_key(name))
        }

        async fn create_collection(
            &self,
            name: &str,
            dimension: usize,
        ) -> Result<(), SchemaError> {
            let mut state = self.state.lock().unwrap();
            state.create_calls += 1;
            state
                .collections
                .insert(name.to_string(), (dimension, Vec::new()));
            Ok(())
        }

        async fn insert(
            &self,
            collection: &str,
            record: &EmbeddingRecord,
        ) -> Result<(), WriteError> {
            let mut state = self.state.lock().unwrap();
            state.insert_calls += 1;
            state
                .collections
                .get_mut(collection)
                .expect("collection should exist before insert")
                .1
                .push(record.clone());
            Ok(())
        }

        async fn insert_many(
            &self,
            collection: &str,
            records: &[EmbeddingRecord],
        ) -> Result<(), WriteError> {
            let mut state = self.state.lock().unwrap();
            state.insert_many_calls += 1;
            state
                .collections
                .get_mut(collection)
                .expect("collection should exist before insert")
                .1
                .extend_from_slice(records);
            Ok(())
        }

        async fn close(self) {
            self.state.lock().unwrap().closed = true;
        }
    }

    /// Store whose exists-check always fails, for the open error path.
    struct UnreachableStore {
        closed: Arc<AtomicBool>,
    }

    impl VectorStore for UnreachableStore {
        async fn collection_exists(&self, name: &str) -> Result<bool, SchemaError> {
            Err(SchemaError::Lookup {
                name: name.to_string(),
                message: "store unreachable".to_string(),
            })
        }

        async fn create_collection(&self, _name: &str, _dim: usize) -> Result<(), SchemaError> {
            unreachable!("create should never be attempted when the exists-check fails")
        }

        async fn insert(&self, _c: &str, _r: &EmbeddingRecord) -> Result<(), WriteError> {
            unreachable!("no write should be attempted when open fails")
        }

        async fn insert_many(&self, _c: &str, _r: &[EmbeddingRecord]) -> Result<(), WriteError> {
            unreachable!("no write should be attempted when open fails")
        }

        async fn close(self) {
            self.closed.store(true, Ordering::SeqCst);
        }
    }

    #[tokio::test]
    async fn open_creates_collection_once() {
        let store = MemoryStore::default();
        let session = Session::open(MockEmbedder, store.clone(), "texts")
            .await
            .expect("open should succeed");

        // Second ensure is a no-op check
        session.ensure_schema().await.expect("ensure should succeed");

        let state = store.state.lock().unwrap();
        assert_eq!(state.create_calls, 1);
        assert_eq!(state.exists_calls, 2);
        assert_eq!(state.collections["texts"].0, MOCK_DIMENSION);
    }

    #[tokio::test]
    async fn embed_batch_matches_single_embeds() {
        let store = MemoryStore::default();
        let session = Session::open(MockEmbedder, store, "texts").await.unwrap();

        let texts = vec!["a".to_string(), "bb".to_string(), "ccc".to_string()];
        let batch = session.embed_batch(&texts).await.unwrap();
        assert_eq!(batch.len(), texts.len());

        for (text, vector) in texts.iter().zip(&batch) {
            assert_eq!(vector.len(), MOCK_DIMENSION);
            assert_eq!(*vector, session.embed(text).await.unwrap());
        }
    }

    #[tokio::test]
    async fn store_one_generates_fresh_ids() {
        let store = MemoryStore::default();
        let session = Session::open(MockEmbedder, store.clone(), "texts")
            .await
            .unwrap();

        let vector = session.embed("hello").await.unwrap();
        let id = session
            .store_one("hello", vector.clone(), None)
            .await
            .unwrap();
        assert!(Uuid::parse_str(&id).is_ok());

        let records = store.records("texts");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, id);
        assert_eq!(records[0].text, "hello");
        assert_eq!(records[0].vector, vector);

        // A second store yields a different id
        let vector = session.embed("hello").await.unwrap();
        let second = session.store_one("hello", vector, None).await.unwrap();
        assert_ne!(id, second);
    }

    #[tokio::test]
    async fn store_one_honors_caller_id() {
        let store = MemoryStore::default();
        let session = Session::open(MockEmbedder, store.clone(), "texts")
            .await
            .unwrap();

        let vector = session.embed("hello").await.unwrap();
        let id = session
            .store_one("hello", vector, Some("doc-42".to_string()))
            .await
            .unwrap();
        assert_eq!(id, "doc-42");
        assert_eq!(store.records("texts")[0].id, "doc-42");
    }

    #[tokio::test]
    async fn store_batch_preserves_order_in_one_call() {
        let store = MemoryStore::default();
        let session = Session::open(MockEmbedder, store.clone(), "texts")
            .await
            .unwrap();

        let texts = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let ids = session.store_batch(&texts).await.unwrap();
        assert_eq!(ids.len(), 3);

        // All distinct
        assert_ne!(ids[0], ids[1]);
        assert_ne!(ids[1], ids[2]);
        assert_ne!(ids[0], ids[2]);

        let records = store.records("texts");
        assert_eq!(records[1].text, "b");
        assert_eq!(records[1].id, ids[1]);
        assert_eq!(records[1].vector, mock_vector("b"));

        let state = store.state.lock().unwrap();
        assert_eq!(state.insert_many_calls, 1);
        assert_eq!(state.insert_calls, 0);
    }

    #[tokio::test]
    async fn store_batch_empty_issues_no_insert() {
        let store = MemoryStore::default();
        let session = Session::open(MockEmbedder, store.clone(), "texts")
            .await
            .unwrap();

        let ids = session.store_batch(&[]).await.unwrap();
        assert!(ids.is_empty());

        let state = store.state.lock().unwrap();
        assert_eq!(state.insert_many_calls, 0);
        assert_eq!(state.insert_calls, 0);
    }

    #[tokio::test]
    async fn open_failure_releases_connection() {
        let closed = Arc::new(AtomicBool::new(false));
        let store = UnreachableStore {
            closed: Arc::clone(&closed),
        };

        let result = Session::open(MockEmbedder, store, "texts").await;
        assert!(matches!(result, Err(ClientError::Schema(_))));
        assert!(closed.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn with_session_closes_on_success() {
        let store = MemoryStore::default();
        let ids = with_session(MockEmbedder, store.clone(), "texts", |session| {
            async move { session.store_batch(&["x".to_string()]).await }.boxed()
        })
        .await
        .unwrap();

        assert_eq!(ids.len(), 1);
        assert!(store.state.lock().unwrap().closed);
    }

    #[tokio::test]
    async fn with_session_closes_on_failure() {
        let store = MemoryStore::default();
        let result: Result<(), ClientError> =
            with_session(MockEmbedder, store.clone(), "texts", |_session| {
                async move { Err(ModelError::Inference("boom".to_string()).into()) }.boxed()
            })
            .await;

        assert!(matches!(result, Err(ClientError::Model(_))));
        assert!(store.state.lock().unwrap().closed);
    }
}
