//! Embedder trait for text-to-vector conversion.
//!
//! Defines the interface for embedding text into vectors. Implementations
//! (e.g., fastembed local models) live in embedstore-infra.

use embedstore_types::error::ModelError;

/// Trait for converting text into embedding vectors.
///
/// Uses RPITIT (native async fn in traits, Rust 2024 edition).
/// Implementations live in embedstore-infra.
pub trait Embedder: Send + Sync {
    /// Embed one or more texts into vectors.
    ///
    /// Returns one vector per input text, in input order. A one-element
    /// slice is the single-text form; implementations may batch internally
    /// but must produce vectors equivalent to repeated single calls.
    fn embed(
        &self,
        texts: &[String],
    ) -> impl std::future::Future<Output = Result<Vec<Vec<f32>>, ModelError>> + Send;

    /// The model identifier used for embeddings (e.g., "all-minilm-l6-v2").
    fn model_name(&self) -> &str;

    /// The dimensionality of the output vectors, fixed per model.
    fn dimension(&self) -> usize;
}
