//! FastEmbed-based local embedding generator.
//!
//! Implements the `Embedder` trait from `embedstore-core` using fastembed's
//! ONNX runtime inference. The default model is AllMiniLML6V2 (384
//! dimensions), a small general-purpose sentence-embedding model.

use std::sync::{Arc, Mutex};

use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};

use embedstore_core::embedder::Embedder;
use embedstore_types::error::{ClientError, ConfigError, ModelError};

/// Map a configured model identifier to a fastembed model.
///
/// Unknown identifiers are a configuration error, reported at startup.
pub fn parse_model(model_id: &str) -> Result<EmbeddingModel, ConfigError> {
    match model_id.to_lowercase().as_str() {
        "all-minilm-l6-v2" | "allminilml6v2" => Ok(EmbeddingModel::AllMiniLML6V2),
        "bge-small-en-v1.5" | "bgesmallenv15" => Ok(EmbeddingModel::BGESmallENV15),
        "multilingual-e5-small" => Ok(EmbeddingModel::MultilingualE5Small),
        other => Err(ConfigError::UnknownModel(other.to_string())),
    }
}

/// Local embedding generator backed by a fastembed ONNX model.
///
/// Inference is blocking, so calls run under `spawn_blocking` -- one awaited
/// unit of work per embed call, no internal overlap.
pub struct FastEmbedder {
    model: Arc<Mutex<TextEmbedding>>,
    model_name: String,
    dimension: usize,
}

impl FastEmbedder {
    /// Load the model named by a configuration identifier.
    pub fn from_model_id(model_id: &str) -> Result<Self, ClientError> {
        let model = parse_model(model_id)?;
        Ok(Self::load(model)?)
    }

    /// Load a fastembed model and discover its output dimensionality.
    ///
    /// The dimension comes from a probe embedding rather than a hardcoded
    /// table, so the fixed-length invariant holds for any supported model.
    pub fn load(model: EmbeddingModel) -> Result<Self, ModelError> {
        let model_name = format!("{model:?}");
        let options = InitOptions::new(model).with_show_download_progress(false);
        let mut text_embedding =
            TextEmbedding::try_new(options).map_err(|e| ModelError::Load(e.to_string()))?;

        let probe = text_embedding
            .embed(vec!["dimension probe"], None)
            .map_err(|e| ModelError::Load(e.to_string()))?;
        let dimension = probe
            .first()
            .map(Vec::len)
            .ok_or_else(|| ModelError::Load("model returned no probe vector".to_string()))?;

        tracing::info!(model = %model_name, dimension, "loaded embedding model");

        Ok(Self {
            model: Arc::new(Mutex::new(text_embedding)),
            model_name,
            dimension,
        })
    }
}

impl Embedder for FastEmbedder {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, ModelError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let model = Arc::clone(&self.model);
        let texts = texts.to_vec();

        tokio::task::spawn_blocking(move || {
            let mut guard = model
                .lock()
                .map_err(|_| ModelError::Inference("embedding model lock poisoned".to_string()))?;
            guard
                .embed(texts, None)
                .map_err(|e| ModelError::Inference(e.to_string()))
        })
        .await
        .map_err(|e| ModelError::Inference(format!("embedding task failed: {e}")))?
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}
