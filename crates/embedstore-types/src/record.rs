//! The persisted embedding record.

use uuid::Uuid;

/// One stored (text, text_id, vector) triple.
///
/// Immutable after construction. The vector length is fixed by the embedding
/// model that produced it and must match the collection's vector dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingRecord {
    /// Unique identifier, caller-supplied or generated (UUID v4).
    pub id: String,

    /// The original text content.
    pub text: String,

    /// The embedding vector supplied by the model adapter. The store never
    /// computes vectors itself.
    pub vector: Vec<f32>,
}

impl EmbeddingRecord {
    /// Build a record, generating a random UUID v4 id when none is supplied.
    pub fn new(text: impl Into<String>, vector: Vec<f32>, id: Option<String>) -> Self {
        Self {
            id: id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            text: text.into(),
            vector,
        }
    }
}
