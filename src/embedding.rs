//! Embedding backend trait for generating vector embeddings from text.

use async_trait::async_trait;

use crate::error::Result;

/// A backend that produces a fixed-length embedding vector for a text.
///
/// The pipeline calls [`embed`](Embedder::embed) once per document and once
/// per query; no batching is assumed of the backend. An empty result is an
/// error ([`AssistantError::EmptyEmbedding`](crate::AssistantError::EmptyEmbedding)),
/// never a silent zero-length vector.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Generate an embedding vector for a single text input.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;
}
