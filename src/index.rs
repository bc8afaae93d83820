//! Vector index gateway trait.

use async_trait::async_trait;

use crate::document::{Document, Retrieved};
use crate::error::Result;

/// A storage and lookup layer over caller-supplied embedding vectors.
///
/// The gateway never computes embeddings; callers attach them to
/// [`Document`]s before upserting. Collections are created lazily: both
/// [`upsert`](VectorIndex::upsert) and [`query`](VectorIndex::query) treat
/// an absent collection as an empty one rather than an error.
///
/// There is deliberately no delete operation: removing a source record does
/// not remove its index row, so a long-lived index can accumulate orphaned
/// documents until the next full reindex of a fresh store.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Get-or-create a named collection. Idempotent; never fails merely
    /// because the collection already exists.
    async fn ensure_collection(&self, name: &str) -> Result<()>;

    /// Insert-or-replace documents keyed by id.
    ///
    /// Documents must have embeddings attached. A no-op on an empty slice —
    /// callers may pass zero documents after filtering.
    async fn upsert(&self, collection: &str, documents: &[Document]) -> Result<()>;

    /// Return up to `n` nearest neighbors to `embedding`, ordered by
    /// non-decreasing distance. An empty or absent collection yields an
    /// empty vec, not an error.
    async fn query(
        &self,
        collection: &str,
        embedding: &[f32],
        n: usize,
    ) -> Result<Vec<Retrieved>>;
}
