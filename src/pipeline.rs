//! Indexing pipeline: render → embed → upsert.
//!
//! The [`Indexer`] is driven from two call sites: the content store's
//! post-commit hooks ([`news_saved`](Indexer::news_saved) /
//! [`project_saved`](Indexer::project_saved)), which index the single
//! changed record best-effort, and the administrative
//! [`reindex_all`](Indexer::reindex_all) bulk job, which fails loudly.
//! Both paths end in an idempotent upsert keyed by stable document id, so
//! re-runs and concurrent invocations for different records are safe.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::content::{ContentStore, NewsPost, Project};
use crate::document::Document;
use crate::embedding::Embedder;
use crate::error::Result;
use crate::index::VectorIndex;

/// Transforms domain records into indexed documents.
pub struct Indexer {
    embedder: Arc<dyn Embedder>,
    index: Arc<dyn VectorIndex>,
    collection: String,
}

impl Indexer {
    /// Create an indexer writing into the given collection.
    pub fn new(
        embedder: Arc<dyn Embedder>,
        index: Arc<dyn VectorIndex>,
        collection: impl Into<String>,
    ) -> Self {
        Self { embedder, index, collection: collection.into() }
    }

    /// Embed and upsert a batch of rendered documents.
    ///
    /// A no-op on empty input: zero embedding calls, zero upserts.
    /// Embeddings are computed one document at a time (no batching contract
    /// is assumed of the backend); the upsert covers the whole batch in one
    /// call.
    ///
    /// # Errors
    ///
    /// Propagates embedding and index failures. Callers on the content
    /// mutation path must catch these (see [`news_saved`](Self::news_saved)).
    pub async fn index_documents(&self, mut documents: Vec<Document>) -> Result<()> {
        if documents.is_empty() {
            return Ok(());
        }
        for document in &mut documents {
            document.embedding = self.embedder.embed(&document.text).await.map_err(|e| {
                error!(document.id = %document.id, error = %e, "embedding failed during indexing");
                e
            })?;
        }
        self.index.upsert(&self.collection, &documents).await?;
        info!(collection = %self.collection, count = documents.len(), "indexed documents");
        Ok(())
    }

    /// Re-derive and index documents for every news post and project.
    ///
    /// Returns the number of documents indexed. Holds no lock across the
    /// run; safe to execute concurrently with live traffic because the
    /// write is an upsert keyed by stable id. Failures propagate — this is
    /// an explicit administrative action, and a re-run after fixing the
    /// backend re-covers failed and succeeded records alike.
    pub async fn reindex_all(&self, content: &dyn ContentStore) -> Result<usize> {
        let mut documents = Vec::new();
        for post in content.all_news().await? {
            documents.push(Document::from_news(&post));
        }
        for project in content.all_projects().await? {
            documents.push(Document::from_project(&project));
        }
        let count = documents.len();
        info!(count, "full reindex collected documents");
        self.index_documents(documents).await?;
        Ok(count)
    }

    /// Post-commit hook: index a single saved news post, best-effort.
    ///
    /// Every failure is caught and logged here; the content mutation that
    /// triggered the hook is never blocked or rolled back by an indexing
    /// failure. The index catches up on the next save or full reindex.
    pub async fn news_saved(&self, post: &NewsPost) {
        if let Err(e) = self.index_documents(vec![Document::from_news(post)]).await {
            warn!(news.id = post.id, error = %e, "failed to index news post");
        }
    }

    /// Post-commit hook: index a single saved project, best-effort.
    ///
    /// Same failure policy as [`news_saved`](Self::news_saved).
    pub async fn project_saved(&self, project: &Project) {
        if let Err(e) = self.index_documents(vec![Document::from_project(project)]).await {
            warn!(project.id = project.id, error = %e, "failed to index project");
        }
    }
}
