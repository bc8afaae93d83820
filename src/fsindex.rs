//! Filesystem-backed vector index using cosine distance.
//!
//! This module provides [`FsVectorIndex`], a persistent [`VectorIndex`]
//! that keeps each collection as one JSON file under a configured
//! directory. Collections are loaded lazily on first touch and held in a
//! `HashMap` protected by a `tokio::sync::RwLock`; every upsert rewrites
//! the collection file atomically (temp file + rename). The index outlives
//! individual process runs.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::document::{Document, Retrieved};
use crate::error::{AssistantError, Result};
use crate::index::VectorIndex;

/// A persistent [`VectorIndex`] over a filesystem directory.
///
/// Nearest-neighbor search is exact: cosine distance against every stored
/// row, nearest first. Suitable for the collection sizes a campus content
/// store produces; swap in a dedicated engine behind the same trait when
/// that stops being true.
#[derive(Debug)]
pub struct FsVectorIndex {
    dir: PathBuf,
    collections: RwLock<HashMap<String, HashMap<String, Document>>>,
}

/// Compute cosine similarity between two vectors.
///
/// Returns 0.0 if either vector has zero magnitude or the lengths differ.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

fn io_err(context: &str, path: &Path, e: std::io::Error) -> AssistantError {
    AssistantError::Index(format!("{context} {}: {e}", path.display()))
}

impl FsVectorIndex {
    /// Create an index rooted at the given directory.
    ///
    /// The directory is created on first write, not here.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into(), collections: RwLock::new(HashMap::new()) }
    }

    fn collection_path(&self, name: &str) -> Result<PathBuf> {
        if name.is_empty() || name.contains(['/', '\\']) {
            return Err(AssistantError::Index(format!("invalid collection name '{name}'")));
        }
        Ok(self.dir.join(format!("{name}.json")))
    }

    /// Load a collection from disk into the given map if not yet resident.
    async fn load_into(
        &self,
        collections: &mut HashMap<String, HashMap<String, Document>>,
        name: &str,
    ) -> Result<()> {
        if collections.contains_key(name) {
            return Ok(());
        }
        let path = self.collection_path(name)?;
        let rows: HashMap<String, Document> = match tokio::fs::read(&path).await {
            Ok(bytes) => {
                let documents: Vec<Document> = serde_json::from_slice(&bytes).map_err(|e| {
                    AssistantError::Index(format!("corrupt collection file {}: {e}", path.display()))
                })?;
                documents.into_iter().map(|d| (d.id.clone(), d)).collect()
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(io_err("failed to read", &path, e)),
        };
        debug!(collection = name, rows = rows.len(), "loaded collection");
        collections.insert(name.to_string(), rows);
        Ok(())
    }

    /// Write a collection's rows to its file via a temp-file rename.
    async fn persist(&self, name: &str, rows: &HashMap<String, Document>) -> Result<()> {
        let path = self.collection_path(name)?;
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| io_err("failed to create index dir", &self.dir, e))?;

        let documents: Vec<&Document> = rows.values().collect();
        let bytes = serde_json::to_vec(&documents)
            .map_err(|e| AssistantError::Index(format!("failed to serialize collection: {e}")))?;

        let tmp = self.dir.join(format!(".{name}.json.tmp"));
        tokio::fs::write(&tmp, &bytes).await.map_err(|e| io_err("failed to write", &tmp, e))?;
        tokio::fs::rename(&tmp, &path).await.map_err(|e| io_err("failed to rename", &tmp, e))?;
        Ok(())
    }
}

#[async_trait]
impl VectorIndex for FsVectorIndex {
    async fn ensure_collection(&self, name: &str) -> Result<()> {
        let mut collections = self.collections.write().await;
        self.load_into(&mut collections, name).await?;
        // Persist so a newly created (still empty) collection survives restart.
        let rows = collections.entry(name.to_string()).or_default();
        self.persist(name, rows).await
    }

    async fn upsert(&self, collection: &str, documents: &[Document]) -> Result<()> {
        if documents.is_empty() {
            return Ok(());
        }
        let mut collections = self.collections.write().await;
        self.load_into(&mut collections, collection).await?;
        let rows = collections.entry(collection.to_string()).or_default();
        for document in documents {
            rows.insert(document.id.clone(), document.clone());
        }
        self.persist(collection, rows).await?;
        debug!(collection, upserted = documents.len(), total = rows.len(), "upserted documents");
        Ok(())
    }

    async fn query(
        &self,
        collection: &str,
        embedding: &[f32],
        n: usize,
    ) -> Result<Vec<Retrieved>> {
        let mut collections = self.collections.write().await;
        self.load_into(&mut collections, collection).await?;
        let rows = collections.entry(collection.to_string()).or_default();

        let mut scored: Vec<Retrieved> = rows
            .values()
            .map(|document| Retrieved {
                id: document.id.clone(),
                text: document.text.clone(),
                metadata: document.metadata.clone(),
                distance: Some(1.0 - cosine_similarity(&document.embedding, embedding)),
            })
            .collect();

        scored.sort_by(|a, b| {
            a.distance.partial_cmp(&b.distance).unwrap_or(std::cmp::Ordering::Equal)
        });
        scored.truncate(n);
        Ok(scored)
    }
}
