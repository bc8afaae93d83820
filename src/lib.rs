//! # campus-assist
//!
//! Retrieval-augmented assistant for a campus social platform: keeps a
//! persistent vector index derived from the platform's news posts and
//! project boards, and answers natural-language questions from the indexed
//! content or directly from today's news.
//!
//! The crate is the indexing and query core only. The web front-end,
//! sessions, and the relational content store are external collaborators;
//! the store is consumed through the [`ContentStore`] trait and notifies
//! the pipeline of writes through the [`Indexer`] post-commit hooks.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use campus_assist::{
//!     Assistant, AssistantConfig, FsVectorIndex, Indexer, OllamaClient,
//! };
//!
//! let config = AssistantConfig::from_env()?;
//! let ollama = Arc::new(OllamaClient::new(&config));
//! let index = Arc::new(FsVectorIndex::new(&config.index_dir));
//!
//! let indexer = Indexer::new(ollama.clone(), index.clone(), &config.collection);
//! indexer.reindex_all(content_store.as_ref()).await?;
//!
//! let assistant = Assistant::builder()
//!     .generator(ollama.clone())
//!     .embedder(ollama)
//!     .index(index)
//!     .content(content_store)
//!     .collection(&config.collection)
//!     .build()?;
//! let reply = assistant.chat("What research news came out this week?").await?;
//! ```

pub mod assistant;
pub mod config;
pub mod content;
pub mod document;
pub mod embedding;
pub mod error;
pub mod fsindex;
pub mod generation;
pub mod index;
pub mod ollama;
pub mod pipeline;

pub use assistant::{Assistant, AssistantBuilder, ChatReply, TodayAnswer, TodayDigest};
pub use config::{AssistantConfig, AssistantConfigBuilder};
pub use content::{ContentStore, InMemoryContentStore, NewsCategory, NewsPost, Project};
pub use document::{Document, Retrieved};
pub use embedding::Embedder;
pub use error::{AssistantError, Result};
pub use fsindex::FsVectorIndex;
pub use generation::{GenerateOptions, Generator};
pub use index::VectorIndex;
pub use ollama::{Completion, OllamaClient};
pub use pipeline::Indexer;
