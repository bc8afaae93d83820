//! Configuration for the assistant and its backends.
//!
//! Everything the process needs — endpoint, model names, index location —
//! lives in one [`AssistantConfig`] resolved once at startup and passed
//! into the clients and services that need it. Nothing in this crate reads
//! the environment after construction.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{AssistantError, Result};

/// Default Ollama base URL.
const DEFAULT_HOST: &str = "http://localhost:11434";

/// Default chat/generation model.
const DEFAULT_CHAT_MODEL: &str = "llama3";

/// Default embedding model.
const DEFAULT_EMBED_MODEL: &str = "nomic-embed-text";

/// Default directory for the persistent vector index.
const DEFAULT_INDEX_DIR: &str = ".assistant-index";

/// Default collection name within the index.
const DEFAULT_COLLECTION: &str = "campus_content";

/// Configuration parameters for the assistant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssistantConfig {
    /// Base URL of the Ollama server handling generation and embeddings.
    pub ollama_host: String,
    /// Default model id for generation requests.
    pub chat_model: String,
    /// Default model id for embedding requests.
    pub embed_model: String,
    /// Filesystem directory holding the persistent vector index.
    pub index_dir: PathBuf,
    /// Logical collection name within the index.
    pub collection: String,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            ollama_host: DEFAULT_HOST.to_string(),
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            embed_model: DEFAULT_EMBED_MODEL.to_string(),
            index_dir: PathBuf::from(DEFAULT_INDEX_DIR),
            collection: DEFAULT_COLLECTION.to_string(),
        }
    }
}

impl AssistantConfig {
    /// Create a new builder for constructing an [`AssistantConfig`].
    pub fn builder() -> AssistantConfigBuilder {
        AssistantConfigBuilder::default()
    }

    /// Build a configuration from the process environment.
    ///
    /// Recognized variables: `OLLAMA_HOST`, `OLLAMA_CHAT_MODEL`,
    /// `OLLAMA_EMBED_MODEL`, `INDEX_DIR`, `INDEX_COLLECTION`. Unset
    /// variables fall back to the defaults.
    pub fn from_env() -> Result<Self> {
        let mut builder = Self::builder();
        if let Ok(host) = std::env::var("OLLAMA_HOST") {
            builder = builder.ollama_host(host);
        }
        if let Ok(model) = std::env::var("OLLAMA_CHAT_MODEL") {
            builder = builder.chat_model(model);
        }
        if let Ok(model) = std::env::var("OLLAMA_EMBED_MODEL") {
            builder = builder.embed_model(model);
        }
        if let Ok(dir) = std::env::var("INDEX_DIR") {
            builder = builder.index_dir(dir);
        }
        if let Ok(name) = std::env::var("INDEX_COLLECTION") {
            builder = builder.collection(name);
        }
        builder.build()
    }
}

/// Builder for constructing a validated [`AssistantConfig`].
#[derive(Debug, Clone, Default)]
pub struct AssistantConfigBuilder {
    config: AssistantConfig,
}

impl AssistantConfigBuilder {
    /// Set the Ollama base URL.
    pub fn ollama_host(mut self, host: impl Into<String>) -> Self {
        self.config.ollama_host = host.into();
        self
    }

    /// Set the default generation model.
    pub fn chat_model(mut self, model: impl Into<String>) -> Self {
        self.config.chat_model = model.into();
        self
    }

    /// Set the default embedding model.
    pub fn embed_model(mut self, model: impl Into<String>) -> Self {
        self.config.embed_model = model.into();
        self
    }

    /// Set the directory for the persistent vector index.
    pub fn index_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.index_dir = dir.into();
        self
    }

    /// Set the index collection name.
    pub fn collection(mut self, name: impl Into<String>) -> Self {
        self.config.collection = name.into();
        self
    }

    /// Build the [`AssistantConfig`], validating that parameters are usable.
    ///
    /// # Errors
    ///
    /// Returns [`AssistantError::Validation`] if the host, either model
    /// name, or the collection name is empty, or if the host has a trailing
    /// slash that would break endpoint composition.
    pub fn build(self) -> Result<AssistantConfig> {
        let config = self.config;
        if config.ollama_host.trim().is_empty() {
            return Err(AssistantError::Validation("ollama_host must not be empty".to_string()));
        }
        if config.ollama_host.ends_with('/') {
            return Err(AssistantError::Validation(
                "ollama_host must not end with a slash".to_string(),
            ));
        }
        if config.chat_model.trim().is_empty() {
            return Err(AssistantError::Validation("chat_model must not be empty".to_string()));
        }
        if config.embed_model.trim().is_empty() {
            return Err(AssistantError::Validation("embed_model must not be empty".to_string()));
        }
        if config.collection.trim().is_empty() {
            return Err(AssistantError::Validation("collection must not be empty".to_string()));
        }
        Ok(config)
    }
}
