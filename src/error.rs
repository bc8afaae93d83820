//! Error types for the `campus-assist` crate.

use thiserror::Error;

/// Errors that can occur in assistant operations.
#[derive(Debug, Error)]
pub enum AssistantError {
    /// The generation or embedding backend could not be reached.
    ///
    /// Raised on connection failure or timeout. The message names the
    /// configured endpoint so the remedy is actionable from the error alone.
    #[error("cannot connect to Ollama at {endpoint}; is it running? Try `ollama serve`")]
    BackendUnavailable {
        /// The configured backend base URL.
        endpoint: String,
    },

    /// The embedding backend responded 404 for the requested model.
    #[error("embedding model not available (404); ensure Ollama is running and pull it with `ollama pull {model}`")]
    ModelNotFound {
        /// The model that was requested.
        model: String,
    },

    /// The embedding backend succeeded but returned no usable vector.
    #[error("embedding backend did not return an embedding vector")]
    EmptyEmbedding,

    /// The backend returned a non-success HTTP status.
    #[error("backend returned HTTP {status}")]
    Http {
        /// The HTTP status code from the backend.
        status: reqwest::StatusCode,
    },

    /// An error occurred in the vector index backend.
    #[error("vector index error: {0}")]
    Index(String),

    /// Malformed caller input (e.g. a missing question).
    #[error("invalid request: {0}")]
    Validation(String),
}

/// A convenience result type for assistant operations.
pub type Result<T> = std::result::Result<T, AssistantError>;
