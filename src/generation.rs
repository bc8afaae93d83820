//! Generation backend trait for producing completions from prompts.

use async_trait::async_trait;

use crate::error::Result;

/// Per-call options for a generation request.
///
/// `None` fields fall back to the client's configured defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerateOptions {
    /// Override the default generation model.
    pub model: Option<String>,
    /// Sampling temperature; clients default to 0.2 when unset.
    pub temperature: Option<f32>,
}

/// A backend that turns a prompt into a single completion string.
///
/// Implementations wrap a specific model-serving endpoint behind a unified
/// async interface. No retries are performed: a timeout or transport
/// failure surfaces as an error.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Generate a completion for the given prompt.
    async fn generate(&self, prompt: &str, opts: GenerateOptions) -> Result<String>;
}
