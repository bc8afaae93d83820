//! Ollama client implementing both the generation and embedding backends.
//!
//! Talks to a local Ollama server over HTTP: `POST /api/generate` for
//! completions and `POST /api/embeddings` for vectors. Generation requests
//! ask for `stream: false`, but some server versions stream anyway; the
//! response body therefore goes through an explicit three-case parse
//! ([`Completion`]) instead of guessing shapes.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::config::AssistantConfig;
use crate::embedding::Embedder;
use crate::error::{AssistantError, Result};
use crate::generation::{GenerateOptions, Generator};

/// Timeout for a generation request. Generation is the slow path.
const GENERATE_TIMEOUT: Duration = Duration::from_secs(120);

/// Timeout for an embedding request; a smaller unit of work than generation.
const EMBED_TIMEOUT: Duration = Duration::from_secs(60);

/// Temperature applied when the caller does not set one.
const DEFAULT_TEMPERATURE: f32 = 0.2;

/// A [`Generator`] and [`Embedder`] backed by a local Ollama server.
///
/// Endpoint and default model names come from [`AssistantConfig`]; per-call
/// overrides go through [`GenerateOptions`]. Neither path retries: a
/// timeout or refused connection surfaces as
/// [`AssistantError::BackendUnavailable`].
pub struct OllamaClient {
    client: reqwest::Client,
    host: String,
    chat_model: String,
    embed_model: String,
}

impl OllamaClient {
    /// Create a client from the assistant configuration.
    pub fn new(config: &AssistantConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            host: config.ollama_host.clone(),
            chat_model: config.chat_model.clone(),
            embed_model: config.embed_model.clone(),
        }
    }

    /// Map a transport-level failure to the backend-unavailable error.
    ///
    /// Both refused connections and timeouts land here; anything the server
    /// itself answered is handled via its HTTP status instead.
    fn transport_err(&self, e: reqwest::Error) -> AssistantError {
        error!(host = %self.host, error = %e, "ollama request failed");
        AssistantError::BackendUnavailable { endpoint: self.host.clone() }
    }
}

// ── Ollama API request/response types ──────────────────────────────

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    options: GenerateRequestOptions,
    stream: bool,
}

#[derive(Serialize)]
struct GenerateRequestOptions {
    temperature: f32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(Deserialize)]
struct EmbedResponse {
    #[serde(default)]
    embedding: Vec<f32>,
    #[serde(default)]
    embeddings: Vec<f32>,
}

// ── Completion body parsing ────────────────────────────────────────

/// The parsed shape of a 2xx generation response body.
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    /// A single JSON object with a non-empty `response` field.
    Single(String),
    /// Newline-delimited JSON fragments; `response` fields concatenated in order.
    Streamed(String),
    /// Neither structured form yielded content; the body verbatim.
    Raw(String),
}

impl Completion {
    /// Extract the completion text regardless of shape.
    pub fn into_text(self) -> String {
        match self {
            Self::Single(text) | Self::Streamed(text) | Self::Raw(text) => text,
        }
    }
}

/// Parse a generation response body into its [`Completion`] shape.
///
/// Preference order: single JSON object with non-empty `response`, then a
/// newline-delimited JSON stream (unparseable lines are skipped), then the
/// raw body. A 2xx body never becomes silently empty output.
pub fn parse_completion(body: &str) -> Completion {
    if let Ok(single) = serde_json::from_str::<GenerateResponse>(body) {
        if !single.response.is_empty() {
            return Completion::Single(single.response);
        }
    }

    let mut parts = String::new();
    let mut saw_fragment = false;
    for line in body.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Ok(fragment) = serde_json::from_str::<GenerateResponse>(line) {
            parts.push_str(&fragment.response);
            saw_fragment = true;
        }
    }
    if saw_fragment {
        return Completion::Streamed(parts);
    }

    Completion::Raw(body.to_string())
}

// ── Generator / Embedder implementations ───────────────────────────

#[async_trait]
impl Generator for OllamaClient {
    async fn generate(&self, prompt: &str, opts: GenerateOptions) -> Result<String> {
        let model = opts.model.as_deref().unwrap_or(&self.chat_model);
        let temperature = opts.temperature.unwrap_or(DEFAULT_TEMPERATURE);
        debug!(model, prompt_len = prompt.len(), "ollama generate");

        let request = GenerateRequest {
            model,
            prompt,
            options: GenerateRequestOptions { temperature },
            stream: false,
        };

        let response = self
            .client
            .post(format!("{}/api/generate", self.host))
            .timeout(GENERATE_TIMEOUT)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.transport_err(e))?;

        let status = response.status();
        if !status.is_success() {
            error!(%status, "ollama generate returned an error status");
            return Err(AssistantError::Http { status });
        }

        let body = response.text().await.map_err(|e| self.transport_err(e))?;
        Ok(parse_completion(&body).into_text())
    }
}

#[async_trait]
impl Embedder for OllamaClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        debug!(model = %self.embed_model, text_len = text.len(), "ollama embed");

        let request = EmbedRequest { model: &self.embed_model, prompt: text };

        let response = self
            .client
            .post(format!("{}/api/embeddings", self.host))
            .timeout(EMBED_TIMEOUT)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.transport_err(e))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(AssistantError::ModelNotFound { model: self.embed_model.clone() });
        }
        if !status.is_success() {
            error!(%status, "ollama embeddings returned an error status");
            return Err(AssistantError::Http { status });
        }

        let parsed: EmbedResponse = response.json().await.map_err(|e| {
            error!(error = %e, "failed to parse embeddings response");
            AssistantError::EmptyEmbedding
        })?;

        let vector =
            if !parsed.embedding.is_empty() { parsed.embedding } else { parsed.embeddings };
        if vector.is_empty() {
            return Err(AssistantError::EmptyEmbedding);
        }
        Ok(vector)
    }
}
