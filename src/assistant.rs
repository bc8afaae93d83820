//! Retrieval-augmented query service.
//!
//! Three request shapes share one context-assembly and prompt discipline:
//! open-domain chat retrieves from the vector index, while the two
//! "today's news" modes bypass retrieval entirely — "today" is an exact,
//! cheaply-enumerable predicate on the content store, and approximate
//! nearest-neighbor lookup would only lose items from a candidate set that
//! is already small and exactly known.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::content::{ContentStore, NewsPost};
use crate::embedding::Embedder;
use crate::error::{AssistantError, Result};
use crate::generation::{GenerateOptions, Generator};
use crate::index::VectorIndex;

/// Default number of retrieval results used for chat context.
const DEFAULT_TOP_K: usize = 6;

/// Placeholder context when retrieval returns nothing.
const NO_CONTEXT: &str = "No context found.";

/// Fixed reply when no news exists for the scoped date.
const NO_NEWS_TODAY: &str = "No news published today.";

/// Answer to an open-domain chat question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    /// The generated answer.
    pub answer: String,
    /// How many context blocks backed the answer.
    pub used_context: usize,
}

/// Summary of the current day's news.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodayDigest {
    /// The generated summary, or the fixed no-news message.
    pub summary: String,
    /// How many posts fell inside the day scope.
    pub count: usize,
}

/// Answer to a question scoped to the current day's news.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodayAnswer {
    /// The generated answer, or the fixed no-news message.
    pub answer: String,
    /// How many posts fell inside the day scope.
    pub count: usize,
}

/// The campus assistant query service.
///
/// Construct one via [`Assistant::builder()`]. Backend failures propagate
/// uncaught on every query path — an answer is never fabricated without a
/// backend — while "no content for scope" is a defined response, not an
/// error.
pub struct Assistant {
    generator: Arc<dyn Generator>,
    embedder: Arc<dyn Embedder>,
    index: Arc<dyn VectorIndex>,
    content: Arc<dyn ContentStore>,
    collection: String,
    top_k: usize,
}

impl Assistant {
    /// Create a new [`AssistantBuilder`].
    pub fn builder() -> AssistantBuilder {
        AssistantBuilder::default()
    }

    /// Answer a free-text question from the retrieval index.
    ///
    /// Embeds the question, retrieves the `top_k` nearest documents, builds
    /// a labeled context block per result, and asks the generation backend
    /// to answer only from that context, attributing News vs. Project when
    /// relevant.
    ///
    /// # Errors
    ///
    /// Returns [`AssistantError::Validation`] for an empty question;
    /// backend and index failures propagate.
    pub async fn chat(&self, question: &str) -> Result<ChatReply> {
        let question = question.trim();
        if question.is_empty() {
            return Err(AssistantError::Validation("missing question".to_string()));
        }

        let query_embedding = self.embedder.embed(question).await?;
        let retrieved =
            self.index.query(&self.collection, &query_embedding, self.top_k).await?;

        let blocks: Vec<String> = retrieved
            .iter()
            .map(|r| {
                let label = match r.metadata.get("type").map(String::as_str) {
                    Some("news") => "News",
                    _ => "Project",
                };
                let title = r.metadata.get("title").map(String::as_str).unwrap_or("");
                format!("[{label}] {title}\n{}", r.text)
            })
            .collect();
        let used_context = blocks.len();
        let context =
            if blocks.is_empty() { NO_CONTEXT.to_string() } else { blocks.join("\n\n") };

        let prompt = format!(
            "You are a helpful university assistant. Use the provided context to answer the user's question accurately.\n\
             Context:\n{context}\n\n\
             Question: {question}\n\
             Answer concisely and cite whether info came from News or Projects when relevant."
        );

        let answer = self.generator.generate(&prompt, GenerateOptions::default()).await?;
        info!(used_context, "chat answered");
        Ok(ChatReply { answer, used_context })
    }

    /// Summarize the news posted on the current local date.
    pub async fn news_summary_today(&self) -> Result<TodayDigest> {
        self.news_summary_on(Local::now().date_naive()).await
    }

    /// Summarize the news posted on an explicit local date.
    ///
    /// With zero posts in scope this returns the fixed no-news message and
    /// issues no generation call.
    pub async fn news_summary_on(&self, date: NaiveDate) -> Result<TodayDigest> {
        let posts = self.content.news_on(date).await?;
        if posts.is_empty() {
            return Ok(TodayDigest { summary: NO_NEWS_TODAY.to_string(), count: 0 });
        }

        let joined = render_items(&posts);
        let prompt = format!(
            "Summarize today's university news into 4-6 bullet points that capture key updates.\n\
             Today's items:\n{joined}\n\
             Provide a student-friendly, factual summary."
        );

        let summary = self.generator.generate(&prompt, GenerateOptions::default()).await?;
        info!(count = posts.len(), "summarized today's news");
        Ok(TodayDigest { summary, count: posts.len() })
    }

    /// Answer a question from the news posted on the current local date.
    pub async fn news_qa_today(&self, question: &str) -> Result<TodayAnswer> {
        self.news_qa_on(Local::now().date_naive(), question).await
    }

    /// Answer a question from the news posted on an explicit local date.
    ///
    /// The prompt restricts the backend to the provided items only, and
    /// asks that a count question be answered number-first. With zero posts
    /// in scope this returns the fixed no-news message with count 0 and
    /// issues no generation call.
    pub async fn news_qa_on(&self, date: NaiveDate, question: &str) -> Result<TodayAnswer> {
        let question = question.trim();
        if question.is_empty() {
            return Err(AssistantError::Validation("missing question".to_string()));
        }

        let posts = self.content.news_on(date).await?;
        if posts.is_empty() {
            return Ok(TodayAnswer { answer: NO_NEWS_TODAY.to_string(), count: 0 });
        }

        let joined = render_items(&posts);
        let prompt = format!(
            "You are a helpful university assistant. Using ONLY the provided items from today's news, answer the user's question precisely.\n\
             If the user asks for a count, respond with the number first, followed by a short explanation.\n\
             Today's items:\n{joined}\n\n\
             Question: {question}\n\
             Answer:"
        );

        let answer = self.generator.generate(&prompt, GenerateOptions::default()).await?;
        info!(count = posts.len(), "answered from today's news");
        Ok(TodayAnswer { answer, count: posts.len() })
    }
}

/// Render scoped posts as `- {title}: {content}` items joined by blank lines.
fn render_items(posts: &[NewsPost]) -> String {
    posts
        .iter()
        .map(|p| format!("- {}: {}", p.title, p.content))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Builder for constructing an [`Assistant`].
///
/// All backends are required; `top_k` defaults to 6.
#[derive(Default)]
pub struct AssistantBuilder {
    generator: Option<Arc<dyn Generator>>,
    embedder: Option<Arc<dyn Embedder>>,
    index: Option<Arc<dyn VectorIndex>>,
    content: Option<Arc<dyn ContentStore>>,
    collection: Option<String>,
    top_k: Option<usize>,
}

impl AssistantBuilder {
    /// Set the generation backend.
    pub fn generator(mut self, generator: Arc<dyn Generator>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Set the embedding backend.
    pub fn embedder(mut self, embedder: Arc<dyn Embedder>) -> Self {
        self.embedder = Some(embedder);
        self
    }

    /// Set the vector index.
    pub fn index(mut self, index: Arc<dyn VectorIndex>) -> Self {
        self.index = Some(index);
        self
    }

    /// Set the content store.
    pub fn content(mut self, content: Arc<dyn ContentStore>) -> Self {
        self.content = Some(content);
        self
    }

    /// Set the index collection to retrieve from.
    pub fn collection(mut self, name: impl Into<String>) -> Self {
        self.collection = Some(name.into());
        self
    }

    /// Set how many retrieval results feed the chat context.
    pub fn top_k(mut self, k: usize) -> Self {
        self.top_k = Some(k);
        self
    }

    /// Build the [`Assistant`], validating that all backends are set.
    ///
    /// # Errors
    ///
    /// Returns [`AssistantError::Validation`] if any required field is
    /// missing or `top_k` is zero.
    pub fn build(self) -> Result<Assistant> {
        let generator = self
            .generator
            .ok_or_else(|| AssistantError::Validation("generator is required".to_string()))?;
        let embedder = self
            .embedder
            .ok_or_else(|| AssistantError::Validation("embedder is required".to_string()))?;
        let index =
            self.index.ok_or_else(|| AssistantError::Validation("index is required".to_string()))?;
        let content = self
            .content
            .ok_or_else(|| AssistantError::Validation("content store is required".to_string()))?;
        let collection = self
            .collection
            .ok_or_else(|| AssistantError::Validation("collection is required".to_string()))?;
        let top_k = self.top_k.unwrap_or(DEFAULT_TOP_K);
        if top_k == 0 {
            return Err(AssistantError::Validation("top_k must be greater than zero".to_string()));
        }

        Ok(Assistant { generator, embedder, index, content, collection, top_k })
    }
}
