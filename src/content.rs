//! Content-store collaborator interface and domain records.
//!
//! The relational store that owns news posts and projects lives outside
//! this crate; [`ContentStore`] is the read surface the pipeline and the
//! assistant consume. [`InMemoryContentStore`] is a self-contained
//! implementation for tests and embedded hosts.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::error::Result;

/// Category of a news post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NewsCategory {
    Academics,
    Events,
    Sports,
    Research,
}

impl NewsCategory {
    /// The stored category code (e.g. `"academics"`).
    pub fn code(&self) -> &'static str {
        match self {
            Self::Academics => "academics",
            Self::Events => "events",
            Self::Sports => "sports",
            Self::Research => "research",
        }
    }

    /// The human-readable label (e.g. `"Academics"`).
    pub fn display(&self) -> &'static str {
        match self {
            Self::Academics => "Academics",
            Self::Events => "Events",
            Self::Sports => "Sports",
            Self::Research => "Research",
        }
    }
}

/// A campus news post as exposed by the content store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewsPost {
    /// Primary key in the content store.
    pub id: i64,
    pub title: String,
    pub category: NewsCategory,
    pub content: String,
    /// Creation time in the deployment's local time zone.
    pub created_at: DateTime<Local>,
}

/// A project board entry as exposed by the content store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    /// Primary key in the content store.
    pub id: i64,
    pub title: String,
    pub description: String,
    /// Skills sought for the project.
    pub skills: Vec<String>,
    /// Creation time in the deployment's local time zone.
    pub created_at: DateTime<Local>,
}

impl Project {
    /// Join the skill list with `", "`, dropping empty entries.
    pub fn skills_joined(&self) -> String {
        self.skills
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Read access to the relational content store.
///
/// Implementations are expected to return rows ordered most-recent-first,
/// matching the store's own listing order.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// All news posts.
    async fn all_news(&self) -> Result<Vec<NewsPost>>;

    /// All projects.
    async fn all_projects(&self) -> Result<Vec<Project>>;

    /// News posts created on the given local calendar date, most recent first.
    async fn news_on(&self, date: NaiveDate) -> Result<Vec<NewsPost>>;
}

/// An in-memory [`ContentStore`] for tests and embedded use.
#[derive(Debug, Default)]
pub struct InMemoryContentStore {
    news: RwLock<HashMap<i64, NewsPost>>,
    projects: RwLock<HashMap<i64, Project>>,
}

impl InMemoryContentStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a news post.
    pub async fn put_news(&self, post: NewsPost) {
        self.news.write().await.insert(post.id, post);
    }

    /// Insert or replace a project.
    pub async fn put_project(&self, project: Project) {
        self.projects.write().await.insert(project.id, project);
    }
}

fn newest_first_news(mut posts: Vec<NewsPost>) -> Vec<NewsPost> {
    posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    posts
}

#[async_trait]
impl ContentStore for InMemoryContentStore {
    async fn all_news(&self) -> Result<Vec<NewsPost>> {
        let news = self.news.read().await;
        Ok(newest_first_news(news.values().cloned().collect()))
    }

    async fn all_projects(&self) -> Result<Vec<Project>> {
        let projects = self.projects.read().await;
        let mut rows: Vec<Project> = projects.values().cloned().collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn news_on(&self, date: NaiveDate) -> Result<Vec<NewsPost>> {
        let news = self.news.read().await;
        let rows = news.values().filter(|p| p.created_at.date_naive() == date).cloned().collect();
        Ok(newest_first_news(rows))
    }
}
