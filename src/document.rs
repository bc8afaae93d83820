//! Data types for indexed documents and retrieval results.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::content::{NewsPost, Project};

/// The unit stored in the vector index.
///
/// A `Document` is a denormalized rendering of one source record. Its id is
/// namespaced by source kind (`news:{id}` / `project:{id}`) and stable
/// across re-indexing, so re-upserting replaces the prior row wholesale.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    /// Globally unique identifier, namespaced by source kind.
    pub id: String,
    /// Natural-language rendering of the source record.
    pub text: String,
    /// Key-value metadata; always carries `type` and `title`.
    pub metadata: HashMap<String, String>,
    /// Vector embedding of `text`, attached by the pipeline at write time.
    pub embedding: Vec<f32>,
}

impl Document {
    /// Render a news post into its indexable document.
    ///
    /// Text template: `News: {title}\nCategory: {category_display}\n{content}`.
    /// Metadata carries the category code, not the display label.
    pub fn from_news(post: &NewsPost) -> Self {
        let text = format!(
            "News: {}\nCategory: {}\n{}",
            post.title,
            post.category.display(),
            post.content
        );
        let metadata = HashMap::from([
            ("type".to_string(), "news".to_string()),
            ("title".to_string(), post.title.clone()),
            ("category".to_string(), post.category.code().to_string()),
        ]);
        Self { id: format!("news:{}", post.id), text, metadata, embedding: Vec::new() }
    }

    /// Render a project into its indexable document.
    ///
    /// Text template: `Project: {title}\nSkills: {comma_joined_skills}\n{description}`.
    pub fn from_project(project: &Project) -> Self {
        let skills = project.skills_joined();
        let text = format!("Project: {}\nSkills: {skills}\n{}", project.title, project.description);
        let metadata = HashMap::from([
            ("type".to_string(), "project".to_string()),
            ("title".to_string(), project.title.clone()),
            ("skills".to_string(), skills),
        ]);
        Self { id: format!("project:{}", project.id), text, metadata, embedding: Vec::new() }
    }
}

/// A retrieved [`Document`] row paired with a similarity distance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Retrieved {
    /// The stored document id.
    pub id: String,
    /// The stored document text.
    pub text: String,
    /// The stored document metadata.
    pub metadata: HashMap<String, String>,
    /// Distance to the query vector (lower is more similar). `None` when
    /// the backend does not report distances.
    pub distance: Option<f32>,
}
