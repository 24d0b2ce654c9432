//! Resolved content types.

use crate::config::StaticPage;
use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use std::path::PathBuf;

/// A tag as published: name plus its page URL.
///
/// Identity is the name alone.
#[derive(Debug, Clone, Serialize)]
pub struct Tag {
    pub name: String,
    pub url: String,
}

impl PartialEq for Tag {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Tag {}

/// A public document with every derived field filled in.
///
/// Neighbors and related documents are indices into
/// [`ContentGraph::documents`](super::ContentGraph::documents).
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    #[serde(skip)]
    pub source: PathBuf,

    pub title: String,
    pub link: String,
    pub description: String,
    pub image: String,
    pub alt: String,
    pub favicon: String,
    pub author: String,
    pub email: String,
    pub template: String,

    /// Canonical URL
    pub url: String,

    #[serde(skip)]
    pub published: DateTime<FixedOffset>,

    /// Human-readable publish date ("29-Nov-2024")
    pub date: String,

    pub tags: Vec<Tag>,

    /// Rendered body markup
    #[serde(skip)]
    pub content: String,

    /// Plain-text body for indexing
    #[serde(skip)]
    pub text: String,

    /// Chronologically older neighbor
    #[serde(skip)]
    pub previous: Option<usize>,

    /// Chronologically newer neighbor
    #[serde(skip)]
    pub next: Option<usize>,

    #[serde(skip)]
    pub related: Vec<usize>,
}

impl Document {
    pub fn tag_names(&self) -> Vec<&str> {
        self.tags.iter().map(|tag| tag.name.as_str()).collect()
    }
}

/// A static page with its canonical URL.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedPage {
    #[serde(flatten)]
    pub page: StaticPage,
    pub url: String,
}
