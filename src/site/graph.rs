//! Content graph assembly.
//!
//! # Architecture
//!
//! ```text
//! GraphBuilder::new(config)      reserve `tags` (and the search dir)
//!     │
//!     ├── add_document() × N     claim link, parse date, skip private,
//!     │                          resolve tags, render body
//!     ├── add_page() × M         claim link
//!     │
//!     └── finish() ──► ContentGraph
//!                         ├── documents   newest first, neighbors filled
//!                         ├── tags        name → documents, newest first
//!                         └── pages       static pages with URLs
//! ```
//!
//! The builder owns all of it; publishers only ever borrow the finished
//! graph.

use super::{
    document::{Document, ResolvedPage, Tag},
    links::{ATOM_FILE, INDEX_FILE, LinkResolver, RSS_FILE, SITEMAP_FILE, TAGS_DIR},
};
use crate::{
    config::{SiteConfig, StaticPage},
    content::{ContentError, ParsedDocument, Status, markdown},
    log,
    utils::{
        date::{display_date, parse_published},
        slug::{LinkError, normalize_tag, validate_link},
    },
};
use std::{
    collections::{BTreeMap, HashMap},
    fmt,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Structural errors in the content set.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("duplicate link `{link}`: {second} collides with {first}")]
    Duplicate {
        link: String,
        first: Claimant,
        second: Claimant,
    },

    #[error("`{0}` declares an unsafe tag `{1}`")]
    UnsafeTag(PathBuf, String, #[source] LinkError),

    #[error("`{0}` declares tag `{1}`, which is a reserved name")]
    ReservedTag(PathBuf, String),

    #[error(transparent)]
    Content(#[from] ContentError),
}

/// Whatever holds a link in the namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Claimant {
    Reserved,
    Document(PathBuf),
    Page(String),
}

impl fmt::Display for Claimant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reserved => write!(f, "a reserved name"),
            Self::Document(path) => write!(f, "document `{}`", path.display()),
            Self::Page(title) => write!(f, "static page `{title}`"),
        }
    }
}

/// Every link published under the output root, each claimed exactly once.
#[derive(Debug, Default)]
struct LinkNamespace {
    claimed: HashMap<String, Claimant>,
}

impl LinkNamespace {
    fn claim(&mut self, link: &str, claimant: Claimant) -> Result<(), GraphError> {
        if let Some(first) = self.claimed.get(link) {
            return Err(GraphError::Duplicate {
                link: link.to_owned(),
                first: first.clone(),
                second: claimant,
            });
        }
        self.claimed.insert(link.to_owned(), claimant);
        Ok(())
    }
}

/// Documents of one tag, newest first.
#[derive(Debug, Clone)]
pub struct TagEntry {
    pub tag: Tag,
    pub documents: Vec<usize>,
}

/// The finished, cross-referenced content set.
#[derive(Debug, Default)]
pub struct ContentGraph {
    /// Public documents, newest first.
    pub documents: Vec<Document>,

    /// Tag name → documents, sorted by name.
    pub tags: BTreeMap<String, TagEntry>,

    pub pages: Vec<ResolvedPage>,

    /// Private documents skipped.
    pub private: usize,
}

impl ContentGraph {
    pub fn previous(&self, doc: &Document) -> Option<&Document> {
        doc.previous.map(|i| &self.documents[i])
    }

    pub fn next(&self, doc: &Document) -> Option<&Document> {
        doc.next.map(|i| &self.documents[i])
    }

    pub fn related<'g>(&'g self, doc: &'g Document) -> impl Iterator<Item = &'g Document> {
        doc.related.iter().map(|&i| &self.documents[i])
    }

    pub fn tag_documents<'g>(&'g self, entry: &'g TagEntry) -> impl Iterator<Item = &'g Document> {
        entry.documents.iter().map(|&i| &self.documents[i])
    }
}

/// Incrementally assembles a [`ContentGraph`].
pub struct GraphBuilder<'a> {
    config: &'a SiteConfig,
    resolver: LinkResolver<'a>,
    namespace: LinkNamespace,
    /// Declared related links, parallel to `documents`
    related: Vec<Vec<String>>,
    documents: Vec<Document>,
    pages: Vec<ResolvedPage>,
    private: usize,
}

impl<'a> GraphBuilder<'a> {
    /// Start a graph with the generator's own output directories reserved.
    pub fn new(config: &'a SiteConfig) -> Result<Self, GraphError> {
        let mut namespace = LinkNamespace::default();
        for reserved in [TAGS_DIR, INDEX_FILE, RSS_FILE, ATOM_FILE, SITEMAP_FILE] {
            namespace.claim(reserved, Claimant::Reserved)?;
        }
        if config.search.enabled {
            namespace.claim(&config.search.dir, Claimant::Reserved)?;
        }

        Ok(Self {
            config,
            resolver: LinkResolver::from_config(config),
            namespace,
            related: Vec::new(),
            documents: Vec::new(),
            pages: Vec::new(),
            private: 0,
        })
    }

    /// Add a validated document, in loader order (oldest first).
    ///
    /// Private documents claim their link and are then dropped.
    pub fn add_document(&mut self, parsed: ParsedDocument) -> Result<(), GraphError> {
        let ParsedDocument {
            path,
            front_matter: fm,
            status,
            body,
        } = parsed;

        self.namespace
            .claim(&fm.link, Claimant::Document(path.clone()))?;

        let published = parse_published(&fm.published)
            .map_err(|err| ContentError::Date(path.clone(), fm.published.clone(), err))?;

        if status == Status::Private {
            log!("private"; "skipping \"{}\"", fm.link);
            self.private += 1;
            return Ok(());
        }

        let tags = self.resolve_tags(&path, &fm.tags)?;
        let config = self.config;
        let site = &config.site;

        self.related.push(fm.related);
        self.documents.push(Document {
            url: self.resolver.page(&fm.link),
            date: display_date(&published),
            published,
            tags,
            content: markdown::render_html(&body),
            text: markdown::render_plain(&body),
            author: non_empty_or(fm.author, &site.author),
            email: non_empty_or(fm.email, &site.email),
            source: path,
            title: fm.title,
            link: fm.link,
            description: fm.description,
            image: fm.image,
            alt: fm.alt,
            favicon: fm.favicon,
            template: fm.template,
            previous: None,
            next: None,
            related: Vec::new(),
        });

        Ok(())
    }

    /// Add a static page. Pages share the namespace with documents.
    pub fn add_page(&mut self, page: &StaticPage) -> Result<(), GraphError> {
        self.namespace
            .claim(&page.link, Claimant::Page(page.title.clone()))?;
        self.pages.push(ResolvedPage {
            url: self.resolver.page(&page.link),
            page: page.clone(),
        });
        Ok(())
    }

    /// Order documents newest first and back-fill every cross reference.
    pub fn finish(self) -> ContentGraph {
        let Self {
            mut documents,
            mut related,
            pages,
            private,
            ..
        } = self;

        documents.reverse();
        related.reverse();

        let last = documents.len().saturating_sub(1);
        for (i, doc) in documents.iter_mut().enumerate() {
            doc.next = i.checked_sub(1);
            doc.previous = (i < last).then_some(i + 1);
        }

        let lookup: HashMap<String, usize> = documents
            .iter()
            .enumerate()
            .map(|(i, doc)| (doc.link.clone(), i))
            .collect();

        for (doc, declared) in documents.iter_mut().zip(related) {
            for link in declared {
                match lookup.get(&link) {
                    Some(&i) => doc.related.push(i),
                    None => log!("warn"; "\"{}\": related link `{}` not found", doc.link, link),
                }
            }
        }

        let mut tags: BTreeMap<String, TagEntry> = BTreeMap::new();
        for (i, doc) in documents.iter().enumerate() {
            for tag in &doc.tags {
                tags.entry(tag.name.clone())
                    .or_insert_with(|| TagEntry {
                        tag: tag.clone(),
                        documents: Vec::new(),
                    })
                    .documents
                    .push(i);
            }
        }

        ContentGraph {
            documents,
            tags,
            pages,
            private,
        }
    }

    /// Normalize, dedupe and validate a document's tag names.
    fn resolve_tags(&self, path: &Path, names: &[String]) -> Result<Vec<Tag>, GraphError> {
        let mut tags: Vec<Tag> = Vec::with_capacity(names.len());
        for name in names {
            let name = normalize_tag(name);
            if name.is_empty() || tags.iter().any(|tag| tag.name == name) {
                continue;
            }
            validate_link(&name)
                .map_err(|err| GraphError::UnsafeTag(path.to_path_buf(), name.clone(), err))?;
            // tags/index.html is the tags index page
            if name == INDEX_FILE {
                return Err(GraphError::ReservedTag(path.to_path_buf(), name));
            }
            tags.push(Tag {
                url: self.resolver.tag(&name),
                name,
            });
        }
        Ok(tags)
    }
}

fn non_empty_or(value: String, fallback: &str) -> String {
    if value.trim().is_empty() {
        fallback.to_owned()
    } else {
        value
    }
}
