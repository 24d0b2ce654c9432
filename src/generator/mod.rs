//! Output generation.
//!
//! Every generator reads the same finished [`ContentGraph`] through a
//! [`Site`]. The feed-like formats (RSS, Atom, sitemap, search export) go one
//! step further and consume [`Entry`] projections, so canonical URLs, dates
//! and order are computed in exactly one place.
//!
//! ```text
//! ContentGraph ──► Site::entries() ──┬── rss.xml
//!                                     ├── atom.xml
//!                                     ├── sitemap.xml
//!                                     └── search corpus
//! ContentGraph ──► pages ──► <output>/**/index.html
//! ```

pub mod atom;
pub mod pages;
pub mod rss;
pub mod search;
pub mod sitemap;

use crate::{
    badges::Badges,
    config::SiteConfig,
    site::{ContentGraph, Document, LinkResolver, SiteLinks},
    utils::{
        date::BuildTime,
        minify::{MinifyType, minify},
    },
};
use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Everything a generator may read, borrowed for one run.
pub struct Site<'g> {
    pub config: &'g SiteConfig,
    pub graph: &'g ContentGraph,
    pub badges: &'g Badges,
    pub resolver: LinkResolver<'g>,
    pub links: SiteLinks,
    pub time: BuildTime,
}

impl<'g> Site<'g> {
    pub fn new(
        config: &'g SiteConfig,
        graph: &'g ContentGraph,
        badges: &'g Badges,
        time: BuildTime,
    ) -> Self {
        let resolver = LinkResolver::from_config(config);
        Self {
            config,
            graph,
            badges,
            links: SiteLinks::new(&resolver),
            resolver,
            time,
        }
    }

    /// Public documents projected for the feed formats, newest first.
    pub fn entries(&self) -> impl Iterator<Item = Entry<'g>> {
        self.graph.documents.iter().map(Entry::from)
    }

    /// Output root.
    pub fn output(&self) -> &Path {
        &self.config.build.output
    }

    /// Write an HTML page at `<output>/<rel>`.
    pub fn write_html(&self, rel: impl AsRef<Path>, html: &str) -> Result<PathBuf> {
        let content = minify(MinifyType::Html(html.as_bytes()), self.config.build.minify);
        write_file(&self.output().join(rel), &content)
    }

    /// Write an XML document at `path`.
    pub fn write_xml(&self, path: &Path, xml: &str) -> Result<PathBuf> {
        let content = minify(MinifyType::Xml(xml.as_bytes()), self.config.build.minify);
        write_file(path, &content)
    }
}

/// One document as the feed formats see it.
#[derive(Debug, Clone)]
pub struct Entry<'g> {
    pub title: &'g str,
    pub url: &'g str,
    pub description: &'g str,
    pub author: &'g str,
    pub email: &'g str,
    pub published: DateTime<FixedOffset>,
    pub tags: Vec<&'g str>,
    pub text: &'g str,
}

impl<'g> From<&'g Document> for Entry<'g> {
    fn from(doc: &'g Document) -> Self {
        Self {
            title: &doc.title,
            url: &doc.url,
            description: &doc.description,
            author: &doc.author,
            email: &doc.email,
            published: doc.published,
            tags: doc.tag_names(),
            text: &doc.text,
        }
    }
}

/// Write `content` to `path`, creating parent directories.
pub fn write_file(path: &Path, content: &[u8]) -> Result<PathBuf> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path.to_path_buf())
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::{
        config::SiteConfig,
        content::{FrontMatter, ParsedDocument, Status},
        site::GraphBuilder,
        utils::date::parse_published,
    };

    pub fn config() -> SiteConfig {
        SiteConfig::from_str(
            r#"
            [site]
            title = "Test Blog"
            description = "Notes"
            author = "Alice"
            email = "alice@example.com"
            url = "https://example.com"
            rights = "2024 Alice"
        "#,
        )
        .unwrap()
    }

    pub fn parsed(link: &str, published: &str, tags: &[&str]) -> ParsedDocument {
        ParsedDocument {
            path: format!("posts/{link}.md").into(),
            front_matter: FrontMatter {
                title: format!("Post {link}"),
                link: link.into(),
                description: format!("About {link} & more"),
                published: published.into(),
                template: "post.html".into(),
                status: "public".into(),
                tags: tags.iter().map(|t| t.to_string()).collect(),
                ..Default::default()
            },
            status: Status::Public,
            body: format!("Hello from **{link}**."),
        }
    }

    /// Two documents, `a` (older, tagged meta) then `b` (newer, meta + code).
    pub fn graph(config: &SiteConfig) -> ContentGraph {
        let mut builder = GraphBuilder::new(config).unwrap();
        builder
            .add_document(parsed("a", "2024-01-01T10:00:00Z", &["meta"]))
            .unwrap();
        builder
            .add_document(parsed("b", "2024-11-29T18:29:00-08:00", &["meta", "code"]))
            .unwrap();
        builder.finish()
    }

    pub fn time() -> BuildTime {
        BuildTime::fixed(parse_published("2025-01-15T09:30:00Z").unwrap())
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_entries_follow_display_order() {
        let config = config();
        let graph = graph(&config);
        let badges = Badges::new();
        let site = Site::new(&config, &graph, &badges, time());

        let urls: Vec<_> = site.entries().map(|e| e.url).collect();
        assert_eq!(
            urls,
            vec!["https://example.com/b/", "https://example.com/a/"]
        );

        let b = site.entries().next().unwrap();
        assert_eq!(b.tags, vec!["meta", "code"]);
        assert_eq!(b.author, "Alice");
    }

    #[test]
    fn test_write_file_creates_parents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a/b/index.html");
        write_file(&path, b"hi").unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "hi");
    }
}
