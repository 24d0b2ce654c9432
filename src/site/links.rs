//! Canonical URL resolution.
//!
//! Every absolute URL the site publishes comes from [`LinkResolver`], so
//! documents, tags, static pages and feeds can never disagree on the root or
//! the base path.
//!
//! ```text
//! root = https://example.com, base_path = blog
//!
//! page("hello")    → https://example.com/blog/hello/
//! tag("rust")      → https://example.com/blog/tags/rust/
//! file("rss.xml")  → https://example.com/blog/rss.xml
//! home()           → https://example.com/blog/
//! ```

use crate::config::SiteConfig;
use serde::Serialize;

/// Output subdirectory holding the tag pages.
pub const TAGS_DIR: &str = "tags";

/// Page file inside every output directory.
pub const INDEX_FILE: &str = "index.html";

pub const RSS_FILE: &str = "rss.xml";
pub const ATOM_FILE: &str = "atom.xml";
pub const SITEMAP_FILE: &str = "sitemap.xml";

/// Link of the copyright page.
const RIGHTS_LINK: &str = "rights";

/// Pure root + base path → absolute URL mapping.
#[derive(Debug, Clone, Copy)]
pub struct LinkResolver<'a> {
    root: &'a str,
    base_path: Option<&'a str>,
}

impl<'a> LinkResolver<'a> {
    /// `root` without a trailing slash, `base_path` without surrounding ones.
    #[inline]
    pub const fn new(root: &'a str, base_path: Option<&'a str>) -> Self {
        Self { root, base_path }
    }

    pub fn from_config(config: &'a SiteConfig) -> Self {
        Self::new(config.site.root(), config.site.base_path())
    }

    /// `<root>[/<base>]`, no trailing slash.
    fn prefix(&self) -> String {
        match self.base_path {
            Some(base) => format!("{}/{base}", self.root),
            None => self.root.to_owned(),
        }
    }

    /// Site home, with a trailing slash.
    pub fn home(&self) -> String {
        format!("{}/", self.prefix())
    }

    /// A directory-style page (document, static page, search page).
    pub fn page(&self, link: &str) -> String {
        format!("{}/{link}/", self.prefix())
    }

    /// A file directly under the site root (feeds, sitemap).
    pub fn file(&self, name: &str) -> String {
        format!("{}/{name}", self.prefix())
    }

    /// Tags index page.
    pub fn tags(&self) -> String {
        self.page(TAGS_DIR)
    }

    /// One tag's page.
    pub fn tag(&self, name: &str) -> String {
        self.page(&format!("{TAGS_DIR}/{name}"))
    }
}

/// Top-level canonical URLs, computed once per run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteLinks {
    pub home: String,
    pub tags: String,
    pub rss: String,
    pub atom: String,
    pub sitemap: String,
    pub rights: String,
}

impl SiteLinks {
    pub fn new(resolver: &LinkResolver<'_>) -> Self {
        Self {
            home: resolver.home(),
            tags: resolver.tags(),
            rss: resolver.file(RSS_FILE),
            atom: resolver.file(ATOM_FILE),
            sitemap: resolver.file(SITEMAP_FILE),
            rights: resolver.page(RIGHTS_LINK),
        }
    }
}
