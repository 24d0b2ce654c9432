//! `[site]` section configuration.
//!
//! Blog identity, locale and the root URL every canonical link is built from.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[site]` section in draft.toml - blog identity and URLs.
///
/// # Example
/// ```toml
/// [site]
/// title = "My Blog"
/// description = "Notes on Rust"
/// author = "Alice"
/// url = "https://example.com"
/// base_path = "blog"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteSection {
    /// Blog name, used as feed title and page titles.
    pub title: String,

    /// Blog description for the index unfurl.
    #[serde(default)]
    pub description: String,

    /// Author name for the Atom feed and meta tags.
    #[serde(default = "defaults::site::author")]
    #[educe(Default = defaults::site::author())]
    pub author: String,

    /// Author email for the Atom feed.
    #[serde(default = "defaults::site::email")]
    #[educe(Default = defaults::site::email())]
    pub email: String,

    /// Site root for every absolute link, without a trailing slash.
    #[serde(default)]
    pub url: String,

    /// Optional path prefix when the blog is served below the root
    /// (e.g. "blog" → `https://example.com/blog/...`).
    #[serde(default)]
    pub base_path: String,

    /// RSS channel language (e.g. "en-us").
    #[serde(default = "defaults::site::language")]
    #[educe(Default = defaults::site::language())]
    pub language: String,

    /// Open Graph locale (e.g. "en_US").
    #[serde(default = "defaults::site::locale")]
    #[educe(Default = defaults::site::locale())]
    pub locale: String,

    /// `<html lang>` value.
    #[serde(default = "defaults::site::lang")]
    #[educe(Default = defaults::site::lang())]
    pub lang: String,

    /// Copyright line for the RSS channel.
    #[serde(default)]
    pub rights: String,

    /// Label of the "back to index" link on post pages.
    #[serde(default = "defaults::site::back_label")]
    #[educe(Default = defaults::site::back_label())]
    pub back_label: String,

    /// Fediverse handle for the `fediverse:creator` meta tag.
    #[serde(default)]
    pub fediverse_creator: Option<String>,

    /// Stylesheet URLs included by the layout.
    #[serde(default)]
    pub css_files: Vec<String>,

    /// Script URLs included by the layout.
    #[serde(default)]
    pub js_files: Vec<String>,
}

impl SiteSection {
    /// Site root without trailing slashes.
    pub fn root(&self) -> &str {
        self.url.trim_end_matches('/')
    }

    /// Base path without surrounding slashes, `None` when unset.
    pub fn base_path(&self) -> Option<&str> {
        Some(self.base_path.trim_matches('/')).filter(|p| !p.is_empty())
    }
}
