//! `[[pages]]`, `[[badges]]` and `[search]` configuration.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A declared auxiliary page, published at `<output>/<link>/index.html`.
///
/// Shares the link namespace with documents.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct StaticPage {
    pub template: String,
    pub title: String,
    pub link: String,
}

/// A badge shown by the layout, its icon looked up in the badges directory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Badge {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub id: String,
}

/// `[search]` section - optional export for an external search engine.
///
/// # Example
/// ```toml
/// [search]
/// enabled = true
/// engine = "sluggo"
/// url = "https://search.example.com"
/// path = "corpus.json"
/// dir = "search"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct SearchSection {
    #[serde(default = "defaults::r#false")]
    #[educe(Default = false)]
    pub enabled: bool,

    /// Engine name, passed through to the search template.
    pub engine: String,

    /// Engine endpoint queried by the search page.
    pub url: String,

    /// Where the JSON corpus is written.
    #[serde(default = "defaults::search::path")]
    #[educe(Default = defaults::search::path())]
    pub path: PathBuf,

    /// Output subdirectory for the search page.
    #[serde(default = "defaults::search::dir")]
    #[educe(Default = defaults::search::dir())]
    pub dir: String,
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;
    use super::*;

    #[test]
    fn test_pages_and_badges() {
        let config: SiteConfig = toml::from_str(
            r#"
            [site]
            title = "Test"

            [[pages]]
            template = "about.html"
            title = "About"
            link = "about"

            [[badges]]
            title = "Mastodon"
            url = "https://example.social/@me"
            icon = "mastodon.svg"
        "#,
        )
        .unwrap();

        assert_eq!(
            config.pages,
            vec![StaticPage {
                template: "about.html".into(),
                title: "About".into(),
                link: "about".into(),
            }]
        );
        assert_eq!(config.badges.len(), 1);
        assert_eq!(config.badges[0].icon, "mastodon.svg");
        assert_eq!(config.badges[0].id, "");
    }

    #[test]
    fn test_search_defaults() {
        let config: SiteConfig = toml::from_str(
            r#"
            [site]
            title = "Test"
        "#,
        )
        .unwrap();

        assert!(!config.search.enabled);
        assert_eq!(config.search.path, PathBuf::from("search.json"));
        assert_eq!(config.search.dir, "search");
    }

    #[test]
    fn test_search_enabled() {
        let config: SiteConfig = toml::from_str(
            r#"
            [site]
            title = "Test"

            [search]
            enabled = true
            engine = "sluggo"
            url = "https://search.example.com"
            path = "out/corpus.json"
        "#,
        )
        .unwrap();

        assert!(config.search.enabled);
        assert_eq!(config.search.engine, "sluggo");
        assert_eq!(config.search.path, PathBuf::from("out/corpus.json"));
    }

    #[test]
    fn test_page_missing_link_rejected() {
        let result: Result<SiteConfig, _> = toml::from_str(
            r#"
            [site]
            title = "Test"

            [[pages]]
            template = "about.html"
            title = "About"
        "#,
        );
        assert!(result.is_err());
    }
}
