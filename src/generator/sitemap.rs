//! Sitemap generation.
//!
//! Lists the home page, the tags index, the RSS feed, every static page and
//! every public document for search engine indexing.
//!
//! # Sitemap Format
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://example.com/</loc>
//!     <lastmod>2025-01-01</lastmod>
//!     <changefreq>daily</changefreq>
//!     <priority>1.0</priority>
//!   </url>
//! </urlset>
//! ```

use super::Site;
use crate::{log, site::links::SITEMAP_FILE, utils::date::rfc3339};
use anyhow::Result;

// ============================================================================
// Constants
// ============================================================================

/// XML namespace for sitemap
const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

// ============================================================================
// Public API
// ============================================================================

/// Build and write the sitemap.
pub fn build_sitemap(site: &Site<'_>) -> Result<()> {
    let sitemap = Sitemap::from_site(site);
    let path = site.write_xml(&site.output().join(SITEMAP_FILE), &sitemap.into_xml())?;

    log!("sitemap"; "{}", path.file_name().unwrap_or_default().to_string_lossy());
    Ok(())
}

// ============================================================================
// Sitemap Implementation
// ============================================================================

/// Sitemap data structure
struct Sitemap {
    /// List of URL entries
    urls: Vec<UrlEntry>,
}

/// Single URL entry in the sitemap
struct UrlEntry {
    /// Full URL location
    loc: String,
    /// Last modification date
    lastmod: String,
    changefreq: Option<&'static str>,
    priority: &'static str,
}

impl UrlEntry {
    fn new(
        loc: impl Into<String>,
        lastmod: impl Into<String>,
        changefreq: Option<&'static str>,
        priority: &'static str,
    ) -> Self {
        Self {
            loc: loc.into(),
            lastmod: lastmod.into(),
            changefreq,
            priority,
        }
    }
}

impl Sitemap {
    /// Collect entries in a fixed order: fixed pages, static pages, documents.
    fn from_site(site: &Site<'_>) -> Self {
        let today = site.time.ymd();

        let mut urls = vec![
            UrlEntry::new(&site.links.home, &today, Some("daily"), "1.0"),
            UrlEntry::new(&site.links.tags, &today, Some("weekly"), "0.8"),
            UrlEntry::new(&site.links.rss, &today, None, "0.7"),
        ];

        urls.extend(
            site.graph
                .pages
                .iter()
                .map(|page| UrlEntry::new(&page.url, &today, Some("monthly"), "0.5")),
        );

        urls.extend(site.entries().map(|entry| {
            UrlEntry::new(entry.url, rfc3339(&entry.published), Some("weekly"), "0.9")
        }));

        Self { urls }
    }

    /// Generate sitemap XML string.
    fn into_xml(self) -> String {
        let mut xml = String::with_capacity(4096);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        xml.push('\n');
        xml.push_str(&format!(r#"<urlset xmlns="{SITEMAP_NS}">"#));
        xml.push('\n');

        for entry in self.urls {
            xml.push_str("  <url>\n");
            xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&entry.loc)));
            xml.push_str(&format!("    <lastmod>{}</lastmod>\n", entry.lastmod));
            if let Some(changefreq) = entry.changefreq {
                xml.push_str(&format!("    <changefreq>{changefreq}</changefreq>\n"));
            }
            xml.push_str(&format!("    <priority>{}</priority>\n", entry.priority));
            xml.push_str("  </url>\n");
        }

        xml.push_str("</urlset>\n");
        xml
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Escape special XML characters.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::super::test_support::{config, graph, time};
    use super::*;
    use crate::{badges::Badges, config::StaticPage, site::GraphBuilder};

    fn sitemap_xml(config: &crate::config::SiteConfig, graph: &crate::site::ContentGraph) -> String {
        let badges = Badges::new();
        let site = Site::new(config, graph, &badges, time());
        Sitemap::from_site(&site).into_xml()
    }

    /// The `<url>` block containing `loc`.
    fn block<'x>(xml: &'x str, loc: &str) -> &'x str {
        let at = xml.find(&format!("<loc>{loc}</loc>")).unwrap();
        let start = xml[..at].rfind("<url>").unwrap();
        let end = xml[at..].find("</url>").unwrap() + at;
        &xml[start..end]
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("hello"), "hello");
        assert_eq!(escape_xml("<test>"), "&lt;test&gt;");
        assert_eq!(escape_xml("a & b"), "a &amp; b");
        assert_eq!(escape_xml(r#"say "hi""#), "say &quot;hi&quot;");
        assert_eq!(escape_xml("it's"), "it&apos;s");
    }

    #[test]
    fn test_sitemap_empty_site() {
        let config = config();
        let graph = GraphBuilder::new(&config).unwrap().finish();
        let xml = sitemap_xml(&config, &graph);

        assert!(xml.contains(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains(&format!(r#"<urlset xmlns="{SITEMAP_NS}">"#)));
        // home, tags and the feed are always listed
        assert_eq!(xml.matches("<url>").count(), 3);
    }

    #[test]
    fn test_fixed_entries_policy() {
        let config = config();
        let graph = graph(&config);
        let xml = sitemap_xml(&config, &graph);

        let home = block(&xml, "https://example.com/");
        assert!(home.contains("<lastmod>2025-01-15</lastmod>"));
        assert!(home.contains("<changefreq>daily</changefreq>"));
        assert!(home.contains("<priority>1.0</priority>"));

        let tags = block(&xml, "https://example.com/tags/");
        assert!(tags.contains("<changefreq>weekly</changefreq>"));
        assert!(tags.contains("<priority>0.8</priority>"));

        let rss = block(&xml, "https://example.com/rss.xml");
        assert!(!rss.contains("<changefreq>"));
        assert!(rss.contains("<priority>0.7</priority>"));
    }

    #[test]
    fn test_document_entries() {
        let config = config();
        let graph = graph(&config);
        let xml = sitemap_xml(&config, &graph);

        let b = block(&xml, "https://example.com/b/");
        assert!(b.contains("<lastmod>2024-11-29T18:29:00-08:00</lastmod>"));
        assert!(b.contains("<changefreq>weekly</changefreq>"));
        assert!(b.contains("<priority>0.9</priority>"));
        assert_eq!(xml.matches("<url>").count(), 5);
    }

    #[test]
    fn test_static_page_entries() {
        let config = config();
        let mut builder = GraphBuilder::new(&config).unwrap();
        builder
            .add_page(&StaticPage {
                template: "about.html".into(),
                title: "About".into(),
                link: "about".into(),
            })
            .unwrap();
        let graph = builder.finish();
        let xml = sitemap_xml(&config, &graph);

        let about = block(&xml, "https://example.com/about/");
        assert!(about.contains("<changefreq>monthly</changefreq>"));
        assert!(about.contains("<priority>0.5</priority>"));
    }

    #[test]
    fn test_sitemap_xml_structure() {
        let config = config();
        let graph = graph(&config);
        let xml = sitemap_xml(&config, &graph);

        let lines: Vec<&str> = xml.lines().collect();
        assert_eq!(lines[0], r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        assert!(lines[1].starts_with("<urlset"));
        assert_eq!(lines.last().map(|l| l.trim()), Some("</urlset>"));
    }
}
