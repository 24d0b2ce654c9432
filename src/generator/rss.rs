//! RSS 2.0 feed generation.
//!
//! One `<item>` per public document, newest first, written to
//! `<output>/rss.xml`.

use super::{Entry, Site};
use crate::{log, site::links::RSS_FILE, utils::date::rfc1123};
use anyhow::{Result, anyhow};
use regex::Regex;
use rss::{ChannelBuilder, GuidBuilder, ItemBuilder, validation::Validate};
use std::sync::LazyLock;

// ============================================================================
// Public API
// ============================================================================

/// Build and write the RSS feed.
pub fn build_rss(site: &Site<'_>) -> Result<()> {
    let xml = RssFeed::new(site).into_xml()?;
    let path = site.write_xml(&site.output().join(RSS_FILE), &xml)?;

    log!("rss"; "{}", path.file_name().unwrap_or_default().to_string_lossy());
    Ok(())
}

// ============================================================================
// RssFeed Implementation
// ============================================================================

/// RSS feed builder
struct RssFeed<'s, 'g> {
    site: &'s Site<'g>,
}

impl<'s, 'g> RssFeed<'s, 'g> {
    fn new(site: &'s Site<'g>) -> Self {
        Self { site }
    }

    /// Generate RSS xml string
    fn into_xml(self) -> Result<String> {
        let site = &self.site.config.site;
        let items: Vec<_> = self.site.entries().map(|entry| entry_to_item(&entry)).collect();

        let channel = ChannelBuilder::default()
            .title(&site.title)
            .link(&self.site.links.home)
            .description(format!("Latest posts from {}", site.title))
            .language(Some(site.language.clone()))
            .copyright(Some(site.rights.clone()).filter(|rights| !rights.is_empty()))
            .last_build_date(Some(self.site.time.rfc1123()))
            .generator(Some(generator()))
            .items(items)
            .build();

        channel
            .validate()
            .map_err(|e| anyhow!("rss validation failed: {e}"))?;
        Ok(channel.to_string())
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// `draft/<version>`
fn generator() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

/// Convert a feed entry to an RSS item. The canonical URL doubles as guid.
fn entry_to_item(entry: &Entry<'_>) -> rss::Item {
    ItemBuilder::default()
        .title(Some(entry.title.to_owned()))
        .link(Some(entry.url.to_owned()))
        .guid(
            GuidBuilder::default()
                .permalink(true)
                .value(entry.url.to_owned())
                .build(),
        )
        .description(Some(entry.description.to_owned()))
        .author(rss_author(entry.author, entry.email))
        .pub_date(Some(rfc1123(&entry.published)))
        .build()
}

/// Normalize author to the RSS form: "email@example.com (Name)".
///
/// An author already written that way is kept as is.
fn rss_author(author: &str, email: &str) -> Option<String> {
    static RE_VALID_AUTHOR: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}[ \t]*\([^)]+\)$")
            .unwrap()
    });

    match (author.is_empty(), email.is_empty()) {
        (true, true) => None,
        _ if RE_VALID_AUTHOR.is_match(author) => Some(author.to_owned()),
        (false, false) => Some(format!("{email} ({author})")),
        (false, true) => Some(author.to_owned()),
        (true, false) => Some(email.to_owned()),
    }
}
