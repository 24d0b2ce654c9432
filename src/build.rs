//! Site building orchestration.
//!
//! # Architecture
//!
//! ```text
//! build_site()
//!     │
//!     ├── load_dir()          posts/* → SourceFile (oldest first)
//!     ├── parse_document()    front matter, header report, link policy
//!     ├── GraphBuilder        namespace, tags, neighbors, related
//!     │
//!     └── publish()
//!             ├── pages       documents, index, tags, static pages, search
//!             ├── rss.xml
//!             ├── atom.xml
//!             ├── sitemap.xml
//!             └── search corpus (optional)
//! ```
//!
//! Any error aborts the run. Pages already written stay on disk.

use crate::{
    badges::load_badges,
    config::SiteConfig,
    content::{loader::load_dir, parse_document},
    generator::{Site, atom, pages, rss, search, sitemap},
    log,
    site::{ContentGraph, GraphBuilder},
    utils::date::BuildTime,
};
use anyhow::{Context, Result};
use std::fs;

/// Build the entire site from `config`.
///
/// Returns the content graph the outputs were generated from.
pub fn build_site(config: &SiteConfig) -> Result<ContentGraph> {
    build_site_at(config, BuildTime::now())
}

fn build_site_at(config: &SiteConfig, time: BuildTime) -> Result<ContentGraph> {
    let graph = assemble(config)?;

    let badges = load_badges(config.build.badges.as_deref())?;
    let output = &config.build.output;
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory {}", output.display()))?;

    let site = Site::new(config, &graph, &badges, time);
    publish(&site)?;

    log!(
        "build";
        "{} posts, {} tags, {} pages ({} private skipped) → {}",
        graph.documents.len(),
        graph.tags.len(),
        graph.pages.len(),
        graph.private,
        output.display()
    );
    Ok(graph)
}

/// Load, validate and cross-reference every source document.
fn assemble(config: &SiteConfig) -> Result<ContentGraph> {
    let input = &config.build.input;
    let sources = load_dir(input)?;
    log!("content"; "found {} documents in {}", sources.len(), input.display());

    let mut builder = GraphBuilder::new(config)?;
    for source in sources {
        let parsed = parse_document(source, config.build.strict_front_matter)?;
        builder.add_document(parsed)?;
    }
    for page in &config.pages {
        builder.add_page(page)?;
    }

    Ok(builder.finish())
}

/// Write every output artifact.
fn publish(site: &Site<'_>) -> Result<()> {
    pages::build_pages(site)?;
    rss::build_rss(site)?;
    atom::build_atom(site)?;
    sitemap::build_sitemap(site)?;
    search::build_search(site)?;
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
