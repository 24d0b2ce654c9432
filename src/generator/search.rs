//! Search corpus export.
//!
//! When `[search].enabled`, every public document is dumped to one JSON file
//! an external full-text engine can ingest:
//!
//! ```json
//! {
//!     "Name": "My Blog",
//!     "URL": "https://example.com",
//!     "Created": 1736933400,
//!     "Version": 1,
//!     "Documents": [
//!         { "ID": "https://example.com/hello/", "Title": "Hello", ... }
//!     ]
//! }
//! ```

use super::{Entry, Site, write_file};
use crate::log;
use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::collections::BTreeMap;

/// Corpus format version understood by the engine.
const CORPUS_VERSION: u32 = 1;

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct Corpus<'g> {
    name: &'g str,
    #[serde(rename = "URL")]
    url: &'g str,
    /// Export time, seconds since the epoch
    created: i64,
    version: u32,
    documents: Vec<CorpusDocument<'g>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct CorpusDocument<'g> {
    #[serde(rename = "ID")]
    id: &'g str,
    title: &'g str,
    description: &'g str,
    text: &'g str,
    attributes: BTreeMap<&'static str, Vec<&'g str>>,
    hints: Vec<&'g str>,
}

impl<'g> From<Entry<'g>> for CorpusDocument<'g> {
    fn from(entry: Entry<'g>) -> Self {
        let attributes = BTreeMap::from([("author", vec![entry.author]), ("tags", entry.tags)]);
        Self {
            id: entry.url,
            title: entry.title,
            description: entry.description,
            text: entry.text,
            attributes,
            hints: Vec::new(),
        }
    }
}

/// Write the corpus to `[search].path` if search is enabled.
pub fn build_search(site: &Site<'_>) -> Result<()> {
    let search = &site.config.search;
    if !search.enabled {
        return Ok(());
    }

    let json = into_json(site)?;
    let path = write_file(&search.path, &json)?;

    log!("search"; "{}", path.display());
    Ok(())
}

/// Serialize the corpus with four-space indentation.
fn into_json(site: &Site<'_>) -> Result<Vec<u8>> {
    let corpus = Corpus {
        name: &site.config.site.title,
        url: site.config.site.root(),
        created: site.time.unix(),
        version: CORPUS_VERSION,
        documents: site.entries().map(CorpusDocument::from).collect(),
    };

    let mut out = Vec::with_capacity(4096);
    let mut serializer = Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(b"    "));
    corpus
        .serialize(&mut serializer)
        .context("Failed to serialize search corpus")?;
    out.push(b'\n');
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{config, graph, time};
    use super::*;
    use crate::badges::Badges;
    use serde_json::Value;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_corpus_shape() {
        let config = config();
        let graph = graph(&config);
        let badges = Badges::new();
        let site = Site::new(&config, &graph, &badges, time());

        let json: Value = serde_json::from_slice(&into_json(&site).unwrap()).unwrap();

        assert_eq!(json["Name"], "Test Blog");
        assert_eq!(json["URL"], "https://example.com");
        assert_eq!(json["Version"], 1);
        assert_eq!(json["Created"], time().unix());

        let docs = json["Documents"].as_array().unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0]["ID"], "https://example.com/b/");
        assert_eq!(docs[0]["Title"], "Post b");
        assert_eq!(docs[0]["Text"], "Hello from b.\n\n");
        assert_eq!(docs[0]["Attributes"]["author"][0], "Alice");
        assert_eq!(docs[0]["Attributes"]["tags"], serde_json::json!(["meta", "code"]));
        assert_eq!(docs[0]["Hints"], serde_json::json!([]));
    }

    #[test]
    fn test_disabled_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let mut config = config();
        config.search.path = dir.path().join("search.json");
        let graph = graph(&config);
        let badges = Badges::new();
        let site = Site::new(&config, &graph, &badges, time());

        build_search(&site).unwrap();
        assert!(!config.search.path.exists());
    }

    #[test]
    fn test_enabled_writes_corpus() {
        let dir = TempDir::new().unwrap();
        let mut config = config();
        config.search.enabled = true;
        config.search.path = dir.path().join("out/search.json");
        let graph = graph(&config);
        let badges = Badges::new();
        let site = Site::new(&config, &graph, &badges, time());

        build_search(&site).unwrap();
        let written = fs::read_to_string(&config.search.path).unwrap();
        assert!(written.starts_with("{\n    \"Name\": \"Test Blog\""));
    }
}
