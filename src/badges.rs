//! Badge icon fragments.
//!
//! Every regular file in `[build].badges` is read as trusted markup and
//! exposed to templates under its file name, so a layout can write
//! `{{ badges["rss.svg"] }}` next to the matching `[[badges]]` entry.

use anyhow::{Context, Result};
use std::{collections::BTreeMap, fs, path::Path};
use walkdir::WalkDir;

/// File name → markup.
pub type Badges = BTreeMap<String, String>;

/// Load badge fragments from `dir`; no directory means no badges.
pub fn load_badges(dir: Option<&Path>) -> Result<Badges> {
    let Some(dir) = dir else {
        return Ok(Badges::new());
    };

    let mut badges = Badges::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to read badges in {}", dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let markup = fs::read_to_string(path)
            .with_context(|| format!("Failed to read badge {}", path.display()))?;
        badges.insert(entry.file_name().to_string_lossy().into_owned(), markup);
    }

    Ok(badges)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_no_badges_dir() {
        assert!(load_badges(None).unwrap().is_empty());
    }

    #[test]
    fn test_load_badges() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("rss.svg"), "<svg>rss</svg>").unwrap();
        fs::write(dir.path().join("mastodon.svg"), "<svg>m</svg>").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();

        let badges = load_badges(Some(dir.path())).unwrap();

        assert_eq!(badges.len(), 2);
        assert_eq!(badges["rss.svg"], "<svg>rss</svg>");
        assert!(badges.contains_key("mastodon.svg"));
    }

    #[test]
    fn test_missing_badges_dir_is_an_error() {
        let dir = TempDir::new().unwrap();
        let result = load_badges(Some(&dir.path().join("nope")));
        assert!(result.is_err());
    }
}
