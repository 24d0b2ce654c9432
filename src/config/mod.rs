//! Site configuration management for `draft.toml`.
//!
//! # Sections
//!
//! | Section       | Purpose                                          |
//! |---------------|--------------------------------------------------|
//! | `[site]`      | Blog identity, locale, root URL and base path    |
//! | `[build]`     | Input, templates, output and badges directories  |
//! | `[templates]` | Template file names per kind of page             |
//! | `[[pages]]`   | Static pages sharing the link namespace          |
//! | `[[badges]]`  | Badges rendered by the layout                    |
//! | `[search]`    | Optional JSON corpus export and search page      |
//! | `[extra]`     | User-defined custom fields                       |
//!
//! # Example
//!
//! ```toml
//! [site]
//! title = "My Blog"
//! url = "https://example.com"
//!
//! [build]
//! input = "posts"
//! output = "public"
//!
//! [[pages]]
//! template = "about.html"
//! title = "About"
//! link = "about"
//! ```

mod build;
pub mod defaults;
mod error;
mod pages;
mod site;

pub use build::{BuildSection, TemplatesSection};
pub use error::ConfigError;
pub use pages::{Badge, SearchSection, StaticPage};
pub use site::SiteSection;

use crate::{cli::Cli, utils::slug::validate_link};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing draft.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Blog identity and URLs
    pub site: SiteSection,

    /// Directories and output options
    #[serde(default)]
    pub build: BuildSection,

    /// Template file names
    #[serde(default)]
    pub templates: TemplatesSection,

    /// Static pages
    #[serde(default)]
    pub pages: Vec<StaticPage>,

    /// Layout badges
    #[serde(default)]
    pub badges: Vec<Badge>,

    /// Search export settings
    #[serde(default)]
    pub search: SearchSection,

    /// User-defined extra fields
    #[serde(default)]
    pub extra: HashMap<String, toml::Value>,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: SiteConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        let mut config = Self::from_str(&content)?;
        config.config_path = normalize_path(path);
        Ok(config)
    }

    /// Directory relative paths in the config are resolved against.
    pub fn get_root(&self) -> &Path {
        self.config_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("./"))
    }

    /// Apply CLI overrides, then anchor every relative path at the config
    /// file's directory.
    pub fn update_with_cli(&mut self, cli: &Cli) {
        update_option(&mut self.build.output, cli.output.as_ref());
        update_option(&mut self.site.url, cli.base_url.as_ref());

        let root = self.get_root().to_path_buf();
        self.build.input = normalize_path(&root.join(&self.build.input));
        self.build.templates = normalize_path(&root.join(&self.build.templates));
        self.build.output = normalize_path(&root.join(&self.build.output));
        self.build.badges = self
            .build
            .badges
            .as_ref()
            .map(|badges| normalize_path(&root.join(badges)));
        self.search.path = normalize_path(&root.join(&self.search.path));
    }

    /// Validate settings that cannot be expressed in the schema.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site.url.is_empty() {
            return Err(ConfigError::Validation("[site.url] is required".into()));
        }

        if !self.site.url.starts_with("http") {
            return Err(ConfigError::Validation(
                "[site.url] must start with http:// or https://".into(),
            ));
        }

        if let Some(base_path) = self.site.base_path() {
            // A prefix may span several segments; each one must be safe.
            for segment in base_path.split('/') {
                validate_link(segment).map_err(|err| {
                    ConfigError::Validation(format!("[site.base_path] `{base_path}`: {err}"))
                })?;
            }
        }

        for page in &self.pages {
            validate_link(&page.link).map_err(|err| {
                ConfigError::Validation(format!("[[pages]] `{}`: {err}", page.title))
            })?;
            if page.template.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "[[pages]] `{}` has no template",
                    page.title
                )));
            }
        }

        if self.search.enabled {
            validate_link(&self.search.dir).map_err(|err| {
                ConfigError::Validation(format!("[search.dir] `{}`: {err}", self.search.dir))
            })?;
            if self.search.path.as_os_str().is_empty() {
                return Err(ConfigError::Validation(
                    "[search.path] is required when search is enabled".into(),
                ));
            }
        }

        Ok(())
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Update config option if CLI value is provided
fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
    if let Some(option) = cli_option {
        *config_option = option.clone();
    }
}

/// Normalize a path to absolute, using canonicalize if the path exists
fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        // For non-existent paths, manually make them absolute
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()
                .map(|cwd| cwd.join(path))
                .unwrap_or_else(|_| path.to_path_buf())
        }
    })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn parse(content: &str) -> SiteConfig {
        SiteConfig::from_str(content).unwrap()
    }

    #[test]
    fn test_from_str() {
        let config = parse(
            r#"
            [site]
            title = "My Blog"
            url = "https://example.com"
            author = "Test Author"
        "#,
        );

        assert_eq!(config.site.title, "My Blog");
        assert_eq!(config.site.author, "Test Author");
        assert!(config.pages.is_empty());
    }

    #[test]
    fn test_from_str_invalid_toml() {
        let result = SiteConfig::from_str(
            r#"
            [site
            title = "My Blog"
        "#,
        );

        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn test_missing_site_section_rejected() {
        let result = SiteConfig::from_str("[build]\ninput = \"posts\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_from_path_missing_file() {
        let result = SiteConfig::from_path(Path::new("/definitely/not/here/draft.toml"));
        assert!(matches!(result, Err(ConfigError::Io(..))));
    }

    #[test]
    fn test_from_path_resolves_relative_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("draft.toml");
        fs::write(
            &path,
            "[site]\ntitle = \"T\"\nurl = \"https://example.com\"\n[build]\ninput = \"src\"\n",
        )
        .unwrap();

        let mut config = SiteConfig::from_path(&path).unwrap();
        config.update_with_cli(&Cli::for_config(&path));

        let root = dir.path().canonicalize().unwrap();
        assert_eq!(config.build.input, root.join("src"));
        assert_eq!(config.build.output, root.join("public"));
        assert_eq!(config.search.path, root.join("search.json"));
    }

    #[test]
    fn test_cli_overrides() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("draft.toml");
        fs::write(&path, "[site]\ntitle = \"T\"\nurl = \"https://example.com\"\n").unwrap();

        let mut config = SiteConfig::from_path(&path).unwrap();
        let mut cli = Cli::for_config(&path);
        cli.base_url = Some("https://staging.example.com".into());
        cli.output = Some(PathBuf::from("dist"));
        config.update_with_cli(&cli);

        assert_eq!(config.site.url, "https://staging.example.com");
        assert!(config.build.output.ends_with("dist"));
    }

    #[test]
    fn test_validate_requires_url() {
        let config = parse("[site]\ntitle = \"T\"\n");
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));

        let config = parse("[site]\ntitle = \"T\"\nurl = \"example.com\"\n");
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("http"));
    }

    #[test]
    fn test_validate_ok() {
        let config = parse(
            r#"
            [site]
            title = "T"
            url = "https://example.com"
            base_path = "blog/2025"

            [[pages]]
            template = "about.html"
            title = "About"
            link = "about"
        "#,
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_unsafe_page_link() {
        let config = parse(
            r#"
            [site]
            title = "T"
            url = "https://example.com"

            [[pages]]
            template = "about.html"
            title = "About"
            link = "../about"
        "#,
        );
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("About"));
    }

    #[test]
    fn test_validate_rejects_unsafe_base_path() {
        let config = parse(
            r#"
            [site]
            title = "T"
            url = "https://example.com"
            base_path = "blog/../etc"
        "#,
        );
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_unsafe_search_dir() {
        let config = parse(
            r#"
            [site]
            title = "T"
            url = "https://example.com"

            [search]
            enabled = true
            dir = "a/b"
        "#,
        );
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_extra_fields() {
        let config = parse(
            r#"
            [site]
            title = "Test"

            [extra]
            analytics_id = "UA-12345"
            show_comments = true
        "#,
        );

        assert_eq!(
            config.extra.get("analytics_id").and_then(|v| v.as_str()),
            Some("UA-12345")
        );
        assert_eq!(
            config.extra.get("show_comments").and_then(|v| v.as_bool()),
            Some(true)
        );
    }

    #[test]
    fn test_unknown_top_level_field_rejection() {
        let result = SiteConfig::from_str(
            r#"
            [site]
            title = "Test"

            [serve]
            port = 5277
        "#,
        );
        assert!(result.is_err());
    }
}
