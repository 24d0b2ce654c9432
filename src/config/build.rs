//! `[build]` and `[templates]` section configuration.
//!
//! Where documents are read from, where output goes, and which template
//! files render each kind of page.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// BuildSection
// ============================================================================

/// `[build]` section in draft.toml - input/output directories.
///
/// # Example
/// ```toml
/// [build]
/// input = "posts"          # Source documents
/// templates = "templates"  # Page templates
/// output = "public"        # Output directory
/// badges = "badges"        # Icon fragments (optional)
/// minify = true
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct BuildSection {
    /// Directory of front-matter documents.
    #[serde(default = "defaults::build::input")]
    #[educe(Default = defaults::build::input())]
    pub input: PathBuf,

    /// Directory the template loader resolves names against.
    #[serde(default = "defaults::build::templates")]
    #[educe(Default = defaults::build::templates())]
    pub templates: PathBuf,

    /// Build output directory.
    #[serde(default = "defaults::build::output")]
    #[educe(Default = defaults::build::output())]
    pub output: PathBuf,

    /// Directory of badge icons, each file exposed to templates by name.
    #[serde(default = "defaults::build::badges")]
    #[educe(Default = defaults::build::badges())]
    pub badges: Option<PathBuf>,

    /// Minify HTML and XML output.
    #[serde(default = "defaults::r#false")]
    #[educe(Default = false)]
    pub minify: bool,

    /// Report unknown keys in `---` front matter as validation errors.
    #[serde(default = "defaults::r#false")]
    #[educe(Default = false)]
    pub strict_front_matter: bool,
}

// ============================================================================
// TemplatesSection
// ============================================================================

/// `[templates]` section - template file names inside `build.templates`.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct TemplatesSection {
    /// Layout fragment shared by every page.
    #[serde(default = "defaults::templates::shared")]
    #[educe(Default = defaults::templates::shared())]
    pub shared: String,

    #[serde(default = "defaults::templates::index")]
    #[educe(Default = defaults::templates::index())]
    pub index: String,

    #[serde(default = "defaults::templates::tags_index")]
    #[educe(Default = defaults::templates::tags_index())]
    pub tags_index: String,

    #[serde(default = "defaults::templates::tag_page")]
    #[educe(Default = defaults::templates::tag_page())]
    pub tag_page: String,

    /// Only rendered when `[search].enabled = true`.
    #[serde(default = "defaults::templates::search")]
    #[educe(Default = defaults::templates::search())]
    pub search: String,
}
