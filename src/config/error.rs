//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Problems with `draft.toml`, raised before any document is read.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read site configuration `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("site configuration is not valid TOML")]
    Toml(#[from] toml::de::Error),

    #[error("invalid site configuration: {0}")]
    Validation(String),
}
