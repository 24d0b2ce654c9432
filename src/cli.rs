//! Command-line interface definitions.
//!
//! One positional argument: the configuration file. Everything else comes
//! from the file itself; the flags only override it for one-off builds.

use clap::Parser;
use std::path::PathBuf;

/// Draft static site generator CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Path to the site configuration file (e.g. draft.toml)
    pub config: PathBuf,

    /// Output directory path (overrides `[build].output`)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Override base URL for the site.
    ///
    /// Useful for staging deployments where the production URL differs,
    /// without editing the config file:
    ///   draft draft.toml --base-url "https://staging.example.com"
    #[arg(long = "base-url")]
    pub base_url: Option<String>,
}

#[cfg(test)]
impl Cli {
    /// CLI as if invoked with only a config path.
    pub fn for_config(path: &std::path::Path) -> Self {
        Self {
            config: path.to_path_buf(),
            output: None,
            base_url: None,
        }
    }
}
