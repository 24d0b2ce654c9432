//! Draft - A static site generator for markdown blogs.

mod badges;
mod build;
mod cli;
mod config;
mod content;
mod generator;
mod logger;
mod site;
mod utils;

use anyhow::Result;
use build::build_site;
use clap::Parser;
use cli::Cli;
use config::SiteConfig;

fn main() {
    // help and usage errors both count as failures
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            err.print().ok();
            std::process::exit(1);
        }
    };

    if let Err(err) = run(&cli) {
        log!("error"; "{:#}", err);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    build_site(&config)?;
    Ok(())
}

/// Load and validate configuration from CLI arguments
fn load_config(cli: &Cli) -> Result<SiteConfig> {
    let mut config = SiteConfig::from_path(&cli.config)?;
    config.update_with_cli(cli);
    config.validate()?;
    Ok(config)
}
