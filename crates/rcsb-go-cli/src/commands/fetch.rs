//! `rcsb-go fetch` command implementation
//!
//! Downloads the ontology into the cache and checks that it parses.

use crate::config::provider_config;
use crate::error::{CliError, Result};
use crate::progress::{create_spinner, format_bytes};
use crate::Cli;
use colored::Colorize;
use rcsb_go::{GeneOntologyProvider, ResourceCache};

pub async fn run(cli: &Cli) -> Result<()> {
    if cli.obo_file.is_some() {
        return Err(CliError::config("--obo-file reads a local file, there is nothing to fetch"));
    }

    let config = provider_config(cli)?;
    let cache = ResourceCache::new(&config.cache_dir, config.timeout_secs)?;

    let spinner = create_spinner(&format!("Fetching {}", config.url_target));
    let fetched = cache.fetch(&config.url_target, config.use_cache).await;
    spinner.finish_and_clear();
    let path = fetched?;

    let provider = GeneOntologyProvider::from_path(&path, config.include_obsolete)?;
    let size = std::fs::metadata(&path)?.len();

    println!("{} Cached {}", "✓".green(), path.display());
    println!("  Size:    {}", format_bytes(size));
    println!("  Terms:   {}", provider.graph().node_count());
    if let Some(version) = provider.data_version() {
        println!("  Version: {}", version);
    }

    Ok(())
}
