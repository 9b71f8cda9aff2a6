//! `rcsb-go cache` command implementation

use crate::config::cache_dir;
use crate::error::Result;
use crate::progress::format_bytes;
use crate::Cli;
use colored::Colorize;
use rcsb_go::ResourceCache;
use rcsb_go::config::DEFAULT_TIMEOUT_SECS;

fn open(cli: &Cli) -> Result<ResourceCache> {
    Ok(ResourceCache::new(cache_dir(cli)?, DEFAULT_TIMEOUT_SECS)?)
}

/// Show cached ontology files
pub fn list(cli: &Cli) -> Result<()> {
    let cache = open(cli)?;
    let entries = cache.entries()?;

    if entries.is_empty() {
        println!("No cached ontology files in {}", cache.dir().display());
        println!("Run 'rcsb-go fetch' to download one.");
        return Ok(());
    }

    println!("{}", "Cached Files:".cyan().bold());
    println!();

    for entry in &entries {
        println!("{}", entry.file_name.green());
        println!("  URL:      {}", entry.url);
        println!("  Size:     {}", format_bytes(entry.size));
        println!("  Checksum: {}", entry.sha256.get(..16).unwrap_or(entry.sha256.as_str()));
        println!("  Fetched:  {}", entry.fetched_at);
        println!();
    }

    let total: u64 = entries.iter().map(|e| e.size).sum();
    println!("{}", "Summary:".cyan().bold());
    println!("  Total files: {}", entries.len());
    println!("  Total size:  {}", format_bytes(total));
    println!("  Cache dir:   {}", cache.dir().display());

    Ok(())
}

/// Remove every cached file
pub fn clear(cli: &Cli) -> Result<()> {
    let cache = open(cli)?;
    let size: u64 = cache.entries()?.iter().map(|e| e.size).sum();
    let count = cache.clear()?;

    println!("{} Cleared {} file(s)", "✓".green(), count);
    println!("  Freed: {}", format_bytes(size));
    Ok(())
}
