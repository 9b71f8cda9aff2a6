//! `rcsb-go info` command implementation

use crate::commands::load_provider;
use crate::error::Result;
use crate::Cli;
use colored::Colorize;
use rcsb_go::MIN_EXPECTED_TERMS;

pub async fn run(cli: &Cli, json: bool) -> Result<()> {
    let provider = load_provider(cli).await?;
    let stats = provider.stats();

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("{}", "Gene Ontology:".cyan().bold());
    println!("  Version: {}", stats.data_version.as_deref().unwrap_or("unknown"));
    println!("  Terms:   {}", stats.nodes);
    println!("  Edges:   {}", stats.edges);
    println!("  Acyclic: {}", if stats.is_dag { "yes".green() } else { "no".red() });
    if stats.nodes <= MIN_EXPECTED_TERMS {
        println!(
            "  {} fewer than {} terms, this is not a complete release",
            "!".yellow(),
            MIN_EXPECTED_TERMS
        );
    }
    println!();

    println!("{}", "Namespaces:".cyan().bold());
    for (namespace, count) in &stats.namespaces {
        println!("  {:<20} {}", namespace, count);
    }
    println!();

    println!("{}", "Roots:".cyan().bold());
    for root in &stats.roots {
        println!("  {}\t{}", root, provider.name(root).unwrap_or_default());
    }

    Ok(())
}
