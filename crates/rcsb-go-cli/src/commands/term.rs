//! `rcsb-go term` command implementation

use crate::commands::{load_provider, resolve_id};
use crate::error::Result;
use crate::Cli;
use colored::Colorize;

pub async fn run(cli: &Cli, id: &str, json: bool) -> Result<()> {
    let provider = load_provider(cli).await?;
    let primary = resolve_id(&provider, id)?;
    let term = provider.require(primary)?;

    if json {
        println!("{}", serde_json::to_string_pretty(term)?);
        return Ok(());
    }

    println!("{} {}", term.id.green().bold(), term.name);
    if primary != id {
        println!("  ({} is an alternate id)", id);
    }
    println!("  Namespace:  {} ({})", term.namespace, term.namespace.abbreviation());
    if let Some(definition) = &term.definition {
        println!("  Definition: {}", definition);
    }
    if term.is_obsolete {
        println!("  {}", "OBSOLETE".red());
    }

    if !term.synonyms.is_empty() {
        println!("  Synonyms:");
        for synonym in &term.synonyms {
            println!("    {} [{}]", synonym.text, synonym.scope);
        }
    }

    let edges = provider.adjacent_parents(primary);
    if !edges.is_empty() {
        println!("  Parents:");
        for (_, parent, relationship) in &edges {
            println!(
                "    {} {} {}",
                relationship.to_string().dimmed(),
                parent,
                provider.name(parent).unwrap_or_default()
            );
        }
    }
    println!("  Children:   {}", provider.children(primary).len());

    Ok(())
}
