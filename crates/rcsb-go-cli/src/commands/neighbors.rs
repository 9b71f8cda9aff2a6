//! `rcsb-go children` and `rcsb-go parents` command implementations

use crate::commands::{load_provider, resolve_id};
use crate::error::Result;
use crate::Cli;

pub async fn children(cli: &Cli, id: &str) -> Result<()> {
    let provider = load_provider(cli).await?;
    let primary = resolve_id(&provider, id)?;
    for child in provider.children(primary) {
        println!("{}\t{}", child, provider.name(child).unwrap_or_default());
    }
    Ok(())
}

pub async fn parents(cli: &Cli, id: &str) -> Result<()> {
    let provider = load_provider(cli).await?;
    let primary = resolve_id(&provider, id)?;
    for parent in provider.parents(primary) {
        println!("{}\t{}", parent, provider.name(parent).unwrap_or_default());
    }
    Ok(())
}
