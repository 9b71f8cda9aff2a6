//! `rcsb-go roots` command implementation

use crate::commands::load_provider;
use crate::error::Result;
use crate::Cli;

pub async fn run(cli: &Cli) -> Result<()> {
    let provider = load_provider(cli).await?;
    for root in provider.root_nodes() {
        println!("{}\t{}", root, provider.name(root).unwrap_or_default());
    }
    Ok(())
}
