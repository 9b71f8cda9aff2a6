//! CLI command implementations
//!
//! Each subcommand has its own module with a `run` function.

pub mod cache;
pub mod export;
pub mod fetch;
pub mod info;
pub mod lineage;
pub mod neighbors;
pub mod roots;
pub mod term;

use crate::error::{CliError, Result};
use crate::progress::create_spinner;
use crate::Cli;
use rcsb_go::GeneOntologyProvider;

/// Load the ontology the global flags point at
pub async fn load_provider(cli: &Cli) -> Result<GeneOntologyProvider> {
    let config = crate::config::provider_config(cli)?;
    let spinner = create_spinner("Loading Gene Ontology...");
    let result = GeneOntologyProvider::load(&config).await;
    spinner.finish_and_clear();
    Ok(result?)
}

/// Map a primary or alt id onto the primary id, or fail with `TermNotFound`
pub(crate) fn resolve_id<'a>(provider: &'a GeneOntologyProvider, id: &'a str) -> Result<&'a str> {
    provider
        .resolve(id)
        .ok_or_else(|| CliError::term_not_found(id))
}
