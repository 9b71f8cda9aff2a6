//! Turns global CLI flags into a [`ProviderConfig`]

use crate::error::{CliError, Result};
use crate::Cli;
use rcsb_go::ProviderConfig;
use std::path::PathBuf;

/// `<user cache dir>/rcsb-go`
pub fn default_cache_dir() -> Result<PathBuf> {
    dirs::cache_dir()
        .map(|dir| dir.join("rcsb-go"))
        .ok_or_else(|| CliError::config("Could not determine cache directory"))
}

pub fn cache_dir(cli: &Cli) -> Result<PathBuf> {
    match &cli.cache_dir {
        Some(dir) => Ok(dir.clone()),
        None => default_cache_dir(),
    }
}

/// Flags win over `RCSB_GO_*` environment settings, which win over defaults
pub fn provider_config(cli: &Cli) -> Result<ProviderConfig> {
    let mut config = ProviderConfig::from_env();
    config.url_target = cli.url.clone();
    config.cache_dir = cache_dir(cli)?;
    config.use_cache = config.use_cache && !cli.no_cache;
    config.include_obsolete = config.include_obsolete || cli.include_obsolete;
    if let Some(path) = &cli.obo_file {
        config.local_obo_path = Some(path.clone());
    }

    config.validate().map_err(CliError::Config)?;
    Ok(config)
}
