// Gene Ontology provider configuration

use crate::cache::file_name_for_url;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// go-basic.obo is filtered to be acyclic and never crosses namespaces.
/// The unfiltered alternative is http://purl.obolibrary.org/obo/go.obo; its
/// extra edge types (`starts_during`, `has_input`, ...) load as
/// [`RelationshipType::Other`](crate::models::RelationshipType::Other).
pub const DEFAULT_GO_URL: &str = "http://purl.obolibrary.org/obo/go/go-basic.obo";

pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Where the ontology comes from and how it is cached
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// URL of the OBO release to fetch
    pub url_target: String,

    /// Directory holding the cached OBO file
    pub cache_dir: PathBuf,

    /// Reuse a previously fetched file instead of downloading again
    pub use_cache: bool,

    /// HTTP timeout in seconds
    pub timeout_secs: u64,

    /// Read this OBO file directly and skip the cache entirely
    pub local_obo_path: Option<PathBuf>,

    /// Keep terms flagged `is_obsolete: true` in the graph
    pub include_obsolete: bool,

    /// Parse limit for testing (None = parse all)
    pub parse_limit: Option<usize>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        ProviderConfig {
            url_target: DEFAULT_GO_URL.to_string(),
            cache_dir: PathBuf::from("."),
            use_cache: true,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            local_obo_path: None,
            include_obsolete: false,
            parse_limit: None,
        }
    }
}

impl ProviderConfig {
    pub fn builder() -> ProviderConfigBuilder {
        ProviderConfigBuilder::default()
    }

    /// Path the OBO file is cached at
    pub fn cached_file_path(&self) -> Result<PathBuf, String> {
        Ok(self.cache_dir.join(file_name_for_url(&self.url_target)?))
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.local_obo_path.is_none() {
            if self.url_target.trim().is_empty() {
                return Err("Ontology URL cannot be empty".to_string());
            }
            file_name_for_url(&self.url_target)?;
        }

        if self.timeout_secs == 0 {
            return Err("Timeout must be greater than 0".to_string());
        }

        if self.parse_limit == Some(0) {
            return Err("Parse limit must be greater than 0".to_string());
        }

        Ok(())
    }

    /// Load configuration from environment variables
    ///
    /// - `RCSB_GO_URL`
    /// - `RCSB_GO_CACHE_DIR`
    /// - `RCSB_GO_USE_CACHE` (true/false)
    /// - `RCSB_GO_TIMEOUT_SECS`
    /// - `RCSB_GO_OBO_FILE`
    /// - `RCSB_GO_INCLUDE_OBSOLETE` (true/false)
    /// - `RCSB_GO_PARSE_LIMIT`
    pub fn from_env() -> Self {
        let default = Self::default();
        let flag = |key: &str, fallback: bool| {
            std::env::var(key)
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(fallback)
        };

        ProviderConfig {
            url_target: std::env::var("RCSB_GO_URL").unwrap_or(default.url_target),
            cache_dir: std::env::var("RCSB_GO_CACHE_DIR")
                .map(PathBuf::from)
                .unwrap_or(default.cache_dir),
            use_cache: flag("RCSB_GO_USE_CACHE", default.use_cache),
            timeout_secs: std::env::var("RCSB_GO_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(default.timeout_secs),
            local_obo_path: std::env::var("RCSB_GO_OBO_FILE").ok().map(PathBuf::from),
            include_obsolete: flag("RCSB_GO_INCLUDE_OBSOLETE", default.include_obsolete),
            parse_limit: std::env::var("RCSB_GO_PARSE_LIMIT")
                .ok()
                .and_then(|s| s.parse().ok()),
        }
    }
}

#[derive(Debug, Default)]
pub struct ProviderConfigBuilder {
    url_target: Option<String>,
    cache_dir: Option<PathBuf>,
    use_cache: Option<bool>,
    timeout_secs: Option<u64>,
    local_obo_path: Option<PathBuf>,
    include_obsolete: Option<bool>,
    parse_limit: Option<usize>,
}

impl ProviderConfigBuilder {
    pub fn url_target(mut self, url: impl Into<String>) -> Self {
        self.url_target = Some(url.into());
        self
    }

    pub fn cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = Some(dir.into());
        self
    }

    pub fn use_cache(mut self, use_cache: bool) -> Self {
        self.use_cache = Some(use_cache);
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    pub fn local_obo_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.local_obo_path = Some(path.into());
        self
    }

    pub fn include_obsolete(mut self, include: bool) -> Self {
        self.include_obsolete = Some(include);
        self
    }

    pub fn parse_limit(mut self, limit: usize) -> Self {
        self.parse_limit = Some(limit);
        self
    }

    pub fn build(self) -> ProviderConfig {
        let default = ProviderConfig::default();

        ProviderConfig {
            url_target: self.url_target.unwrap_or(default.url_target),
            cache_dir: self.cache_dir.unwrap_or(default.cache_dir),
            use_cache: self.use_cache.unwrap_or(default.use_cache),
            timeout_secs: self.timeout_secs.unwrap_or(default.timeout_secs),
            local_obo_path: self.local_obo_path,
            include_obsolete: self.include_obsolete.unwrap_or(default.include_obsolete),
            parse_limit: self.parse_limit,
        }
    }
}
