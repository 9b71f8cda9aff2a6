//! Utilities for reading Gene Ontology (GO) OBO releases and answering
//! lineage questions about GO terms.
//!
//! GO is a directed acyclic graph spanning three namespaces:
//! - Biological Process (BP)
//! - Molecular Function (MF)
//! - Cellular Component (CC)
//!
//! The crate is layered the same way the data flows:
//! - [`cache`]: fetch the OBO file once and keep it on disk
//! - [`parser`]: OBO format to terms and relationships
//! - [`graph`]: `petgraph` DAG with edges pointing child → parent
//! - [`provider`]: [`GeneOntologyProvider`], the accessor API
//! - [`export`]: flat tree-node list for downstream indexing
//!
//! # Example
//!
//! ```no_run
//! use rcsb_go::{GeneOntologyProvider, ProviderConfig};
//!
//! #[tokio::main]
//! async fn main() -> rcsb_go::Result<()> {
//!     let config = ProviderConfig::builder().cache_dir("./go-cache").build();
//!     let provider = GeneOntologyProvider::load(&config).await?;
//!
//!     assert_eq!(provider.name("GO:0008150"), Some("biological_process"));
//!     for (id, name) in provider.lineage("GO:2001317", true) {
//!         println!("{id}\t{name}");
//!     }
//!     Ok(())
//! }
//! ```
#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod cache;
pub mod config;
pub mod export;
pub mod graph;
pub mod models;
pub mod parser;
pub mod provider;

pub use cache::{CacheEntry, ResourceCache};
pub use config::{ProviderConfig, DEFAULT_GO_URL};
pub use export::TreeNode;
pub use graph::GoGraph;
pub use models::{GoRelationship, GoTerm, Namespace, RelationshipType, Synonym, SynonymScope};
pub use parser::{OboHeader, OboParser, ParsedObo};
pub use provider::{GeneOntologyProvider, OntologyStats, MIN_EXPECTED_TERMS};

/// Result type for GO operations
pub type Result<T> = std::result::Result<T, GoError>;

#[derive(Debug, thiserror::Error)]
pub enum GoError {
    #[error("Download error: {0}")]
    Download(#[from] reqwest::Error),

    #[error("HTTP {status} fetching {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("GO term not found: {0}")]
    TermNotFound(String),

    #[error("Cache error: {0}")]
    Cache(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Common(#[from] rcsb_go_common::CommonError),
}

impl From<std::num::ParseIntError> for GoError {
    fn from(err: std::num::ParseIntError) -> Self {
        GoError::Parse(err.to_string())
    }
}
