//! Error types for the rcsb-go CLI
//!
//! Every variant is user-facing, with a hint on how to recover.

use rcsb_go::GoError;
use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Error, Debug)]
pub enum CliError {
    /// Identifier is not a term in the loaded ontology
    #[error("GO term not found: '{0}'. Check the identifier (e.g. 'GO:0008150') or refresh the ontology with 'rcsb-go fetch --no-cache'.")]
    TermNotFound(String),

    /// Ontology download failed
    #[error("Download failed: {0}. Check your internet connection and the --url value.")]
    Download(String),

    /// Ontology content could not be parsed
    #[error("Invalid ontology file: {0}. Run 'rcsb-go cache clear' and fetch again.")]
    InvalidOntology(String),

    /// Cache operation failed
    #[error("Cache error: {0}. Try running 'rcsb-go cache clear'.")]
    Cache(String),

    /// Configuration is missing or invalid
    #[error("Configuration error: {0}. Check your command-line flags and RCSB_GO_* environment variables.")]
    Config(String),

    /// Required file is missing
    #[error("File not found: '{0}'. Verify the file path exists and you have read permissions.")]
    FileNotFound(String),

    /// File system operation failed
    #[error("File operation failed: {0}. Check file permissions and disk space.")]
    Io(#[from] std::io::Error),

    /// JSON encoding failed
    #[error("Failed to write JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CliError {
    pub fn term_not_found(id: impl Into<String>) -> Self {
        Self::TermNotFound(id.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound(path.into())
    }
}

impl From<GoError> for CliError {
    fn from(err: GoError) -> Self {
        match err {
            GoError::TermNotFound(id) => Self::TermNotFound(id),
            GoError::Download(_) | GoError::HttpStatus { .. } => Self::Download(err.to_string()),
            GoError::Parse(msg) => Self::InvalidOntology(msg),
            GoError::Validation(msg) => Self::Config(msg),
            GoError::Cache(msg) => Self::Cache(msg),
            GoError::Io(e) => Self::Io(e),
            GoError::Serialization(e) => Self::Json(e),
            GoError::Common(e) => Self::Other(e.into()),
        }
    }
}
