//! rcsb-go CLI Library
//!
//! Command-line access to the Gene Ontology.
//!
//! # Overview
//!
//! - **Cache**: Download a GO release once and reuse it (`rcsb-go fetch`, `rcsb-go cache`)
//! - **Lookup**: Inspect a term and its neighborhood (`rcsb-go term`, `children`, `parents`)
//! - **Lineage**: All ancestors of one or more terms (`rcsb-go lineage`)
//! - **Export**: Flat tree-node list as JSON (`rcsb-go export`)

pub mod commands;
pub mod config;
pub mod error;
pub mod progress;

pub use error::{CliError, Result};

use clap::{Parser, Subcommand};
use rcsb_go::DEFAULT_GO_URL;
use std::path::PathBuf;

/// rcsb-go - Gene Ontology lookup and lineage tool
#[derive(Parser, Debug)]
#[command(name = "rcsb-go")]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory for cached ontology files [default: <user cache dir>/rcsb-go]
    #[arg(long, env = "RCSB_GO_CACHE_DIR", global = true)]
    pub cache_dir: Option<PathBuf>,

    /// OBO release to download
    #[arg(long, env = "RCSB_GO_URL", default_value = DEFAULT_GO_URL, global = true)]
    pub url: String,

    /// Read a local OBO file instead of the cached download
    #[arg(long, env = "RCSB_GO_OBO_FILE", global = true)]
    pub obo_file: Option<PathBuf>,

    /// Download again even if a cached copy exists
    #[arg(long, global = true)]
    pub no_cache: bool,

    /// Keep obsolete terms in the graph
    #[arg(long, global = true)]
    pub include_obsolete: bool,

    /// Print the CLI reference as markdown
    #[arg(long, hide = true)]
    pub markdown_help: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Download the ontology into the cache
    Fetch,

    /// Show ontology statistics
    Info {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a single term
    Term {
        /// GO identifier (e.g., "GO:0008150"); alt ids are accepted
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List a term and all of its ancestors
    Lineage {
        /// One or more GO identifiers; several ids print the merged lineage
        #[arg(required = true)]
        ids: Vec<String>,

        /// Leave the queried terms out of the result
        #[arg(long)]
        exclude_self: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the direct children of a term
    Children {
        /// GO identifier
        id: String,
    },

    /// List the direct parents of a term
    Parents {
        /// GO identifier
        id: String,
    },

    /// List the root terms
    Roots,

    /// Export the tree node list as JSON
    Export {
        /// File with one GO id per line; exports every term when omitted
        #[arg(short, long)]
        filter_file: Option<PathBuf>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Manage cached ontology files
    Cache {
        #[command(subcommand)]
        command: CacheCommand,
    },
}

/// Cache management subcommands
#[derive(Subcommand, Debug)]
pub enum CacheCommand {
    /// List cached files
    List,

    /// Remove all cached files
    Clear,
}
