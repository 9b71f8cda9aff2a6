//! Shared plumbing for the rcsb-go workspace
//!
//! Everything here is independent of the Gene Ontology itself:
//!
//! - **Error Handling**: [`CommonError`] and the [`Result`] alias
//! - **Logging**: `tracing` subscriber setup shared by the CLI and tools
//! - **Checksums**: sha256 digests used to validate cached downloads
//!
//! # Example
//!
//! ```no_run
//! use rcsb_go_common::checksum::sha256_file;
//!
//! fn digest(path: &str) -> rcsb_go_common::Result<()> {
//!     let digest = sha256_file(path)?;
//!     println!("{path}: {digest}");
//!     Ok(())
//! }
//! ```
#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod checksum;
pub mod error;
pub mod logging;

pub use error::{CommonError, Result};
