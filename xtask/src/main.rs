//! Build automation tasks for rcsb-go
//!
//! - `generate-cli-docs`: render the CLI reference from the clap definitions

use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build automation tasks for rcsb-go", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Generate the CLI reference as markdown
    GenerateCliDocs {
        /// Output file
        #[arg(short, long, default_value = "docs/cli.md")]
        output: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::GenerateCliDocs { output } => generate_cli_docs(&output)?,
    }

    Ok(())
}

fn generate_cli_docs(output: &Path) -> anyhow::Result<()> {
    println!("Generating CLI documentation...");

    let markdown = clap_markdown::help_markdown::<rcsb_go_cli::Cli>();

    let content = format!(
        r#"# rcsb-go CLI Reference

This documentation is generated from the CLI source code. Last updated: {}.

## Installation

```bash
cargo install --path crates/rcsb-go-cli
```

## Quick Start

```bash
# Download go-basic.obo into the cache
rcsb-go fetch

# Look up a term
rcsb-go term GO:2001317

# A term and all of its ancestors, as JSON
rcsb-go lineage GO:2001317 --json

# Tree node list for a set of terms
rcsb-go export --filter-file ids.txt --output tree.json
```

## Commands

{}

## Environment Variables

- `RCSB_GO_URL` - OBO release to download (default: `http://purl.obolibrary.org/obo/go/go-basic.obo`)
- `RCSB_GO_CACHE_DIR` - Cache directory (default: `<user cache dir>/rcsb-go`)
- `RCSB_GO_OBO_FILE` - Local OBO file to read instead of the cache
- `RCSB_GO_TIMEOUT_SECS` - HTTP timeout in seconds (default: `300`)
- `LOG_LEVEL`, `LOG_OUTPUT`, `LOG_FORMAT`, `LOG_DIR`, `LOG_FILTER` - Logging

---

*To update, run `cargo xtask generate-cli-docs`.*
"#,
        chrono::Utc::now().format("%Y-%m-%d"),
        markdown
    );

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(output, content)?;

    println!("✅ Generated CLI documentation at: {}", output.display());

    Ok(())
}
