//! `rcsb-go export` command implementation
//!
//! Writes the tree node list as a JSON array. The optional filter file holds
//! one GO id per line; blank lines and `#` comments are ignored.

use crate::commands::load_provider;
use crate::error::{CliError, Result};
use crate::Cli;
use colored::Colorize;
use std::path::{Path, PathBuf};

pub async fn run(cli: &Cli, filter_file: Option<&Path>, output: Option<&PathBuf>) -> Result<()> {
    let filter = filter_file.map(read_filter).transpose()?;
    let provider = load_provider(cli).await?;

    let nodes = provider.export_tree_node_list(filter.as_deref());
    let json = serde_json::to_string_pretty(&nodes)?;

    match output {
        Some(path) => {
            tokio::fs::write(path, json).await?;
            println!("{} Exported {} nodes to {}", "✓".green(), nodes.len(), path.display());
        },
        None => println!("{}", json),
    }

    Ok(())
}

fn read_filter(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => CliError::file_not_found(path.display().to_string()),
        _ => CliError::Io(e),
    })?;
    Ok(parse_filter(&content))
}

fn parse_filter(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_filter() {
        let ids = parse_filter("# kojic acid\nGO:2001317\n\n  GO:0005737  \n");
        assert_eq!(ids, vec!["GO:2001317", "GO:0005737"]);
        assert!(parse_filter("").is_empty());
    }

    #[test]
    fn test_missing_filter_file() {
        let err = read_filter(Path::new("/nonexistent/ids.txt")).unwrap_err();
        assert!(matches!(err, CliError::FileNotFound(_)));
    }
}
