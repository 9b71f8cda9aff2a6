//! `rcsb-go lineage` command implementation
//!
//! One id prints that term's lineage, several print the merged, sorted union.

use crate::commands::{load_provider, resolve_id};
use crate::error::Result;
use crate::Cli;
use serde::Serialize;

#[derive(Serialize)]
struct LineageEntry<'a> {
    id: &'a str,
    name: &'a str,
}

pub async fn run(cli: &Cli, ids: &[String], exclude_self: bool, json: bool) -> Result<()> {
    let provider = load_provider(cli).await?;
    let primary = ids
        .iter()
        .map(|id| resolve_id(&provider, id))
        .collect::<Result<Vec<_>>>()?;

    let lineage = match primary.as_slice() {
        [single] => provider.lineage(single, !exclude_self),
        many => provider.unique_lineage(many, !exclude_self),
    };

    if json {
        let entries: Vec<LineageEntry> = lineage
            .iter()
            .map(|&(id, name)| LineageEntry { id, name })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        for (id, name) in lineage {
            println!("{}\t{}", id, name);
        }
    }

    Ok(())
}
