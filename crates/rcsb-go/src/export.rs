// Flat tree-node export of the GO hierarchy

use crate::provider::GeneOntologyProvider;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{info, warn};

/// One node of the exported tree. Root terms carry no `parents` key.
///
/// `parents` lists each direct parent once, even when the pair is joined by
/// several edges (say `is_a` and `part_of`). A per-edge layout would repeat it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parents: Option<Vec<String>>,
}

impl GeneOntologyProvider {
    /// Export the terms in `filter` together with all of their ancestors, so
    /// the result is a closed tree. A missing or empty filter exports every
    /// term. Sorted by id.
    pub fn export_tree_node_list(&self, filter: Option<&[String]>) -> Vec<TreeNode> {
        let full = self.full_node_list();
        info!("Full GO ID list length {}", full.len());

        let selected: Vec<&str> = match filter {
            Some(ids) if !ids.is_empty() => {
                let mut selected = Vec::with_capacity(ids.len());
                for id in ids {
                    if self.exists(id) {
                        selected.push(id.as_str());
                    } else {
                        warn!(go_id = %id, "Not in current ontology");
                    }
                }
                selected
            },
            _ => full,
        };
        info!("Filtered GO ID list length {}", selected.len());

        let mut ids = BTreeSet::new();
        for id in selected {
            ids.insert(id);
            ids.extend(self.graph().ancestors(id));
        }

        ids.into_iter()
            .filter_map(|id| {
                let term = self.node(id)?;
                let parents = self.parents(id);
                let parents = if parents.is_empty() {
                    info!("Node {} ({}) has no parents", id, term.name);
                    None
                } else {
                    Some(parents.into_iter().map(str::to_string).collect())
                };
                Some(TreeNode {
                    id: term.id.clone(),
                    name: term.name.clone(),
                    parents,
                })
            })
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"
[Term]
id: GO:0008150
name: biological_process
namespace: biological_process

[Term]
id: GO:0005575
name: cellular_component
namespace: cellular_component

[Term]
id: GO:0009987
name: cellular process
namespace: biological_process
is_a: GO:0008150 ! biological_process

[Term]
id: GO:0044237
name: cellular metabolic process
namespace: biological_process
is_a: GO:0009987 ! cellular process
relationship: part_of GO:0009987 ! cellular process
"#;

    fn provider() -> GeneOntologyProvider {
        GeneOntologyProvider::from_obo_str(FIXTURE, false).unwrap()
    }

    #[test]
    fn test_export_all() {
        let nodes = provider().export_tree_node_list(None);
        let ids: Vec<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["GO:0005575", "GO:0008150", "GO:0009987", "GO:0044237"]);
        assert!(nodes[0].parents.is_none());
        // is_a and part_of to the same parent collapse to one entry
        assert_eq!(nodes[3].parents, Some(vec!["GO:0009987".to_string()]));
    }

    #[test]
    fn test_export_filtered_adds_ancestors() {
        let filter = vec!["GO:0044237".to_string(), "GO:9999999".to_string()];
        let nodes = provider().export_tree_node_list(Some(filter.as_slice()));
        let ids: Vec<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["GO:0008150", "GO:0009987", "GO:0044237"]);
    }

    #[test]
    fn test_empty_filter_exports_everything() {
        assert_eq!(provider().export_tree_node_list(Some(&[][..])).len(), 4);
    }

    #[test]
    fn test_root_serializes_without_parents() {
        let nodes = provider().export_tree_node_list(None);
        let root = serde_json::to_value(&nodes[1]).unwrap();
        assert_eq!(
            root,
            serde_json::json!({"id": "GO:0008150", "name": "biological_process"})
        );
        let child = serde_json::to_value(&nodes[2]).unwrap();
        assert_eq!(child["parents"], serde_json::json!(["GO:0008150"]));
    }
}
