//! GO DAG held in a `petgraph` StableGraph.
//!
//! Every edge points child → parent and carries its [`RelationshipType`].
//! Two terms can be joined by several edges when more than one relationship
//! links them (e.g. `is_a` and `part_of`), so edge queries return triples
//! rather than bare neighbor ids.

use crate::models::{GoTerm, RelationshipType};
use crate::parser::{OboHeader, ParsedObo};
use petgraph::algo::is_cyclic_directed;
use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::visit::{Bfs, EdgeRef};
use petgraph::Direction;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info, warn};

/// `(child, parent, relationship)`
pub type EdgeTriple = (String, String, RelationshipType);

#[derive(Debug, Default)]
pub struct GoGraph {
    graph: StableDiGraph<GoTerm, RelationshipType>,
    index: HashMap<String, NodeIndex>,
    /// alt_id -> primary id
    alt_ids: HashMap<String, String>,
    header: OboHeader,
}

impl GoGraph {
    /// Build the DAG from parsed OBO content.
    ///
    /// Obsolete terms are left out unless `include_obsolete` is set. Edges
    /// whose endpoints are not in the graph are dropped.
    pub fn build(parsed: ParsedObo, include_obsolete: bool) -> Self {
        let mut graph = StableDiGraph::with_capacity(parsed.terms.len(), parsed.relationships.len());
        let mut index = HashMap::with_capacity(parsed.terms.len());
        let mut alt_ids = HashMap::new();
        let mut obsolete = 0usize;

        for term in parsed.terms {
            if term.is_obsolete && !include_obsolete {
                obsolete += 1;
                continue;
            }
            if index.contains_key(&term.id) {
                warn!(go_id = %term.id, "Duplicate term stanza, keeping the first");
                continue;
            }
            for alt in &term.alt_ids {
                alt_ids.insert(alt.clone(), term.id.clone());
            }
            let id = term.id.clone();
            let idx = graph.add_node(term);
            index.insert(id, idx);
        }

        let mut dangling = 0usize;
        for rel in parsed.relationships {
            let (Some(&child), Some(&parent)) = (index.get(&rel.child), index.get(&rel.parent))
            else {
                if index.contains_key(&rel.child) {
                    debug!(child = %rel.child, parent = %rel.parent, "Dropping edge to unknown parent");
                    dangling += 1;
                }
                continue;
            };
            graph.add_edge(child, parent, rel.relationship);
        }

        info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            obsolete_skipped = obsolete,
            dangling_edges = dangling,
            "Built GO graph"
        );

        GoGraph {
            graph,
            index,
            alt_ids,
            header: parsed.header,
        }
    }

    pub fn header(&self) -> &OboHeader {
        &self.header
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_dag(&self) -> bool {
        !is_cyclic_directed(&self.graph)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn term(&self, id: &str) -> Option<&GoTerm> {
        self.index.get(id).and_then(|&idx| self.graph.node_weight(idx))
    }

    /// Map an id or a secondary (alt) id onto the id of a term in the graph
    pub fn resolve<'a>(&'a self, id: &'a str) -> Option<&'a str> {
        if self.contains(id) {
            return Some(id);
        }
        self.alt_ids
            .get(id)
            .filter(|primary| self.contains(primary))
            .map(String::as_str)
    }

    /// Term ids in file order
    pub fn node_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.graph
            .node_indices()
            .filter_map(move |idx| self.graph.node_weight(idx))
            .map(|term| term.id.as_str())
    }

    pub fn terms(&self) -> impl Iterator<Item = &GoTerm> + '_ {
        self.graph
            .node_indices()
            .filter_map(move |idx| self.graph.node_weight(idx))
    }

    /// Terms without parents, sorted by id
    pub fn roots(&self) -> Vec<&str> {
        let mut roots: Vec<&str> = self
            .graph
            .node_indices()
            .filter(|&idx| {
                self.graph
                    .neighbors_directed(idx, Direction::Outgoing)
                    .next()
                    .is_none()
            })
            .filter_map(|idx| self.graph.node_weight(idx))
            .map(|term| term.id.as_str())
            .collect();
        roots.sort_unstable();
        roots
    }

    /// Outgoing edges of `id` in file order; empty for unknown ids
    pub fn out_edges(&self, id: &str) -> Vec<EdgeTriple> {
        let Some(&idx) = self.index.get(id) else {
            return Vec::new();
        };
        let mut edges: Vec<_> = self.graph.edges_directed(idx, Direction::Outgoing).collect();
        edges.sort_by_key(|edge| edge.id());

        edges
            .into_iter()
            .filter_map(|edge| {
                let parent = self.graph.node_weight(edge.target())?;
                Some((id.to_string(), parent.id.clone(), edge.weight().clone()))
            })
            .collect()
    }

    /// Direct parents, deduplicated, in edge order
    pub fn parents(&self, id: &str) -> Vec<&str> {
        self.neighbors(id, Direction::Outgoing)
    }

    /// Direct children, deduplicated, in edge order
    pub fn children(&self, id: &str) -> Vec<&str> {
        self.neighbors(id, Direction::Incoming)
    }

    fn neighbors(&self, id: &str, dir: Direction) -> Vec<&str> {
        let Some(&idx) = self.index.get(id) else {
            return Vec::new();
        };
        let mut edges: Vec<_> = self.graph.edges_directed(idx, dir).collect();
        edges.sort_by_key(|edge| edge.id());

        let mut seen = HashSet::new();
        edges
            .into_iter()
            .map(|edge| {
                if edge.source() == idx {
                    edge.target()
                } else {
                    edge.source()
                }
            })
            .filter(|other| seen.insert(*other))
            .filter_map(|other| self.graph.node_weight(other))
            .map(|term| term.id.as_str())
            .collect()
    }

    /// Every term reachable from `id` along child → parent edges, excluding
    /// `id` itself, sorted by id
    pub fn ancestors(&self, id: &str) -> Vec<&str> {
        let Some(&start) = self.index.get(id) else {
            return Vec::new();
        };

        let mut bfs = Bfs::new(&self.graph, start);
        let mut found = Vec::new();
        while let Some(idx) = bfs.next(&self.graph) {
            if idx == start {
                continue;
            }
            if let Some(term) = self.graph.node_weight(idx) {
                found.push(term.id.as_str());
            }
        }
        found.sort_unstable();
        found
    }
}
