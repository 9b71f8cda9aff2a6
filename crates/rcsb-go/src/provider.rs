//! Accessor API over a loaded GO release.
//!
//! The graph is directed child → parent, so "lineage" here walks *up* the
//! ontology: a term's lineage is the term plus everything it `is_a` /
//! `part_of` / `regulates`, transitively.

use crate::cache::{decode_resource, read_resource, ResourceCache};
use crate::config::ProviderConfig;
use crate::graph::{EdgeTriple, GoGraph};
use crate::models::{GoTerm, Namespace, Synonym};
use crate::parser::OboParser;
use crate::{GoError, Result};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use tracing::{debug, info};

/// A complete GO release has well over this many live terms. The count moves
/// as terms are obsoleted; see http://geneontology.org/stats.html
pub const MIN_EXPECTED_TERMS: usize = 40_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OntologyStats {
    pub nodes: usize,
    pub edges: usize,
    pub is_dag: bool,
    pub roots: Vec<String>,
    pub data_version: Option<String>,
    /// Term count keyed by namespace name
    pub namespaces: BTreeMap<String, usize>,
}

#[derive(Debug)]
pub struct GeneOntologyProvider {
    graph: GoGraph,
}

impl GeneOntologyProvider {
    /// Fetch (or reuse) the configured OBO release and build the graph
    pub async fn load(config: &ProviderConfig) -> Result<Self> {
        config.validate().map_err(GoError::Validation)?;

        let content = match &config.local_obo_path {
            Some(path) => {
                info!(path = %path.display(), "Loading GO ontology from local file");
                let bytes = tokio::fs::read(path).await.map_err(|e| {
                    std::io::Error::new(
                        e.kind(),
                        format!("Failed to read local ontology file '{}': {}", path.display(), e),
                    )
                })?;
                decode_resource(path, &bytes)?
            },
            None => {
                let cache = ResourceCache::new(&config.cache_dir, config.timeout_secs)?;
                let path = cache.fetch(&config.url_target, config.use_cache).await?;
                let bytes = tokio::fs::read(&path).await?;
                decode_resource(&path, &bytes)?
            },
        };

        Self::from_obo(&content, config.include_obsolete, config.parse_limit)
    }

    pub fn from_obo_str(content: &str, include_obsolete: bool) -> Result<Self> {
        Self::from_obo(content, include_obsolete, None)
    }

    pub fn from_path(path: impl AsRef<Path>, include_obsolete: bool) -> Result<Self> {
        let content = read_resource(path.as_ref())?;
        Self::from_obo(&content, include_obsolete, None)
    }

    fn from_obo(content: &str, include_obsolete: bool, limit: Option<usize>) -> Result<Self> {
        let parsed = OboParser::parse(content, limit)?;
        let graph = GoGraph::build(parsed, include_obsolete);
        info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "Reading GO graph nodes and edges"
        );
        Ok(GeneOntologyProvider { graph })
    }

    pub fn graph(&self) -> &GoGraph {
        &self.graph
    }

    /// True when the graph is acyclic and has more than `min_nodes` terms
    pub fn test_cache(&self, min_nodes: usize) -> bool {
        info!(
            nodes = self.graph.node_count(),
            edges = self.graph.edge_count(),
            "Checking GO graph"
        );
        self.graph.node_count() > min_nodes && self.graph.is_dag()
    }

    /// [`test_cache`](Self::test_cache) against a full GO release
    pub fn is_complete(&self) -> bool {
        self.test_cache(MIN_EXPECTED_TERMS)
    }

    pub fn exists(&self, go_id: &str) -> bool {
        self.graph.contains(go_id)
    }

    pub fn node(&self, go_id: &str) -> Option<&GoTerm> {
        self.graph.term(go_id)
    }

    /// Like [`node`](Self::node), but a missing term is an error
    pub fn require(&self, go_id: &str) -> Result<&GoTerm> {
        self.node(go_id)
            .ok_or_else(|| GoError::TermNotFound(go_id.to_string()))
    }

    pub fn name(&self, go_id: &str) -> Option<&str> {
        let name = self.node(go_id).map(|t| t.name.as_str());
        if name.is_none() {
            debug!(go_id, "No name for unknown GO id");
        }
        name
    }

    pub fn namespace(&self, go_id: &str) -> Option<Namespace> {
        self.node(go_id).map(|t| t.namespace)
    }

    pub fn definition(&self, go_id: &str) -> Option<&str> {
        self.node(go_id).and_then(|t| t.definition.as_deref())
    }

    pub fn synonyms(&self, go_id: &str) -> &[Synonym] {
        self.node(go_id).map(|t| t.synonyms.as_slice()).unwrap_or_default()
    }

    /// Primary id for a primary or secondary (`alt_id`) identifier
    pub fn resolve<'a>(&'a self, go_id: &'a str) -> Option<&'a str> {
        self.graph.resolve(go_id)
    }

    /// `data-version` header of the loaded release
    pub fn data_version(&self) -> Option<&str> {
        self.graph.header().data_version.as_deref()
    }

    /// Terms without parents; the three namespace roots for a full release
    pub fn root_nodes(&self) -> Vec<&str> {
        self.graph.roots()
    }

    /// `(child, parent, relationship)` for each outgoing edge of `go_id`
    pub fn adjacent_parents(&self, go_id: &str) -> Vec<EdgeTriple> {
        let edges = self.graph.out_edges(go_id);
        for (child, parent, rel) in &edges {
            debug!(
                "{} {:?} - {} -> {} {:?}",
                child,
                self.name(child),
                rel,
                parent,
                self.name(parent)
            );
        }
        edges
    }

    /// Direct children (terms with an edge pointing at `go_id`)
    pub fn children(&self, go_id: &str) -> Vec<&str> {
        self.graph.children(go_id)
    }

    /// Direct parents
    pub fn parents(&self, go_id: &str) -> Vec<&str> {
        self.graph.parents(go_id)
    }

    /// `(id, name)` for `go_id` (first, when `include_self`) followed by all of
    /// its ancestors sorted by id. Unknown ids give an empty list.
    pub fn lineage(&self, go_id: &str, include_self: bool) -> Vec<(&str, &str)> {
        let Some(term) = self.node(go_id) else {
            debug!(go_id, "Lineage requested for unknown GO id");
            return Vec::new();
        };

        let mut lineage = Vec::new();
        if include_self {
            lineage.push((term.id.as_str(), term.name.as_str()));
        }
        lineage.extend(self.graph.ancestors(go_id).into_iter().filter_map(|id| {
            let name = self.name(id)?;
            Some((id, name))
        }));
        lineage
    }

    /// Union of the lineages of `go_ids`, sorted by id without duplicates.
    /// Unknown ids contribute nothing.
    pub fn unique_lineage<S: AsRef<str>>(&self, go_ids: &[S], include_self: bool) -> Vec<(&str, &str)> {
        let mut ids = BTreeSet::new();
        for go_id in go_ids {
            let go_id = go_id.as_ref();
            let Some(term) = self.node(go_id) else {
                debug!(go_id, "Skipping unknown GO id");
                continue;
            };
            if include_self {
                ids.insert(term.id.as_str());
            }
            ids.extend(self.graph.ancestors(go_id));
        }

        ids.into_iter()
            .filter_map(|id| Some((id, self.name(id)?)))
            .collect()
    }

    /// Every term id in file order
    pub fn full_node_list(&self) -> Vec<&str> {
        self.graph.node_ids().collect()
    }

    pub fn stats(&self) -> OntologyStats {
        let mut namespaces: BTreeMap<String, usize> = Namespace::ALL
            .iter()
            .map(|ns| (ns.as_str().to_string(), 0))
            .collect();
        for term in self.graph.terms() {
            *namespaces.entry(term.namespace.as_str().to_string()).or_default() += 1;
        }

        OntologyStats {
            nodes: self.graph.node_count(),
            edges: self.graph.edge_count(),
            is_dag: self.graph.is_dag(),
            roots: self.root_nodes().into_iter().map(str::to_string).collect(),
            data_version: self.data_version().map(str::to_string),
            namespaces,
        }
    }
}
