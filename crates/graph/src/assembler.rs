use crate::error::{GraphError, Result};
use crate::source::RecordSource;
use crate::types::{Edge, EdgeKind, GraphStats, Node, ResourceGraph};
use atlas_model::{ResourceRef, ResourceType};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

/// Traversal options for one [`GraphAssembler::build`] call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphOptions {
    /// Resource types admitted into the graph; empty admits every type.
    pub allowed_types: BTreeSet<ResourceType>,

    /// Follow parent/child and membership relations.
    pub include_hierarchy: bool,

    /// Follow dependency relations in both directions.
    pub include_dependencies: bool,

    /// Breadth-first expansion levels outward from the root, 1..=10.
    pub max_hops: u32,

    /// Hard cap on emitted nodes; exceeding it sets `stats.truncated`.
    pub max_nodes: usize,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            allowed_types: BTreeSet::new(),
            include_hierarchy: true,
            include_dependencies: true,
            max_hops: 2,
            max_nodes: 100,
        }
    }
}

impl GraphOptions {
    pub const MAX_HOP_LIMIT: u32 = 10;

    pub fn validate(&self) -> Result<()> {
        if self.max_hops < 1 || self.max_hops > Self::MAX_HOP_LIMIT {
            return Err(GraphError::InvalidOptions(format!(
                "max_hops must be within 1..={}, got {}",
                Self::MAX_HOP_LIMIT,
                self.max_hops
            )));
        }
        if self.max_nodes == 0 {
            return Err(GraphError::InvalidOptions(
                "max_nodes must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    fn admits(&self, resource_type: ResourceType) -> bool {
        self.allowed_types.is_empty() || self.allowed_types.contains(&resource_type)
    }
}

/// Relation discovered during expansion, before edge materialization.
#[derive(Debug, Clone)]
struct Link {
    from: ResourceRef,
    to: ResourceRef,
    dependency_label: Option<String>,
}

impl Link {
    /// Structural link, always oriented parent -> child.
    fn structural(parent: ResourceRef, child: ResourceRef) -> Self {
        Link {
            from: parent,
            to: child,
            dependency_label: None,
        }
    }

    fn dependency(source: ResourceRef, target: ResourceRef, label: String) -> Self {
        Link {
            from: source,
            to: target,
            dependency_label: Some(label),
        }
    }

    fn into_edge(self) -> Edge {
        let (kind, label) = match self.dependency_label {
            Some(label) => (EdgeKind::Dependency, label),
            None if self.from.resource_type == self.to.resource_type => {
                (EdgeKind::Hierarchical, "parent of".to_string())
            }
            None => (EdgeKind::Containment, "contains".to_string()),
        };
        Edge {
            from: self.from.key(),
            to: self.to.key(),
            kind,
            label,
        }
    }
}

/// Bounded multi-hop relationship graph assembly over a [`RecordSource`].
///
/// Expansion is level-synchronous: every node of the current hop is expanded,
/// newly discovered records are admitted in ascending `(type, id)` order, and
/// traversal stops at the hop where the node budget runs out. Repeated calls
/// with the same inputs and an unchanged source produce identical output.
pub struct GraphAssembler<'a, S: RecordSource> {
    source: &'a S,
}

impl<'a, S: RecordSource> GraphAssembler<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Assemble the relationship graph around `root`.
    ///
    /// A root with no backing record yields an empty graph: not-found is a
    /// renderable state, not an error.
    pub fn build(&self, root: &ResourceRef, opts: &GraphOptions) -> Result<ResourceGraph> {
        opts.validate()?;

        let Some(root_record) = self.source.record(root) else {
            log::debug!("graph root {root} not found, returning empty graph");
            return Ok(ResourceGraph::empty());
        };

        let mut nodes = vec![Node::from_record(&root_record)];
        let mut edges: Vec<Edge> = Vec::new();
        let mut visited: HashSet<ResourceRef> = HashSet::from([root.clone()]);
        let mut seen_edges: HashSet<(String, String, EdgeKind)> = HashSet::new();
        let mut frontier = vec![root.clone()];
        let mut truncated = false;

        for hop in 0..opts.max_hops {
            if frontier.is_empty() || truncated {
                break;
            }

            let links = self.collect_links(&frontier, opts);

            // Candidates discovered this hop; BTreeSet iteration gives the
            // deterministic (type, id) admission order truncation relies on.
            let fresh: BTreeSet<ResourceRef> = links
                .iter()
                .flat_map(|link| [link.from.clone(), link.to.clone()])
                .filter(|re| !visited.contains(re))
                .collect();

            let mut next_frontier = Vec::new();
            for re in fresh {
                let Some(record) = self.source.record(&re) else {
                    log::debug!("skipping related record {re} with no backing data");
                    continue;
                };
                if nodes.len() >= opts.max_nodes {
                    truncated = true;
                    break;
                }
                visited.insert(re.clone());
                nodes.push(Node::from_record(&record));
                next_frontier.push(re);
            }

            // Only materialize edges whose endpoints both made it into the
            // graph, so truncation never leaves a dangling reference.
            for link in links {
                if !visited.contains(&link.from) || !visited.contains(&link.to) {
                    continue;
                }
                let edge = link.into_edge();
                if seen_edges.insert((edge.from.clone(), edge.to.clone(), edge.kind)) {
                    edges.push(edge);
                }
            }

            log::debug!(
                "hop {}: {} nodes, {} edges, frontier {}",
                hop + 1,
                nodes.len(),
                edges.len(),
                next_frontier.len()
            );
            frontier = next_frontier;
        }

        let stats = GraphStats {
            node_count: nodes.len(),
            edge_count: edges.len(),
            truncated,
        };
        log::info!(
            "assembled graph for {root}: {} nodes, {} edges (truncated: {})",
            stats.node_count,
            stats.edge_count,
            stats.truncated
        );
        Ok(ResourceGraph {
            nodes,
            edges,
            stats,
        })
    }

    /// Collect every relation reachable from the current frontier, filtered
    /// to the enabled relation kinds and admitted resource types.
    fn collect_links(&self, frontier: &[ResourceRef], opts: &GraphOptions) -> Vec<Link> {
        let mut links = Vec::new();
        for current in frontier {
            let related = self.source.related(current);

            if opts.include_hierarchy {
                if let Some(parent) = related.parent {
                    if opts.admits(parent.resource_type) {
                        links.push(Link::structural(parent, current.clone()));
                    }
                }
                for child in related.children {
                    if opts.admits(child.resource_type) {
                        links.push(Link::structural(current.clone(), child));
                    }
                }
            }

            if opts.include_dependencies {
                for dep in related.depends_on {
                    if opts.admits(dep.other.resource_type) {
                        links.push(Link::dependency(current.clone(), dep.other, dep.label));
                    }
                }
                for dep in related.dependents {
                    if opts.admits(dep.other.resource_type) {
                        links.push(Link::dependency(dep.other, current.clone(), dep.label));
                    }
                }
            }
        }
        // Self-referential pointers are backend noise, never an edge.
        links.retain(|link| link.from != link.to);
        links
    }
}
