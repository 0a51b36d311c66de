use atlas_model::{ResourceRecord, ResourceType};
use serde::{Deserialize, Serialize};

/// Navigation metadata carried on every node.
///
/// `resource_id` is always present; the optional ids let the console link a
/// node back to its owning organization or structural parent without another
/// fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeMeta {
    pub resource_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
}

/// Node in a rendered relationship graph.
///
/// Immutable once created; the assembler emits at most one node per key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Canonical `"type:id"` key, unique within a graph.
    pub key: String,
    pub label: String,
    pub resource_type: ResourceType,
    pub meta: NodeMeta,
}

impl Node {
    pub fn from_record(record: &ResourceRecord) -> Self {
        let re = record.resource_ref();
        Node {
            key: re.key(),
            label: record.display_name().to_string(),
            resource_type: re.resource_type,
            meta: NodeMeta {
                resource_id: re.resource_id,
                organization_id: record.organization_id(),
                parent_id: record.parent_id(),
            },
        }
    }
}

/// How two nodes relate; drives line style in the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    /// Structural parent/child between resources of the same kind.
    Hierarchical,

    /// Structural membership across kinds (organization holds an entity).
    Containment,

    /// Non-structural association (depends-on / related-to).
    Dependency,
}

/// Directed edge between two node keys.
///
/// Hierarchical and containment edges always point parent -> child,
/// dependency edges source -> target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub from: String,
    pub to: String,
    pub kind: EdgeKind,
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
    pub truncated: bool,
}

/// Assembled relationship graph, ready for the force-directed renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceGraph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub stats: GraphStats,
}

impl ResourceGraph {
    /// Valid empty result, used when the root record does not exist.
    pub fn empty() -> Self {
        Self::default()
    }
}
