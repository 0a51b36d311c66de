use crate::error::Result;
use atlas_graph::{DependencyRef, RecordSource, RelatedRecords};
use atlas_model::{
    DependencyLink, EntityRecord, OrganizationRecord, PrefixRecord, ResourceRecord, ResourceRef,
    ResourceType,
};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Relation between two snapshot records.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Relation {
    /// Structural parent -> child (hierarchy or membership).
    Hierarchy,
    /// Dependency source -> target.
    Dependency { label: String },
}

/// On-disk snapshot shape. Records are kept as raw JSON values on the way in
/// so one unknown record tag drops that record instead of the whole file.
#[derive(Debug, Default, Deserialize)]
struct RawSnapshot {
    #[serde(default)]
    records: Vec<serde_json::Value>,
    #[serde(default)]
    dependencies: Vec<DependencyLink>,
    #[serde(default)]
    prefixes: Vec<PrefixRecord>,
}

#[derive(Debug, Serialize)]
struct SnapshotFile<'a> {
    records: &'a [ResourceRecord],
    dependencies: &'a [DependencyLink],
    prefixes: &'a [PrefixRecord],
}

/// Counts for the `inspect` view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotSummary {
    pub records: usize,
    pub organizations: usize,
    pub entities: usize,
    pub identities: usize,
    pub projects: usize,
    pub milestones: usize,
    pub issues: usize,
    pub hierarchy_links: usize,
    pub dependency_links: usize,
    pub prefixes: usize,
}

/// Immutable in-memory view of one inventory fetch.
///
/// Records keep their fetch order (tree views preserve it), lookups go
/// through the ref index, and relations live in a directed graph keyed by
/// [`ResourceRef`].
pub struct InventorySnapshot {
    graph: DiGraph<ResourceRef, Relation>,
    index: HashMap<ResourceRef, NodeIndex>,
    records: Vec<ResourceRecord>,
    by_ref: HashMap<ResourceRef, usize>,
    dependencies: Vec<DependencyLink>,
    prefixes: Vec<PrefixRecord>,
}

impl InventorySnapshot {
    pub fn from_records(
        records: Vec<ResourceRecord>,
        dependencies: Vec<DependencyLink>,
        prefixes: Vec<PrefixRecord>,
    ) -> Self {
        let mut snapshot = InventorySnapshot {
            graph: DiGraph::new(),
            index: HashMap::new(),
            records: Vec::with_capacity(records.len()),
            by_ref: HashMap::new(),
            dependencies: Vec::with_capacity(dependencies.len()),
            prefixes,
        };

        for record in records {
            snapshot.add_record(record);
        }
        snapshot.wire_hierarchy();
        for link in dependencies {
            snapshot.add_dependency(link);
        }

        log::info!(
            "loaded snapshot: {} records, {} relations, {} prefixes",
            snapshot.records.len(),
            snapshot.graph.edge_count(),
            snapshot.prefixes.len()
        );
        snapshot
    }

    /// Parse a snapshot from its JSON form, dropping malformed records.
    pub fn from_json(raw: &str) -> Result<Self> {
        let raw: RawSnapshot = serde_json::from_str(raw)?;
        let mut records = Vec::with_capacity(raw.records.len());
        for value in raw.records {
            match serde_json::from_value::<ResourceRecord>(value) {
                Ok(record) => records.push(record),
                Err(err) => log::warn!("dropping unreadable snapshot record: {err}"),
            }
        }
        Ok(Self::from_records(records, raw.dependencies, raw.prefixes))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        log::debug!("reading snapshot from {:?}", path.as_ref());
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Serialize back to the on-disk snapshot shape.
    pub fn to_json(&self) -> Result<String> {
        let file = SnapshotFile {
            records: &self.records,
            dependencies: &self.dependencies,
            prefixes: &self.prefixes,
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path.as_ref(), self.to_json()?)?;
        log::info!("snapshot saved to {:?}", path.as_ref());
        Ok(())
    }

    fn add_record(&mut self, record: ResourceRecord) {
        let re = record.resource_ref();
        if self.by_ref.contains_key(&re) {
            log::warn!("duplicate record {re} in snapshot, keeping the first");
            return;
        }
        let idx = self.graph.add_node(re.clone());
        self.index.insert(re.clone(), idx);
        self.by_ref.insert(re, self.records.len());
        self.records.push(record);
    }

    fn wire_hierarchy(&mut self) {
        for record in &self.records {
            let child = record.resource_ref();
            let Some(parent) = record.hierarchy_parent() else {
                continue;
            };
            let Some(&parent_idx) = self.index.get(&parent) else {
                // Expected with paginated or filtered fetches.
                log::debug!("parent {parent} of {child} not in snapshot");
                continue;
            };
            let child_idx = self.index[&child];
            self.graph.add_edge(parent_idx, child_idx, Relation::Hierarchy);
        }
    }

    fn add_dependency(&mut self, link: DependencyLink) {
        let (Some(&source), Some(&target)) =
            (self.index.get(&link.source), self.index.get(&link.target))
        else {
            log::warn!(
                "dependency {} -> {} references records outside the snapshot, skipping",
                link.source,
                link.target
            );
            return;
        };
        self.graph.add_edge(
            source,
            target,
            Relation::Dependency {
                label: link.label().to_string(),
            },
        );
        self.dependencies.push(link);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[ResourceRecord] {
        &self.records
    }

    pub fn prefixes(&self) -> &[PrefixRecord] {
        &self.prefixes
    }

    /// Organizations in snapshot order, for the org tree view.
    pub fn organizations(&self) -> Vec<OrganizationRecord> {
        self.records
            .iter()
            .filter_map(|record| match record {
                ResourceRecord::Organization(r) => Some(r.clone()),
                _ => None,
            })
            .collect()
    }

    /// Entities in snapshot order, for the entity tree view.
    pub fn entities(&self) -> Vec<EntityRecord> {
        self.records
            .iter()
            .filter_map(|record| match record {
                ResourceRecord::Entity(r) => Some(r.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn summary(&self) -> SnapshotSummary {
        let mut summary = SnapshotSummary {
            records: self.records.len(),
            prefixes: self.prefixes.len(),
            ..SnapshotSummary::default()
        };
        for record in &self.records {
            match record.resource_type() {
                ResourceType::Organization => summary.organizations += 1,
                ResourceType::Entity => summary.entities += 1,
                ResourceType::Identity => summary.identities += 1,
                ResourceType::Project => summary.projects += 1,
                ResourceType::Milestone => summary.milestones += 1,
                ResourceType::Issue => summary.issues += 1,
            }
        }
        for edge in self.graph.edge_references() {
            match edge.weight() {
                Relation::Hierarchy => summary.hierarchy_links += 1,
                Relation::Dependency { .. } => summary.dependency_links += 1,
            }
        }
        summary
    }
}

impl RecordSource for InventorySnapshot {
    fn record(&self, key: &ResourceRef) -> Option<ResourceRecord> {
        self.by_ref.get(key).map(|&index| self.records[index].clone())
    }

    fn related(&self, key: &ResourceRef) -> RelatedRecords {
        let Some(&idx) = self.index.get(key) else {
            return RelatedRecords::default();
        };

        let mut related = RelatedRecords::default();

        // petgraph walks adjacency newest-first; reverse to recover the
        // snapshot insertion order the tree and edge output rely on.
        let outgoing: Vec<_> = self.graph.edges_directed(idx, Direction::Outgoing).collect();
        for edge in outgoing.into_iter().rev() {
            let other = self.graph[edge.target()].clone();
            match edge.weight() {
                Relation::Hierarchy => related.children.push(other),
                Relation::Dependency { label } => related.depends_on.push(DependencyRef {
                    other,
                    label: label.clone(),
                }),
            }
        }

        let incoming: Vec<_> = self.graph.edges_directed(idx, Direction::Incoming).collect();
        for edge in incoming.into_iter().rev() {
            let other = self.graph[edge.source()].clone();
            match edge.weight() {
                Relation::Hierarchy => {
                    if related.parent.is_none() {
                        related.parent = Some(other);
                    } else {
                        log::warn!("{key} has more than one structural parent, keeping the first");
                    }
                }
                Relation::Dependency { label } => related.dependents.push(DependencyRef {
                    other,
                    label: label.clone(),
                }),
            }
        }

        related
    }
}
