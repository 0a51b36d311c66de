//! # Atlas Graph
//!
//! Relationship-graph and hierarchy-tree assembly for the inventory console.
//!
//! ## Features
//!
//! - **Bounded graph assembly** - multi-hop breadth-first expansion from a
//!   root resource, deduplicated and capped for interactive rendering
//! - **Edge classification** - hierarchical, containment and dependency
//!   relations as distinct edge kinds for the renderer
//! - **Forest building** - parent-indexed trees from flat record pages,
//!   safe against cyclic parent pointers
//!
//! ## Architecture
//!
//! ```text
//! RecordSource (snapshot, cache, ...)
//!     │
//!     ├──> Graph Assembler (per-root)
//!     │      ├─ Level-synchronous BFS over related records
//!     │      ├─ Dedup nodes by "type:id" key
//!     │      ├─ Classify edges (hierarchical / containment / dependency)
//!     │      └─ Truncate deterministically at the node budget
//!     │
//!     └──> ResourceGraph {nodes, edges, stats}  ->  force-directed renderer
//!
//! flat records ──> build_forest ──> TreeNode forest ──> collapsible list
//! ```
//!
//! Both entry points are pure and synchronous: all fetching happens behind
//! the [`RecordSource`] seam, and every call owns its own accumulators, so
//! multiple panels can assemble concurrently without locking.

mod assembler;
mod error;
mod source;
mod tree;
mod types;

pub use assembler::{GraphAssembler, GraphOptions};
pub use error::{GraphError, Result};
pub use source::{DependencyRef, RecordSource, RelatedRecords};
pub use tree::{build_forest, TreeNode, TreeRecord};
pub use types::{Edge, EdgeKind, GraphStats, Node, NodeMeta, ResourceGraph};
