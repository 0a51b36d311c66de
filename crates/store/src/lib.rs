//! # Atlas Store
//!
//! In-memory inventory snapshot backing the graph and tree views.
//!
//! One backend fetch becomes one immutable [`InventorySnapshot`]: records are
//! indexed by their `"type:id"` ref, structural and dependency relations are
//! wired into a petgraph directed graph, and the snapshot answers the
//! [`atlas_graph::RecordSource`] contract the assembler traverses over.
//! Malformed input (unknown record tags, dangling parents, unresolvable
//! dependency endpoints) is logged and skipped, never fatal: partial data is
//! the normal case in a multi-source inventory.

mod error;
mod snapshot;

pub use error::{Result, StoreError};
pub use snapshot::{InventorySnapshot, SnapshotSummary};
