use atlas_model::{ResourceRecord, ResourceRef};

/// Dependency endpoint as seen from the record being expanded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyRef {
    pub other: ResourceRef,
    pub label: String,
}

/// Records directly related to one resource, as returned by a single fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelatedRecords {
    /// Structural parent, if the resource is hierarchical.
    pub parent: Option<ResourceRef>,
    /// Direct structural children.
    pub children: Vec<ResourceRef>,
    /// Outgoing dependencies: this resource -> other.
    pub depends_on: Vec<DependencyRef>,
    /// Incoming dependencies: other -> this resource.
    pub dependents: Vec<DependencyRef>,
}

/// Data-access collaborator the assembler traverses over.
///
/// Implementations must be idempotent: the assembler may ask for the same
/// key more than once and expects the same answer each time. Both methods
/// answer from already-materialized data; there is no I/O at this seam.
pub trait RecordSource {
    /// Fetch one record, or `None` when the key is not in scope.
    fn record(&self, key: &ResourceRef) -> Option<ResourceRecord>;

    /// Fetch the records directly related to `key`. Unknown keys yield an
    /// empty set rather than an error.
    fn related(&self, key: &ResourceRef) -> RelatedRecords;
}
