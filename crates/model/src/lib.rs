//! # Atlas Model
//!
//! Shared data model for the atlas inventory console engine.
//!
//! Everything the backend hands over is expressed as a closed set of typed
//! records: a [`ResourceRef`] is the composite identity (`"type:id"`) used as
//! the canonical node key, and [`ResourceRecord`] is the discriminated union
//! consumers pattern-match exhaustively instead of poking at loose maps.

mod record;
mod resource;

pub use record::{
    DependencyLink, EntityRecord, IdentityRecord, IssueRecord, MilestoneRecord,
    OrganizationRecord, PrefixRecord, ProjectRecord, ResourceRecord,
};
pub use resource::{ParseRefError, ResourceRef, ResourceType};
