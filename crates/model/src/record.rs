use crate::resource::{ResourceRef, ResourceType};
use serde::{Deserialize, Serialize};

/// Organization row, optionally nested under a parent organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationRecord {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Inventory entity (device, service instance, stored asset).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRecord {
    pub id: i64,
    pub name: String,
    /// Owning organization, when the entity is not free-floating.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<i64>,
    /// Parent entity for composed hardware (chassis -> module).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Person or service account tracked by the inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityRecord {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MilestoneRecord {
    pub id: i64,
    pub name: String,
    pub project_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueRecord {
    pub id: i64,
    pub name: String,
    pub project_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub milestone_id: Option<i64>,
}

/// Discriminated union over every resource kind the console renders.
///
/// Serialized with an explicit `resource_type` tag so snapshot files stay
/// self-describing; records with an unknown tag fail to deserialize and are
/// dropped by the snapshot loader rather than aborting the whole load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "resource_type", rename_all = "snake_case")]
pub enum ResourceRecord {
    Organization(OrganizationRecord),
    Entity(EntityRecord),
    Identity(IdentityRecord),
    Project(ProjectRecord),
    Milestone(MilestoneRecord),
    Issue(IssueRecord),
}

impl ResourceRecord {
    pub fn resource_type(&self) -> ResourceType {
        match self {
            ResourceRecord::Organization(_) => ResourceType::Organization,
            ResourceRecord::Entity(_) => ResourceType::Entity,
            ResourceRecord::Identity(_) => ResourceType::Identity,
            ResourceRecord::Project(_) => ResourceType::Project,
            ResourceRecord::Milestone(_) => ResourceType::Milestone,
            ResourceRecord::Issue(_) => ResourceType::Issue,
        }
    }

    pub fn id(&self) -> i64 {
        match self {
            ResourceRecord::Organization(r) => r.id,
            ResourceRecord::Entity(r) => r.id,
            ResourceRecord::Identity(r) => r.id,
            ResourceRecord::Project(r) => r.id,
            ResourceRecord::Milestone(r) => r.id,
            ResourceRecord::Issue(r) => r.id,
        }
    }

    pub fn resource_ref(&self) -> ResourceRef {
        ResourceRef::new(self.resource_type(), self.id())
    }

    pub fn display_name(&self) -> &str {
        match self {
            ResourceRecord::Organization(r) => &r.name,
            ResourceRecord::Entity(r) => &r.name,
            ResourceRecord::Identity(r) => &r.name,
            ResourceRecord::Project(r) => &r.name,
            ResourceRecord::Milestone(r) => &r.name,
            ResourceRecord::Issue(r) => &r.name,
        }
    }

    /// Owning organization id, for downstream navigation.
    pub fn organization_id(&self) -> Option<i64> {
        match self {
            ResourceRecord::Organization(_) => None,
            ResourceRecord::Entity(r) => r.organization_id,
            ResourceRecord::Identity(r) => r.organization_id,
            ResourceRecord::Project(r) => r.organization_id,
            ResourceRecord::Milestone(_) => None,
            ResourceRecord::Issue(_) => None,
        }
    }

    /// Same-type structural parent id, when the record nests under its own
    /// kind (organization tree, composed entities).
    pub fn parent_id(&self) -> Option<i64> {
        match self {
            ResourceRecord::Organization(r) => r.parent_id,
            ResourceRecord::Entity(r) => r.parent_id,
            ResourceRecord::Identity(_) => None,
            ResourceRecord::Project(_) => None,
            ResourceRecord::Milestone(_) => None,
            ResourceRecord::Issue(_) => None,
        }
    }

    /// The single structural parent of this record, if any.
    ///
    /// Entities prefer their parent entity over their owning organization;
    /// issues prefer their milestone over their project.
    pub fn hierarchy_parent(&self) -> Option<ResourceRef> {
        match self {
            ResourceRecord::Organization(r) => r
                .parent_id
                .map(|id| ResourceRef::new(ResourceType::Organization, id)),
            ResourceRecord::Entity(r) => r
                .parent_id
                .map(|id| ResourceRef::new(ResourceType::Entity, id))
                .or_else(|| {
                    r.organization_id
                        .map(|id| ResourceRef::new(ResourceType::Organization, id))
                }),
            ResourceRecord::Identity(r) => r
                .organization_id
                .map(|id| ResourceRef::new(ResourceType::Organization, id)),
            ResourceRecord::Project(r) => r
                .organization_id
                .map(|id| ResourceRef::new(ResourceType::Organization, id)),
            ResourceRecord::Milestone(r) => {
                Some(ResourceRef::new(ResourceType::Project, r.project_id))
            }
            ResourceRecord::Issue(r) => Some(match r.milestone_id {
                Some(id) => ResourceRef::new(ResourceType::Milestone, id),
                None => ResourceRef::new(ResourceType::Project, r.project_id),
            }),
        }
    }
}

/// Directed non-structural association between two resources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyLink {
    pub source: ResourceRef,
    pub target: ResourceRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl DependencyLink {
    pub const DEFAULT_LABEL: &'static str = "depends on";

    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(Self::DEFAULT_LABEL)
    }
}

/// IPAM prefix row for the prefix browser.
///
/// Prefixes nest under each other via `parent_id` but never appear in the
/// relationship graph, so they live outside [`ResourceRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefixRecord {
    pub id: i64,
    pub prefix: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_tagged_record_round_trip() {
        let record = ResourceRecord::Entity(EntityRecord {
            id: 3,
            name: "edge-router".to_string(),
            organization_id: Some(1),
            parent_id: None,
            status: Some("active".to_string()),
        });
        let raw = serde_json::to_string(&record).unwrap();
        assert!(raw.contains("\"resource_type\":\"entity\""));
        let back: ResourceRecord = serde_json::from_str(&raw).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_unknown_tag_is_rejected() {
        let raw = r#"{"resource_type":"blob","id":1,"name":"x"}"#;
        assert!(serde_json::from_str::<ResourceRecord>(raw).is_err());
    }

    #[test]
    fn test_hierarchy_parent_prefers_parent_entity() {
        let nested = ResourceRecord::Entity(EntityRecord {
            id: 7,
            name: "line-card".to_string(),
            organization_id: Some(1),
            parent_id: Some(3),
            status: None,
        });
        assert_eq!(
            nested.hierarchy_parent(),
            Some(ResourceRef::new(ResourceType::Entity, 3))
        );

        let top_level = ResourceRecord::Entity(EntityRecord {
            id: 3,
            name: "chassis".to_string(),
            organization_id: Some(1),
            parent_id: None,
            status: None,
        });
        assert_eq!(
            top_level.hierarchy_parent(),
            Some(ResourceRef::new(ResourceType::Organization, 1))
        );
    }

    #[test]
    fn test_issue_parent_falls_back_to_project() {
        let triaged = ResourceRecord::Issue(IssueRecord {
            id: 9,
            name: "certificate expiring".to_string(),
            project_id: 4,
            milestone_id: Some(2),
        });
        assert_eq!(
            triaged.hierarchy_parent(),
            Some(ResourceRef::new(ResourceType::Milestone, 2))
        );

        let backlog = ResourceRecord::Issue(IssueRecord {
            id: 10,
            name: "untracked".to_string(),
            project_id: 4,
            milestone_id: None,
        });
        assert_eq!(
            backlog.hierarchy_parent(),
            Some(ResourceRef::new(ResourceType::Project, 4))
        );
    }

    #[test]
    fn test_dependency_label_default() {
        let link = DependencyLink {
            source: ResourceRef::new(ResourceType::Entity, 3),
            target: ResourceRef::new(ResourceType::Entity, 4),
            label: None,
        };
        assert_eq!(link.label(), "depends on");
    }
}
