use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Resource kinds known to the inventory backend.
///
/// The variant order defines the sort order used for deterministic node
/// admission, so keep it stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    Organization,
    Entity,
    Identity,
    Project,
    Milestone,
    Issue,
}

impl ResourceType {
    pub const ALL: [ResourceType; 6] = [
        ResourceType::Organization,
        ResourceType::Entity,
        ResourceType::Identity,
        ResourceType::Project,
        ResourceType::Milestone,
        ResourceType::Issue,
    ];

    /// Canonical lowercase name, as used in node keys.
    pub const fn as_str(self) -> &'static str {
        match self {
            ResourceType::Organization => "organization",
            ResourceType::Entity => "entity",
            ResourceType::Identity => "identity",
            ResourceType::Project => "project",
            ResourceType::Milestone => "milestone",
            ResourceType::Issue => "issue",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceType {
    type Err = ParseRefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "organization" => Ok(ResourceType::Organization),
            "entity" => Ok(ResourceType::Entity),
            "identity" => Ok(ResourceType::Identity),
            "project" => Ok(ResourceType::Project),
            "milestone" => Ok(ResourceType::Milestone),
            "issue" => Ok(ResourceType::Issue),
            other => Err(ParseRefError::UnknownType(other.to_string())),
        }
    }
}

/// Composite identity of a resource: type plus backend row id.
///
/// Renders as the canonical `"type:id"` node key and parses back from it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ResourceRef {
    pub resource_type: ResourceType,
    pub resource_id: i64,
}

impl ResourceRef {
    pub fn new(resource_type: ResourceType, resource_id: i64) -> Self {
        Self {
            resource_type,
            resource_id,
        }
    }

    /// Canonical node key, e.g. `"organization:17"`.
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.resource_type, self.resource_id)
    }
}

impl FromStr for ResourceRef {
    type Err = ParseRefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, id) = s
            .split_once(':')
            .ok_or_else(|| ParseRefError::Malformed(s.to_string()))?;
        let resource_type = kind.parse::<ResourceType>()?;
        let resource_id = id
            .parse::<i64>()
            .map_err(|_| ParseRefError::Malformed(s.to_string()))?;
        Ok(ResourceRef {
            resource_type,
            resource_id,
        })
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseRefError {
    #[error("unknown resource type: {0}")]
    UnknownType(String),

    #[error("malformed resource ref (expected \"type:id\"): {0}")]
    Malformed(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_ref_key_round_trip() {
        let re = ResourceRef::new(ResourceType::Entity, 42);
        assert_eq!(re.key(), "entity:42");
        assert_eq!("entity:42".parse::<ResourceRef>().unwrap(), re);
    }

    #[test]
    fn test_ref_parse_rejects_garbage() {
        assert_eq!(
            "gadget:1".parse::<ResourceRef>(),
            Err(ParseRefError::UnknownType("gadget".to_string()))
        );
        assert_eq!(
            "organization".parse::<ResourceRef>(),
            Err(ParseRefError::Malformed("organization".to_string()))
        );
        assert_eq!(
            "organization:twelve".parse::<ResourceRef>(),
            Err(ParseRefError::Malformed("organization:twelve".to_string()))
        );
    }

    #[test]
    fn test_refs_sort_by_type_then_id() {
        let mut refs = vec![
            ResourceRef::new(ResourceType::Issue, 1),
            ResourceRef::new(ResourceType::Entity, 9),
            ResourceRef::new(ResourceType::Organization, 5),
            ResourceRef::new(ResourceType::Entity, 2),
        ];
        refs.sort();
        let keys: Vec<String> = refs.iter().map(ResourceRef::key).collect();
        assert_eq!(
            keys,
            vec!["organization:5", "entity:2", "entity:9", "issue:1"]
        );
    }
}
