use atlas_model::ResourceType;
use clap::ValueEnum;

#[derive(Copy, Clone, ValueEnum)]
pub(crate) enum TypeFlag {
    Organization,
    Entity,
    Identity,
    Project,
    Milestone,
    Issue,
}

impl TypeFlag {
    pub(crate) const fn as_domain(self) -> ResourceType {
        match self {
            TypeFlag::Organization => ResourceType::Organization,
            TypeFlag::Entity => ResourceType::Entity,
            TypeFlag::Identity => ResourceType::Identity,
            TypeFlag::Project => ResourceType::Project,
            TypeFlag::Milestone => ResourceType::Milestone,
            TypeFlag::Issue => ResourceType::Issue,
        }
    }
}

#[derive(Copy, Clone, ValueEnum)]
pub(crate) enum TreeKind {
    Organizations,
    Entities,
    Prefixes,
}
