//! Organization resources

use serde_json::json;

use crate::awx::client::AwxClient;
use crate::awx::entity::{Entity, EntityType, FieldSpec};
use crate::awx::manager::{EntityManager, Resource};
use crate::error::Result;

use super::inventories::Inventory;
use super::projects::Project;
use super::teams::Team;

static ORGANIZATION: EntityType = EntityType::new(
    "organization",
    "organizations",
    &[
        FieldSpec::text("name").filterable(),
        FieldSpec::text("description").filterable(),
        FieldSpec::integer("max_hosts"),
    ],
);

/// A logical grouping of projects, inventories and teams
#[derive(Debug, Clone)]
pub struct Organization<'a> {
    entity: Entity<'a>,
}

impl<'a> Resource<'a> for Organization<'a> {
    fn entity_type() -> &'static EntityType {
        &ORGANIZATION
    }

    fn from_entity(entity: Entity<'a>) -> Self {
        Self { entity }
    }

    fn entity(&self) -> &Entity<'a> {
        &self.entity
    }
}

impl<'a> Organization<'a> {
    pub fn id(&self) -> u64 {
        self.entity.id()
    }

    pub fn name(&self) -> &str {
        self.entity.text("name").unwrap_or_default()
    }

    pub fn description(&self) -> &str {
        self.entity.text("description").unwrap_or_default()
    }

    pub fn max_hosts(&self) -> Option<i64> {
        self.entity.integer("max_hosts")
    }

    /// Projects owned by this organization
    pub fn projects(&self) -> Result<EntityManager<'a, Project<'a>>> {
        self.entity.related_manager("projects")
    }

    /// Teams of this organization
    pub fn teams(&self) -> Result<EntityManager<'a, Team<'a>>> {
        self.entity.related_manager("teams")
    }

    /// Inventories owned by this organization
    pub fn inventories(&self) -> Result<EntityManager<'a, Inventory<'a>>> {
        self.entity.related_manager("inventories")
    }

    /// Create a project under this organization
    pub async fn create_project(
        &self,
        name: &str,
        description: &str,
        scm_type: &str,
        scm_url: &str,
    ) -> Result<Project<'a>> {
        self.entity
            .client()
            .projects()
            .create(json!({
                "name": name,
                "description": description,
                "scm_type": scm_type,
                "scm_url": scm_url,
                "organization": self.id(),
            }))
            .await
    }

    /// Create a team under this organization
    pub async fn create_team(&self, name: &str, description: &str) -> Result<Team<'a>> {
        self.entity
            .client()
            .teams()
            .create(json!({
                "name": name,
                "description": description,
                "organization": self.id(),
            }))
            .await
    }

    /// Create an inventory under this organization
    pub async fn create_inventory(&self, name: &str, description: &str) -> Result<Inventory<'a>> {
        self.entity
            .client()
            .inventories()
            .create(json!({
                "name": name,
                "description": description,
                "organization": self.id(),
            }))
            .await
    }
}

impl AwxClient {
    /// Manager for the organizations collection
    pub fn organizations(&self) -> EntityManager<'_, Organization<'_>> {
        self.manager()
    }
}
