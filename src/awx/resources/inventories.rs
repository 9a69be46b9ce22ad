//! Inventory resources

use serde_json::{json, Map, Value};

use crate::awx::client::AwxClient;
use crate::awx::entity::{Entity, EntityType, FieldSpec};
use crate::awx::manager::{EntityManager, Resource};
use crate::error::{AwxError, Result};

use super::groups::Group;
use super::hosts::Host;
use super::organizations::Organization;

static INVENTORY: EntityType = EntityType::new(
    "inventory",
    "inventories",
    &[
        FieldSpec::text("name").filterable(),
        FieldSpec::text("description").filterable(),
        FieldSpec::integer("organization").filterable(),
        FieldSpec::text("kind").filterable(),
        FieldSpec::structured("variables"),
        FieldSpec::integer("total_hosts"),
    ],
);

/// A collection of hosts and groups jobs run against
#[derive(Debug, Clone)]
pub struct Inventory<'a> {
    entity: Entity<'a>,
}

impl<'a> Resource<'a> for Inventory<'a> {
    fn entity_type() -> &'static EntityType {
        &INVENTORY
    }

    fn from_entity(entity: Entity<'a>) -> Self {
        Self { entity }
    }

    fn entity(&self) -> &Entity<'a> {
        &self.entity
    }
}

impl<'a> Inventory<'a> {
    pub fn id(&self) -> u64 {
        self.entity.id()
    }

    pub fn name(&self) -> &str {
        self.entity.text("name").unwrap_or_default()
    }

    pub fn description(&self) -> &str {
        self.entity.text("description").unwrap_or_default()
    }

    /// Empty for a manual inventory, `smart` for a smart one
    pub fn kind(&self) -> &str {
        self.entity.text("kind").unwrap_or_default()
    }

    pub fn variables(&self) -> Option<&Map<String, Value>> {
        self.entity.structured("variables")
    }

    pub fn total_hosts(&self) -> Option<i64> {
        self.entity.integer("total_hosts")
    }

    /// The organization the inventory belongs to
    pub async fn organization(&self) -> Result<Organization<'a>> {
        match self.entity.reference("organization") {
            Some(id) => self.entity.client().organizations().get_by_id(id).await,
            None => Err(AwxError::RemoteUnavailable(format!(
                "inventory {} record has no organization reference",
                self.id()
            ))),
        }
    }

    /// Hosts of this inventory
    pub fn hosts(&self) -> Result<EntityManager<'a, Host<'a>>> {
        self.entity.related_manager("hosts")
    }

    /// Groups of this inventory
    pub fn groups(&self) -> Result<EntityManager<'a, Group<'a>>> {
        self.entity.related_manager("groups")
    }

    /// Create a host in this inventory
    pub async fn create_host(
        &self,
        name: &str,
        description: &str,
        variables: Value,
    ) -> Result<Host<'a>> {
        self.entity
            .client()
            .hosts()
            .create(json!({
                "name": name,
                "description": description,
                "inventory": self.id(),
                "variables": variables,
            }))
            .await
    }

    /// Create a group in this inventory
    pub async fn create_group(
        &self,
        name: &str,
        description: &str,
        variables: Value,
    ) -> Result<Group<'a>> {
        self.entity
            .client()
            .groups()
            .create(json!({
                "name": name,
                "description": description,
                "inventory": self.id(),
                "variables": variables,
            }))
            .await
    }
}

impl AwxClient {
    /// Manager for the inventories collection
    pub fn inventories(&self) -> EntityManager<'_, Inventory<'_>> {
        self.manager()
    }
}
