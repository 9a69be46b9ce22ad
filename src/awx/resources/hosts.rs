//! Host resources

use serde_json::{Map, Value};

use crate::awx::client::AwxClient;
use crate::awx::entity::{Entity, EntityType, FieldSpec};
use crate::awx::manager::{EntityManager, Resource};
use crate::error::{AwxError, Result};

use super::groups::Group;
use super::inventories::Inventory;

static HOST: EntityType = EntityType::new(
    "host",
    "hosts",
    &[
        FieldSpec::text("name").filterable(),
        FieldSpec::text("description").filterable(),
        FieldSpec::integer("inventory").filterable(),
        FieldSpec::boolean("enabled").filterable(),
        FieldSpec::text("instance_id"),
        FieldSpec::structured("variables"),
    ],
);

/// A single managed machine
#[derive(Debug, Clone)]
pub struct Host<'a> {
    entity: Entity<'a>,
}

impl<'a> Resource<'a> for Host<'a> {
    fn entity_type() -> &'static EntityType {
        &HOST
    }

    fn from_entity(entity: Entity<'a>) -> Self {
        Self { entity }
    }

    fn entity(&self) -> &Entity<'a> {
        &self.entity
    }
}

impl<'a> Host<'a> {
    pub fn id(&self) -> u64 {
        self.entity.id()
    }

    pub fn name(&self) -> &str {
        self.entity.text("name").unwrap_or_default()
    }

    pub fn description(&self) -> &str {
        self.entity.text("description").unwrap_or_default()
    }

    pub fn enabled(&self) -> bool {
        self.entity.boolean("enabled").unwrap_or(false)
    }

    /// Cloud instance identifier, when the host was imported
    pub fn instance_id(&self) -> Option<&str> {
        self.entity.text("instance_id").filter(|value| !value.is_empty())
    }

    pub fn variables(&self) -> Option<&Map<String, Value>> {
        self.entity.structured("variables")
    }

    /// The inventory the host belongs to
    pub async fn inventory(&self) -> Result<Inventory<'a>> {
        match self.entity.reference("inventory") {
            Some(id) => self.entity.client().inventories().get_by_id(id).await,
            None => Err(AwxError::RemoteUnavailable(format!(
                "host {} record has no inventory reference",
                self.id()
            ))),
        }
    }

    /// Groups the host is a member of
    pub fn groups(&self) -> Result<EntityManager<'a, Group<'a>>> {
        self.entity.related_manager("groups")
    }

    /// Add the host to a group of the same inventory
    pub async fn associate_group(&self, group: &Group<'a>) -> Result<()> {
        group.add_host(self.id()).await
    }

    /// Remove the host from a group
    pub async fn disassociate_group(&self, group: &Group<'a>) -> Result<()> {
        group.remove_host(self.id()).await
    }
}

impl AwxClient {
    /// Manager for the hosts collection
    pub fn hosts(&self) -> EntityManager<'_, Host<'_>> {
        self.manager()
    }
}
