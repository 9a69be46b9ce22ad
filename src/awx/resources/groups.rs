//! Group resources

use serde_json::{json, Map, Value};

use crate::awx::client::AwxClient;
use crate::awx::entity::{Entity, EntityType, FieldSpec};
use crate::awx::manager::{EntityManager, Resource};
use crate::awx::transport::Method;
use crate::error::{AwxError, Result};

use super::hosts::Host;
use super::inventories::Inventory;

static GROUP: EntityType = EntityType::new(
    "group",
    "groups",
    &[
        FieldSpec::text("name").filterable(),
        FieldSpec::text("description").filterable(),
        FieldSpec::integer("inventory").filterable(),
        FieldSpec::structured("variables"),
    ],
);

/// A named set of hosts within an inventory
#[derive(Debug, Clone)]
pub struct Group<'a> {
    entity: Entity<'a>,
}

impl<'a> Resource<'a> for Group<'a> {
    fn entity_type() -> &'static EntityType {
        &GROUP
    }

    fn from_entity(entity: Entity<'a>) -> Self {
        Self { entity }
    }

    fn entity(&self) -> &Entity<'a> {
        &self.entity
    }
}

impl<'a> Group<'a> {
    pub fn id(&self) -> u64 {
        self.entity.id()
    }

    pub fn name(&self) -> &str {
        self.entity.text("name").unwrap_or_default()
    }

    pub fn description(&self) -> &str {
        self.entity.text("description").unwrap_or_default()
    }

    pub fn variables(&self) -> Option<&Map<String, Value>> {
        self.entity.structured("variables")
    }

    /// The inventory the group belongs to
    pub async fn inventory(&self) -> Result<Inventory<'a>> {
        match self.entity.reference("inventory") {
            Some(id) => self.entity.client().inventories().get_by_id(id).await,
            None => Err(AwxError::RemoteUnavailable(format!(
                "group {} record has no inventory reference",
                self.id()
            ))),
        }
    }

    /// Hosts that are members of this group
    pub fn hosts(&self) -> Result<EntityManager<'a, Host<'a>>> {
        self.entity.related_manager("hosts")
    }

    /// Add a host of the same inventory to this group
    pub async fn add_host(&self, host_id: u64) -> Result<()> {
        let locator = self.entity.related_locator("hosts")?;
        let body = json!({"id": host_id});
        self.entity
            .client()
            .request_json(Method::Post, &locator, Some(&body))
            .await?;
        Ok(())
    }

    /// Remove a host from this group
    pub async fn remove_host(&self, host_id: u64) -> Result<()> {
        let locator = self.entity.related_locator("hosts")?;
        let body = json!({"id": host_id, "disassociate": true});
        self.entity
            .client()
            .request_json(Method::Post, &locator, Some(&body))
            .await?;
        Ok(())
    }
}

impl AwxClient {
    /// Manager for the groups collection
    pub fn groups(&self) -> EntityManager<'_, Group<'_>> {
        self.manager()
    }
}
