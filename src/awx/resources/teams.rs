//! Team resources

use crate::awx::client::AwxClient;
use crate::awx::entity::{Entity, EntityType, FieldSpec};
use crate::awx::manager::{EntityManager, Resource};
use crate::error::{AwxError, Result};

use super::organizations::Organization;
use super::users::User;

static TEAM: EntityType = EntityType::new(
    "team",
    "teams",
    &[
        FieldSpec::text("name").filterable(),
        FieldSpec::text("description").filterable(),
        FieldSpec::integer("organization").filterable(),
    ],
);

/// A team of users within an organization
#[derive(Debug, Clone)]
pub struct Team<'a> {
    entity: Entity<'a>,
}

impl<'a> Resource<'a> for Team<'a> {
    fn entity_type() -> &'static EntityType {
        &TEAM
    }

    fn from_entity(entity: Entity<'a>) -> Self {
        Self { entity }
    }

    fn entity(&self) -> &Entity<'a> {
        &self.entity
    }
}

impl<'a> Team<'a> {
    pub fn id(&self) -> u64 {
        self.entity.id()
    }

    pub fn name(&self) -> &str {
        self.entity.text("name").unwrap_or_default()
    }

    pub fn description(&self) -> &str {
        self.entity.text("description").unwrap_or_default()
    }

    /// The organization the team belongs to
    pub async fn organization(&self) -> Result<Organization<'a>> {
        match self.entity.reference("organization") {
            Some(id) => self.entity.client().organizations().get_by_id(id).await,
            None => Err(AwxError::RemoteUnavailable(format!(
                "team {} record has no organization reference",
                self.id()
            ))),
        }
    }

    /// Members of the team
    pub fn users(&self) -> Result<EntityManager<'a, User<'a>>> {
        self.entity.related_manager("users")
    }
}

impl AwxClient {
    /// Manager for the teams collection
    pub fn teams(&self) -> EntityManager<'_, Team<'_>> {
        self.manager()
    }
}
