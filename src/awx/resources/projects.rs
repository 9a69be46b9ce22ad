//! Project resources

use crate::awx::client::AwxClient;
use crate::awx::entity::{Entity, EntityType, FieldSpec};
use crate::awx::manager::{EntityManager, Resource};
use crate::error::{AwxError, Result};

use super::organizations::Organization;

static PROJECT: EntityType = EntityType::new(
    "project",
    "projects",
    &[
        FieldSpec::text("name").filterable(),
        FieldSpec::text("description").filterable(),
        FieldSpec::text("scm_type").filterable(),
        FieldSpec::text("scm_url"),
        FieldSpec::text("scm_branch"),
        FieldSpec::text("local_path"),
        FieldSpec::text("status").filterable(),
        FieldSpec::integer("organization").filterable(),
    ],
);

/// A source control checkout playbooks run from
#[derive(Debug, Clone)]
pub struct Project<'a> {
    entity: Entity<'a>,
}

impl<'a> Resource<'a> for Project<'a> {
    fn entity_type() -> &'static EntityType {
        &PROJECT
    }

    fn from_entity(entity: Entity<'a>) -> Self {
        Self { entity }
    }

    fn entity(&self) -> &Entity<'a> {
        &self.entity
    }
}

impl<'a> Project<'a> {
    pub fn id(&self) -> u64 {
        self.entity.id()
    }

    pub fn name(&self) -> &str {
        self.entity.text("name").unwrap_or_default()
    }

    pub fn description(&self) -> &str {
        self.entity.text("description").unwrap_or_default()
    }

    pub fn scm_type(&self) -> &str {
        self.entity.text("scm_type").unwrap_or_default()
    }

    pub fn scm_url(&self) -> &str {
        self.entity.text("scm_url").unwrap_or_default()
    }

    pub fn scm_branch(&self) -> &str {
        self.entity.text("scm_branch").unwrap_or_default()
    }

    pub fn local_path(&self) -> &str {
        self.entity.text("local_path").unwrap_or_default()
    }

    /// Last update status, e.g. `successful` or `failed`
    pub fn status(&self) -> &str {
        self.entity.text("status").unwrap_or_default()
    }

    /// The organization the project belongs to
    pub async fn organization(&self) -> Result<Organization<'a>> {
        match self.entity.reference("organization") {
            Some(id) => self.entity.client().organizations().get_by_id(id).await,
            None => Err(AwxError::RemoteUnavailable(format!(
                "project {} record has no organization reference",
                self.id()
            ))),
        }
    }
}

impl AwxClient {
    /// Manager for the projects collection
    pub fn projects(&self) -> EntityManager<'_, Project<'_>> {
        self.manager()
    }
}
