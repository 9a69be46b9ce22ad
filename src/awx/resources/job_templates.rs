//! Job template resources

use serde_json::{json, Map, Value};

use crate::awx::client::AwxClient;
use crate::awx::entity::{Entity, EntityType, FieldSpec};
use crate::awx::manager::{resource_from_value, EntityManager, Resource};
use crate::awx::transport::Method;
use crate::error::Result;

use super::inventories::Inventory;
use super::jobs::Job;
use super::projects::Project;

static JOB_TEMPLATE: EntityType = EntityType::new(
    "job template",
    "job_templates",
    &[
        FieldSpec::text("name").filterable(),
        FieldSpec::text("description").filterable(),
        FieldSpec::text("job_type").filterable(),
        FieldSpec::integer("inventory").filterable(),
        FieldSpec::integer("project").filterable(),
        FieldSpec::text("playbook").filterable(),
        FieldSpec::integer("forks"),
        FieldSpec::integer("verbosity"),
        FieldSpec::text("limit"),
        FieldSpec::structured("extra_vars"),
    ],
);

/// A reusable job definition
#[derive(Debug, Clone)]
pub struct JobTemplate<'a> {
    entity: Entity<'a>,
}

impl<'a> Resource<'a> for JobTemplate<'a> {
    fn entity_type() -> &'static EntityType {
        &JOB_TEMPLATE
    }

    fn from_entity(entity: Entity<'a>) -> Self {
        Self { entity }
    }

    fn entity(&self) -> &Entity<'a> {
        &self.entity
    }
}

impl<'a> JobTemplate<'a> {
    pub fn id(&self) -> u64 {
        self.entity.id()
    }

    pub fn name(&self) -> &str {
        self.entity.text("name").unwrap_or_default()
    }

    pub fn description(&self) -> &str {
        self.entity.text("description").unwrap_or_default()
    }

    /// `run` or `check`
    pub fn job_type(&self) -> &str {
        self.entity.text("job_type").unwrap_or_default()
    }

    pub fn playbook(&self) -> &str {
        self.entity.text("playbook").unwrap_or_default()
    }

    pub fn forks(&self) -> Option<i64> {
        self.entity.integer("forks")
    }

    pub fn verbosity(&self) -> Option<i64> {
        self.entity.integer("verbosity")
    }

    pub fn limit(&self) -> &str {
        self.entity.text("limit").unwrap_or_default()
    }

    pub fn extra_vars(&self) -> Option<&Map<String, Value>> {
        self.entity.structured("extra_vars")
    }

    /// The project the playbook comes from
    pub async fn project(&self) -> Result<Option<Project<'a>>> {
        match self.entity.reference("project") {
            Some(id) => Ok(Some(self.entity.client().projects().get_by_id(id).await?)),
            None => Ok(None),
        }
    }

    /// The inventory the template runs against
    pub async fn inventory(&self) -> Result<Option<Inventory<'a>>> {
        match self.entity.reference("inventory") {
            Some(id) => Ok(Some(
                self.entity.client().inventories().get_by_id(id).await?,
            )),
            None => Ok(None),
        }
    }

    /// Launch the template as-is and hand back the queued job
    pub async fn launch(&self) -> Result<Job<'a>> {
        let locator = self.entity.related_locator("launch")?;
        let value = self
            .entity
            .client()
            .request_json(Method::Post, &locator, Some(&json!({})))
            .await?;
        resource_from_value(self.entity.client(), value)
    }
}

impl AwxClient {
    /// Manager for the job templates collection
    pub fn job_templates(&self) -> EntityManager<'_, JobTemplate<'_>> {
        self.manager()
    }
}
