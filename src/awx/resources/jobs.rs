//! Job resources

use serde_json::json;

use crate::awx::client::AwxClient;
use crate::awx::entity::{Entity, EntityType, FieldSpec};
use crate::awx::manager::{EntityManager, Resource};
use crate::awx::transport::Method;
use crate::error::Result;

use super::inventories::Inventory;
use super::job_templates::JobTemplate;
use super::projects::Project;

static JOB: EntityType = EntityType::new(
    "job",
    "jobs",
    &[
        FieldSpec::text("name").filterable(),
        FieldSpec::text("status").filterable(),
        FieldSpec::text("job_type").filterable(),
        FieldSpec::integer("inventory").filterable(),
        FieldSpec::integer("project").filterable(),
        FieldSpec::integer("job_template").filterable(),
        FieldSpec::boolean("failed").filterable(),
    ],
);

/// One run of a job template
#[derive(Debug, Clone)]
pub struct Job<'a> {
    entity: Entity<'a>,
}

impl<'a> Resource<'a> for Job<'a> {
    fn entity_type() -> &'static EntityType {
        &JOB
    }

    fn from_entity(entity: Entity<'a>) -> Self {
        Self { entity }
    }

    fn entity(&self) -> &Entity<'a> {
        &self.entity
    }
}

impl<'a> Job<'a> {
    pub fn id(&self) -> u64 {
        self.entity.id()
    }

    pub fn name(&self) -> &str {
        self.entity.text("name").unwrap_or_default()
    }

    /// Lifecycle state, e.g. `pending`, `running`, `successful`
    pub fn status(&self) -> &str {
        self.entity.text("status").unwrap_or_default()
    }

    pub fn job_type(&self) -> &str {
        self.entity.text("job_type").unwrap_or_default()
    }

    pub fn failed(&self) -> bool {
        self.entity.boolean("failed").unwrap_or(false)
    }

    /// The template this run came from, if it still exists
    pub async fn job_template(&self) -> Result<Option<JobTemplate<'a>>> {
        match self.entity.reference("job_template") {
            Some(id) => Ok(Some(
                self.entity.client().job_templates().get_by_id(id).await?,
            )),
            None => Ok(None),
        }
    }

    pub async fn project(&self) -> Result<Option<Project<'a>>> {
        match self.entity.reference("project") {
            Some(id) => Ok(Some(self.entity.client().projects().get_by_id(id).await?)),
            None => Ok(None),
        }
    }

    pub async fn inventory(&self) -> Result<Option<Inventory<'a>>> {
        match self.entity.reference("inventory") {
            Some(id) => Ok(Some(
                self.entity.client().inventories().get_by_id(id).await?,
            )),
            None => Ok(None),
        }
    }

    /// Ask the server to cancel the run
    pub async fn cancel(&self) -> Result<()> {
        let locator = self.entity.related_locator("cancel")?;
        self.entity
            .client()
            .request_json(Method::Post, &locator, Some(&json!({})))
            .await?;
        Ok(())
    }
}

impl AwxClient {
    /// Manager for the jobs collection
    pub fn jobs(&self) -> EntityManager<'_, Job<'_>> {
        self.manager()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::awx::filter::Filter;
    use crate::awx::testing::{client_with, page, ScriptedTransport};

    use super::*;

    #[tokio::test]
    async fn test_cancel_posts_to_related_endpoint() {
        let transport = ScriptedTransport::new();
        transport.push_json(
            200,
            page(
                1,
                None,
                vec![json!({
                    "id": 972,
                    "name": "deploy",
                    "status": "running",
                    "related": {"cancel": "/api/v2/jobs/972/cancel/"}
                })],
            ),
        );
        transport.push_body(202, "");
        let (transport, client) = client_with(transport);

        let job = client.jobs().get_by_id(972).await.unwrap();
        job.cancel().await.unwrap();
        assert_eq!(transport.requests()[1].target, "/api/v2/jobs/972/cancel/");
    }

    #[tokio::test]
    async fn test_failed_jobs_filter() {
        let transport = ScriptedTransport::new();
        transport.push_json(
            200,
            page(
                1,
                None,
                vec![json!({"id": 7, "name": "deploy", "status": "failed", "failed": true})],
            ),
        );
        let (transport, client) = client_with(transport);

        let jobs = client
            .jobs()
            .filter(Filter::new().field("failed", true))
            .unwrap()
            .try_collect()
            .await
            .unwrap();
        assert!(jobs[0].failed());
        assert_eq!(
            transport.requests()[0].target,
            "/api/v2/jobs/?failed=true&page_size=25"
        );
    }
}
