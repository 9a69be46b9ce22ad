//! Schedule resources

use crate::awx::client::AwxClient;
use crate::awx::entity::{Entity, EntityType, FieldSpec};
use crate::awx::manager::{EntityManager, Resource};

static SCHEDULE: EntityType = EntityType::new(
    "schedule",
    "schedules",
    &[
        FieldSpec::text("name").filterable(),
        FieldSpec::text("description").filterable(),
        FieldSpec::integer("unified_job_template").filterable(),
        FieldSpec::text("rrule"),
        FieldSpec::boolean("enabled").filterable(),
    ],
);

/// A recurring launch rule for a template
#[derive(Debug, Clone)]
pub struct Schedule<'a> {
    entity: Entity<'a>,
}

impl<'a> Resource<'a> for Schedule<'a> {
    fn entity_type() -> &'static EntityType {
        &SCHEDULE
    }

    fn from_entity(entity: Entity<'a>) -> Self {
        Self { entity }
    }

    fn entity(&self) -> &Entity<'a> {
        &self.entity
    }
}

impl<'a> Schedule<'a> {
    pub fn id(&self) -> u64 {
        self.entity.id()
    }

    pub fn name(&self) -> &str {
        self.entity.text("name").unwrap_or_default()
    }

    pub fn description(&self) -> &str {
        self.entity.text("description").unwrap_or_default()
    }

    /// iCal recurrence rule driving the schedule
    pub fn rrule(&self) -> &str {
        self.entity.text("rrule").unwrap_or_default()
    }

    pub fn enabled(&self) -> bool {
        self.entity.boolean("enabled").unwrap_or(false)
    }

    /// Id of the template the schedule launches
    pub fn unified_job_template(&self) -> Option<u64> {
        self.entity.reference("unified_job_template")
    }
}

impl AwxClient {
    /// Manager for the schedules collection
    pub fn schedules(&self) -> EntityManager<'_, Schedule<'_>> {
        self.manager()
    }
}
