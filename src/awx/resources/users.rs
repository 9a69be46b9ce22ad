//! User resources

use crate::awx::client::AwxClient;
use crate::awx::entity::{Entity, EntityType, FieldSpec};
use crate::awx::manager::{EntityManager, Resource};

static USER: EntityType = EntityType::new(
    "user",
    "users",
    &[
        FieldSpec::text("username").filterable(),
        FieldSpec::text("first_name"),
        FieldSpec::text("last_name"),
        FieldSpec::text("email").filterable(),
        FieldSpec::boolean("is_superuser").filterable(),
        FieldSpec::text("external_account"),
    ],
);

/// A user account
#[derive(Debug, Clone)]
pub struct User<'a> {
    entity: Entity<'a>,
}

impl<'a> Resource<'a> for User<'a> {
    fn entity_type() -> &'static EntityType {
        &USER
    }

    fn from_entity(entity: Entity<'a>) -> Self {
        Self { entity }
    }

    fn entity(&self) -> &Entity<'a> {
        &self.entity
    }
}

impl<'a> User<'a> {
    pub fn id(&self) -> u64 {
        self.entity.id()
    }

    pub fn username(&self) -> &str {
        self.entity.text("username").unwrap_or_default()
    }

    pub fn first_name(&self) -> &str {
        self.entity.text("first_name").unwrap_or_default()
    }

    pub fn last_name(&self) -> &str {
        self.entity.text("last_name").unwrap_or_default()
    }

    pub fn email(&self) -> &str {
        self.entity.text("email").unwrap_or_default()
    }

    pub fn is_superuser(&self) -> bool {
        self.entity.boolean("is_superuser").unwrap_or(false)
    }

    /// Identifier of the external auth source, if the account is managed
    /// outside the server
    pub fn external_account(&self) -> Option<&str> {
        self.entity.text("external_account")
    }
}

impl AwxClient {
    /// Manager for the users collection
    pub fn users(&self) -> EntityManager<'_, User<'_>> {
        self.manager()
    }
}
