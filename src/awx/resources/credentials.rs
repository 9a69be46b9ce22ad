//! Credential resources

use serde_json::{Map, Value};

use crate::awx::client::AwxClient;
use crate::awx::entity::{Entity, EntityType, FieldSpec};
use crate::awx::manager::{EntityManager, Resource};
use crate::error::Result;

use super::organizations::Organization;

static CREDENTIAL: EntityType = EntityType::new(
    "credential",
    "credentials",
    &[
        FieldSpec::text("name").filterable(),
        FieldSpec::text("description").filterable(),
        FieldSpec::integer("organization").filterable(),
        FieldSpec::integer("credential_type").filterable(),
        FieldSpec::structured("inputs"),
    ],
);

/// Stored secrets jobs authenticate with
#[derive(Debug, Clone)]
pub struct Credential<'a> {
    entity: Entity<'a>,
}

impl<'a> Resource<'a> for Credential<'a> {
    fn entity_type() -> &'static EntityType {
        &CREDENTIAL
    }

    fn from_entity(entity: Entity<'a>) -> Self {
        Self { entity }
    }

    fn entity(&self) -> &Entity<'a> {
        &self.entity
    }
}

impl<'a> Credential<'a> {
    pub fn id(&self) -> u64 {
        self.entity.id()
    }

    pub fn name(&self) -> &str {
        self.entity.text("name").unwrap_or_default()
    }

    pub fn description(&self) -> &str {
        self.entity.text("description").unwrap_or_default()
    }

    pub fn credential_type(&self) -> Option<u64> {
        self.entity.reference("credential_type")
    }

    /// Input values, with secrets already masked by the server
    pub fn inputs(&self) -> Option<&Map<String, Value>> {
        self.entity.structured("inputs")
    }

    /// The owning organization; personal credentials have none
    pub async fn organization(&self) -> Result<Option<Organization<'a>>> {
        match self.entity.reference("organization") {
            Some(id) => Ok(Some(
                self.entity.client().organizations().get_by_id(id).await?,
            )),
            None => Ok(None),
        }
    }
}

impl AwxClient {
    /// Manager for the credentials collection
    pub fn credentials(&self) -> EntityManager<'_, Credential<'_>> {
        self.manager()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::awx::testing::{client_with, page, ScriptedTransport};

    use super::*;

    #[tokio::test]
    async fn test_personal_credential_has_no_organization() {
        let transport = ScriptedTransport::new();
        transport.push_json(
            200,
            page(
                1,
                None,
                vec![json!({
                    "id": 6,
                    "name": "machine login",
                    "credential_type": 1,
                    "organization": null,
                    "inputs": {"username": "root", "password": "$encrypted$"}
                })],
            ),
        );
        let (transport, client) = client_with(transport);

        let credential = client.credentials().get_by_id(6).await.unwrap();
        assert_eq!(credential.credential_type(), Some(1));
        assert!(credential.organization().await.unwrap().is_none());
        assert_eq!(transport.calls(), 1);
        assert_eq!(
            credential.inputs().unwrap().get("password"),
            Some(&json!("$encrypted$"))
        );
    }
}
