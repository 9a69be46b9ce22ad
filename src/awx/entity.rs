//! Validated entity records and their type descriptors

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::awx::client::AwxClient;
use crate::awx::locator::Locator;
use crate::awx::manager::{EntityManager, Resource};
use crate::awx::pagination::Record;
use crate::error::{AwxError, Result};

/// Value shape a declared field must carry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
    Bool,
    Structured,
}

impl FieldKind {
    pub(crate) fn matches(&self, value: &Value) -> bool {
        match self {
            FieldKind::Text => value.is_string(),
            FieldKind::Integer => value.is_i64() || value.is_u64(),
            FieldKind::Bool => value.is_boolean(),
            FieldKind::Structured => value.is_object(),
        }
    }

    pub(crate) fn describe(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Integer => "an integer",
            FieldKind::Bool => "a boolean",
            FieldKind::Structured => "a structured object",
        }
    }
}

/// Human-readable shape of a JSON value, for error messages
pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// One declared field of an entity type
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    name: &'static str,
    kind: FieldKind,
    filterable: bool,
}

impl FieldSpec {
    pub const fn text(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Text,
            filterable: false,
        }
    }

    pub const fn integer(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Integer,
            filterable: false,
        }
    }

    pub const fn boolean(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Bool,
            filterable: false,
        }
    }

    pub const fn structured(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Structured,
            filterable: false,
        }
    }

    /// Mark the field as understood by the server's query filtering
    pub const fn filterable(mut self) -> Self {
        self.filterable = true;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn is_filterable(&self) -> bool {
        self.filterable
    }
}

/// Static descriptor of a remote collection: its name, endpoint and the
/// fields records are expected to carry.
///
/// Descriptors drive record validation, filter validation and payload
/// validation, so a bad field name fails before any request goes out.
#[derive(Debug)]
pub struct EntityType {
    name: &'static str,
    endpoint: &'static str,
    fields: &'static [FieldSpec],
}

impl EntityType {
    pub const fn new(
        name: &'static str,
        endpoint: &'static str,
        fields: &'static [FieldSpec],
    ) -> Self {
        Self {
            name,
            endpoint,
            fields,
        }
    }

    /// Singular name used in error messages, e.g. `host`
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Collection endpoint under the API base, e.g. `hosts`
    pub fn endpoint(&self) -> &'static str {
        self.endpoint
    }

    pub fn fields(&self) -> &'static [FieldSpec] {
        self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.name == name)
    }
}

/// A validated record bound to the client it came from.
///
/// Construction checks the record against its [`EntityType`]: the `id`
/// must be present and integral, declared fields must carry their
/// declared kind when set, and the standard envelope keys must be well
/// formed. A record that fails is reported as the remote misbehaving.
#[derive(Debug, Clone)]
pub struct Entity<'a> {
    client: &'a AwxClient,
    ty: &'static EntityType,
    record: Record,
    id: u64,
}

impl<'a> Entity<'a> {
    pub(crate) fn new(
        client: &'a AwxClient,
        ty: &'static EntityType,
        record: Record,
    ) -> Result<Self> {
        let id = record.get("id").and_then(Value::as_u64).ok_or_else(|| {
            AwxError::RemoteUnavailable(format!(
                "malformed {} record: missing integer id",
                ty.name
            ))
        })?;
        for field in ty.fields {
            if let Some(value) = record.get(field.name) {
                if !value.is_null() && !field.kind.matches(value) {
                    return Err(AwxError::RemoteUnavailable(format!(
                        "malformed {} record {}: field '{}' is not {}",
                        ty.name,
                        id,
                        field.name,
                        field.kind.describe()
                    )));
                }
            }
        }
        for key in ["type", "url", "created", "modified"] {
            if let Some(value) = record.get(key) {
                if !value.is_null() && !value.is_string() {
                    return Err(AwxError::RemoteUnavailable(format!(
                        "malformed {} record {}: field '{}' is not a string",
                        ty.name, id, key
                    )));
                }
            }
        }
        if let Some(related) = record.get("related") {
            if !related.is_null() && !related.is_object() {
                return Err(AwxError::RemoteUnavailable(format!(
                    "malformed {} record {}: field 'related' is not an object",
                    ty.name, id
                )));
            }
        }
        Ok(Self {
            client,
            ty,
            record,
            id,
        })
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn entity_type(&self) -> &'static EntityType {
        self.ty
    }

    pub(crate) fn client(&self) -> &'a AwxClient {
        self.client
    }

    /// Raw value of a declared field
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.ty.field(name)?;
        self.record.get(name)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.field(name)?.as_str()
    }

    pub fn integer(&self, name: &str) -> Option<i64> {
        self.field(name)?.as_i64()
    }

    pub fn boolean(&self, name: &str) -> Option<bool> {
        self.field(name)?.as_bool()
    }

    /// Id carried by a declared relation field
    pub fn reference(&self, name: &str) -> Option<u64> {
        self.field(name)?.as_u64()
    }

    pub fn structured(&self, name: &str) -> Option<&Map<String, Value>> {
        self.field(name)?.as_object()
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.timestamp("created")
    }

    pub fn modified_at(&self) -> Option<DateTime<Utc>> {
        self.timestamp("modified")
    }

    fn timestamp(&self, key: &str) -> Option<DateTime<Utc>> {
        let raw = self.record.get(key)?.as_str()?;
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|parsed| parsed.with_timezone(&Utc))
    }

    /// Locator from the record's `related` envelope
    pub fn related(&self, name: &str) -> Option<Locator> {
        self.record
            .get("related")?
            .as_object()?
            .get(name)?
            .as_str()
            .map(Locator::parse)
    }

    /// Like [`related`](Self::related), but a missing entry is reported as
    /// the remote misbehaving
    pub(crate) fn related_locator(&self, name: &str) -> Result<Locator> {
        self.related(name).ok_or_else(|| {
            AwxError::RemoteUnavailable(format!(
                "{} record {} has no related '{}' endpoint",
                self.ty.name, self.id, name
            ))
        })
    }

    /// Manager scoped to one of the record's related collections
    pub fn related_manager<R: Resource<'a>>(&self, name: &str) -> Result<EntityManager<'a, R>> {
        Ok(EntityManager::scoped(self.client, self.related_locator(name)?))
    }

    /// The full record as the server sent it
    pub fn record(&self) -> &Record {
        &self.record
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::awx::testing::{client_with, ScriptedTransport};

    use super::*;

    static WIDGET: EntityType = EntityType::new(
        "widget",
        "widgets",
        &[
            FieldSpec::text("name").filterable(),
            FieldSpec::text("description"),
            FieldSpec::integer("size"),
            FieldSpec::boolean("enabled").filterable(),
            FieldSpec::structured("variables"),
        ],
    );

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            _ => panic!("fixture must be an object"),
        }
    }

    #[test]
    fn test_descriptor_lookup() {
        assert_eq!(WIDGET.endpoint(), "widgets");
        assert_eq!(WIDGET.field("size").unwrap().kind(), FieldKind::Integer);
        assert!(WIDGET.field("name").unwrap().is_filterable());
        assert!(!WIDGET.field("size").unwrap().is_filterable());
        assert!(WIDGET.field("bogus").is_none());
    }

    #[test]
    fn test_entity_accessors() {
        let (_, client) = client_with(ScriptedTransport::new());
        let entity = Entity::new(
            &client,
            &WIDGET,
            record(json!({
                "id": 7,
                "name": "spinner",
                "size": 3,
                "enabled": true,
                "variables": {"speed": "fast"},
                "created": "2024-02-01T10:30:00.000000Z",
                "related": {"parts": "/api/v2/widgets/7/parts/"}
            })),
        )
        .unwrap();

        assert_eq!(entity.id(), 7);
        assert_eq!(entity.text("name"), Some("spinner"));
        assert_eq!(entity.integer("size"), Some(3));
        assert_eq!(entity.boolean("enabled"), Some(true));
        assert_eq!(
            entity.structured("variables").unwrap().get("speed"),
            Some(&json!("fast"))
        );
        assert_eq!(entity.created_at().unwrap().to_rfc3339(), "2024-02-01T10:30:00+00:00");
        assert!(entity.modified_at().is_none());
        assert_eq!(
            entity.related("parts").unwrap().path(),
            "/api/v2/widgets/7/parts/"
        );
        assert!(entity.related("bogus").is_none());
    }

    #[test]
    fn test_undeclared_fields_are_not_exposed() {
        let (_, client) = client_with(ScriptedTransport::new());
        let entity = Entity::new(
            &client,
            &WIDGET,
            record(json!({"id": 1, "name": "a", "summary_fields": {"x": 1}})),
        )
        .unwrap();
        assert!(entity.field("summary_fields").is_none());
        assert!(entity.record().contains_key("summary_fields"));
    }

    #[test]
    fn test_missing_id_is_a_remote_fault() {
        let (_, client) = client_with(ScriptedTransport::new());
        let result = Entity::new(&client, &WIDGET, record(json!({"name": "a"})));
        assert!(matches!(result, Err(AwxError::RemoteUnavailable(_))));
    }

    #[test]
    fn test_kind_mismatch_is_a_remote_fault() {
        let (_, client) = client_with(ScriptedTransport::new());
        let result = Entity::new(&client, &WIDGET, record(json!({"id": 1, "size": "big"})));
        match result {
            Err(AwxError::RemoteUnavailable(message)) => {
                assert!(message.contains("'size'"));
                assert!(message.contains("an integer"));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_null_declared_field_is_tolerated() {
        let (_, client) = client_with(ScriptedTransport::new());
        let entity = Entity::new(
            &client,
            &WIDGET,
            record(json!({"id": 1, "description": null})),
        )
        .unwrap();
        assert!(entity.text("description").is_none());
    }

    #[test]
    fn test_malformed_related_is_a_remote_fault() {
        let (_, client) = client_with(ScriptedTransport::new());
        let result = Entity::new(&client, &WIDGET, record(json!({"id": 1, "related": [1, 2]})));
        assert!(matches!(result, Err(AwxError::RemoteUnavailable(_))));
    }
}
