//! Typed managers over remote collections

use std::marker::PhantomData;

use futures::stream::{self, Stream};
use log::debug;
use serde_json::Value;

use crate::awx::client::AwxClient;
use crate::awx::entity::{json_kind, Entity, EntityType, FieldKind};
use crate::awx::filter::Filter;
use crate::awx::locator::Locator;
use crate::awx::pagination::{Record, RecordCursor};
use crate::awx::transport::Method;
use crate::config::api;
use crate::error::{AwxError, Result};

/// A typed view over a validated [`Entity`].
///
/// Each resource module declares its [`EntityType`] and wraps entities in
/// a named struct with typed accessors. Managers and cursors produce any
/// implementor, so caller-defined resources work the same way as the
/// bundled ones.
pub trait Resource<'a>: Sized {
    /// Descriptor of the remote collection
    fn entity_type() -> &'static EntityType;
    /// Wrap a validated entity
    fn from_entity(entity: Entity<'a>) -> Self;
    /// The underlying entity
    fn entity(&self) -> &Entity<'a>;
}

pub(crate) fn resource_from_value<'a, R: Resource<'a>>(
    client: &'a AwxClient,
    value: Value,
) -> Result<R> {
    let record = match value {
        Value::Object(record) => record,
        other => {
            return Err(AwxError::RemoteUnavailable(format!(
                "expected a {} record, got {}",
                R::entity_type().name(),
                json_kind(&other)
            )))
        }
    };
    let entity = Entity::new(client, R::entity_type(), record)?;
    Ok(R::from_entity(entity))
}

fn validate_assignment(ty: &EntityType, name: &str, value: &Value) -> Result<()> {
    if name == "id" {
        return Err(AwxError::Validation(format!(
            "'id' of {} is assigned by the server",
            ty.name()
        )));
    }
    let field = ty.field(name).ok_or_else(|| {
        AwxError::Validation(format!("unknown field '{}' for {}", name, ty.name()))
    })?;
    if !value.is_null() && !field.kind().matches(value) {
        return Err(AwxError::Validation(format!(
            "field '{}' of {} expects {}, got {}",
            name,
            ty.name(),
            field.kind().describe(),
            json_kind(value)
        )));
    }
    Ok(())
}

/// Set of field assignments applied by [`EntityManager::update`].
///
/// [`set`](Patch::set) merges structured values key-wise into the stored
/// object, so unmentioned keys survive; [`replace`](Patch::replace) sends
/// the value verbatim and is the way to drop keys.
#[derive(Debug, Clone, Default)]
pub struct Patch {
    terms: Vec<PatchTerm>,
}

#[derive(Debug, Clone)]
struct PatchTerm {
    name: String,
    value: Value,
    replace: bool,
}

impl Patch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign `value` to `name`, merging one level when both the stored
    /// and incoming values are structured
    pub fn set(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.terms.push(PatchTerm {
            name: name.into(),
            value: value.into(),
            replace: false,
        });
        self
    }

    /// Assign `value` to `name` verbatim
    pub fn replace(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.terms.push(PatchTerm {
            name: name.into(),
            value: value.into(),
            replace: true,
        });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    fn validate(&self, ty: &EntityType) -> Result<()> {
        for term in &self.terms {
            validate_assignment(ty, &term.name, &term.value)?;
        }
        Ok(())
    }

    fn into_payload(self, current: &Entity<'_>) -> Record {
        let mut payload = Record::new();
        for term in self.terms {
            let merged = if term.replace {
                None
            } else {
                match (&term.value, current.structured(&term.name)) {
                    (Value::Object(incoming), Some(stored)) => {
                        let mut combined = stored.clone();
                        for (key, value) in incoming {
                            combined.insert(key.clone(), value.clone());
                        }
                        Some(Value::Object(combined))
                    }
                    _ => None,
                }
            };
            payload.insert(term.name, merged.unwrap_or(term.value));
        }
        payload
    }
}

/// Typed manager for one remote collection.
///
/// Obtained from the client accessors (e.g. [`AwxClient::manager`] or the
/// per-resource methods) or from an entity's related collections. All
/// listing operations hand back cursors that fetch pages on demand.
pub struct EntityManager<'a, R> {
    client: &'a AwxClient,
    base: Locator,
    page_size: u32,
    marker: PhantomData<fn() -> R>,
}

impl<'a, R: Resource<'a>> EntityManager<'a, R> {
    pub(crate) fn new(client: &'a AwxClient) -> Self {
        Self::scoped(client, Locator::collection(R::entity_type().endpoint()))
    }

    pub(crate) fn scoped(client: &'a AwxClient, base: Locator) -> Self {
        Self {
            client,
            base,
            page_size: api::DEFAULT_PAGE_SIZE,
            marker: PhantomData,
        }
    }

    /// Override the page size hint sent with the first request
    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn entity_type(&self) -> &'static EntityType {
        R::entity_type()
    }

    /// Cursor over the whole collection
    pub fn list(&self) -> EntityCursor<'a, R> {
        self.cursor(self.base.clone(), None)
    }

    /// Cursor over the records matching `filter`.
    ///
    /// The filter is validated first; nothing is requested when it names
    /// an unknown field or carries a mistyped value. Terms the server can
    /// evaluate are pushed down as query parameters, anything else is
    /// matched locally while draining the collection.
    pub fn filter(&self, filter: Filter) -> Result<EntityCursor<'a, R>> {
        let ty = R::entity_type();
        filter.validate(ty)?;
        match filter.server_params(ty) {
            Some(params) => {
                let mut start = self.base.clone();
                for (name, value) in params {
                    start.push_param(name, value);
                }
                Ok(self.cursor(start, None))
            }
            None => Ok(self.cursor(self.base.clone(), Some(filter))),
        }
    }

    fn cursor(&self, start: Locator, local: Option<Filter>) -> EntityCursor<'a, R> {
        EntityCursor {
            client: self.client,
            records: RecordCursor::new(self.client, start, self.page_size),
            local,
            marker: PhantomData,
        }
    }

    /// First record matching `filter`, if any
    pub async fn find_one(&self, filter: Filter) -> Result<Option<R>> {
        self.filter(filter)?.try_next().await
    }

    /// The single record with the given id.
    ///
    /// No match is [`AwxError::NotFound`]; more than one match means the
    /// lookup did not identify a record and is reported as
    /// [`AwxError::AmbiguousResult`] rather than resolved arbitrarily.
    pub async fn get_by_id(&self, id: u64) -> Result<R> {
        let ty = R::entity_type();
        let mut cursor = self.filter(Filter::new().field("id", id))?;
        let first = match cursor.try_next().await? {
            Some(found) => found,
            None => {
                return Err(AwxError::NotFound {
                    entity: ty.name(),
                    lookup: format!("id {}", id),
                })
            }
        };
        if cursor.try_next().await?.is_some() {
            return Err(AwxError::AmbiguousResult {
                entity: ty.name(),
                lookup: format!("id {}", id),
            });
        }
        Ok(first)
    }

    /// Records whose text fields contain `keyword`.
    ///
    /// This drains the whole collection and scans locally, so it costs a
    /// full traversal. Matching folds case unless `case_sensitive`.
    pub async fn search(&self, keyword: &str, case_sensitive: bool) -> Result<Vec<R>> {
        let ty = R::entity_type();
        let needle = if case_sensitive {
            keyword.to_string()
        } else {
            keyword.to_lowercase()
        };
        let mut found = Vec::new();
        let mut cursor = self.list();
        while let Some(item) = cursor.try_next().await? {
            let hit = ty
                .fields()
                .iter()
                .filter(|field| field.kind() == FieldKind::Text)
                .any(|field| match item.entity().text(field.name()) {
                    Some(text) if case_sensitive => text.contains(needle.as_str()),
                    Some(text) => text.to_lowercase().contains(needle.as_str()),
                    None => false,
                });
            if hit {
                found.push(item);
            }
        }
        Ok(found)
    }

    /// Create a record from a JSON object of declared fields
    pub async fn create(&self, fields: Value) -> Result<R> {
        let ty = R::entity_type();
        let payload = match fields {
            Value::Object(payload) => payload,
            other => {
                return Err(AwxError::Validation(format!(
                    "create payload for {} must be an object, got {}",
                    ty.name(),
                    json_kind(&other)
                )))
            }
        };
        for (name, value) in &payload {
            validate_assignment(ty, name, value)?;
        }
        debug!("creating {} in {}", ty.name(), self.base);
        let body = Value::Object(payload);
        let value = self
            .client
            .request_json(Method::Post, &self.base, Some(&body))
            .await?;
        resource_from_value(self.client, value)
    }

    /// Apply a patch to the record with the given id.
    ///
    /// The current record is fetched first so structured assignments can
    /// merge against what is stored. Returns the updated record.
    pub async fn update(&self, id: u64, patch: Patch) -> Result<R> {
        let ty = R::entity_type();
        patch.validate(ty)?;
        let current = self.get_by_id(id).await?;
        let payload = patch.into_payload(current.entity());
        let locator = Locator::resource(ty.endpoint(), id);
        debug!("updating {} {}", ty.name(), id);
        let value = self
            .client
            .request_json(Method::Patch, &locator, Some(&Value::Object(payload)))
            .await?;
        resource_from_value(self.client, value)
    }

    /// Delete the record with the given id
    pub async fn delete(&self, id: u64) -> Result<()> {
        let ty = R::entity_type();
        let locator = Locator::resource(ty.endpoint(), id);
        debug!("deleting {} {}", ty.name(), id);
        let response = self.client.send(Method::Delete, &locator, None).await?;
        match response.status {
            status if (200..300).contains(&status) => Ok(()),
            404 => Err(AwxError::NotFound {
                entity: ty.name(),
                lookup: format!("id {}", id),
            }),
            status => Err(AwxError::UnexpectedStatus {
                status,
                body: response.body,
            }),
        }
    }
}

impl AwxClient {
    /// Manager for any resource type, including caller-defined ones
    pub fn manager<'a, R: Resource<'a>>(&'a self) -> EntityManager<'a, R> {
        EntityManager::new(self)
    }
}

/// Cursor producing typed resources in server order.
///
/// Driven by a [`RecordCursor`], so pages are fetched only as items are
/// consumed and continuation follows the server's `next` values. Dropping
/// the cursor mid-way fetches nothing further.
pub struct EntityCursor<'a, R> {
    client: &'a AwxClient,
    records: RecordCursor<'a>,
    local: Option<Filter>,
    marker: PhantomData<fn() -> R>,
}

impl<'a, R: Resource<'a>> EntityCursor<'a, R> {
    /// Next matching resource, or `None` once the collection is exhausted
    pub async fn try_next(&mut self) -> Result<Option<R>> {
        while let Some(record) = self.records.try_next().await? {
            if let Some(filter) = &self.local {
                if !filter.matches(&record) {
                    continue;
                }
            }
            let entity = Entity::new(self.client, R::entity_type(), record)?;
            return Ok(Some(R::from_entity(entity)));
        }
        Ok(None)
    }

    /// Drain the cursor into a vector
    pub async fn try_collect(mut self) -> Result<Vec<R>> {
        let mut items = Vec::new();
        while let Some(item) = self.try_next().await? {
            items.push(item);
        }
        Ok(items)
    }

    /// Collection total from the first fetched page, `None` before any
    /// fetch. Counts records, not filter matches.
    pub fn total(&self) -> Option<u64> {
        self.records.total()
    }

    /// Adapt the cursor to a [`Stream`]
    pub fn into_stream(self) -> impl Stream<Item = Result<R>> + 'a
    where
        R: 'a,
    {
        stream::try_unfold(self, |mut cursor| async move {
            let item = cursor.try_next().await?;
            Ok::<_, AwxError>(item.map(|resource| (resource, cursor)))
        })
    }
}
