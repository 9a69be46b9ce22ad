//! Field/value predicates over entity collections

use serde_json::Value;

use crate::awx::entity::{json_kind, EntityType, FieldKind};
use crate::awx::pagination::Record;
use crate::error::{AwxError, Result};

/// Conjunction of field/value terms.
///
/// A filter is checked against the entity type before any request goes
/// out: every term must name a declared field (or `id`) and carry a value
/// of the declared kind. When all named fields are server-filterable the
/// terms are pushed down as query parameters; otherwise records are
/// matched locally while the cursor drains the collection.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    terms: Vec<(String, Value)>,
    fold_case: bool,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `name` to equal `value`
    pub fn field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.terms.push((name.into(), value.into()));
        self
    }

    /// Compare text values case-insensitively
    pub fn ignore_case(mut self) -> Self {
        self.fold_case = true;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Check every term against the entity type
    pub(crate) fn validate(&self, ty: &EntityType) -> Result<()> {
        for (name, value) in &self.terms {
            let kind = if name == "id" {
                FieldKind::Integer
            } else {
                match ty.field(name) {
                    Some(field) => field.kind(),
                    None => {
                        return Err(AwxError::Validation(format!(
                            "unknown field '{}' for {}",
                            name,
                            ty.name()
                        )))
                    }
                }
            };
            if !kind.matches(value) {
                return Err(AwxError::Validation(format!(
                    "field '{}' of {} expects {}, got {}",
                    name,
                    ty.name(),
                    kind.describe(),
                    json_kind(value)
                )));
            }
        }
        Ok(())
    }

    /// Query parameters for a server-side evaluation, or `None` when any
    /// term names a field the server will not filter on.
    ///
    /// Case folding uses the server's `__iexact` form on text terms.
    pub(crate) fn server_params(&self, ty: &EntityType) -> Option<Vec<(String, String)>> {
        let mut params = Vec::with_capacity(self.terms.len());
        for (name, value) in &self.terms {
            let filterable = name == "id"
                || ty
                    .field(name)
                    .map(|field| field.is_filterable())
                    .unwrap_or(false);
            if !filterable {
                return None;
            }
            let key = if self.fold_case && value.is_string() {
                format!("{}__iexact", name)
            } else {
                name.clone()
            };
            params.push((key, render(value)));
        }
        Some(params)
    }

    /// Evaluate the filter against one record
    pub(crate) fn matches(&self, record: &Record) -> bool {
        self.terms.iter().all(|(name, expected)| {
            match record.get(name) {
                Some(actual) => values_equal(actual, expected, self.fold_case),
                None => false,
            }
        })
    }
}

fn values_equal(actual: &Value, expected: &Value, fold_case: bool) -> bool {
    if fold_case {
        if let (Some(actual), Some(expected)) = (actual.as_str(), expected.as_str()) {
            return actual.to_lowercase() == expected.to_lowercase();
        }
    }
    actual == expected
}

fn render(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
