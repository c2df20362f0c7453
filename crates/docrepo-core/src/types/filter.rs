//! Filter types passed through to the document store.
//!
//! The repository layer never interprets a [`Filter`] beyond building the
//! identifier and owner constraints it needs; backends evaluate or translate
//! the conditions.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::object_id::ObjectId;

/// Filter comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOp {
    /// Exact equality.
    Eq,
    /// Not equal.
    Ne,
    /// Greater than.
    Gt,
    /// Greater than or equal.
    Gte,
    /// Less than.
    Lt,
    /// Less than or equal.
    Lte,
    /// Membership in a list of values.
    In,
    /// Not a member of a list of values.
    Nin,
    /// Field presence (`true`) or absence (`false`).
    Exists,
}

/// A single filter condition on a named field.
///
/// Dotted field names (`address.city`) address nested fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterField {
    /// The field name to filter on.
    pub field: String,
    /// The comparison operator.
    pub op: FilterOp,
    /// The value to compare against.
    pub value: Value,
}

impl FilterField {
    /// Create a new filter field.
    pub fn new(field: impl Into<String>, op: FilterOp, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            op,
            value: value.into(),
        }
    }

    /// Shorthand for an equality filter.
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(field, FilterOp::Eq, value)
    }
}

/// A conjunction of conditions, optionally pinned to one native identifier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    /// Match only the document with this identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// Field conditions; all must hold.
    #[serde(default)]
    pub conditions: Vec<FilterField>,
}

impl Filter {
    /// A filter matching every document.
    pub fn all() -> Self {
        Self::default()
    }

    /// A filter matching the document with the given identifier.
    pub fn by_id(id: ObjectId) -> Self {
        Self {
            id: Some(id),
            conditions: Vec::new(),
        }
    }

    /// A filter restricting reads to documents owned by `owner`.
    pub fn owned_by(field: impl Into<String>, owner: impl Into<String>) -> Self {
        Self::all().and(FilterField::eq(field, owner.into()))
    }

    /// Add a condition.
    pub fn and(mut self, condition: FilterField) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Add an equality condition.
    pub fn and_eq(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.and(FilterField::eq(field, value))
    }

    /// Whether the filter matches every document.
    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.conditions.is_empty()
    }
}
