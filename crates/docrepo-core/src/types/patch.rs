//! Explicit partial-update payloads.

use serde_json::Value;

use super::stored::RawDocument;

/// Fields to overwrite on a stored document, with merge-patch semantics:
/// only the named fields change.
///
/// Unlike the entity diff, a patch can set a field to `""` or `null` on
/// purpose.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdatePatch {
    fields: RawDocument,
}

impl UpdatePatch {
    /// An empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `field` to `value`.
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Remove a field from the patch, returning its value.
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.fields.remove(field)
    }

    /// Whether the patch names `field`.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Take the fields.
    pub fn into_fields(self) -> RawDocument {
        self.fields
    }
}

impl From<RawDocument> for UpdatePatch {
    fn from(fields: RawDocument) -> Self {
        Self { fields }
    }
}
