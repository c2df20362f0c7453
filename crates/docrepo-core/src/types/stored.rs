//! Store-side document representation.

use serde_json::{Map, Value};

use super::object_id::ObjectId;

/// Field/value form of a document without its identifier.
pub type RawDocument = Map<String, Value>;

/// A document as held by the store: the native identifier plus the
/// remaining fields.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    /// Native identifier assigned at insertion.
    pub id: ObjectId,
    /// All other fields.
    pub fields: RawDocument,
}

impl StoredDocument {
    /// Create a stored document.
    pub fn new(id: ObjectId, fields: RawDocument) -> Self {
        Self { id, fields }
    }

    /// Look up a field by dotted path (`address.city`).
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        lookup_path(&self.fields, path)
    }
}

/// Look up a value by dotted path inside a raw document.
pub fn lookup_path<'a>(fields: &'a RawDocument, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let mut current = fields.get(segments.next()?)?;
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}
