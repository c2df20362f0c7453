//! Translation between entities and their stored form.

use serde_json::Value;

use docrepo_core::error::{AppError, ErrorKind};
use docrepo_core::result::AppResult;
use docrepo_core::traits::document::Document;
use docrepo_core::types::object_id::ObjectId;
use docrepo_core::types::stored::{RawDocument, StoredDocument};

/// Key a store uses for its native identifier. Never written by the repository.
pub const NATIVE_ID_KEY: &str = "_id";

/// Decode an external identifier, failing with `InvalidIdentifier`.
pub fn parse_id(id: &str) -> AppResult<ObjectId> {
    ObjectId::parse_str(id)
}

/// Encode an entity to field/value form without its identifier.
pub fn encode_entity<T: Document>(entity: &T) -> AppResult<RawDocument> {
    match serde_json::to_value(entity)? {
        Value::Object(mut fields) => {
            fields.remove(T::ID_FIELD);
            fields.remove(NATIVE_ID_KEY);
            Ok(fields)
        }
        other => Err(AppError::serialization(format!(
            "Entity must serialize to an object, got {other}"
        ))),
    }
}

/// Materialize a stored document as an entity, translating the native
/// identifier into the entity's string id.
pub fn decode_entity<T: Document>(document: StoredDocument) -> AppResult<T> {
    let StoredDocument { id, fields } = document;
    let mut entity: T = serde_json::from_value(Value::Object(fields)).map_err(|e| {
        AppError::with_source(
            ErrorKind::Decode,
            format!("Failed to decode document {id}: {e}"),
            e,
        )
    })?;
    entity.set_id(id.to_hex());
    Ok(entity)
}
