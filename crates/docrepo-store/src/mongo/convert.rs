//! Conversions between DocRepo types and BSON.

use bson::oid::ObjectId as BsonObjectId;
use bson::{Bson, Document};
use serde_json::Value;

use docrepo_core::error::{AppError, ErrorKind};
use docrepo_core::result::AppResult;
use docrepo_core::types::filter::{Filter, FilterField, FilterOp};
use docrepo_core::types::find_options::SortField;
use docrepo_core::types::object_id::ObjectId;
use docrepo_core::types::stored::{RawDocument, StoredDocument};

/// Field name MongoDB reserves for the native identifier.
pub const ID_KEY: &str = "_id";

/// Convert a native identifier to the driver's type.
pub fn to_bson_oid(id: ObjectId) -> BsonObjectId {
    BsonObjectId::from_bytes(id.bytes())
}

/// Convert the driver's identifier type to a native identifier.
pub fn from_bson_oid(oid: BsonObjectId) -> ObjectId {
    ObjectId::from_bytes(oid.bytes())
}

/// Encode raw fields as a BSON document.
pub fn to_bson_document(fields: &RawDocument) -> AppResult<Document> {
    bson::to_document(fields).map_err(|e| {
        AppError::with_source(
            ErrorKind::Serialization,
            format!("Failed to encode document as BSON: {e}"),
            e,
        )
    })
}

fn to_bson_value(value: &Value) -> AppResult<Bson> {
    bson::to_bson(value).map_err(|e| {
        AppError::with_source(
            ErrorKind::Serialization,
            format!("Failed to encode filter value as BSON: {e}"),
            e,
        )
    })
}

/// Decode a BSON document read from the store.
///
/// Fails with `Decode` when the document has no `_id` or its `_id` is not an
/// ObjectId.
pub fn from_bson_document(document: Document) -> AppResult<StoredDocument> {
    let mut id = None;
    let mut fields = RawDocument::new();

    for (key, value) in document {
        if key == ID_KEY {
            match value {
                Bson::ObjectId(oid) => id = Some(from_bson_oid(oid)),
                other => {
                    return Err(AppError::decode(format!(
                        "Document identifier is not an ObjectId: {other}"
                    )));
                }
            }
        } else {
            fields.insert(key, value.into_relaxed_extjson());
        }
    }

    let id = id.ok_or_else(|| AppError::decode("Document has no identifier"))?;
    Ok(StoredDocument::new(id, fields))
}

/// Translate a filter into a MongoDB query document.
pub fn filter_to_bson(filter: &Filter) -> AppResult<Document> {
    let mut clauses = Vec::with_capacity(filter.conditions.len() + 1);

    if let Some(id) = filter.id {
        let mut clause = Document::new();
        clause.insert(ID_KEY, to_bson_oid(id));
        clauses.push(clause);
    }
    for condition in &filter.conditions {
        clauses.push(condition_to_bson(condition)?);
    }

    Ok(match clauses.len() {
        0 => Document::new(),
        1 => clauses.remove(0),
        _ => {
            let mut query = Document::new();
            let all: Vec<Bson> = clauses.into_iter().map(Bson::Document).collect();
            query.insert("$and", all);
            query
        }
    })
}

fn condition_to_bson(condition: &FilterField) -> AppResult<Document> {
    let value = to_bson_value(&condition.value)?;
    let operator = match condition.op {
        FilterOp::Eq => {
            let mut clause = Document::new();
            clause.insert(condition.field.clone(), value);
            return Ok(clause);
        }
        FilterOp::Ne => "$ne",
        FilterOp::Gt => "$gt",
        FilterOp::Gte => "$gte",
        FilterOp::Lt => "$lt",
        FilterOp::Lte => "$lte",
        FilterOp::In => "$in",
        FilterOp::Nin => "$nin",
        FilterOp::Exists => "$exists",
    };

    let mut predicate = Document::new();
    predicate.insert(operator, value);
    let mut clause = Document::new();
    clause.insert(condition.field.clone(), predicate);
    Ok(clause)
}

/// Translate sort keys into a MongoDB sort document.
pub fn sort_to_bson(sort: &[SortField]) -> Document {
    let mut document = Document::new();
    for key in sort {
        document.insert(key.field.clone(), key.direction.as_i32());
    }
    document
}
