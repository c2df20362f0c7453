//! Partial-update diff engine.
//!
//! Reduces a fully populated entity to the fields that should overwrite the
//! stored document. A field holding an empty string or null counts as "not
//! specified" and is dropped, so this path cannot clear a field; use an
//! explicit [`UpdatePatch`] for that.

use serde_json::Value;

use docrepo_core::result::AppResult;
use docrepo_core::traits::document::Document;
use docrepo_core::types::patch::UpdatePatch;

use crate::decode::{NATIVE_ID_KEY, encode_entity};

/// Whether a serialized value is the "not specified" sentinel.
pub fn is_unspecified(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Build the merge-patch for `entity`: every non-empty top-level field except
/// the identifier and the creation audit fields.
pub fn partial_update<T: Document>(entity: &T) -> AppResult<UpdatePatch> {
    let mut fields = encode_entity(entity)?;
    fields.retain(|_, value| !is_unspecified(value));
    Ok(writable::<T>(UpdatePatch::from(fields)))
}

/// Drop the fields no update may write: the identifier (both forms) and the
/// creation audit fields.
pub fn writable<T: Document>(mut patch: UpdatePatch) -> UpdatePatch {
    for field in [
        T::ID_FIELD,
        NATIVE_ID_KEY,
        T::CREATED_BY_FIELD,
        T::CREATED_ON_FIELD,
    ] {
        patch.remove(field);
    }
    patch
}
