//! The document capability contract.

use std::fmt::Debug;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// What an entity type must expose to be stored through the repository layer.
///
/// Identity is readable and writable; the audit fields are write-only from
/// the repository's point of view. The associated constants name the
/// serialized fields the repository treats specially and default to the
/// camelCase names produced by `DmlModel`.
pub trait Document: Serialize + DeserializeOwned + Debug + Send + Sync + 'static {
    /// Serialized name of the string identifier field.
    const ID_FIELD: &'static str = "id";
    /// Serialized name of the created-by field.
    const CREATED_BY_FIELD: &'static str = "createdBy";
    /// Serialized name of the created-on field.
    const CREATED_ON_FIELD: &'static str = "createdOn";
    /// Serialized name of the modified-by field.
    const MODIFIED_BY_FIELD: &'static str = "modifiedBy";
    /// Serialized name of the modified-on field.
    const MODIFIED_ON_FIELD: &'static str = "modifiedOn";
    /// Field compared against the actor in owner-filtered reads.
    const OWNER_FIELD: &'static str = "createdBy";

    /// The external string identifier; empty before first persistence.
    fn id(&self) -> &str;

    /// Replace the external string identifier.
    fn set_id(&mut self, id: String);

    /// Record who created the document.
    fn set_created_by(&mut self, by: &str);

    /// Record when the document was created.
    fn set_created_on(&mut self, on: &str);

    /// Record who last modified the document.
    fn set_modified_by(&mut self, by: &str);

    /// Record when the document was last modified.
    fn set_modified_on(&mut self, on: &str);
}
