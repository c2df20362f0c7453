//! Collection provisioning.

use tracing::info;

use docrepo_core::result::AppResult;
use docrepo_core::traits::collection::CollectionAccessor;

/// Create every collection in `names` that does not exist yet in `database`.
///
/// Returns the names that were created, in the order given.
pub async fn ensure_collections(
    accessor: &dyn CollectionAccessor,
    database: &str,
    names: &[String],
) -> AppResult<Vec<String>> {
    let existing = accessor.list_collection_names(database).await?;
    info!(database, collections = ?existing, "Listed existing collections");

    let mut created = Vec::new();
    for name in names {
        if existing.iter().any(|e| e == name) || created.contains(name) {
            info!(database, collection = %name, "Collection already present");
            continue;
        }
        accessor.create_collection(database, name).await?;
        info!(database, collection = %name, "Created collection");
        created.push(name.clone());
    }
    Ok(created)
}
