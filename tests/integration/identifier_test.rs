//! Integration tests for identifier handling.

mod helpers;

use docrepo_core::traits::{Document, Repository};
use docrepo_core::types::ObjectId;
use docrepo_core::types::patch::UpdatePatch;
use helpers::{CUSTOMERS, Customer, DB, TestApp};

const MALFORMED: [&str; 5] = [
    "abc123",
    "",
    "65f1a2b3c4d5e6f708192a3",
    "65f1a2b3c4d5e6f708192a3bc",
    "zzf1a2b3c4d5e6f708192a3b",
];

#[tokio::test]
async fn test_malformed_ids_never_reach_the_store() {
    let app = TestApp::new();

    for id in MALFORMED {
        let err = app.repo.get_by_id(id, DB, CUSTOMERS, "svc1").await.unwrap_err();
        assert!(err.is_invalid_identifier(), "get_by_id({id:?}) gave {err}");

        let err = app.repo.delete(id, DB, CUSTOMERS).await.unwrap_err();
        assert!(err.is_invalid_identifier(), "delete({id:?}) gave {err}");

        let err = app
            .repo
            .update(Customer::renamed(id, "X"), DB, CUSTOMERS, "svc1")
            .await
            .unwrap_err();
        assert!(err.is_invalid_identifier(), "update({id:?}) gave {err}");

        let err = app
            .repo
            .update_fields(id, UpdatePatch::new().set("name", "X"), DB, CUSTOMERS, "svc1")
            .await
            .unwrap_err();
        assert!(err.is_invalid_identifier(), "update_fields({id:?}) gave {err}");
    }

    assert_eq!(app.store_calls(), 0);
}

#[tokio::test]
async fn test_assigned_ids_are_canonical_hex() {
    let app = TestApp::new();
    let created = app
        .repo
        .create(Customer::new("Ann", "ann@example.com"), DB, CUSTOMERS, "svc1")
        .await
        .unwrap();

    let id = created.id();
    assert_eq!(id.len(), 24);
    assert!(id.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    assert_eq!(ObjectId::parse_str(id).unwrap().to_hex(), id);
}

#[tokio::test]
async fn test_well_formed_unknown_id_is_not_found() {
    let app = TestApp::new();
    let unknown = ObjectId::new().to_hex();

    let err = app
        .repo
        .get_by_id(&unknown, DB, CUSTOMERS, "svc1")
        .await
        .unwrap_err();
    assert!(err.is_not_found());

    let err = app.repo.delete(&unknown, DB, CUSTOMERS).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_uppercase_id_addresses_same_document() {
    let app = TestApp::new();
    let created = app
        .repo
        .create(Customer::new("Ann", "ann@example.com"), DB, CUSTOMERS, "svc1")
        .await
        .unwrap();

    let removed = app
        .repo
        .delete(&created.id().to_uppercase(), DB, CUSTOMERS)
        .await
        .unwrap();
    assert_eq!(removed.id(), created.id());
}
