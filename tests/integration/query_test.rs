//! Integration tests for owner-scoped and filtered reads.

mod helpers;

use std::sync::Arc;
use std::time::Duration;

use docrepo_core::traits::{Document, Repository};
use docrepo_core::types::filter::{Filter, FilterField, FilterOp};
use docrepo_core::types::find_options::{FindOptions, SortField};
use docrepo_repository::{DocumentRepository, RepositoryContext};
use docrepo_store::MemoryStore;
use helpers::{CUSTOMERS, Customer, DB, FlakyCursorAccessor, TestApp};
use serde_json::json;

async fn seed(app: &TestApp) {
    for (name, tier, limit, city, actor) in [
        ("Ann", "gold", 900, "Oslo", "svc1"),
        ("Ben", "silver", 300, "Bergen", "svc1"),
        ("Cid", "gold", 1200, "Oslo", "svc2"),
        ("Dot", "bronze", 50, "Tromso", "svc1"),
    ] {
        app.repo
            .create(
                Customer::new(name, &format!("{}@example.com", name.to_lowercase()))
                    .tier(tier)
                    .credit_limit(limit)
                    .city(city),
                DB,
                CUSTOMERS,
                actor,
            )
            .await
            .unwrap();
    }
}

fn names(customers: Vec<Customer>) -> Vec<String> {
    customers.into_iter().map(|c| c.name).collect()
}

#[tokio::test]
async fn test_get_all_hides_other_owners() {
    let app = TestApp::new();
    seed(&app).await;

    let mine = app.repo.get_all(DB, CUSTOMERS, "svc1").await.unwrap();
    assert_eq!(names(mine), vec!["Ann", "Ben", "Dot"]);

    let theirs = app.repo.get_all(DB, CUSTOMERS, "svc2").await.unwrap();
    assert_eq!(names(theirs), vec!["Cid"]);

    let nobody = app.repo.get_all(DB, CUSTOMERS, "svc9").await.unwrap();
    assert!(nobody.is_empty());
}

#[tokio::test]
async fn test_get_by_id_hides_other_owners() {
    let app = TestApp::new();
    let created = app
        .repo
        .create(Customer::new("Ann", "ann@example.com"), DB, CUSTOMERS, "svc1")
        .await
        .unwrap();

    let err = app
        .repo
        .get_by_id(created.id(), DB, CUSTOMERS, "svc2")
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_get_all_skips_malformed_documents() {
    let app = TestApp::new();
    seed(&app).await;
    app.insert_raw(json!({"name": 42, "createdBy": "svc1"})).await;

    let mine = app.repo.get_all(DB, CUSTOMERS, "svc1").await.unwrap();
    assert_eq!(mine.len(), 3);
}

#[tokio::test]
async fn test_filter_on_nested_field_with_sort() {
    let app = TestApp::new();
    seed(&app).await;

    let found = app
        .repo
        .get_by_filter(
            Filter::all().and_eq("address.city", "Oslo"),
            FindOptions::default().sort_by(SortField::desc("creditLimit")),
            DB,
            CUSTOMERS,
        )
        .await
        .unwrap();
    assert_eq!(names(found), vec!["Cid", "Ann"]);
}

#[tokio::test]
async fn test_filter_with_membership_and_paging() {
    let app = TestApp::new();
    seed(&app).await;

    let filter = Filter::all()
        .and(FilterField::new("tier", FilterOp::In, json!(["gold", "silver"])))
        .and(FilterField::new("creditLimit", FilterOp::Lt, 1000));
    let options = FindOptions::default()
        .sort_by(SortField::asc("name"))
        .skip(1)
        .limit(5);

    let found = app
        .repo
        .get_by_filter(filter, options, DB, CUSTOMERS)
        .await
        .unwrap();
    assert_eq!(names(found), vec!["Ben"]);
}

#[tokio::test]
async fn test_cursor_failure_keeps_partial_results() {
    let store = MemoryStore::new();
    let writer: DocumentRepository<Customer> = DocumentRepository::new(RepositoryContext::new(
        Arc::new(store.clone()),
        Duration::from_secs(5),
    ));
    for name in ["Ann", "Ben", "Cid"] {
        writer
            .create(Customer::new(name, "x@example.com"), DB, CUSTOMERS, "svc1")
            .await
            .unwrap();
    }

    let reader: DocumentRepository<Customer> = DocumentRepository::new(RepositoryContext::new(
        Arc::new(FlakyCursorAccessor::new(store, 2)),
        Duration::from_secs(5),
    ));

    let failure = reader.get_all(DB, CUSTOMERS, "svc1").await.unwrap_err();
    assert_eq!(names(failure.partial.clone()), vec!["Ann", "Ben"]);
    assert!(!failure.error.is_not_found());
}
