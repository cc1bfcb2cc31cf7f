//! MongoDB store tests.
//!
//! These tests need a running MongoDB server and use a throwaway database.
//! Run with: cargo test --test integration -- --ignored

use std::sync::Arc;

use mongodb::bson::oid::ObjectId;
use serde_json::Number;

use student_records::seed::{seed_if_empty, SeedOutcome};
use student_records::store::{MongoStore, StudentStore};
use student_records::student::StudentPatch;

async fn test_store() -> MongoStore {
    dotenvy::dotenv().ok();
    let uri = std::env::var("MONGODB_URI").unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
    let database = format!("student_records_test_{}", ObjectId::new().to_hex());
    MongoStore::connect(&uri, &database)
        .await
        .expect("MongoDB must be reachable for ignored tests")
}

#[tokio::test]
#[ignore = "requires MongoDB"]
async fn mongo_crud_round_trip() {
    let store = test_store().await;

    let created = store
        .create(StudentPatch::new("Ada Lovelace", 28, "A+"))
        .await
        .unwrap();
    assert_eq!(store.get_by_id(&created.id).await.unwrap(), Some(created.clone()));

    let patch = StudentPatch {
        grade: Some("A".to_string()),
        ..StudentPatch::default()
    };
    let updated = store.update(&created.id, patch).await.unwrap().unwrap();
    assert_eq!(updated.name, created.name);
    assert_eq!(updated.age, Some(Number::from(28)));
    assert_eq!(updated.grade.as_deref(), Some("A"));

    assert!(store.delete(&created.id).await.unwrap());
    assert_eq!(store.get_by_id(&created.id).await.unwrap(), None);
}

#[tokio::test]
#[ignore = "requires MongoDB"]
async fn mongo_malformed_ids_are_not_found() {
    let store = test_store().await;

    assert_eq!(store.get_by_id("bogus").await.unwrap(), None);
    assert_eq!(
        store.update("bogus", StudentPatch::default()).await.unwrap(),
        None
    );
    assert!(!store.delete("bogus").await.unwrap());
}

#[tokio::test]
#[ignore = "requires MongoDB"]
async fn mongo_seeds_once() {
    let store = test_store().await;

    assert_eq!(seed_if_empty(&store).await.unwrap(), SeedOutcome::Seeded(5));
    assert_eq!(seed_if_empty(&store).await.unwrap(), SeedOutcome::Skipped(5));
    assert_eq!(store.list().await.unwrap().len(), 5);
}

#[tokio::test]
#[ignore = "requires MongoDB"]
async fn mongo_coerced_ages_read_back_as_created() {
    crate::api::assert_ages_read_back_as_created(Arc::new(test_store().await)).await;
}
