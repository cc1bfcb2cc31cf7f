//! End-to-end HTTP scenarios over the in-memory store.

use std::collections::HashSet;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

use student_records::api::{create_router, AppState};
use student_records::seed::{seed_if_empty, SeedOutcome};
use student_records::store::{MemoryStore, StudentStore};

fn router(store: Arc<dyn StudentStore>) -> Router {
    create_router(AppState::new(store))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header("content-type", "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn student_lifecycle() {
    let app = router(Arc::new(MemoryStore::new()));

    let (status, created) = send(
        &app,
        "POST",
        "/api/students",
        Some(json!({"name": "Ada Lovelace", "age": 28, "grade": "A+"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(
        created,
        json!({"id": id, "name": "Ada Lovelace", "age": 28, "grade": "A+"})
    );

    let uri = format!("/api/students/{id}");
    let (status, fetched) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, updated) = send(&app, "PUT", &uri, Some(json!({"grade": "A"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        updated,
        json!({"id": id, "name": "Ada Lovelace", "age": 28, "grade": "A"})
    );

    let (status, deleted) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted, json!({"message": "Student deleted"}));

    let (status, missing) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(missing, json!({"error": "Student not found"}));
}

/// POST each body, then check GET returns exactly what POST did.
pub async fn assert_ages_read_back_as_created(store: Arc<dyn StudentStore>) {
    let app = router(store);

    for body in [json!({"age": "28"}), json!({"age": 28.0}), json!({"age": 28})] {
        let (status, created) = send(&app, "POST", "/api/students", Some(body.clone())).await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        assert_eq!(created["age"], json!(28), "{body}");

        let uri = format!("/api/students/{}", created["id"].as_str().unwrap());
        let (status, fetched) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, created, "{body}");
    }
}

#[tokio::test]
async fn coerced_ages_read_back_as_created() {
    assert_ages_read_back_as_created(Arc::new(MemoryStore::new())).await;
}

#[tokio::test]
async fn created_ids_are_unique() {
    let app = router(Arc::new(MemoryStore::new()));
    let mut ids = HashSet::new();

    for n in 0..10 {
        let (status, created) = send(
            &app,
            "POST",
            "/api/students",
            Some(json!({"name": format!("Student {n}")})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert!(ids.insert(created["id"].as_str().unwrap().to_string()));
    }

    let (_, list) = send(&app, "GET", "/api/students", None).await;
    assert_eq!(list.as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn create_ignores_unknown_fields_and_client_ids() {
    let app = router(Arc::new(MemoryStore::new()));

    let (status, created) = send(
        &app,
        "POST",
        "/api/students",
        Some(json!({"id": "mine", "name": "Grace", "role": "admin"})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_ne!(created["id"], json!("mine"));
    assert_eq!(created["name"], json!("Grace"));
    assert!(created.get("role").is_none());
    assert_eq!(created["age"], Value::Null);
}

#[tokio::test]
async fn missing_ids_are_404_for_every_verb() {
    let app = router(Arc::new(MemoryStore::new()));
    let uri = "/api/students/65f1c0ffee0000000000abcd";

    let (status, _) = send(&app, "GET", uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, "PUT", uri, Some(json!({"grade": "A"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, "DELETE", uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn seeded_store_lists_samples_once() {
    let store: Arc<dyn StudentStore> = Arc::new(MemoryStore::new());
    assert_eq!(seed_if_empty(store.as_ref()).await.unwrap(), SeedOutcome::Seeded(5));
    assert_eq!(seed_if_empty(store.as_ref()).await.unwrap(), SeedOutcome::Skipped(5));

    let app = router(store);
    let (status, list) = send(&app, "GET", "/api/students", None).await;
    assert_eq!(status, StatusCode::OK);

    let rows: Vec<Value> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|s| json!([s["name"], s["age"], s["grade"]]))
        .collect();
    assert_eq!(
        rows,
        vec![
            json!(["John Doe", 19, "A"]),
            json!(["Jane Smith", 20, "A-"]),
            json!(["Michael Johnson", 18, "B+"]),
            json!(["Emily Davis", 21, "A+"]),
            json!(["Robert Wilson", 19, "B"]),
        ]
    );
}

#[tokio::test]
async fn deleting_everything_does_not_reseed() {
    let store: Arc<dyn StudentStore> = Arc::new(MemoryStore::new());
    seed_if_empty(store.as_ref()).await.unwrap();
    let app = router(store.clone());

    let (_, list) = send(&app, "GET", "/api/students", None).await;
    for student in list.as_array().unwrap() {
        let uri = format!("/api/students/{}", student["id"].as_str().unwrap());
        let (status, _) = send(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, list) = send(&app, "GET", "/api/students", None).await;
    assert_eq!(list, json!([]));
    assert_eq!(store.count().await.unwrap(), 0);
}
