//! HTTP API handlers.
//!
//! Each student handler performs exactly one store call and maps its outcome
//! to a status code: absence is 404, other failures are 400 for writes and
//! 500 for reads and deletes.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use tracing::{debug, error, warn};

use super::extract::PatchBody;
use crate::error::ApiError;
use crate::store::StudentStore;
use crate::student::Student;

/// Application state shared with handlers.
#[derive(Clone)]
pub struct AppState {
    /// Student storage.
    pub store: Arc<dyn StudentStore>,
    /// Prometheus handle for `/metrics`, if a recorder is installed.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create new app state.
    pub fn new(store: Arc<dyn StudentStore>) -> Self {
        Self {
            store,
            metrics: None,
        }
    }

    /// Attach a Prometheus handle.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status: "ok".
    pub status: &'static str,
}

/// Confirmation body for deletes.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Human-readable message.
    pub message: &'static str,
}

/// Health check handler - always returns 200.
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}

/// Prometheus text exposition, 503 when no recorder is installed.
pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    match state.metrics {
        Some(handle) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        None => (StatusCode::SERVICE_UNAVAILABLE, "metrics recorder not installed").into_response(),
    }
}

/// `GET /api/students`
pub async fn list_students(State(state): State<AppState>) -> Result<Json<Vec<Student>>, ApiError> {
    state.store.list().await.map(Json).map_err(|e| {
        error!("Failed to list students: {}", e);
        ApiError::read(e)
    })
}

/// `GET /api/students/:id`
pub async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Student>, ApiError> {
    match state.store.get_by_id(&id).await {
        Ok(Some(student)) => Ok(Json(student)),
        Ok(None) => {
            debug!(%id, "Student not found");
            Err(ApiError::NotFound)
        }
        Err(e) => {
            error!(%id, "Failed to fetch student: {}", e);
            Err(ApiError::read(e))
        }
    }
}

/// `POST /api/students`
pub async fn create_student(
    State(state): State<AppState>,
    PatchBody(patch): PatchBody,
) -> Result<(StatusCode, Json<Student>), ApiError> {
    match state.store.create(patch).await {
        Ok(student) => Ok((StatusCode::CREATED, Json(student))),
        Err(e) => {
            warn!("Failed to create student: {}", e);
            Err(ApiError::write(e))
        }
    }
}

/// `PUT /api/students/:id`
pub async fn update_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
    PatchBody(patch): PatchBody,
) -> Result<Json<Student>, ApiError> {
    match state.store.update(&id, patch).await {
        Ok(Some(student)) => Ok(Json(student)),
        Ok(None) => {
            debug!(%id, "Student not found");
            Err(ApiError::NotFound)
        }
        Err(e) => {
            warn!(%id, "Failed to update student: {}", e);
            Err(ApiError::write(e))
        }
    }
}

/// `DELETE /api/students/:id`
pub async fn delete_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    match state.store.delete(&id).await {
        Ok(true) => Ok(Json(MessageResponse {
            message: "Student deleted",
        })),
        Ok(false) => {
            debug!(%id, "Student not found");
            Err(ApiError::NotFound)
        }
        Err(e) => {
            error!(%id, "Failed to delete student: {}", e);
            Err(ApiError::read(e))
        }
    }
}
