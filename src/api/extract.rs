//! Request body extraction for student writes.

use axum::{
    async_trait,
    body::{Body, Bytes},
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use tracing::warn;

use crate::error::ApiError;
use crate::student::StudentPatch;

/// A `StudentPatch` read from a JSON body.
///
/// An empty body reads as `{}` whatever its content type. A non-empty body
/// must be JSON; anything else is rejected as a write failure (400).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatchBody(pub StudentPatch);

#[async_trait]
impl<S> FromRequest<S> for PatchBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let (parts, body) = request.into_parts();
        let bytes = Bytes::from_request(Request::new(body), state)
            .await
            .map_err(|e| ApiError::WriteFailed(e.body_text()))?;

        if bytes.is_empty() {
            return Ok(PatchBody(StudentPatch::default()));
        }

        let request = Request::from_parts(parts, Body::from(bytes));
        let Json(patch) = Json::<StudentPatch>::from_request(request, state)
            .await
            .map_err(rejected)?;
        Ok(PatchBody(patch))
    }
}

fn rejected(rejection: JsonRejection) -> ApiError {
    let message = rejection.body_text();
    warn!("Rejected request body: {}", message);
    ApiError::WriteFailed(message)
}
