//! HTTP API module for student, health, and metrics endpoints.

pub mod extract;
pub mod handlers;
pub mod routes;

pub use extract::PatchBody;
pub use handlers::AppState;
pub use routes::create_router;
