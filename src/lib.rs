//! Student records service.
//!
//! A small CRUD HTTP service over a single document collection of students.
//! On startup the service connects to MongoDB, seeds five sample records when
//! the collection is empty, and serves five JSON routes:
//!
//! ```text
//! GET    /api/students       list every student
//! GET    /api/students/:id   fetch one student
//! POST   /api/students       create a student
//! PUT    /api/students/:id   patch a student
//! DELETE /api/students/:id   delete a student
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`student`]: The student entity and its input patch
//! - [`store`]: Storage adapter trait with MongoDB and in-memory backends
//! - [`seed`]: One-shot startup seeding
//! - [`api`]: HTTP router and handlers
//! - [`metrics`]: Prometheus metric names and helpers
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod seed;
pub mod store;
pub mod student;
pub mod utils;

pub use config::Config;
pub use error::{AppError, Result};
