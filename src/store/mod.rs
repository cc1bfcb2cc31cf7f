//! Storage adapter for student records.
//!
//! This module handles:
//! - The [`StudentStore`] trait every backend implements
//! - MongoDB backend
//! - In-memory backend for tests and database-less runs
//!
//! Identifiers are MongoDB ObjectIds in both backends. An id that does not
//! parse as an ObjectId behaves like an id that does not exist.

pub mod memory;
pub mod mongo;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::error::StoreError;
use crate::student::{Student, StudentPatch};

pub use memory::{MemoryStore, MemoryStoreConfig};
pub use mongo::MongoStore;

/// Convenient Result type alias for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Persistence of student records.
///
/// Implementations must be safe to share between concurrent requests.
#[async_trait]
pub trait StudentStore: Send + Sync + 'static {
    /// All students in storage order.
    async fn list(&self) -> StoreResult<Vec<Student>>;

    /// One student, or `None` if absent or `id` is malformed.
    async fn get_by_id(&self, id: &str) -> StoreResult<Option<Student>>;

    /// Insert a student under a freshly generated id.
    async fn create(&self, patch: StudentPatch) -> StoreResult<Student>;

    /// Insert several students in order.
    async fn insert_many(&self, patches: Vec<StudentPatch>) -> StoreResult<Vec<Student>>;

    /// Apply `patch` over an existing student and return the result.
    async fn update(&self, id: &str, patch: StudentPatch) -> StoreResult<Option<Student>>;

    /// Remove a student. Returns whether it existed.
    async fn delete(&self, id: &str) -> StoreResult<bool>;

    /// Number of stored students.
    async fn count(&self) -> StoreResult<u64>;
}

/// Parse a path id, mapping malformed input to `None`.
pub fn parse_id(id: &str) -> Option<ObjectId> {
    ObjectId::parse_str(id).ok()
}
