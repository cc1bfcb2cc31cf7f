//! In-memory student store.
//!
//! Records live in a vector in insertion order; lookups scan it. `list`
//! returns insertion order.

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;
use tracing::debug;

use super::{parse_id, StoreResult, StudentStore};
use crate::error::StoreError;
use crate::student::{Student, StudentPatch};

/// Configuration for memory store behavior.
#[derive(Debug, Clone, Default)]
pub struct MemoryStoreConfig {
    /// When set, every operation fails with this message.
    pub fail_with: Option<String>,
}

/// In-memory student store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    config: MemoryStoreConfig,
    students: RwLock<Vec<(ObjectId, Student)>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with custom configuration.
    pub fn with_config(config: MemoryStoreConfig) -> Self {
        Self {
            config,
            students: RwLock::new(Vec::new()),
        }
    }

    /// Create a store whose operations all fail with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_config(MemoryStoreConfig {
            fail_with: Some(message.into()),
        })
    }

    fn check_available(&self) -> StoreResult<()> {
        match &self.config.fail_with {
            Some(message) => Err(StoreError::Unavailable(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl StudentStore for MemoryStore {
    async fn list(&self) -> StoreResult<Vec<Student>> {
        self.check_available()?;
        Ok(self
            .students
            .read()
            .await
            .iter()
            .map(|(_, student)| student.clone())
            .collect())
    }

    async fn get_by_id(&self, id: &str) -> StoreResult<Option<Student>> {
        self.check_available()?;
        let Some(oid) = parse_id(id) else {
            return Ok(None);
        };
        Ok(self
            .students
            .read()
            .await
            .iter()
            .find(|(key, _)| *key == oid)
            .map(|(_, student)| student.clone()))
    }

    async fn create(&self, patch: StudentPatch) -> StoreResult<Student> {
        self.check_available()?;
        let oid = ObjectId::new();
        let student = Student::from_patch(oid.to_hex(), patch);
        self.students.write().await.push((oid, student.clone()));
        debug!(id = %student.id, "Inserted student");
        Ok(student)
    }

    async fn insert_many(&self, patches: Vec<StudentPatch>) -> StoreResult<Vec<Student>> {
        self.check_available()?;
        let mut students = self.students.write().await;
        let inserted: Vec<Student> = patches
            .into_iter()
            .map(|patch| {
                let oid = ObjectId::new();
                let student = Student::from_patch(oid.to_hex(), patch);
                students.push((oid, student.clone()));
                student
            })
            .collect();
        debug!(count = inserted.len(), "Inserted students");
        Ok(inserted)
    }

    async fn update(&self, id: &str, patch: StudentPatch) -> StoreResult<Option<Student>> {
        self.check_available()?;
        let Some(oid) = parse_id(id) else {
            return Ok(None);
        };
        let mut students = self.students.write().await;
        Ok(students.iter_mut().find(|(key, _)| *key == oid).map(|(_, student)| {
            student.apply(&patch);
            student.clone()
        }))
    }

    async fn delete(&self, id: &str) -> StoreResult<bool> {
        self.check_available()?;
        let Some(oid) = parse_id(id) else {
            return Ok(false);
        };
        let mut students = self.students.write().await;
        match students.iter().position(|(key, _)| *key == oid) {
            Some(index) => {
                students.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn count(&self) -> StoreResult<u64> {
        self.check_available()?;
        Ok(self.students.read().await.len() as u64)
    }
}
