//! MongoDB student store.
//!
//! Students live in the `students` collection as plain documents:
//!
//! ```text
//! { _id: ObjectId, name: String, age: Int32 | Int64 | Double, grade: String }
//! ```
//!
//! Fields absent from a create are not written. Updates use `$set` with only
//! the supplied fields.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Bson, Document};
use mongodb::options::ReturnDocument;
use mongodb::{Client, Collection};
use serde_json::Number;
use tracing::{debug, info, instrument};

use super::{parse_id, StoreResult, StudentStore};
use crate::error::StoreError;
use crate::student::coerce::number_from_f64;
use crate::student::{Student, StudentPatch};

/// Collection holding student documents.
pub const COLLECTION_NAME: &str = "students";

/// MongoDB-backed student store.
#[derive(Debug, Clone)]
pub struct MongoStore {
    client: Client,
    database: String,
    collection: Collection<Document>,
}

impl MongoStore {
    /// Build a client for `uri` without contacting the server.
    ///
    /// Fails only when the connection string cannot be parsed.
    pub async fn open(uri: &str, database: &str) -> StoreResult<Self> {
        let client = Client::with_uri_str(uri).await?;
        let collection = client.database(database).collection(COLLECTION_NAME);
        Ok(Self {
            client,
            database: database.to_string(),
            collection,
        })
    }

    /// Round-trip a `ping` to verify the server is reachable.
    #[instrument(skip(self), fields(database = %self.database))]
    pub async fn ping(&self) -> StoreResult<()> {
        self.client
            .database(&self.database)
            .run_command(doc! { "ping": 1 })
            .await?;
        info!("MongoDB connected");
        Ok(())
    }

    /// Open and ping in one step.
    pub async fn connect(uri: &str, database: &str) -> StoreResult<Self> {
        let store = Self::open(uri, database).await?;
        store.ping().await?;
        Ok(store)
    }
}

#[async_trait]
impl StudentStore for MongoStore {
    #[instrument(skip(self))]
    async fn list(&self) -> StoreResult<Vec<Student>> {
        let documents: Vec<Document> = self.collection.find(doc! {}).await?.try_collect().await?;
        documents.into_iter().map(student_from_document).collect()
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: &str) -> StoreResult<Option<Student>> {
        let Some(oid) = parse_id(id) else {
            return Ok(None);
        };
        self.collection
            .find_one(doc! { "_id": oid })
            .await?
            .map(student_from_document)
            .transpose()
    }

    #[instrument(skip(self, patch))]
    async fn create(&self, patch: StudentPatch) -> StoreResult<Student> {
        let oid = ObjectId::new();
        let mut document = patch_document(&patch);
        document.insert("_id", oid);
        self.collection.insert_one(document).await?;
        debug!(id = %oid, "Inserted student");
        Ok(Student::from_patch(oid.to_hex(), patch))
    }

    #[instrument(skip(self, patches), fields(count = patches.len()))]
    async fn insert_many(&self, patches: Vec<StudentPatch>) -> StoreResult<Vec<Student>> {
        if patches.is_empty() {
            return Ok(Vec::new());
        }
        let mut documents = Vec::with_capacity(patches.len());
        let mut students = Vec::with_capacity(patches.len());
        for patch in patches {
            let oid = ObjectId::new();
            let mut document = patch_document(&patch);
            document.insert("_id", oid);
            documents.push(document);
            students.push(Student::from_patch(oid.to_hex(), patch));
        }
        self.collection.insert_many(documents).await?;
        Ok(students)
    }

    #[instrument(skip(self, patch))]
    async fn update(&self, id: &str, patch: StudentPatch) -> StoreResult<Option<Student>> {
        let Some(oid) = parse_id(id) else {
            return Ok(None);
        };
        // An empty `$set` is rejected by the server.
        if patch.is_empty() {
            return self.get_by_id(id).await;
        }
        self.collection
            .find_one_and_update(doc! { "_id": oid }, doc! { "$set": patch_document(&patch) })
            .return_document(ReturnDocument::After)
            .await?
            .map(student_from_document)
            .transpose()
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> StoreResult<bool> {
        let Some(oid) = parse_id(id) else {
            return Ok(false);
        };
        let result = self.collection.delete_one(doc! { "_id": oid }).await?;
        Ok(result.deleted_count > 0)
    }

    #[instrument(skip(self))]
    async fn count(&self) -> StoreResult<u64> {
        Ok(self.collection.count_documents(doc! {}).await?)
    }
}

/// Fields present in `patch` as a document, suitable for insert or `$set`.
pub fn patch_document(patch: &StudentPatch) -> Document {
    let mut document = Document::new();
    if let Some(name) = &patch.name {
        document.insert("name", name.as_str());
    }
    if let Some(age) = &patch.age {
        document.insert("age", number_to_bson(age));
    }
    if let Some(grade) = &patch.grade {
        document.insert("grade", grade.as_str());
    }
    document
}

/// Map a stored document to a student.
///
/// Scalar fields of an unexpected BSON type are cast the same way request
/// input is; anything else reads as absent.
pub fn student_from_document(document: Document) -> StoreResult<Student> {
    let id = document
        .get_object_id("_id")
        .map_err(|e| StoreError::Document(format!("_id: {e}")))?;
    Ok(Student {
        id: id.to_hex(),
        name: document.get("name").and_then(bson_to_string),
        age: document.get("age").and_then(bson_to_number),
        grade: document.get("grade").and_then(bson_to_string),
    })
}

fn number_to_bson(number: &Number) -> Bson {
    if let Some(int) = number.as_i64() {
        return i32::try_from(int).map_or(Bson::Int64(int), Bson::Int32);
    }
    Bson::Double(number.as_f64().unwrap_or(f64::NAN))
}

fn bson_to_number(value: &Bson) -> Option<Number> {
    match value {
        Bson::Int32(n) => Some(Number::from(*n)),
        Bson::Int64(n) => Some(Number::from(*n)),
        // Whole doubles read back as integers, matching request input.
        Bson::Double(f) => number_from_f64(*f),
        _ => None,
    }
}

fn bson_to_string(value: &Bson) -> Option<String> {
    match value {
        Bson::String(s) => Some(s.clone()),
        Bson::Int32(n) => Some(n.to_string()),
        Bson::Int64(n) => Some(n.to_string()),
        Bson::Double(f) => number_from_f64(*f).map(|n| n.to_string()),
        Bson::Boolean(b) => Some(b.to_string()),
        _ => None,
    }
}
