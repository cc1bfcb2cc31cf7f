//! Startup seeding of sample students.

use tracing::info;

use crate::metrics;
use crate::store::{StoreResult, StudentStore};
use crate::student::StudentPatch;

/// Sample students inserted into an empty collection: (name, age, grade).
pub const SAMPLE_STUDENTS: [(&str, i64, &str); 5] = [
    ("John Doe", 19, "A"),
    ("Jane Smith", 20, "A-"),
    ("Michael Johnson", 18, "B+"),
    ("Emily Davis", 21, "A+"),
    ("Robert Wilson", 19, "B"),
];

/// What [`seed_if_empty`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The collection was empty; this many students were inserted.
    Seeded(usize),
    /// The collection already held this many students.
    Skipped(u64),
}

/// The sample students as patches, in insertion order.
pub fn sample_students() -> Vec<StudentPatch> {
    SAMPLE_STUDENTS
        .iter()
        .map(|(name, age, grade)| StudentPatch::new(*name, *age, *grade))
        .collect()
}

/// Insert the sample students if the store is empty.
///
/// Checks the count once and then inserts; concurrent writers may race it.
pub async fn seed_if_empty(store: &dyn StudentStore) -> StoreResult<SeedOutcome> {
    let existing = store.count().await?;
    if existing > 0 {
        info!(existing, "Database already contains data, skipping initialization");
        return Ok(SeedOutcome::Skipped(existing));
    }

    let inserted = store.insert_many(sample_students()).await?;
    metrics::inc_students_seeded(inserted.len());
    info!(count = inserted.len(), "Database initialized with sample data");
    Ok(SeedOutcome::Seeded(inserted.len()))
}
