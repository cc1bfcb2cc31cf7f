//! Student record types.

use serde::{Deserialize, Serialize};
use serde_json::Number;

use super::coerce;

/// A stored student record.
///
/// `id` is assigned by the store on creation and never changes. The other
/// fields are unconstrained and may be absent, in which case they serialize
/// as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    /// Storage-assigned identifier (24-char hex ObjectId).
    pub id: String,
    /// Student name.
    pub name: Option<String>,
    /// Age in years.
    pub age: Option<Number>,
    /// Grade, e.g. "A-".
    pub grade: Option<String>,
}

impl Student {
    /// Build a new record from a patch.
    pub fn from_patch(id: impl Into<String>, patch: StudentPatch) -> Self {
        Self {
            id: id.into(),
            name: patch.name,
            age: patch.age,
            grade: patch.grade,
        }
    }

    /// Overwrite the fields present in `patch`, leaving the rest untouched.
    pub fn apply(&mut self, patch: &StudentPatch) {
        if let Some(name) = &patch.name {
            self.name = Some(name.clone());
        }
        if let Some(age) = &patch.age {
            self.age = Some(age.clone());
        }
        if let Some(grade) = &patch.grade {
            self.grade = Some(grade.clone());
        }
    }
}

/// Input body for create and update.
///
/// Every field is optional and `null` means "not supplied". Unknown fields
/// are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudentPatch {
    /// Student name.
    #[serde(default, deserialize_with = "coerce::name", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Age in years.
    #[serde(default, deserialize_with = "coerce::age", skip_serializing_if = "Option::is_none")]
    pub age: Option<Number>,
    /// Grade.
    #[serde(default, deserialize_with = "coerce::grade", skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
}

impl StudentPatch {
    /// Patch setting all three fields.
    pub fn new(name: impl Into<String>, age: i64, grade: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            age: Some(Number::from(age)),
            grade: Some(grade.into()),
        }
    }

    /// True when the patch sets no field.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.age.is_none() && self.grade.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn patch_ignores_unknown_fields() {
        let patch: StudentPatch =
            serde_json::from_value(json!({"name": "Ada", "id": "x", "admin": true})).unwrap();
        assert_eq!(
            patch,
            StudentPatch {
                name: Some("Ada".to_string()),
                ..StudentPatch::default()
            }
        );
    }

    #[test]
    fn patch_treats_null_as_absent() {
        let patch: StudentPatch = serde_json::from_value(json!({"age": null})).unwrap();
        assert!(patch.is_empty());
    }

    #[test]
    fn patch_coerces_numeric_strings() {
        let patch: StudentPatch =
            serde_json::from_value(json!({"age": "28", "grade": 4})).unwrap();
        assert_eq!(patch.age, Some(Number::from(28)));
        assert_eq!(patch.grade.as_deref(), Some("4"));
    }

    #[test]
    fn patch_rejects_uncastable_age() {
        let err = serde_json::from_value::<StudentPatch>(json!({"age": "old"})).unwrap_err();
        assert!(err.to_string().contains("Cast to Number failed"));
    }

    #[test]
    fn apply_only_touches_supplied_fields() {
        let mut student = Student::from_patch("abc", StudentPatch::new("Ada Lovelace", 28, "A+"));
        student.apply(&StudentPatch {
            grade: Some("A".to_string()),
            ..StudentPatch::default()
        });

        assert_eq!(student.name.as_deref(), Some("Ada Lovelace"));
        assert_eq!(student.age, Some(Number::from(28)));
        assert_eq!(student.grade.as_deref(), Some("A"));
    }

    #[test]
    fn student_serializes_absent_fields_as_null() {
        let student = Student::from_patch("abc", StudentPatch::default());
        assert_eq!(
            serde_json::to_value(&student).unwrap(),
            json!({"id": "abc", "name": null, "age": null, "grade": null})
        );
    }
}
