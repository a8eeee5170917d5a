use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use sqlx::FromRow;

/// A stored course.
///
/// Field values are kept as whatever SQLite holds for them after column
/// affinity has been applied, so `ects` is usually but not necessarily an
/// integer. Rows must be selected with each value column wrapped in
/// `json_quote` so that every storage class decodes.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Course {
    /// Stored as an integer, serialized as a string.
    #[serde(serialize_with = "id_as_string")]
    pub id: i64,
    pub title: Value,
    pub code: Value,
    pub description: Value,
    pub ects: Value,
}

fn id_as_string<S>(id: &i64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(id)
}

/// Keeps an explicit `null` as `Some(Value::Null)`; only an absent key is `None`.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Create payload. Values are taken as-is; only key presence is checked.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewCourseRequest {
    #[serde(default, deserialize_with = "present")]
    pub title: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub code: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub ects: Option<Value>,
}

/// A create payload with every required key present.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCourse {
    pub title: Value,
    pub code: Value,
    pub description: Value,
    pub ects: Value,
}

impl NewCourseRequest {
    /// Returns `None` if any required key is absent.
    pub fn into_new_course(self) -> Option<NewCourse> {
        Some(NewCourse {
            title: self.title?,
            code: self.code?,
            description: self.description?,
            ects: self.ects?,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCourseRequest {
    #[serde(default, deserialize_with = "present")]
    pub title: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub code: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub ects: Option<Value>,
}

impl UpdateCourseRequest {
    /// Overwrites the fields of `course` whose keys are present in this request.
    pub fn apply_to(self, course: &mut Course) {
        if let Some(title) = self.title {
            course.title = title;
        }
        if let Some(code) = self.code {
            course.code = code;
        }
        if let Some(description) = self.description {
            course.description = description;
        }
        if let Some(ects) = self.ects {
            course.ects = ects;
        }
    }
}
