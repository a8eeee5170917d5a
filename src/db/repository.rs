use serde_json::Value;
use sqlx::query::Query;
use sqlx::{Database, Sqlite, SqlitePool};

use crate::models::{Course, NewCourse};

type SqliteQuery<'q> = Query<'q, Sqlite, <Sqlite as Database>::Arguments<'q>>;

// json_quote keeps each value's storage class, so text and numbers both decode.
const SELECT_COURSES: &str = "SELECT id, json_quote(title) AS title, json_quote(code) AS code, \
     json_quote(description) AS description, json_quote(ects) AS ects FROM course ORDER BY id";

const SELECT_COURSE_BY_ID: &str = "SELECT id, json_quote(title) AS title, json_quote(code) AS code, \
     json_quote(description) AS description, json_quote(ects) AS ects FROM course WHERE id = ?";

/// A JSON value in the shape SQLite can bind. Booleans become integers.
#[derive(Debug, Clone, PartialEq)]
enum Scalar {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl TryFrom<&Value> for Scalar {
    type Error = sqlx::Error;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Null => Ok(Scalar::Null),
            Value::Bool(b) => Ok(Scalar::Integer(i64::from(*b))),
            Value::Number(n) => match (n.as_i64(), n.as_f64()) {
                (Some(i), _) => Ok(Scalar::Integer(i)),
                (None, Some(f)) if n.is_f64() => Ok(Scalar::Real(f)),
                _ => Err(sqlx::Error::Encode(
                    format!("integer out of range: {}", n).into(),
                )),
            },
            Value::String(s) => Ok(Scalar::Text(s.clone())),
            Value::Array(_) | Value::Object(_) => Err(sqlx::Error::Encode(
                format!("unsupported value: {}", value).into(),
            )),
        }
    }
}

fn bind_scalar(query: SqliteQuery<'_>, value: Scalar) -> SqliteQuery<'_> {
    match value {
        Scalar::Null => query.bind(None::<String>),
        Scalar::Integer(i) => query.bind(i),
        Scalar::Real(f) => query.bind(f),
        Scalar::Text(s) => query.bind(s),
    }
}

fn bind_fields<'q>(
    mut query: SqliteQuery<'q>,
    fields: [&Value; 4],
) -> Result<SqliteQuery<'q>, sqlx::Error> {
    for field in fields {
        query = bind_scalar(query, Scalar::try_from(field)?);
    }
    Ok(query)
}

pub async fn fetch_courses(db: &SqlitePool) -> Result<Vec<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>(SELECT_COURSES)
        .fetch_all(db)
        .await
}

pub async fn find_course_by_id(db: &SqlitePool, id: i64) -> Result<Option<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>(SELECT_COURSE_BY_ID)
        .bind(id)
        .fetch_optional(db)
        .await
}

/// Inserts `new` and returns the row as stored, after column affinity.
pub async fn insert_course(db: &SqlitePool, new: NewCourse) -> Result<Course, sqlx::Error> {
    let query = sqlx::query(
        "INSERT INTO course (title, code, description, ects) VALUES (?, ?, ?, ?)"
    );
    let id = bind_fields(query, [&new.title, &new.code, &new.description, &new.ects])?
        .execute(db)
        .await?
        .last_insert_rowid();

    find_course_by_id(db, id)
        .await?
        .ok_or(sqlx::Error::RowNotFound)
}

/// Writes every field of `course` back to its row and returns the row as stored.
/// `Ok(None)` if the row no longer exists.
pub async fn update_course(db: &SqlitePool, course: &Course) -> Result<Option<Course>, sqlx::Error> {
    let query = sqlx::query(
        "UPDATE course SET title = ?, code = ?, description = ?, ects = ? WHERE id = ?"
    );
    let updated = bind_fields(
        query,
        [&course.title, &course.code, &course.description, &course.ects],
    )?
    .bind(course.id)
    .execute(db)
    .await?
    .rows_affected();

    if updated == 0 {
        return Ok(None);
    }

    find_course_by_id(db, course.id).await
}

pub async fn delete_course(db: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM course WHERE id = ?")
        .bind(id)
        .execute(db)
        .await?
        .rows_affected();

    Ok(result > 0)
}
