use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::db::repository;
use crate::error::AppError;
use crate::models::{Course, NewCourseRequest, UpdateCourseRequest};

pub struct CourseService {
    db: SqlitePool,
}

impl CourseService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> Result<Vec<Course>, AppError> {
        let courses = repository::fetch_courses(&self.db).await?;
        debug!("Listed {} courses", courses.len());
        Ok(courses)
    }

    pub async fn create(&self, req: NewCourseRequest) -> Result<Course, AppError> {
        let new = req.into_new_course().ok_or(AppError::MissingFields)?;
        let course = repository::insert_course(&self.db, new).await?;
        info!("Created course {}", course.id);
        Ok(course)
    }

    pub async fn find(&self, id: i64) -> Result<Course, AppError> {
        repository::find_course_by_id(&self.db, id)
            .await?
            .ok_or_else(|| {
                debug!("Lookup of unknown course {}", id);
                AppError::NotFound
            })
    }

    /// Merges the keys present in `req` into `course` and stores the result.
    pub async fn update(&self, mut course: Course, req: UpdateCourseRequest) -> Result<Course, AppError> {
        req.apply_to(&mut course);
        match repository::update_course(&self.db, &course).await? {
            Some(course) => {
                info!("Updated course {}", course.id);
                Ok(course)
            }
            None => {
                debug!("Course {} vanished before update", course.id);
                Err(AppError::NotFound)
            }
        }
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if repository::delete_course(&self.db, id).await? {
            info!("Deleted course {}", id);
            Ok(())
        } else {
            debug!("Delete of unknown course {}", id);
            Err(AppError::NotFound)
        }
    }
}
