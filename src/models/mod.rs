pub mod course;

pub use course::{Course, NewCourse, NewCourseRequest, UpdateCourseRequest};
