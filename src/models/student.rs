//! Students belong to exactly one course.

use super::required;
use crate::error::AppError;
use crate::query::SortKey;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Student {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub course_id: i32,
}

#[derive(Debug, Default, Deserialize)]
pub struct NewStudent {
    pub name: Option<String>,
    pub email: Option<String>,
    pub course_id: Option<i32>,
}

#[derive(Debug)]
pub struct StudentDraft {
    pub name: String,
    pub email: String,
    pub course_id: i32,
}

impl NewStudent {
    pub fn validate(self) -> Result<StudentDraft, AppError> {
        match (required(self.name), required(self.email), self.course_id) {
            (Some(name), Some(email), Some(course_id)) => Ok(StudentDraft {
                name,
                email,
                course_id,
            }),
            _ => Err(AppError::Validation("Name, Email & Course required".into())),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct StudentPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub course_id: Option<i32>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StudentSort {
    Id,
    Name,
    Email,
    CourseId,
}

impl SortKey for StudentSort {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "id" => Some(StudentSort::Id),
            "name" => Some(StudentSort::Name),
            "email" => Some(StudentSort::Email),
            "course_id" => Some(StudentSort::CourseId),
            _ => None,
        }
    }

    fn column(self) -> &'static str {
        match self {
            StudentSort::Id => "id",
            StudentSort::Name => "name",
            StudentSort::Email => "email",
            StudentSort::CourseId => "course_id",
        }
    }
}
