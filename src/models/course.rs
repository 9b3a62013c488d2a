//! Courses belong to a teacher and own students.

use super::required;
use crate::error::AppError;
use crate::query::SortKey;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Course {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub teacher_id: i32,
}

#[derive(Debug, Default, Deserialize)]
pub struct NewCourse {
    pub name: Option<String>,
    pub description: Option<String>,
    pub teacher_id: Option<i32>,
}

#[derive(Debug)]
pub struct CourseDraft {
    pub name: String,
    pub description: String,
    pub teacher_id: i32,
}

impl NewCourse {
    pub fn validate(self) -> Result<CourseDraft, AppError> {
        match (required(self.name), self.teacher_id) {
            (Some(name), Some(teacher_id)) => Ok(CourseDraft {
                name,
                description: self.description.unwrap_or_default(),
                teacher_id,
            }),
            _ => Err(AppError::Validation("Name & Teacher required".into())),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CoursePatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub teacher_id: Option<i32>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CourseSort {
    Id,
    Name,
    TeacherId,
}

impl SortKey for CourseSort {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "id" => Some(CourseSort::Id),
            "name" => Some(CourseSort::Name),
            "teacher_id" => Some(CourseSort::TeacherId),
            _ => None,
        }
    }

    fn column(self) -> &'static str {
        match self {
            CourseSort::Id => "id",
            CourseSort::Name => "name",
            CourseSort::TeacherId => "teacher_id",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn description_defaults_to_empty() {
        let draft = NewCourse {
            name: Some("Python Basics".into()),
            description: None,
            teacher_id: Some(1),
        }
        .validate()
        .expect("valid");
        assert_eq!(draft.description, "");
    }

    #[test]
    fn teacher_is_required() {
        let err = NewCourse {
            name: Some("Python Basics".into()),
            ..Default::default()
        }
        .validate()
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(m) if m == "Name & Teacher required"));
    }
}
