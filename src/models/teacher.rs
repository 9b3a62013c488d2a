//! Teachers own courses.

use super::required;
use crate::error::AppError;
use crate::query::SortKey;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Teacher {
    pub id: i32,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct NewTeacher {
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug)]
pub struct TeacherDraft {
    pub name: String,
    pub email: String,
}

impl NewTeacher {
    pub fn validate(self) -> Result<TeacherDraft, AppError> {
        match (required(self.name), required(self.email)) {
            (Some(name), Some(email)) => Ok(TeacherDraft { name, email }),
            _ => Err(AppError::Validation("Name & Email required".into())),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct TeacherPatch {
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TeacherSort {
    Id,
    Name,
    Email,
}

impl SortKey for TeacherSort {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "id" => Some(TeacherSort::Id),
            "name" => Some(TeacherSort::Name),
            "email" => Some(TeacherSort::Email),
            _ => None,
        }
    }

    fn column(self) -> &'static str {
        match self {
            TeacherSort::Id => "id",
            TeacherSort::Name => "name",
            TeacherSort::Email => "email",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_is_required() {
        let err = NewTeacher {
            name: Some("Mr. Sharma".into()),
            email: None,
        }
        .validate()
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(m) if m == "Name & Email required"));
    }
}
