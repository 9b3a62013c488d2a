//! The book catalog entity.

use super::required;
use crate::error::AppError;
use crate::query::SortKey;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub year: Option<i32>,
    pub isbn: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Create payload. Title and author are required; year and isbn optional.
#[derive(Debug, Default, Deserialize)]
pub struct NewBook {
    pub title: Option<String>,
    pub author: Option<String>,
    pub year: Option<i32>,
    pub isbn: Option<String>,
}

/// A validated create payload, ready for insert.
#[derive(Debug)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub year: Option<i32>,
    pub isbn: Option<String>,
}

impl NewBook {
    pub fn validate(self) -> Result<BookDraft, AppError> {
        match (required(self.title), required(self.author)) {
            (Some(title), Some(author)) => Ok(BookDraft {
                title,
                author,
                year: self.year,
                isbn: self.isbn,
            }),
            _ => Err(AppError::Validation("Title & Author required".into())),
        }
    }
}

/// Partial update: only fields present in the body are changed.
#[derive(Debug, Default, Deserialize)]
pub struct BookPatch {
    pub title: Option<String>,
    pub author: Option<String>,
    pub year: Option<i32>,
    pub isbn: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BookSort {
    Id,
    Title,
    Author,
    Year,
    Isbn,
    CreatedAt,
}

impl SortKey for BookSort {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "id" => Some(BookSort::Id),
            "title" => Some(BookSort::Title),
            "author" => Some(BookSort::Author),
            "year" => Some(BookSort::Year),
            "isbn" => Some(BookSort::Isbn),
            "created_at" => Some(BookSort::CreatedAt),
            _ => None,
        }
    }

    fn column(self) -> &'static str {
        match self {
            BookSort::Id => "id",
            BookSort::Title => "title",
            BookSort::Author => "author",
            BookSort::Year => "year",
            BookSort::Isbn => "isbn",
            BookSort::CreatedAt => "created_at",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_requires_title_and_author() {
        let err = NewBook {
            title: Some("X".into()),
            ..Default::default()
        }
        .validate()
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(m) if m == "Title & Author required"));

        let err = NewBook {
            title: Some("X".into()),
            author: Some("".into()),
            ..Default::default()
        }
        .validate()
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn optional_fields_pass_through() {
        let draft = NewBook {
            title: Some("Clean Code".into()),
            author: Some("Robert C. Martin".into()),
            year: Some(2008),
            isbn: None,
        }
        .validate()
        .expect("valid");
        assert_eq!(draft.title, "Clean Code");
        assert_eq!(draft.year, Some(2008));
        assert_eq!(draft.isbn, None);
    }

    #[test]
    fn sort_fields_are_a_closed_set() {
        assert_eq!(BookSort::parse("created_at"), Some(BookSort::CreatedAt));
        assert_eq!(BookSort::parse("year"), Some(BookSort::Year));
        assert_eq!(BookSort::parse("publisher"), None);
        assert_eq!(BookSort::parse(""), None);
        assert_eq!(BookSort::Title.column(), "title");
    }
}
