//! Typed errors and their HTTP mapping.
//!
//! Every error is converted to a response at the handler boundary; nothing
//! propagates to a process-level crash. The wire shape is always
//! `{"success": false, "error": "<message>"}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    /// Unknown key on read/update/delete. HTTP 404.
    #[error("{0}")]
    NotFound(String),
    /// Missing required field or duplicate unique value. HTTP 400.
    #[error("{0}")]
    Validation(String),
    /// Malformed request input, e.g. an unrecognized sort field. HTTP 400.
    #[error("{0}")]
    BadRequest(String),
    /// Delete blocked by dependent child records. HTTP 409.
    #[error("{0}")]
    Conflict(String),
    #[error("database: {0}")]
    Db(sqlx::Error),
}

/// Message for a unique-constraint violation, keyed by the constraint name
/// generated by the DDL in [`crate::schema`].
fn unique_violation_message(constraint: &str) -> String {
    match constraint {
        "books_isbn_key" => "ISBN already exists".into(),
        "teachers_email_key" | "students_email_key" => "Email already exists!".into(),
        _ => "duplicate value".into(),
    }
}

/// Message when a write names a parent row that does not exist, keyed by the
/// violated foreign-key constraint.
fn reference_violation_message(constraint: &str) -> String {
    match constraint {
        "courses_teacher_id_fkey" => "Teacher not found".into(),
        "students_course_id_fkey" => "Course not found".into(),
        _ => "referenced record does not exist".into(),
    }
}

/// Conversion for INSERT/UPDATE statements that reference a parent row. The
/// handlers check the parent first, but a concurrent delete can land between
/// the check and the write; the constraint then fires and has to read like
/// the pre-check (400), not like a blocked delete.
pub(crate) fn missing_parent(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db) = &e {
        if db.code().as_deref() == Some("23503") {
            return AppError::Validation(reference_violation_message(
                db.constraint().unwrap_or(""),
            ));
        }
    }
    e.into()
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::RowNotFound => return AppError::NotFound("record not found".into()),
            sqlx::Error::Database(db) => match db.code().as_deref() {
                // unique_violation
                Some("23505") => {
                    return AppError::Validation(unique_violation_message(
                        db.constraint().unwrap_or(""),
                    ));
                }
                // foreign_key_violation: on a delete, children still
                // reference the row. Writes route through `missing_parent`.
                Some("23503") => {
                    return AppError::Conflict(
                        "record is still referenced by other records".into(),
                    );
                }
                _ => {}
            },
            _ => {}
        }
        AppError::Db(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
            AppError::Validation(m) | AppError::BadRequest(m) => {
                (StatusCode::BAD_REQUEST, m.clone())
            }
            AppError::Conflict(m) => (StatusCode::CONFLICT, m.clone()),
            AppError::Db(e) => {
                tracing::error!(error = %e, "database error");
                match e {
                    sqlx::Error::Io(_)
                    | sqlx::Error::PoolTimedOut
                    | sqlx::Error::PoolClosed => {
                        (StatusCode::SERVICE_UNAVAILABLE, "database unavailable".into())
                    }
                    _ => (StatusCode::INTERNAL_SERVER_ERROR, "database error".into()),
                }
            }
        };
        (status, Json(json!({ "success": false, "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;

    #[derive(Debug)]
    struct StubDbError {
        code: &'static str,
        constraint: &'static str,
    }

    impl std::fmt::Display for StubDbError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{}: {}", self.code, self.constraint)
        }
    }

    impl std::error::Error for StubDbError {}

    impl sqlx::error::DatabaseError for StubDbError {
        fn message(&self) -> &str {
            "constraint violation"
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            Some(self.code.into())
        }

        fn constraint(&self) -> Option<&str> {
            Some(self.constraint)
        }

        fn kind(&self) -> sqlx::error::ErrorKind {
            sqlx::error::ErrorKind::Other
        }

        fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
            self
        }
    }

    fn db_error(code: &'static str, constraint: &'static str) -> sqlx::Error {
        sqlx::Error::Database(Box::new(StubDbError { code, constraint }))
    }

    #[test]
    fn statuses_follow_the_taxonomy() {
        assert_eq!(
            AppError::NotFound("Book not found".into()).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Validation("Title & Author required".into())
                .into_response()
                .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::BadRequest("unsupported sort field 'x'".into())
                .into_response()
                .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Conflict("referenced".into()).into_response().status(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn connection_failures_map_to_503() {
        let err = AppError::Db(sqlx::Error::PoolTimedOut);
        assert_eq!(err.into_response().status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn row_not_found_becomes_not_found() {
        let err: AppError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn unique_constraint_messages() {
        assert_eq!(unique_violation_message("books_isbn_key"), "ISBN already exists");
        assert_eq!(unique_violation_message("students_email_key"), "Email already exists!");
        assert_eq!(unique_violation_message("teachers_email_key"), "Email already exists!");
        assert_eq!(unique_violation_message("other"), "duplicate value");
    }

    #[test]
    fn unique_violation_becomes_validation() {
        let err: AppError = db_error("23505", "books_isbn_key").into();
        assert!(matches!(err, AppError::Validation(m) if m == "ISBN already exists"));
    }

    #[test]
    fn fk_violation_on_delete_is_a_conflict() {
        let err: AppError = db_error("23503", "courses_teacher_id_fkey").into();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[test]
    fn fk_violation_on_write_reads_like_the_pre_check() {
        let err = missing_parent(db_error("23503", "students_course_id_fkey"));
        assert!(matches!(err, AppError::Validation(m) if m == "Course not found"));

        let err = missing_parent(db_error("23503", "courses_teacher_id_fkey"));
        assert!(matches!(err, AppError::Validation(m) if m == "Teacher not found"));
    }

    #[test]
    fn missing_parent_leaves_other_codes_to_the_default_mapping() {
        let err = missing_parent(db_error("23505", "students_email_key"));
        assert!(matches!(err, AppError::Validation(m) if m == "Email already exists!"));
    }

    #[tokio::test]
    async fn error_body_carries_the_envelope() {
        let resp = AppError::NotFound("Book not found".into()).into_response();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .expect("body");
        let body: serde_json::Value = serde_json::from_slice(&bytes).expect("json");
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Book not found");
    }
}
