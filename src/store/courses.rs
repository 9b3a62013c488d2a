//! Course persistence.

use crate::error::{missing_parent, AppError};
use crate::models::{Course, CourseDraft, CoursePatch, CourseSort};
use crate::query::{self, BindValue, ListSpec, Page, PageWindow, QueryBuf, SortKey, SortOrder};
use sqlx::PgPool;

const TABLE: &str = "courses";
const COLUMNS: &str = "id, name, description, teacher_id";

pub async fn list(
    pool: &PgPool,
    sort: Option<(CourseSort, SortOrder)>,
    window: PageWindow,
) -> Result<Page<Course>, AppError> {
    let spec = ListSpec {
        table: TABLE,
        columns: COLUMNS,
        key_column: "id",
        filters: &[],
        sort: sort.map(|(key, order)| (key.column(), order)),
        window,
    };
    query::fetch_page(pool, &spec).await
}

pub async fn fetch(pool: &PgPool, id: i32) -> Result<Option<Course>, AppError> {
    let course = sqlx::query_as::<_, Course>(
        "SELECT id, name, description, teacher_id FROM courses WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(course)
}

pub async fn insert(pool: &PgPool, draft: &CourseDraft) -> Result<Course, AppError> {
    let course = sqlx::query_as::<_, Course>(
        "INSERT INTO courses (name, description, teacher_id) VALUES ($1, $2, $3) \
         RETURNING id, name, description, teacher_id",
    )
    .bind(&draft.name)
    .bind(&draft.description)
    .bind(draft.teacher_id)
    .fetch_one(pool)
    .await
    .map_err(missing_parent)?;
    Ok(course)
}

pub async fn update(
    pool: &PgPool,
    id: i32,
    patch: &CoursePatch,
) -> Result<Option<Course>, AppError> {
    let mut q = QueryBuf::new();
    let mut sets = Vec::new();
    if let Some(name) = &patch.name {
        let n = q.push(BindValue::from(name.as_str()));
        sets.push(format!("name = ${n}"));
    }
    if let Some(description) = &patch.description {
        let n = q.push(BindValue::from(description.as_str()));
        sets.push(format!("description = ${n}"));
    }
    if let Some(teacher_id) = patch.teacher_id {
        let n = q.push(BindValue::from(teacher_id));
        sets.push(format!("teacher_id = ${n}"));
    }
    if sets.is_empty() {
        return fetch(pool, id).await;
    }
    let n = q.push(BindValue::from(id));
    q.sql = format!(
        "UPDATE courses SET {} WHERE id = ${} RETURNING {}",
        sets.join(", "),
        n,
        COLUMNS
    );
    query::fetch_optional_as(pool, &q).await.map_err(missing_parent)
}

/// Fails with a conflict when the course still has students (RESTRICT).
pub async fn delete(pool: &PgPool, id: i32) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM courses WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
