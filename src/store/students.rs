//! Student persistence.

use crate::error::{missing_parent, AppError};
use crate::models::{Student, StudentDraft, StudentPatch, StudentSort};
use crate::query::{self, BindValue, ListSpec, Page, PageWindow, QueryBuf, SortKey, SortOrder};
use sqlx::PgPool;

const TABLE: &str = "students";
const COLUMNS: &str = "id, name, email, course_id";

pub async fn list(
    pool: &PgPool,
    sort: Option<(StudentSort, SortOrder)>,
    window: PageWindow,
) -> Result<Page<Student>, AppError> {
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

pub async fn fetch(pool: &PgPool, id: i32) -> Result<Option<Student>, AppError> {
    let student = sqlx::query_as::<_, Student>(
        "SELECT id, name, email, course_id FROM students WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(student)
}

pub async fn insert(pool: &PgPool, draft: &StudentDraft) -> Result<Student, AppError> {
    let student = sqlx::query_as::<_, Student>(
        "INSERT INTO students (name, email, course_id) VALUES ($1, $2, $3) \
         RETURNING id, name, email, course_id",
    )
    .bind(&draft.name)
    .bind(&draft.email)
    .bind(draft.course_id)
    .fetch_one(pool)
    .await
    .map_err(missing_parent)?;
    Ok(student)
}

pub async fn update(
    pool: &PgPool,
    id: i32,
    patch: &StudentPatch,
) -> Result<Option<Student>, AppError> {
    let mut q = QueryBuf::new();
    let mut sets = Vec::new();
    if let Some(name) = &patch.name {
        let n = q.push(BindValue::from(name.as_str()));
        sets.push(format!("name = ${n}"));
    }
    if let Some(email) = &patch.email {
        let n = q.push(BindValue::from(email.as_str()));
        sets.push(format!("email = ${n}"));
    }
    if let Some(course_id) = patch.course_id {
        let n = q.push(BindValue::from(course_id));
        sets.push(format!("course_id = ${n}"));
    }
    if sets.is_empty() {
        return fetch(pool, id).await;
    }
    let n = q.push(BindValue::from(id));
    q.sql = format!(
        "UPDATE students SET {} WHERE id = ${} RETURNING {}",
        sets.join(", "),
        n,
        COLUMNS
    );
    query::fetch_optional_as(pool, &q).await.map_err(missing_parent)
}

pub async fn delete(pool: &PgPool, id: i32) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM students WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
