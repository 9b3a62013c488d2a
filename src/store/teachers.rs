//! Teacher persistence.

use crate::error::AppError;
use crate::models::{Teacher, TeacherDraft, TeacherPatch, TeacherSort};
use crate::query::{self, BindValue, ListSpec, Page, PageWindow, QueryBuf, SortKey, SortOrder};
use sqlx::PgPool;

const TABLE: &str = "teachers";
const COLUMNS: &str = "id, name, email";

pub async fn list(
    pool: &PgPool,
    sort: Option<(TeacherSort, SortOrder)>,
    window: PageWindow,
) -> Result<Page<Teacher>, AppError> {
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

pub async fn fetch(pool: &PgPool, id: i32) -> Result<Option<Teacher>, AppError> {
    let teacher =
        sqlx::query_as::<_, Teacher>("SELECT id, name, email FROM teachers WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
    Ok(teacher)
}

pub async fn insert(pool: &PgPool, draft: &TeacherDraft) -> Result<Teacher, AppError> {
    let teacher = sqlx::query_as::<_, Teacher>(
        "INSERT INTO teachers (name, email) VALUES ($1, $2) RETURNING id, name, email",
    )
    .bind(&draft.name)
    .bind(&draft.email)
    .fetch_one(pool)
    .await?;
    Ok(teacher)
}

pub async fn update(
    pool: &PgPool,
    id: i32,
    patch: &TeacherPatch,
) -> Result<Option<Teacher>, AppError> {
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
    if sets.is_empty() {
        return fetch(pool, id).await;
    }
    let n = q.push(BindValue::from(id));
    q.sql = format!(
        "UPDATE teachers SET {} WHERE id = ${} RETURNING {}",
        sets.join(", "),
        n,
        COLUMNS
    );
    Ok(query::fetch_optional_as(pool, &q).await?)
}

/// Fails with a conflict when the teacher still owns courses (RESTRICT).
pub async fn delete(pool: &PgPool, id: i32) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM teachers WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
