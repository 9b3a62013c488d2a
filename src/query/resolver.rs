//! Executes builder-generated queries against the pool.

use super::sql::{count_rows, select_filtered, select_page, Filter, ListSpec, QueryBuf};
use crate::error::AppError;
use serde::Serialize;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool};

/// One resolved page: the window slice plus the pre-pagination match count.
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub items: Vec<T>,
}

/// Resolve one page: COUNT the filtered rows, then fetch the ordered window.
/// A window past the end of the collection yields an empty `items`.
pub async fn fetch_page<T>(pool: &PgPool, spec: &ListSpec<'_>) -> Result<Page<T>, AppError>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    let count = count_rows(spec.table, spec.filters);
    tracing::debug!(sql = %count.sql, "count query");
    let mut count_query = sqlx::query_scalar::<_, i64>(&count.sql);
    for p in &count.params {
        count_query = count_query.bind(p.clone());
    }
    let total = count_query.fetch_one(pool).await?;

    let select = select_page(spec);
    tracing::debug!(sql = %select.sql, "page query");
    let mut select_query = sqlx::query_as::<_, T>(&select.sql);
    for p in &select.params {
        select_query = select_query.bind(p.clone());
    }
    let items = select_query.fetch_all(pool).await?;

    Ok(Page {
        total,
        page: spec.window.page,
        per_page: spec.window.per_page,
        items,
    })
}

/// All rows matching the filters, in natural order, without a page window.
pub async fn fetch_filtered<T>(
    pool: &PgPool,
    table: &str,
    columns: &str,
    key_column: &str,
    filters: &[Filter],
) -> Result<Vec<T>, AppError>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    let q = select_filtered(table, columns, key_column, filters);
    tracing::debug!(sql = %q.sql, "filtered query");
    let mut query = sqlx::query_as::<_, T>(&q.sql);
    for p in &q.params {
        query = query.bind(p.clone());
    }
    Ok(query.fetch_all(pool).await?)
}

/// Run a builder-generated statement expecting zero or one returned row.
/// Used by the stores for partial updates. Returns the raw driver error so
/// each store picks its own constraint-violation mapping.
pub async fn fetch_optional_as<T>(pool: &PgPool, q: &QueryBuf) -> Result<Option<T>, sqlx::Error>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    tracing::debug!(sql = %q.sql, "query");
    let mut query = sqlx::query_as::<_, T>(&q.sql);
    for p in &q.params {
        query = query.bind(p.clone());
    }
    query.fetch_optional(pool).await
}
