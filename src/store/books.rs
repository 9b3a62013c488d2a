//! Book catalog persistence.

use crate::error::AppError;
use crate::models::{Book, BookDraft, BookPatch, BookSort};
use crate::query::{
    self, BindValue, Filter, ListSpec, Page, PageWindow, QueryBuf, SortKey, SortOrder,
};
use sqlx::PgPool;

const TABLE: &str = "books";
const COLUMNS: &str = "id, title, author, year, isbn, created_at";

pub async fn list(
    pool: &PgPool,
    sort: Option<(BookSort, SortOrder)>,
    window: PageWindow,
) -> Result<Page<Book>, AppError> {
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

pub async fn search(pool: &PgPool, filters: &[Filter]) -> Result<Vec<Book>, AppError> {
    query::fetch_filtered(pool, TABLE, COLUMNS, "id", filters).await
}

pub async fn fetch(pool: &PgPool, id: i32) -> Result<Option<Book>, AppError> {
    let book = sqlx::query_as::<_, Book>(
        "SELECT id, title, author, year, isbn, created_at FROM books WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(book)
}

pub async fn insert(pool: &PgPool, draft: &BookDraft) -> Result<Book, AppError> {
    let book = sqlx::query_as::<_, Book>(
        "INSERT INTO books (title, author, year, isbn) VALUES ($1, $2, $3, $4) \
         RETURNING id, title, author, year, isbn, created_at",
    )
    .bind(&draft.title)
    .bind(&draft.author)
    .bind(draft.year)
    .bind(&draft.isbn)
    .fetch_one(pool)
    .await?;
    Ok(book)
}

/// Partial update; returns the updated row, or None when the id is unknown.
/// An empty patch reads the current row back unchanged.
pub async fn update(pool: &PgPool, id: i32, patch: &BookPatch) -> Result<Option<Book>, AppError> {
    let mut q = QueryBuf::new();
    let mut sets = Vec::new();
    if let Some(title) = &patch.title {
        let n = q.push(BindValue::from(title.as_str()));
        sets.push(format!("title = ${n}"));
    }
    if let Some(author) = &patch.author {
        let n = q.push(BindValue::from(author.as_str()));
        sets.push(format!("author = ${n}"));
    }
    if let Some(year) = patch.year {
        let n = q.push(BindValue::from(year));
        sets.push(format!("year = ${n}"));
    }
    if let Some(isbn) = &patch.isbn {
        let n = q.push(BindValue::from(isbn.as_str()));
        sets.push(format!("isbn = ${n}"));
    }
    if sets.is_empty() {
        return fetch(pool, id).await;
    }
    let n = q.push(BindValue::from(id));
    q.sql = format!(
        "UPDATE books SET {} WHERE id = ${} RETURNING {}",
        sets.join(", "),
        n,
        COLUMNS
    );
    Ok(query::fetch_optional_as(pool, &q).await?)
}

/// Delete by key; false when no such row existed.
pub async fn delete(pool: &PgPool, id: i32) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM books WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
