//! Product inventory persistence.

use crate::error::AppError;
use crate::models::{Product, ProductDraft, ProductPatch, ProductSort};
use crate::query::{self, BindValue, ListSpec, Page, PageWindow, QueryBuf, SortKey, SortOrder};
use sqlx::PgPool;

const TABLE: &str = "products";
const COLUMNS: &str = "id, name, price, stock, description";

pub async fn list(
    pool: &PgPool,
    sort: Option<(ProductSort, SortOrder)>,
    window: PageWindow,
) -> Result<Page<Product>, AppError> {
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

pub async fn fetch(pool: &PgPool, id: i32) -> Result<Option<Product>, AppError> {
    let product = sqlx::query_as::<_, Product>(
        "SELECT id, name, price, stock, description FROM products WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(product)
}

pub async fn insert(pool: &PgPool, draft: &ProductDraft) -> Result<Product, AppError> {
    let product = sqlx::query_as::<_, Product>(
        "INSERT INTO products (name, price, stock, description) VALUES ($1, $2, $3, $4) \
         RETURNING id, name, price, stock, description",
    )
    .bind(&draft.name)
    .bind(draft.price)
    .bind(draft.stock)
    .bind(&draft.description)
    .fetch_one(pool)
    .await?;
    Ok(product)
}

pub async fn update(
    pool: &PgPool,
    id: i32,
    patch: &ProductPatch,
) -> Result<Option<Product>, AppError> {
    let mut q = QueryBuf::new();
    let mut sets = Vec::new();
    if let Some(name) = &patch.name {
        let n = q.push(BindValue::from(name.as_str()));
        sets.push(format!("name = ${n}"));
    }
    if let Some(price) = patch.price {
        let n = q.push(BindValue::from(price));
        sets.push(format!("price = ${n}"));
    }
    if let Some(stock) = patch.stock {
        let n = q.push(BindValue::from(stock));
        sets.push(format!("stock = ${n}"));
    }
    if let Some(description) = &patch.description {
        let n = q.push(BindValue::from(description.as_str()));
        sets.push(format!("description = ${n}"));
    }
    if sets.is_empty() {
        return fetch(pool, id).await;
    }
    let n = q.push(BindValue::from(id));
    q.sql = format!(
        "UPDATE products SET {} WHERE id = ${} RETURNING {}",
        sets.join(", "),
        n,
        COLUMNS
    );
    Ok(query::fetch_optional_as(pool, &q).await?)
}

pub async fn delete(pool: &PgPool, id: i32) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM products WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
