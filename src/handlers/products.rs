//! Product inventory API.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value;

use crate::error::AppError;
use crate::models::{NewProduct, ProductPatch, ProductSort};
use crate::query::ListParams;
use crate::response::Envelope;
use crate::state::AppState;
use crate::store::products;

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Value>, AppError> {
    let sort = params.sort_key::<ProductSort>()?;
    let page = products::list(&state.pool, sort, params.window()).await?;
    Ok(Envelope::page("products", &page))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, AppError> {
    let product = products::fetch(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".into()))?;
    Ok(Envelope::ok().field("product", product).json())
}

pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<NewProduct>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let draft = body.validate()?;
    let product = products::insert(&state.pool, &draft).await?;
    Ok((
        StatusCode::CREATED,
        Envelope::ok()
            .field("message", "Product added successfully!")
            .field("product", product)
            .json(),
    ))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<ProductPatch>,
) -> Result<Json<Value>, AppError> {
    let product = products::update(&state.pool, id, &body)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".into()))?;
    Ok(Envelope::ok().field("product", product).json())
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, AppError> {
    if !products::delete(&state.pool, id).await? {
        return Err(AppError::NotFound("Product not found".into()));
    }
    Ok(Envelope::ok().field("message", "Product deleted!").json())
}
