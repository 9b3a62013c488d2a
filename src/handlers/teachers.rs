//! Teacher API.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value;

use crate::error::AppError;
use crate::models::{NewTeacher, TeacherPatch, TeacherSort};
use crate::query::ListParams;
use crate::response::Envelope;
use crate::state::AppState;
use crate::store::teachers;

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Value>, AppError> {
    let sort = params.sort_key::<TeacherSort>()?;
    let page = teachers::list(&state.pool, sort, params.window()).await?;
    Ok(Envelope::page("teachers", &page))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, AppError> {
    let teacher = teachers::fetch(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Teacher not found".into()))?;
    Ok(Envelope::ok().field("teacher", teacher).json())
}

pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<NewTeacher>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let draft = body.validate()?;
    let teacher = teachers::insert(&state.pool, &draft).await?;
    Ok((
        StatusCode::CREATED,
        Envelope::ok()
            .field("message", "Teacher created")
            .field("teacher", teacher)
            .json(),
    ))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<TeacherPatch>,
) -> Result<Json<Value>, AppError> {
    let teacher = teachers::update(&state.pool, id, &body)
        .await?
        .ok_or_else(|| AppError::NotFound("Teacher not found".into()))?;
    Ok(Envelope::ok().field("teacher", teacher).json())
}

/// Delete is RESTRICT: a teacher that still owns courses returns 409.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, AppError> {
    if !teachers::delete(&state.pool, id).await? {
        return Err(AppError::NotFound("Teacher not found".into()));
    }
    Ok(Envelope::ok().field("message", "Teacher deleted").json())
}
