//! Student API. Duplicate emails are rejected by the unique constraint;
//! the referenced course is checked before writing.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value;

use crate::error::AppError;
use crate::models::{NewStudent, StudentPatch, StudentSort};
use crate::query::ListParams;
use crate::response::Envelope;
use crate::state::AppState;
use crate::store::{courses, students};

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Value>, AppError> {
    let sort = params.sort_key::<StudentSort>()?;
    let page = students::list(&state.pool, sort, params.window()).await?;
    Ok(Envelope::page("students", &page))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, AppError> {
    let student = students::fetch(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Student not found".into()))?;
    Ok(Envelope::ok().field("student", student).json())
}

async fn ensure_course_exists(state: &AppState, course_id: i32) -> Result<(), AppError> {
    if courses::fetch(&state.pool, course_id).await?.is_none() {
        return Err(AppError::Validation("Course not found".into()));
    }
    Ok(())
}

pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<NewStudent>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let draft = body.validate()?;
    ensure_course_exists(&state, draft.course_id).await?;
    let student = students::insert(&state.pool, &draft).await?;
    Ok((
        StatusCode::CREATED,
        Envelope::ok()
            .field("message", "Student added successfully!")
            .field("student", student)
            .json(),
    ))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<StudentPatch>,
) -> Result<Json<Value>, AppError> {
    if let Some(course_id) = body.course_id {
        ensure_course_exists(&state, course_id).await?;
    }
    let student = students::update(&state.pool, id, &body)
        .await?
        .ok_or_else(|| AppError::NotFound("Student not found".into()))?;
    Ok(Envelope::ok().field("student", student).json())
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, AppError> {
    if !students::delete(&state.pool, id).await? {
        return Err(AppError::NotFound("Student not found".into()));
    }
    Ok(Envelope::ok().field("message", "Student deleted!").json())
}
