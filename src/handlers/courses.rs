//! Course API. Creating or moving a course checks the referenced teacher
//! exists before writing.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value;

use crate::error::AppError;
use crate::models::{CoursePatch, CourseSort, NewCourse};
use crate::query::ListParams;
use crate::response::Envelope;
use crate::state::AppState;
use crate::store::{courses, teachers};

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Value>, AppError> {
    let sort = params.sort_key::<CourseSort>()?;
    let page = courses::list(&state.pool, sort, params.window()).await?;
    Ok(Envelope::page("courses", &page))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, AppError> {
    let course = courses::fetch(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Course not found".into()))?;
    Ok(Envelope::ok().field("course", course).json())
}

async fn ensure_teacher_exists(state: &AppState, teacher_id: i32) -> Result<(), AppError> {
    if teachers::fetch(&state.pool, teacher_id).await?.is_none() {
        return Err(AppError::Validation("Teacher not found".into()));
    }
    Ok(())
}

pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<NewCourse>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let draft = body.validate()?;
    ensure_teacher_exists(&state, draft.teacher_id).await?;
    let course = courses::insert(&state.pool, &draft).await?;
    Ok((
        StatusCode::CREATED,
        Envelope::ok()
            .field("message", "Course created")
            .field("course", course)
            .json(),
    ))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<CoursePatch>,
) -> Result<Json<Value>, AppError> {
    if let Some(teacher_id) = body.teacher_id {
        ensure_teacher_exists(&state, teacher_id).await?;
    }
    let course = courses::update(&state.pool, id, &body)
        .await?
        .ok_or_else(|| AppError::NotFound("Course not found".into()))?;
    Ok(Envelope::ok().field("course", course).json())
}

/// Delete is RESTRICT: a course that still has students returns 409.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, AppError> {
    if !courses::delete(&state.pool, id).await? {
        return Err(AppError::NotFound("Course not found".into()));
    }
    Ok(Envelope::ok().field("message", "Course deleted").json())
}
