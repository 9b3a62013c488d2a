//! Book catalog API: paginated list, fetch, create, partial update, delete,
//! and the filtered search endpoint.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;

use crate::error::AppError;
use crate::models::{BookPatch, BookSort, NewBook};
use crate::query::{Filter, ListParams};
use crate::response::Envelope;
use crate::state::AppState;
use crate::store::books;

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Value>, AppError> {
    let sort = params.sort_key::<BookSort>()?;
    let page = books::list(&state.pool, sort, params.window()).await?;
    Ok(Envelope::page("books", &page))
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    /// Substring match on title.
    pub q: Option<String>,
    /// Substring match on author.
    pub author: Option<String>,
    /// Exact match on publication year.
    pub year: Option<String>,
}

fn search_filters(params: &SearchParams) -> Result<Vec<Filter>, AppError> {
    let mut filters = Vec::new();
    if let Some(title) = params.q.as_deref().filter(|s| !s.is_empty()) {
        filters.push(Filter::contains("title", title));
    }
    if let Some(author) = params.author.as_deref().filter(|s| !s.is_empty()) {
        filters.push(Filter::contains("author", author));
    }
    if let Some(year) = params.year.as_deref().filter(|s| !s.is_empty()) {
        let year: i32 = year
            .trim()
            .parse()
            .map_err(|_| AppError::BadRequest("year must be an integer".into()))?;
        filters.push(Filter::eq("year", year));
    }
    Ok(filters)
}

pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Value>, AppError> {
    let filters = search_filters(&params)?;
    let found = books::search(&state.pool, &filters).await?;
    Ok(Envelope::ok()
        .field("count", found.len())
        .field("books", found)
        .json())
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, AppError> {
    let book = books::fetch(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Book not found".into()))?;
    Ok(Envelope::ok().field("book", book).json())
}

pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<NewBook>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let draft = body.validate()?;
    let book = books::insert(&state.pool, &draft).await?;
    Ok((
        StatusCode::CREATED,
        Envelope::ok()
            .field("message", "Book created")
            .field("book", book)
            .json(),
    ))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<BookPatch>,
) -> Result<Json<Value>, AppError> {
    let book = books::update(&state.pool, id, &body)
        .await?
        .ok_or_else(|| AppError::NotFound("Book not found".into()))?;
    Ok(Envelope::ok().field("book", book).json())
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, AppError> {
    if !books::delete(&state.pool, id).await? {
        return Err(AppError::NotFound("Book not found".into()));
    }
    Ok(Envelope::ok().field("message", "Book deleted").json())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{BindValue, FilterOp};

    #[test]
    fn search_params_build_filters() {
        let params = SearchParams {
            q: Some("flask".into()),
            author: Some("Martin".into()),
            year: Some("2008".into()),
        };
        let filters = search_filters(&params).expect("valid");
        assert_eq!(filters.len(), 3);
        assert_eq!(filters[0].column, "title");
        assert_eq!(filters[0].op, FilterOp::Contains);
        assert_eq!(filters[0].value, BindValue::Text("%flask%".into()));
        assert_eq!(filters[1].column, "author");
        assert_eq!(filters[1].value, BindValue::Text("%Martin%".into()));
        assert_eq!(filters[2].column, "year");
        assert_eq!(filters[2].op, FilterOp::Eq);
        assert_eq!(filters[2].value, BindValue::Int(2008));
    }

    #[test]
    fn empty_search_params_mean_no_filters() {
        let filters = search_filters(&SearchParams::default()).expect("valid");
        assert!(filters.is_empty());
        let params = SearchParams {
            q: Some("".into()),
            ..Default::default()
        };
        assert!(search_filters(&params).expect("valid").is_empty());
    }

    #[test]
    fn non_numeric_year_is_rejected() {
        let params = SearchParams {
            year: Some("two thousand".into()),
            ..Default::default()
        };
        let err = search_filters(&params).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
