//! Entity API routes. `/books/search` is registered alongside `/books/:id`;
//! the router prefers the static segment.

use crate::handlers::{books, courses, products, students, teachers};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/books", get(books::list).post(books::create))
        .route("/books/search", get(books::search))
        .route(
            "/books/:id",
            get(books::get).put(books::update).delete(books::delete),
        )
        .route("/teachers", get(teachers::list).post(teachers::create))
        .route(
            "/teachers/:id",
            get(teachers::get)
                .put(teachers::update)
                .delete(teachers::delete),
        )
        .route("/courses", get(courses::list).post(courses::create))
        .route(
            "/courses/:id",
            get(courses::get)
                .put(courses::update)
                .delete(courses::delete),
        )
        .route("/students", get(students::list).post(students::create))
        .route(
            "/students/:id",
            get(students::get)
                .put(students::update)
                .delete(students::delete),
        )
        .route("/products", get(products::list).post(products::create))
        .route(
            "/products/:id",
            get(products::get)
                .put(products::update)
                .delete(products::delete),
        )
        .with_state(state)
}
