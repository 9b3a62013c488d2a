//! Registrar: REST CRUD service for school records, a book catalog, and
//! product inventory. The shared core is the list-query resolver in [`query`];
//! everything else is a thin typed layer over PostgreSQL.

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod query;
pub mod response;
pub mod routes;
pub mod schema;
pub mod state;
pub mod store;

pub use config::Config;
pub use error::AppError;
pub use query::{Filter, FilterOp, ListParams, Page, PageWindow, SortKey, SortOrder};
pub use routes::app;
pub use schema::{ensure_database_exists, ensure_tables, seed};
pub use state::AppState;
