//! Shared application state, passed to every handler. The pool is the only
//! shared resource; there is no module-level database handle.

use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
}
