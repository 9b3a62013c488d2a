//! HTTP handlers, one module per entity. Handlers parse and validate request
//! input, call the stores, and wrap results in the response envelope; all
//! decision logic lives below this layer.

pub mod books;
pub mod courses;
pub mod products;
pub mod students;
pub mod teachers;
