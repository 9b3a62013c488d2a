//! Record stores: one module per entity. Each operation takes the pool as an
//! argument and is a single atomic statement; the database enforces unique
//! and foreign-key constraints, and violations are mapped in [`crate::error`].

pub mod books;
pub mod courses;
pub mod products;
pub mod students;
pub mod teachers;
