//! Database bootstrap: table DDL, sample data, and first-run database
//! creation. Foreign keys are `ON DELETE RESTRICT`, so deleting a teacher
//! with courses or a course with students fails instead of cascading.

use crate::error::AppError;
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;

const TABLES: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS teachers (
        id SERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS courses (
        id SERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        teacher_id INTEGER NOT NULL REFERENCES teachers(id) ON DELETE RESTRICT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS students (
        id SERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE,
        course_id INTEGER NOT NULL REFERENCES courses(id) ON DELETE RESTRICT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS books (
        id SERIAL PRIMARY KEY,
        title TEXT NOT NULL,
        author TEXT NOT NULL,
        year INTEGER,
        isbn TEXT UNIQUE,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS products (
        id SERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        price DOUBLE PRECISION NOT NULL,
        stock INTEGER NOT NULL DEFAULT 0,
        description TEXT NOT NULL DEFAULT ''
    )
    "#,
];

pub async fn ensure_tables(pool: &PgPool) -> Result<(), AppError> {
    for ddl in TABLES {
        sqlx::query(ddl).execute(pool).await?;
    }
    Ok(())
}

pub(crate) const SEED_TEACHERS: &[(&str, &str)] = &[
    ("Mr. Sharma", "sharma@school.com"),
    ("Ms. Patil", "patil@school.com"),
];

/// (name, description, index into SEED_TEACHERS)
pub(crate) const SEED_COURSES: &[(&str, &str, usize)] = &[
    ("Python Basics", "Python fundamentals", 0),
    ("Web Development", "Flask & Web Tech", 1),
    ("Data Science", "Data analysis", 0),
];

pub(crate) const SEED_BOOKS: &[(&str, &str, i32)] = &[
    ("Python Crash Course", "Eric Matthes", 2019),
    ("Flask Web Development", "Miguel Grinberg", 2018),
    ("Clean Code", "Robert C. Martin", 2008),
    ("Effective Python", "Brett Slatkin", 2020),
];

/// Insert sample data into empty collections. Runs in one transaction; a
/// failure on any statement rolls the whole seed back.
pub async fn seed(pool: &PgPool) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;

    let teachers: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM teachers")
        .fetch_one(&mut *tx)
        .await?;
    if teachers == 0 {
        let mut teacher_ids = Vec::with_capacity(SEED_TEACHERS.len());
        for (name, email) in SEED_TEACHERS {
            let id: i32 = sqlx::query_scalar(
                "INSERT INTO teachers (name, email) VALUES ($1, $2) RETURNING id",
            )
            .bind(name)
            .bind(email)
            .fetch_one(&mut *tx)
            .await?;
            teacher_ids.push(id);
        }

        let courses: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM courses")
            .fetch_one(&mut *tx)
            .await?;
        if courses == 0 {
            for (name, description, teacher_index) in SEED_COURSES {
                sqlx::query(
                    "INSERT INTO courses (name, description, teacher_id) VALUES ($1, $2, $3)",
                )
                .bind(name)
                .bind(description)
                .bind(teacher_ids[*teacher_index])
                .execute(&mut *tx)
                .await?;
            }
        }
    }

    let books: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
        .fetch_one(&mut *tx)
        .await?;
    if books == 0 {
        for (title, author, year) in SEED_BOOKS {
            sqlx::query("INSERT INTO books (title, author, year) VALUES ($1, $2, $3)")
                .bind(title)
                .bind(author)
                .bind(year)
                .execute(&mut *tx)
                .await?;
        }
        tracing::info!(count = SEED_BOOKS.len(), "sample books inserted");
    }

    tx.commit().await?;
    Ok(())
}

/// Ensure the database named in `database_url` exists; create it if not.
/// Connects to the maintenance `postgres` database to run CREATE DATABASE.
/// Call before building the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = split_database_url(database_url);
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|e| AppError::BadRequest(format!("invalid DATABASE_URL: {}", e)))?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
            .bind(&db_name)
            .fetch_one(&mut conn)
            .await?;
    if !exists {
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
        tracing::info!(database = %db_name, "created database");
    }
    Ok(())
}

/// Split a connection URL into (maintenance URL, database name). A URL
/// without a database path (`postgres://localhost`) yields an empty name;
/// the `://` separator never counts as the path.
fn split_database_url(url: &str) -> (String, String) {
    let authority_start = url.find("://").map(|i| i + 3).unwrap_or(0);
    match url[authority_start..].find('/') {
        None => (url.to_string(), String::new()),
        Some(i) => {
            let path_start = authority_start + i + 1;
            let db_name = url[path_start..].split('?').next().unwrap_or("").trim();
            (format!("{}postgres", &url[..path_start]), db_name.to_string())
        }
    }
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_books_match_the_catalog() {
        assert_eq!(SEED_BOOKS.len(), 4);
        assert!(SEED_BOOKS.contains(&("Clean Code", "Robert C. Martin", 2008)));
    }

    #[test]
    fn seed_courses_reference_seed_teachers() {
        for (_, _, teacher_index) in SEED_COURSES {
            assert!(*teacher_index < SEED_TEACHERS.len());
        }
    }

    #[test]
    fn database_url_splits_into_admin_and_name() {
        let (admin, name) = split_database_url("postgres://localhost:5432/registrar");
        assert_eq!(admin, "postgres://localhost:5432/postgres");
        assert_eq!(name, "registrar");

        let (_, name) = split_database_url("postgres://u:p@host/db?sslmode=disable");
        assert_eq!(name, "db");
    }

    #[test]
    fn url_without_a_database_path_yields_no_name() {
        let (admin, name) = split_database_url("postgres://localhost");
        assert_eq!(name, "");
        assert_eq!(admin, "postgres://localhost");

        let (_, name) = split_database_url("postgres://user@host:5433");
        assert_eq!(name, "");
    }

    #[test]
    fn identifiers_are_quoted() {
        assert_eq!(quote_ident("school"), "\"school\"");
        assert_eq!(quote_ident("we\"ird"), "\"we\"\"ird\"");
    }
}
