//! Common test utilities for database-backed suites
//!
//! These suites need a live MySQL. They are gated on `DATABASE_URL`
//! and skip themselves when it is not set.

use sqlx::mysql::MySqlPoolOptions;
use sqlx::MySqlPool;
use std::env;

/// Connect to the test database named by `DATABASE_URL`, creating the
/// schema if needed. Returns `None` when no database is configured so
/// callers can skip.
pub async fn try_test_pool() -> Option<MySqlPool> {
    let _ = dotenvy::dotenv();

    let url = match env::var("DATABASE_URL") {
        Ok(url) if !url.trim().is_empty() => url,
        _ => {
            eprintln!("DATABASE_URL not set; skipping database test");
            return None;
        }
    };

    let pool = MySqlPoolOptions::new()
        .max_connections(5)
        .connect(&url)
        .await
        .expect("Failed to connect to test database");

    setup_schema(&pool).await.expect("Failed to set up schema");

    Some(pool)
}

async fn setup_schema(pool: &MySqlPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS employee_invitations (
            id CHAR(36) PRIMARY KEY,
            email VARCHAR(255) NOT NULL,
            first_name VARCHAR(150) NOT NULL,
            last_name VARCHAR(150) NOT NULL,
            phone VARCHAR(20) NOT NULL,
            role VARCHAR(20) NOT NULL,
            business_id CHAR(36) NOT NULL,
            created_by CHAR(36) NOT NULL,
            token VARCHAR(64) NOT NULL UNIQUE,
            accepted BOOLEAN NOT NULL DEFAULT FALSE,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS employees (
            id CHAR(36) PRIMARY KEY,
            email VARCHAR(255) NOT NULL,
            first_name VARCHAR(150) NOT NULL,
            last_name VARCHAR(150) NOT NULL,
            phone VARCHAR(20) NOT NULL,
            password_hash VARCHAR(255) NOT NULL,
            role VARCHAR(20) NOT NULL,
            business_id CHAR(36) NOT NULL,
            created_by CHAR(36) NULL,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS password_reset_tokens (
            id CHAR(36) PRIMARY KEY,
            user_id CHAR(36) NOT NULL,
            token VARCHAR(64) NOT NULL UNIQUE,
            used BOOLEAN NOT NULL DEFAULT FALSE,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
