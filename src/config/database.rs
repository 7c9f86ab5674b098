//! PostgreSQL connection pool initialization.
//!
//! The connection string is read from `DATABASE_URL`. A missing or
//! unreachable database is a fatal startup condition.

use sqlx::PgPool;
use std::env;

/// Connects the pool and applies pending migrations.
///
/// # Panics
///
/// Panics if `DATABASE_URL` is unset, the connection fails, or a migration
/// cannot be applied. Call once during startup; the pool is cheaply
/// cloneable and shared through the application state.
pub async fn init_db_pool() -> PgPool {
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    pool
}
