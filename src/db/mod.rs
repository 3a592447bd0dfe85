//! Database module
//!
//! Connection pool, embedded migrations and repositories.

pub mod connection;
pub mod repositories;

use sqlx::PgPool;

pub use connection::*;

/// Apply the embedded migrations
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
