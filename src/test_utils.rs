//! Test utilities backed by a throwaway PostgreSQL container
//!
//! The container is started on first use and shared by every test in the
//! run. Tests isolate themselves by creating their own events.

use sqlx::PgPool;
use testcontainers::{ContainerAsync, ImageExt, runners::AsyncRunner};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;

use crate::db;

static POSTGRES: OnceCell<ContainerAsync<Postgres>> = OnceCell::const_new();

/// Get or start the PostgreSQL container
async fn postgres() -> &'static ContainerAsync<Postgres> {
    POSTGRES
        .get_or_init(|| async {
            Postgres::default()
                .with_user("results")
                .with_password("results_test")
                .with_db_name("results_test")
                .with_tag("16-alpine")
                .start()
                .await
                .expect("Failed to start PostgreSQL container")
        })
        .await
}

/// Connection URL of the shared container
pub async fn postgres_url() -> String {
    let container = postgres().await;
    let host = container.get_host().await.unwrap();
    let port = container.get_host_port_ipv4(5432).await.unwrap();
    format!("postgres://results:results_test@{}:{}/results_test", host, port)
}

/// Fresh pool on the migrated test database
pub async fn test_pool() -> PgPool {
    let pool = PgPool::connect(&postgres_url().await)
        .await
        .expect("Failed to connect to test database");
    db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");
    pool
}
