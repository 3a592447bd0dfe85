//! Admin repository

use sqlx::PgPool;
use uuid::Uuid;

use crate::{error::AppResult, models::Admin};

/// Repository for administrator accounts
pub struct AdminRepository;

impl AdminRepository {
    /// Create an admin account
    pub async fn create(pool: &PgPool, username: &str, password_hash: &str) -> AppResult<Admin> {
        let admin = sqlx::query_as::<_, Admin>(
            r#"
            INSERT INTO admins (username, password_hash)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(pool)
        .await?;

        Ok(admin)
    }

    /// Find admin by ID
    pub async fn find_by_id(pool: &PgPool, id: &Uuid) -> AppResult<Option<Admin>> {
        let admin = sqlx::query_as::<_, Admin>(r#"SELECT * FROM admins WHERE id = $1"#)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(admin)
    }

    /// Find admin by username
    pub async fn find_by_username(pool: &PgPool, username: &str) -> AppResult<Option<Admin>> {
        let admin = sqlx::query_as::<_, Admin>(r#"SELECT * FROM admins WHERE username = $1"#)
            .bind(username)
            .fetch_optional(pool)
            .await?;

        Ok(admin)
    }

    /// Stamp a successful login
    pub async fn update_last_login(pool: &PgPool, id: &Uuid) -> AppResult<()> {
        sqlx::query(r#"UPDATE admins SET last_login_at = NOW() WHERE id = $1"#)
            .bind(id)
            .execute(pool)
            .await?;

        Ok(())
    }
}
