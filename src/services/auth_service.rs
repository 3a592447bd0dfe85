//! Authentication service
//!
//! Admin sessions are a short-lived HS256 access token plus an opaque
//! refresh token. Refresh tokens are stored in Redis only as their SHA-256
//! digest, each pointing at the owning admin. Every admin also has a set of
//! live digests so "log out everywhere" needs no key scan.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use redis::{AsyncCommands, aio::ConnectionManager};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    config::{AdminConfig, JwtConfig},
    constants::{REFRESH_TOKEN_LENGTH, REFRESH_TOKEN_PREFIX},
    db::repositories::AdminRepository,
    error::{AppError, AppResult},
    models::Admin,
    utils::{generate_secure_token, hash_string},
};

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // admin_id
    pub username: String,
    pub exp: i64,
    pub iat: i64,
}

/// Tokens handed out on login and refresh
#[derive(Debug, Clone)]
pub struct IssuedTokens {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds
    pub expires_in: i64,
}

/// Authentication service
pub struct AuthService;

impl AuthService {
    /// Login with username and password
    pub async fn login(
        pool: &PgPool,
        mut redis: ConnectionManager,
        jwt: &JwtConfig,
        username: &str,
        password: &str,
    ) -> AppResult<(Admin, IssuedTokens)> {
        let admin = AdminRepository::find_by_username(pool, username)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !Self::verify_password(password, &admin.password_hash)? {
            return Err(AppError::InvalidCredentials);
        }

        AdminRepository::update_last_login(pool, &admin.id).await?;

        let tokens = Self::issue_tokens(&mut redis, jwt, &admin).await?;
        tracing::info!(admin_id = %admin.id, "Admin logged in");

        Ok((admin, tokens))
    }

    /// Exchange a refresh token for a fresh token pair
    ///
    /// The presented token is consumed atomically, so replaying it fails.
    pub async fn refresh(
        pool: &PgPool,
        mut redis: ConnectionManager,
        jwt: &JwtConfig,
        refresh_token: &str,
    ) -> AppResult<IssuedTokens> {
        let digest = hash_string(refresh_token);
        let owner: Option<String> = redis.get_del(Self::token_key(&digest)).await?;
        let owner = owner.ok_or(AppError::InvalidToken)?;

        let admin_id = Uuid::parse_str(&owner).map_err(|_| AppError::InvalidToken)?;
        redis
            .srem::<_, _, ()>(Self::admin_set_key(&admin_id), &digest)
            .await?;

        let admin = AdminRepository::find_by_id(pool, &admin_id)
            .await?
            .ok_or(AppError::InvalidToken)?;

        Self::issue_tokens(&mut redis, jwt, &admin).await
    }

    /// Revoke one refresh token, or every session of the admin
    pub async fn logout(
        mut redis: ConnectionManager,
        admin_id: &Uuid,
        refresh_token: Option<&str>,
        all_sessions: bool,
    ) -> AppResult<()> {
        let set_key = Self::admin_set_key(admin_id);

        if all_sessions {
            let digests: Vec<String> = redis.smembers(&set_key).await?;
            for digest in &digests {
                redis.del::<_, ()>(Self::token_key(digest)).await?;
            }
            redis.del::<_, ()>(&set_key).await?;
            tracing::info!(admin_id = %admin_id, sessions = digests.len(), "Revoked all sessions");
            return Ok(());
        }

        if let Some(token) = refresh_token {
            let digest = hash_string(token);
            let key = Self::token_key(&digest);
            let owner: Option<String> = redis.get(&key).await?;
            // Only the owner may revoke a token
            if owner.as_deref() == Some(admin_id.to_string().as_str()) {
                redis.del::<_, ()>(&key).await?;
                redis.srem::<_, _, ()>(&set_key, &digest).await?;
            }
        }

        Ok(())
    }

    /// Get admin by ID
    pub async fn get_admin_by_id(pool: &PgPool, admin_id: &Uuid) -> AppResult<Option<Admin>> {
        AdminRepository::find_by_id(pool, admin_id).await
    }

    /// Create the configured bootstrap admin if it does not exist yet
    ///
    /// An existing account keeps its password.
    pub async fn ensure_admin(pool: &PgPool, config: &AdminConfig) -> AppResult<()> {
        let Some((username, password)) = config.credentials() else {
            tracing::debug!("No bootstrap admin configured");
            return Ok(());
        };

        if AdminRepository::find_by_username(pool, username).await?.is_some() {
            tracing::debug!(username, "Bootstrap admin already present");
            return Ok(());
        }

        let password_hash = Self::hash_password(password)?;
        match AdminRepository::create(pool, username, &password_hash).await {
            Ok(admin) => {
                tracing::info!(admin_id = %admin.id, username, "Created bootstrap admin");
                Ok(())
            }
            // Another instance won the race
            Err(AppError::AlreadyExists(_)) => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// Verify JWT token and extract claims
    pub fn verify_token(token: &str, secret: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }

    /// Hash password using Argon2
    pub fn hash_password(password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);

        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {}", e)))?
            .to_string();

        Ok(hash)
    }

    /// Verify password against hash
    fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid password hash: {}", e)))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Generate an access token
    fn generate_access_token(admin: &Admin, jwt: &JwtConfig) -> AppResult<(String, i64)> {
        let now = Utc::now();
        let expires_at = now + Duration::hours(jwt.expiry_hours);
        let expires_in = jwt.expiry_hours * 3600;

        let claims = Claims {
            sub: admin.id.to_string(),
            username: admin.username.clone(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(jwt.secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Token generation failed: {}", e)))?;

        Ok((token, expires_in))
    }

    async fn issue_tokens(
        redis: &mut ConnectionManager,
        jwt: &JwtConfig,
        admin: &Admin,
    ) -> AppResult<IssuedTokens> {
        let (access_token, expires_in) = Self::generate_access_token(admin, jwt)?;
        let refresh_token = generate_secure_token(REFRESH_TOKEN_LENGTH);

        let digest = hash_string(&refresh_token);
        let ttl = (jwt.refresh_token_expiry_days * 24 * 60 * 60) as u64;
        let set_key = Self::admin_set_key(&admin.id);

        Self::prune_expired_sessions(redis, &set_key).await?;

        redis
            .set_ex::<_, _, ()>(Self::token_key(&digest), admin.id.to_string(), ttl)
            .await?;
        redis.sadd::<_, _, ()>(&set_key, &digest).await?;
        redis.expire::<_, ()>(&set_key, ttl as i64).await?;

        Ok(IssuedTokens {
            access_token,
            refresh_token,
            expires_in,
        })
    }

    /// Drop digests whose refresh token has already expired
    async fn prune_expired_sessions(redis: &mut ConnectionManager, set_key: &str) -> AppResult<()> {
        let digests: Vec<String> = redis.smembers(set_key).await?;
        if digests.is_empty() {
            return Ok(());
        }

        let keys: Vec<String> = digests.iter().map(|d| Self::token_key(d)).collect();
        let owners: Vec<Option<String>> = redis.mget(&keys).await?;

        let stale = expired_digests(digests, &owners);
        if !stale.is_empty() {
            redis.srem::<_, _, ()>(set_key, &stale).await?;
            tracing::debug!(pruned = stale.len(), "Pruned expired refresh tokens");
        }
        Ok(())
    }

    fn token_key(digest: &str) -> String {
        format!("{REFRESH_TOKEN_PREFIX}:{digest}")
    }

    fn admin_set_key(admin_id: &Uuid) -> String {
        format!("{REFRESH_TOKEN_PREFIX}:admin:{admin_id}")
    }
}

/// Digests whose token key no longer resolves to an owner
fn expired_digests(digests: Vec<String>, owners: &[Option<String>]) -> Vec<String> {
    digests
        .into_iter()
        .zip(owners)
        .filter(|(_, owner)| owner.is_none())
        .map(|(digest, _)| digest)
        .collect()
}
