//! Authentication handler implementations

use axum::{Json, extract::State};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    middleware::AuthenticatedAdmin,
    services::AuthService,
    state::AppState,
};

use super::{
    request::{LoginRequest, LogoutRequest, RefreshTokenRequest},
    response::{AdminResponse, LoginResponse, LogoutResponse, TokenResponse},
};

/// Login with username and password
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    payload.validate()?;

    let (admin, tokens) = AuthService::login(
        state.db(),
        state.redis().await?,
        &state.config().jwt,
        &payload.username,
        &payload.password,
    )
    .await?;

    Ok(Json(LoginResponse {
        tokens: tokens.into(),
        admin: admin.into(),
    }))
}

/// Rotate a refresh token
pub async fn refresh_token(
    State(state): State<AppState>,
    Json(payload): Json<RefreshTokenRequest>,
) -> AppResult<Json<TokenResponse>> {
    payload.validate()?;

    let tokens = AuthService::refresh(
        state.db(),
        state.redis().await?,
        &state.config().jwt,
        &payload.refresh_token,
    )
    .await?;

    Ok(Json(tokens.into()))
}

/// Close the current session, or all of them
pub async fn logout(
    State(state): State<AppState>,
    admin: AuthenticatedAdmin,
    payload: Option<Json<LogoutRequest>>,
) -> AppResult<Json<LogoutResponse>> {
    let payload = payload.map(|Json(p)| p).unwrap_or_default();

    AuthService::logout(
        state.redis().await?,
        &admin.id,
        payload.refresh_token.as_deref(),
        payload.all_sessions.unwrap_or(false),
    )
    .await?;

    Ok(Json(LogoutResponse {
        message: "Logged out successfully".to_string(),
    }))
}

/// Profile of the signed-in admin
pub async fn get_current_admin(
    State(state): State<AppState>,
    admin: AuthenticatedAdmin,
) -> AppResult<Json<AdminResponse>> {
    let admin = AuthService::get_admin_by_id(state.db(), &admin.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Admin not found".to_string()))?;

    Ok(Json(admin.into()))
}
