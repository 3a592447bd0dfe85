//! Authentication request DTOs

use serde::Deserialize;
use validator::Validate;

use crate::constants::{MAX_PASSWORD_LENGTH, MAX_USERNAME_LENGTH};

/// Admin login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = MAX_USERNAME_LENGTH))]
    pub username: String,

    #[validate(length(min = 1, max = MAX_PASSWORD_LENGTH))]
    pub password: String,
}

/// Token refresh request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1))]
    pub refresh_token: String,
}

/// Logout request
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoutRequest {
    /// Refresh token of the session being closed
    pub refresh_token: Option<String>,
    /// Revoke every session of the admin
    pub all_sessions: Option<bool>,
}
