use axum::response::IntoResponse;
use axum::{Extension, Json};
use serde::Deserialize;

use crate::auth::{self, password};
use crate::database::manager::DatabaseManager;
use crate::database::store::UserStore;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, AuthUser};
use crate::validate::FieldErrors;

use super::users::TokenResponse;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// POST /api/auth/login - exchange credentials for a session token.
/// Unknown email and wrong password produce the same outcome.
pub async fn login(Json(payload): Json<LoginRequest>) -> Result<impl IntoResponse, ApiError> {
    let mut fields = FieldErrors::new();
    fields.require_email(
        "email",
        payload.email.as_deref(),
        "Please enter correct email address",
    );
    fields.require("password", payload.password.as_deref(), "Password is required");
    fields.into_result()?;

    let email = payload.email.unwrap_or_default().trim().to_lowercase();
    let password = payload.password.unwrap_or_default();

    let pool = DatabaseManager::pool().await?;
    let users = UserStore::new(pool);

    let user = users
        .find_by_email(&email)
        .await?
        .ok_or(ApiError::InvalidCredentials)?;

    if !password::verify_password(&password, &user.password)? {
        return Err(ApiError::InvalidCredentials);
    }

    let token = auth::issue_token(user.id)?;

    Ok(ApiResponse::success(TokenResponse { token }))
}

/// GET /api/auth - return the authenticated user, password digest omitted
pub async fn current_user(
    Extension(auth_user): Extension<AuthUser>,
) -> Result<impl IntoResponse, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let users = UserStore::new(pool);

    let user = users
        .find_by_id(auth_user.id)
        .await?
        .ok_or_else(|| ApiError::not_found("user not found"))?;

    Ok(ApiResponse::success(user))
}
