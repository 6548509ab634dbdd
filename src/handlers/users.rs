use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::auth::{self, password};
use crate::avatar;
use crate::database::manager::DatabaseManager;
use crate::database::store::UserStore;
use crate::error::ApiError;
use crate::middleware::ApiResponse;
use crate::validate::FieldErrors;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// POST /api/users - register a new account and hand back a session token
pub async fn register(Json(payload): Json<RegisterRequest>) -> Result<impl IntoResponse, ApiError> {
    let mut fields = FieldErrors::new();
    fields.require("name", payload.name.as_deref(), "Name is required");
    fields.require_email(
        "email",
        payload.email.as_deref(),
        "Please enter correct email address",
    );
    fields.require_min_len(
        "password",
        payload.password.as_deref(),
        6,
        "Please enter password with 6 or more characters",
    );
    fields.into_result()?;

    let name = payload.name.unwrap_or_default();
    let email = payload.email.unwrap_or_default().trim().to_lowercase();
    let password = payload.password.unwrap_or_default();

    let pool = DatabaseManager::pool().await?;
    let users = UserStore::new(pool);

    if users.find_by_email(&email).await?.is_some() {
        return Err(ApiError::conflict("user already exists"));
    }

    let avatar = avatar::gravatar_url(&email);
    let digest = password::hash_password(&password)?;

    let user = users.insert(&name, &email, &digest, &avatar).await?;
    let token = auth::issue_token(user.id)?;

    Ok(ApiResponse::success(TokenResponse { token }))
}
