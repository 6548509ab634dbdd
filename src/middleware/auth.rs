use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::auth;
use crate::error::ApiError;

/// Authenticated identity extracted from the session token. Passed through
/// the call chain by value; never re-fetched from the store by the gate.
#[derive(Clone, Copy, Debug)]
pub struct AuthUser {
    pub id: Uuid,
}

/// Identity middleware: verifies the bearer token and attaches the resolved
/// identity to the request, or rejects with 401 before any handler runs.
pub async fn require_auth(
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    // Absent/garbled header and failed verification reject with
    // distinguishable messages
    let token = extract_bearer_token(&headers).map_err(ApiError::unauthorized)?;

    let claims = auth::verify_token(&token)
        .map_err(|_| ApiError::unauthorized("token is not valid"))?;

    request.extensions_mut().insert(AuthUser { id: claims.sub });

    Ok(next.run(request).await)
}

fn extract_bearer_token(headers: &HeaderMap) -> Result<String, String> {
    let auth_header = headers
        .get("authorization")
        .ok_or_else(|| "no token, authorization denied".to_string())?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "invalid Authorization header".to_string())?;

    if let Some(token) = auth_str.strip_prefix("Bearer ") {
        if token.trim().is_empty() {
            return Err("no token, authorization denied".to_string());
        }
        Ok(token.to_string())
    } else {
        Err("Authorization header must use Bearer token format".to_string())
    }
}
