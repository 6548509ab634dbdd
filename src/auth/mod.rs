//! Session token issue/verify. Tokens are bearer-style: any holder is treated
//! as the identity inside, and there is no server-side revocation - logout is
//! client-side token discard.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config;

pub mod password;

/// Token payload: the user id is the only data trusted across requests
/// without re-querying the store.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    fn new(user_id: Uuid, ttl_secs: i64) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id,
            exp: (now + Duration::seconds(ttl_secs)).timestamp(),
            iat: now.timestamp(),
        }
    }
}

#[derive(Debug)]
pub enum TokenError {
    SigningFailed(String),
    MissingSecret,
    /// Malformed token, signature mismatch, or expiry - the caller only ever
    /// learns "not valid".
    Invalid(String),
}

impl std::fmt::Display for TokenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenError::SigningFailed(msg) => write!(f, "token signing failed: {}", msg),
            TokenError::MissingSecret => write!(f, "JWT secret not configured"),
            TokenError::Invalid(msg) => write!(f, "invalid token: {}", msg),
        }
    }
}

impl std::error::Error for TokenError {}

/// Issue a signed, time-bound token for the given identity.
pub fn issue_token(user_id: Uuid) -> Result<String, TokenError> {
    let security = &config::config().security;
    issue_with(user_id, &security.jwt_secret, security.token_ttl_secs as i64)
}

/// Verify a token and return the embedded claims.
pub fn verify_token(token: &str) -> Result<Claims, TokenError> {
    verify_with(token, &config::config().security.jwt_secret)
}

fn issue_with(user_id: Uuid, secret: &str, ttl_secs: i64) -> Result<String, TokenError> {
    if secret.is_empty() {
        return Err(TokenError::MissingSecret);
    }

    let claims = Claims::new(user_id, ttl_secs);
    let encoding_key = EncodingKey::from_secret(secret.as_bytes());

    encode(&Header::default(), &claims, &encoding_key)
        .map_err(|e| TokenError::SigningFailed(e.to_string()))
}

fn verify_with(token: &str, secret: &str) -> Result<Claims, TokenError> {
    if secret.is_empty() {
        return Err(TokenError::MissingSecret);
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let validation = Validation::default();

    let token_data = decode::<Claims>(token, &decoding_key, &validation)
        .map_err(|e| TokenError::Invalid(e.to_string()))?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_then_verify_roundtrip() {
        let id = Uuid::new_v4();
        let token = issue_with(id, "test-secret", 3600).unwrap();
        let claims = verify_with(&token, "test-secret").unwrap();
        assert_eq!(claims.sub, id);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = issue_with(Uuid::new_v4(), "test-secret", 3600).unwrap();
        let err = verify_with(&token, "other-secret").unwrap_err();
        assert!(matches!(err, TokenError::Invalid(_)));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        // Past the default validation leeway
        let token = issue_with(Uuid::new_v4(), "test-secret", -3600).unwrap();
        let err = verify_with(&token, "test-secret").unwrap_err();
        assert!(matches!(err, TokenError::Invalid(_)));
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        let err = verify_with("not.a.token", "test-secret").unwrap_err();
        assert!(matches!(err, TokenError::Invalid(_)));
    }

    #[test]
    fn test_empty_secret_refuses_to_sign() {
        let err = issue_with(Uuid::new_v4(), "", 3600).unwrap_err();
        assert!(matches!(err, TokenError::MissingSecret));
    }
}
