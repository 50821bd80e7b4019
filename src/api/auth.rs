use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{ApiError, AppState};

/// Lifetime of an issued access token.
pub const ACCESS_TOKEN_EXPIRE_MINUTES: i64 = 30;

/// Credentials and signing material for the admin API.
#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub username: String,
    pub password: String,
    pub jwt_secret: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    exp: usize,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Incorrect username or password")]
    InvalidCredentials,
    #[error("Could not validate credentials")]
    InvalidToken,
    #[error("Token creation failed: {0}")]
    TokenCreation(String),
}

/// Issue a bearer token for the configured admin user.
pub fn create_access_token(username: &str, secret: &str) -> Result<String, AuthError> {
    let exp = (Utc::now() + chrono::Duration::minutes(ACCESS_TOKEN_EXPIRE_MINUTES)).timestamp() as usize;
    let claims = Claims {
        sub: username.to_string(),
        exp,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AuthError::TokenCreation(e.to_string()))
}

/// Validate a bearer token and return the subject it was issued to.
/// Expiry is checked as part of validation.
pub fn verify_access_token(token: &str, secret: &str) -> Result<String, AuthError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims.sub)
    .map_err(|_| AuthError::InvalidToken)
}

/// Extractor guarding the protected `/api` routes.
///
/// Rejects requests without a valid `Authorization: Bearer` token, or with
/// a token issued to anyone but the configured admin user.
pub struct AuthUser(pub String);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(ApiError::unauthorized)?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(ApiError::unauthorized)?;

        let username = verify_access_token(token, &state.auth.jwt_secret)
            .map_err(|_| ApiError::unauthorized())?;
        if username != state.auth.username {
            return Err(ApiError::unauthorized());
        }
        Ok(AuthUser(username))
    }
}
