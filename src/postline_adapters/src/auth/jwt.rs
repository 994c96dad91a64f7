use axum::http::{HeaderMap, header::AUTHORIZATION};
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use postline_core::UserId;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const BEARER_PREFIX: &str = "Bearer ";

#[derive(Clone)]
pub struct JwtAuthConfig {
    pub jwt_secret: Secret<String>,
    pub token_ttl_in_seconds: i64,
}

impl JwtAuthConfig {
    pub fn new(jwt_secret: Secret<String>, token_ttl_in_seconds: i64) -> Self {
        Self {
            jwt_secret,
            token_ttl_in_seconds,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.jwt_secret.expose_secret().as_bytes()
    }
}

#[derive(Debug, Error)]
pub enum TokenAuthError {
    #[error("Missing token")]
    MissingToken,
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token error: {0}")]
    TokenError(jsonwebtoken::errors::Error),
    #[error("Unexpected error")]
    UnexpectedError(String),
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    pub sub: String,
    pub iat: usize,
    pub exp: usize,
}

impl Claims {
    pub fn user_id(&self) -> Result<UserId, TokenAuthError> {
        UserId::parse(&self.sub).map_err(|_| TokenAuthError::InvalidToken)
    }
}

/// Token of an `Authorization: Bearer <token>` header.
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, TokenAuthError> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(TokenAuthError::MissingToken)
}

// Create a signed token for `user` that expires after the configured TTL
pub fn generate_auth_token(user: &UserId, config: &JwtAuthConfig) -> Result<String, TokenAuthError> {
    let delta = chrono::Duration::try_seconds(config.token_ttl_in_seconds).ok_or(
        TokenAuthError::UnexpectedError("Failed to create auth token duration".to_string()),
    )?;

    let now = Utc::now();
    let exp = now
        .checked_add_signed(delta)
        .ok_or(TokenAuthError::UnexpectedError(
            "Duration out of range".to_string(),
        ))?
        .timestamp();

    let to_usize = |timestamp: i64| -> Result<usize, TokenAuthError> {
        timestamp
            .try_into()
            .map_err(|_| TokenAuthError::UnexpectedError("Failed to cast i64 to usize".to_string()))
    };

    let claims = Claims {
        sub: user.to_string(),
        iat: to_usize(now.timestamp())?,
        exp: to_usize(exp)?,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.as_bytes()),
    )
    .map_err(TokenAuthError::TokenError)
}

// Check the signature and expiry of a token using the JWT secret
pub fn validate_auth_token(token: &str, config: &JwtAuthConfig) -> Result<Claims, TokenAuthError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(TokenAuthError::TokenError)
}
