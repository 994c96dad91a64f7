use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use postline_core::{Email, UserId, UserStore, UserStoreError, Username};

use super::jwt::{JwtAuthConfig, TokenAuthError, extract_bearer_token, validate_auth_token};
use crate::http::routes::ApiError;

/// Identity of the caller, attached to the request extensions by [`require_auth`].
#[derive(Debug, Clone, PartialEq)]
pub struct AuthenticatedUser {
    pub id: UserId,
    pub name: String,
    pub username: Username,
    pub email: Email,
}

#[derive(Clone)]
pub struct AuthState<U> {
    pub user_store: U,
    pub jwt: JwtAuthConfig,
}

impl<U> AuthState<U> {
    pub fn new(user_store: U, jwt: JwtAuthConfig) -> Self {
        Self { user_store, jwt }
    }
}

/// Rejects the request unless it carries a valid bearer token whose subject
/// is still a stored user.
#[tracing::instrument(name = "Require auth", skip_all)]
pub async fn require_auth<U>(
    State(state): State<AuthState<U>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError>
where
    U: UserStore + Clone + 'static,
{
    let token = extract_bearer_token(request.headers())?;

    let user_id = validate_auth_token(token, &state.jwt)
        .map_err(|e| {
            tracing::debug!(error = %e, "Token rejected");
            TokenAuthError::InvalidToken
        })?
        .user_id()?;

    let user = match state.user_store.get_user(&user_id).await {
        Ok(user) => user,
        Err(UserStoreError::UserNotFound) => return Err(ApiError::Unauthorized),
        Err(e) => return Err(e.into()),
    };

    request.extensions_mut().insert(AuthenticatedUser {
        id: user.id,
        name: user.name,
        username: user.username,
        email: user.email,
    });

    Ok(next.run(request).await)
}
