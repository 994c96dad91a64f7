use axum::{Json, extract::State, response::IntoResponse};
use postline_application::{LoginIdentifier, LoginUseCase};
use postline_core::{Email, Password, UserStore, Username};
use secrecy::Secret;
use serde::Deserialize;

use super::error::ApiError;
use super::extract::{ApiJson, present};
use super::register::AuthResponse;
use crate::auth::{AuthState, generate_auth_token};

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

#[tracing::instrument(name = "Login", skip_all)]
pub async fn login<U>(
    State(state): State<AuthState<U>>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
{
    let identifier = login_identifier(request.email, request.username)?;

    let password = request
        .password
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ApiError::InvalidInput("Please enter your password".to_owned()))?;
    let password = Password::try_from(Secret::from(password))?;

    let user = LoginUseCase::new(state.user_store)
        .execute(identifier, password)
        .await?;
    let token = generate_auth_token(&user.id, &state.jwt)?;

    Ok(Json(AuthResponse {
        success: "Logged in".to_owned(),
        username: user.username.as_ref().to_owned(),
        token,
    }))
}

/// A malformed identifier only fails the request when it is the only one
/// given. Next to a valid one it is treated as a lookup miss.
fn login_identifier(
    email: Option<String>,
    username: Option<String>,
) -> Result<LoginIdentifier, ApiError> {
    let email = present(email).map(|email| Email::parse(&email));
    let username = present(username).map(|username| Username::parse(&username));

    let (email, username) = match (email, username) {
        (Some(Err(e)), None | Some(Err(_))) | (None, Some(Err(e))) => return Err(e.into()),
        (email, username) => (email.and_then(Result::ok), username.and_then(Result::ok)),
    };

    LoginIdentifier::from_parts(email, username).ok_or_else(|| {
        ApiError::InvalidInput("Please enter Email(or username) and password".to_owned())
    })
}
