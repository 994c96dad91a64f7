use axum::{extract::State, http::StatusCode, response::IntoResponse};
use postline_application::RegisterUseCase;
use postline_core::{Email, NewUser, Password, UserStore, Username};
use secrecy::Secret;
use serde::{Deserialize, Serialize};

use super::error::ApiError;
use super::extract::{ApiJson, present};
use crate::auth::{AuthState, generate_auth_token};

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Body returned by register and login.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub success: String,
    pub username: String,
    pub token: String,
}

#[tracing::instrument(name = "Register", skip_all)]
pub async fn register<U>(
    State(state): State<AuthState<U>>,
    ApiJson(request): ApiJson<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
{
    let (Some(name), Some(email), Some(username), Some(password)) = (
        present(request.name),
        present(request.email),
        present(request.username),
        request.password.filter(|p| !p.is_empty()),
    ) else {
        return Err(ApiError::InvalidInput(
            "Please enter all fields including name, email, username and password".to_owned(),
        ));
    };

    let user = NewUser::new(
        &name,
        Email::parse(&email)?,
        Username::parse(&username)?,
        Password::try_from(Secret::from(password))?,
    )?;

    let user = RegisterUseCase::new(state.user_store).execute(user).await?;
    let token = generate_auth_token(&user.id, &state.jwt)?;

    Ok((
        StatusCode::CREATED,
        axum::Json(AuthResponse {
            success: "User registered".to_owned(),
            username: user.username.as_ref().to_owned(),
            token,
        }),
    ))
}
