use axum::{Json, extract::State, response::IntoResponse};
use postline_application::ForgotPasswordUseCase;
use postline_core::{Email, EmailClient, UserStore};
use serde::{Deserialize, Serialize};

use super::error::ApiError;
use super::extract::{ApiJson, present};

#[derive(Clone)]
pub struct PasswordResetState<U, E> {
    pub user_store: U,
    pub email_client: E,
}

impl<U, E> PasswordResetState<U, E> {
    pub fn new(user_store: U, email_client: E) -> Self {
        Self {
            user_store,
            email_client,
        }
    }
}

#[derive(Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: String,
}

#[tracing::instrument(name = "Forgot password", skip_all)]
pub async fn forgot_password<U, E>(
    State(state): State<PasswordResetState<U, E>>,
    ApiJson(request): ApiJson<ForgotPasswordRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
    E: EmailClient + Clone + 'static,
{
    let email = present(request.email)
        .ok_or_else(|| ApiError::InvalidInput("Please enter the email!".to_owned()))?;
    let email = Email::parse(&email)?;

    ForgotPasswordUseCase::new(state.user_store, state.email_client)
        .execute(email)
        .await?;

    Ok(Json(SuccessResponse {
        success: "A code has been sent to your email. Please enter code, email and new password in the follow up request API.".to_owned(),
    }))
}
