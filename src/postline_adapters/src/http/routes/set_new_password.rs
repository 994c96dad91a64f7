use axum::{Json, extract::State, response::IntoResponse};
use postline_application::SetNewPasswordUseCase;
use postline_core::{Email, Password, ResetCode, UserStore};
use secrecy::Secret;
use serde::Deserialize;

use super::error::ApiError;
use super::extract::{ApiJson, present};
use super::forgot_password::SuccessResponse;

/// Clients send the code as a JSON number or as a string. Anything else is
/// kept so it can be rejected as a wrong code.
#[derive(Deserialize)]
#[serde(untagged)]
pub enum CodeInput {
    Number(serde_json::Number),
    Text(String),
    Other(serde_json::Value),
}

impl CodeInput {
    /// `None` for a blank code. `Some(None)` for a code that can never match.
    fn into_code(self) -> Option<Option<ResetCode>> {
        match self {
            CodeInput::Number(number) => Some(number_code(&number)),
            CodeInput::Text(text) => {
                present(Some(text)).map(|text| ResetCode::parse(&text).ok())
            }
            CodeInput::Other(_) => Some(None),
        }
    }
}

fn number_code(number: &serde_json::Number) -> Option<ResetCode> {
    if let Some(value) = number.as_u64() {
        return u32::try_from(value).ok().map(ResetCode::from);
    }
    number
        .as_f64()
        .filter(|value| value.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(value))
        .map(|value| ResetCode::from(value as u32))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetNewPasswordRequest {
    pub email: Option<String>,
    pub new_password: Option<String>,
    pub code: Option<CodeInput>,
}

/// A code that is present but unreadable counts as a wrong code: it rotates
/// the stored code and is answered with 401.
#[tracing::instrument(name = "Set new password", skip_all)]
pub async fn set_new_password<U>(
    State(user_store): State<U>,
    ApiJson(request): ApiJson<SetNewPasswordRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
{
    let (Some(email), Some(new_password), Some(code)) = (
        present(request.email),
        request.new_password.filter(|p| !p.is_empty()),
        request.code.and_then(CodeInput::into_code),
    ) else {
        return Err(ApiError::InvalidInput("Please enter all fields!".to_owned()));
    };

    let email = Email::parse(&email)?;
    let new_password = Password::try_from(Secret::from(new_password))?;

    SetNewPasswordUseCase::new(user_store)
        .execute(email, new_password, code)
        .await?;

    Ok(Json(SuccessResponse {
        success: "Password updated successfully!".to_owned(),
    }))
}
