use postline_core::{Email, Password, ResetCode, UserStore, UserStoreError};

/// Error types for set new password use case
#[derive(Debug, thiserror::Error)]
pub enum SetNewPasswordError {
    #[error("Unknown email")]
    UnknownEmail,
    #[error("Confirmation code is incorrect")]
    InvalidCode,
    #[error("User store error: {0}")]
    UserStoreError(#[from] UserStoreError),
}

/// Set new password use case - applies a mailed reset code.
///
/// The stored code is rotated on every attempt, matching or not, so a code can
/// be tried at most once.
pub struct SetNewPasswordUseCase<U>
where
    U: UserStore,
{
    user_store: U,
}

impl<U> SetNewPasswordUseCase<U>
where
    U: UserStore,
{
    pub fn new(user_store: U) -> Self {
        Self { user_store }
    }

    /// `code` is `None` when the client sent something that is not a code at
    /// all. It is treated like any other mismatch.
    #[tracing::instrument(name = "SetNewPasswordUseCase::execute", skip(self, new_password, code))]
    pub async fn execute(
        &self,
        email: Email,
        new_password: Password,
        code: Option<ResetCode>,
    ) -> Result<(), SetNewPasswordError> {
        let user = match self.user_store.get_user_by_email(&email).await {
            Err(UserStoreError::UserNotFound) => return Err(SetNewPasswordError::UnknownEmail),
            other => other?,
        };

        let next_code = rotate(code.as_ref(), user.reset_code.as_ref());

        let Some(code) = code.filter(|code| user.reset_code_matches(code)) else {
            self.user_store.set_reset_code(&user.id, next_code).await?;
            tracing::warn!(user_id = %user.id, "Reset code mismatch, code rotated");
            return Err(SetNewPasswordError::InvalidCode);
        };

        match self
            .user_store
            .set_new_password(&user.id, &code, new_password, next_code)
            .await
        {
            Err(UserStoreError::ResetCodeMismatch) => {
                tracing::warn!(user_id = %user.id, "Reset code consumed concurrently");
                Err(SetNewPasswordError::InvalidCode)
            }
            other => Ok(other?),
        }
    }
}

/// A fresh code that differs from both the submitted and the stored code.
fn rotate(submitted: Option<&ResetCode>, stored: Option<&ResetCode>) -> ResetCode {
    loop {
        let code = ResetCode::new();
        if Some(&code) != submitted && Some(&code) != stored {
            return code;
        }
    }
}
