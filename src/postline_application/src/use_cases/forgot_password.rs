use askama::Template;
use postline_core::{Email, EmailClient, ResetCode, UserStore, UserStoreError};
use tracing::Instrument;

pub const RESET_CODE_SUBJECT: &str = "Postline password reset code";

/// HTML body of the reset code email
#[derive(Template)]
#[template(path = "reset_code.html")]
pub struct ResetCodeEmail<'a> {
    pub first_name: &'a str,
    pub code: ResetCode,
}

/// Error types for forgot password use case
#[derive(Debug, thiserror::Error)]
pub enum ForgotPasswordError {
    #[error("Unknown email")]
    UnknownEmail,
    #[error("User store error: {0}")]
    UserStoreError(#[from] UserStoreError),
}

/// Forgot password use case - stores a fresh reset code and mails it to the user.
///
/// The email is sent on a background task. Delivery failures are logged and
/// never reach the caller.
pub struct ForgotPasswordUseCase<U, E>
where
    U: UserStore,
    E: EmailClient,
{
    user_store: U,
    email_client: E,
}

impl<U, E> ForgotPasswordUseCase<U, E>
where
    U: UserStore,
    E: EmailClient + Clone + 'static,
{
    pub fn new(user_store: U, email_client: E) -> Self {
        Self {
            user_store,
            email_client,
        }
    }

    #[tracing::instrument(name = "ForgotPasswordUseCase::execute", skip(self))]
    pub async fn execute(&self, email: Email) -> Result<(), ForgotPasswordError> {
        let user = match self.user_store.get_user_by_email(&email).await {
            Err(UserStoreError::UserNotFound) => return Err(ForgotPasswordError::UnknownEmail),
            other => other?,
        };

        let code = ResetCode::new();
        self.user_store.set_reset_code(&user.id, code).await?;

        let content = ResetCodeEmail {
            first_name: user.first_name(),
            code,
        }
        .render();

        let content = match content {
            Ok(content) => content,
            Err(e) => {
                tracing::error!(error = %e, "Failed to render reset code email");
                return Ok(());
            }
        };

        let email_client = self.email_client.clone();
        tokio::spawn(
            async move {
                if let Err(e) = email_client
                    .send_email(&email, RESET_CODE_SUBJECT, &content)
                    .await
                {
                    tracing::error!(error = %e, "Failed to send reset code email");
                }
            }
            .in_current_span(),
        );

        Ok(())
    }
}
