use std::sync::Arc;

use lettre::message::{Mailbox, Message, header::ContentType};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Tokio1Executor};
use postline_core::{Email, EmailClient};
use secrecy::ExposeSecret;
use thiserror::Error;

use crate::config::EmailClientSetting;

#[derive(Debug, Error)]
pub enum SmtpEmailClientError {
    #[error("Invalid sender address: {0}")]
    InvalidSender(String),
    #[error("Failed to configure SMTP transport: {0}")]
    Transport(String),
}

/// HTML email over SMTP with STARTTLS.
///
/// With an empty SMTP host the client runs in no-op mode and only logs what
/// it would have sent.
#[derive(Clone)]
pub struct SmtpEmailClient {
    transport: Option<Arc<AsyncSmtpTransport<Tokio1Executor>>>,
    sender: Mailbox,
}

impl SmtpEmailClient {
    pub fn new(setting: &EmailClientSetting) -> Result<Self, SmtpEmailClientError> {
        let sender = setting
            .sender
            .parse::<Mailbox>()
            .map_err(|e| SmtpEmailClientError::InvalidSender(e.to_string()))?;

        let transport = if setting.smtp_host.trim().is_empty() {
            tracing::warn!("SMTP host not configured; email client will operate in no-op mode");
            None
        } else {
            let builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&setting.smtp_host)
                .map_err(|e| SmtpEmailClientError::Transport(e.to_string()))?
                .port(setting.smtp_port);

            let builder = if setting.username.is_empty() {
                builder
            } else {
                builder.credentials(Credentials::new(
                    setting.username.clone(),
                    setting.password.expose_secret().clone(),
                ))
            };

            Some(Arc::new(builder.build()))
        };

        Ok(Self { transport, sender })
    }

    pub fn is_enabled(&self) -> bool {
        self.transport.is_some()
    }
}

#[async_trait::async_trait]
impl EmailClient for SmtpEmailClient {
    #[tracing::instrument(name = "Sending email", skip_all)]
    async fn send_email(
        &self,
        recipient: &Email,
        subject: &str,
        content: &str,
    ) -> Result<(), String> {
        let Some(transport) = &self.transport else {
            tracing::info!(
                subject,
                recipient = recipient.as_ref(),
                "Email client running in no-op mode; skipping actual send"
            );
            return Ok(());
        };

        let to = recipient.as_ref().parse::<Mailbox>().map_err(|e| e.to_string())?;
        let message = Message::builder()
            .from(self.sender.clone())
            .to(to)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(content.to_owned())
            .map_err(|e| e.to_string())?;

        transport.send(message).await.map_err(|e| e.to_string())?;
        tracing::info!(subject, "Email sent");
        Ok(())
    }
}
